//! File-backed collaborators for the sync runner.
//!
//! The CRM feed and the CMS collection are read from JSON exports; create and
//! update payloads are written to an outbox directory, one file per event:
//! - `create-<eventId>.json`: the new event document
//! - `update-<eventId>.json`: the updated document, with the CMS node `_id`

pub mod reader;
pub mod writer;

pub use reader::JsonFileSource;
pub use writer::DirectorySink;
