//! Boundaries to the systems on either side of the sync.
//!
//! Retrieval and write transport live outside this crate; these traits are
//! what the runner needs from them.

use thiserror::Error;

use crate::document::EventDocument;
use crate::models::{CmsEvent, CrmEvent};

/// Supplies the CRM event feed.
pub trait CrmSource {
    fn fetch_events(&self) -> Result<Vec<CrmEvent>, SourceError>;
}

/// Supplies the CMS event collection, each with its current document.
pub trait CmsSource {
    fn fetch_events(&self) -> Result<Vec<CmsEvent>, SourceError>;
}

/// Accepts create and update payloads.
pub trait CmsSink {
    fn create(&mut self, document: &EventDocument) -> Result<(), SinkError>;

    fn update(&mut self, existing: &CmsEvent, document: &EventDocument) -> Result<(), SinkError>;
}

// In-memory collections act as their own source.
impl CrmSource for Vec<CrmEvent> {
    fn fetch_events(&self) -> Result<Vec<CrmEvent>, SourceError> {
        Ok(self.clone())
    }
}

impl CmsSource for Vec<CmsEvent> {
    fn fetch_events(&self) -> Result<Vec<CmsEvent>, SourceError> {
        Ok(self.clone())
    }
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to write {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("CMS rejected event {event_id}: {reason}")]
    Rejected { event_id: String, reason: String },
}
