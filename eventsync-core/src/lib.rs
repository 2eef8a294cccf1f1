//! EventSync Core Library
//!
//! Event reconciliation and CMS document mapping for the venue sync.

pub mod blocks;
pub mod collab;
pub mod document;
pub mod filter;
pub mod freshness;
pub mod locale;
pub mod mapper;
pub mod models;
pub mod reconcile;
pub mod runner;
pub mod templates;
pub mod udi;

pub use blocks::{Block, BlockList, Link};
pub use collab::{CmsSink, CmsSource, CrmSource, SinkError, SourceError};
pub use document::{EventDocument, Invariant, EVENT_CONTENT_TYPE};
pub use filter::filter_by_venue;
pub use locale::{Locale, Localized};
pub use mapper::DocumentMapper;
pub use models::{CmsEvent, CrmEvent, SocialChannel, SocialMedia};
pub use reconcile::{reconcile, PendingUpdate, SyncPlan};
pub use runner::{SyncAction, SyncError, SyncFailure, SyncOptions, SyncReport, SyncRunner};
pub use templates::{NoStaticBlocks, StaticBlocks, StaticTemplate, TemplateError, TemplateSet};
pub use udi::{Udi, UdiError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
