use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::EventDocument;

/// An event content item as returned by the CMS management API.
///
/// Identity and freshness marker live inside the document as invariant
/// properties (`eventId`, `lastUpdatedDate`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CmsEvent {
    /// Content node id
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub document: EventDocument,
}

impl CmsEvent {
    pub fn new(document: EventDocument) -> Self {
        Self { id: None, document }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn event_id(&self) -> &str {
        &self.document.event_id.value
    }

    pub fn last_updated_date(&self) -> &str {
        &self.document.last_updated_date.value
    }
}

impl fmt::Display for CmsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "event {} (node {})", self.event_id(), id),
            None => write!(f, "event {}", self.event_id()),
        }
    }
}
