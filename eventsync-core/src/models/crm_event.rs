use serde::{Deserialize, Serialize};
use std::fmt;

use super::null_as_default;
use super::social::{SocialChannel, SocialMedia};

/// Status value of events that are live on the CRM side.
pub const ONLINE_STATUS: &str = "online";

/// An event record as exported by the CRM feed.
///
/// Every field except `eventId` is optional on the wire; missing values
/// (or explicit nulls) become empty strings and lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CrmEvent {
    pub event_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    /// Rich text (HTML) description
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(deserialize_with = "null_as_default")]
    pub start_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub end_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub organiser_name: String,
    pub organiser_website: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub social_media: SocialMedia,
    #[serde(deserialize_with = "null_as_default")]
    pub venues: Vec<String>,
    pub audience: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub sectors: Vec<String>,
    pub event_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    /// Freshness marker; the feed sometimes wraps it in literal quotes
    #[serde(deserialize_with = "null_as_default")]
    pub last_updated_date: String,
}

impl CrmEvent {
    pub fn new(event_id: u64, title: impl Into<String>) -> Self {
        Self {
            event_id,
            title: title.into(),
            status: ONLINE_STATUS.to_string(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_organiser(mut self, name: impl Into<String>, website: Option<&str>) -> Self {
        self.organiser_name = name.into();
        self.organiser_website = website.map(str::to_string);
        self
    }

    pub fn with_social(mut self, channel: SocialChannel, url: impl Into<String>) -> Self {
        self.social_media.set(channel, url);
        self
    }

    pub fn with_venues(mut self, venues: Vec<String>) -> Self {
        self.venues = venues;
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_sectors(mut self, sectors: Vec<String>) -> Self {
        self.sectors = sectors;
        self
    }

    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_last_updated(mut self, marker: impl Into<String>) -> Self {
        self.last_updated_date = marker.into();
        self
    }

    /// Identity as used by the CMS (string form of the numeric id).
    pub fn cms_id(&self) -> String {
        self.event_id.to_string()
    }

    pub fn is_online(&self) -> bool {
        self.status.eq_ignore_ascii_case(ONLINE_STATUS)
    }

    /// Organiser website, if present and non-blank.
    pub fn website(&self) -> Option<&str> {
        self.organiser_website
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl fmt::Display for CrmEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.event_id, self.title)
    }
}
