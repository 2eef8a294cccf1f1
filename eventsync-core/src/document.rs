//! The event document exchanged with the CMS.
//!
//! Properties are either localized (`{"en-US": .., "ar": ..}`) or invariant
//! (`{"$invariant": ..}`). The same type is used for create payloads, update
//! payloads and documents read back from the CMS, so every property is
//! optional on input. A property read back in an unexpected shape falls back
//! to its default instead of failing the whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::blocks::{BlockList, Link};
use crate::locale::Localized;
use crate::models::null_as_default;

/// Content type alias of event pages.
pub const EVENT_CONTENT_TYPE: &str = "event";

/// A property value that does not vary by culture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Invariant<T: Default> {
    #[serde(
        rename = "$invariant",
        default,
        deserialize_with = "null_as_default",
        bound(deserialize = "T: Deserialize<'de> + Default")
    )]
    pub value: T,
}

impl<T: Default> Invariant<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

impl<T: Default> From<T> for Invariant<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDocument {
    /// Only present on create payloads
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub content_type_alias: Option<String>,
    /// Only present on create payloads placed under a parent node
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub parent_id: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub name: Localized<String>,
    #[serde(deserialize_with = "lenient")]
    pub title: Localized<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Localized<String>,
    #[serde(deserialize_with = "lenient")]
    pub meta_title: Localized<String>,
    #[serde(deserialize_with = "lenient")]
    pub meta_description: Localized<String>,

    #[serde(deserialize_with = "lenient")]
    pub start_date: Invariant<String>,
    #[serde(deserialize_with = "lenient")]
    pub end_date: Invariant<String>,
    #[serde(deserialize_with = "lenient")]
    pub category: Invariant<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub organiser_name: Invariant<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub organiser_website: Option<Invariant<Vec<Link>>>,
    #[serde(deserialize_with = "lenient")]
    pub social_networks: Invariant<BlockList>,
    /// Written as a string; numbers are accepted on read
    #[serde(deserialize_with = "invariant_text")]
    pub event_id: Invariant<String>,
    #[serde(deserialize_with = "invariant_text")]
    pub last_updated_date: Invariant<String>,
    #[serde(deserialize_with = "lenient")]
    pub location: Invariant<String>,
    #[serde(deserialize_with = "lenient")]
    pub venues: Invariant<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub audience: Invariant<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub sectors: Invariant<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub page_blocks: Option<Localized<BlockList>>,
}

/// Reads a property, falling back to the default when its shape is unexpected.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable CMS property, using default");
        T::default()
    }))
}

/// Reads an invariant scalar as text. Numbers keep their JSON spelling.
fn invariant_text<'de, D>(deserializer: D) -> Result<Invariant<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let text = match value.get("$invariant") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => {
            tracing::warn!(value = %other, "unexpected invariant value, using empty text");
            String::new()
        }
    };
    Ok(Invariant::new(text))
}

impl EventDocument {
    /// True when the payload is addressed under a parent node.
    pub fn has_parent(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Checks layout/content closure of every block list in the document.
    pub fn blocks_closed(&self) -> bool {
        let social = self.social_networks.value.is_closed();
        let pages = self
            .page_blocks
            .as_ref()
            .map(|pages| pages.iter().all(|(_, list)| list.is_closed()))
            .unwrap_or(true);
        social && pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Locale;
    use serde_json::json;

    #[test]
    fn test_invariant_wire_shape() {
        let value = serde_json::to_value(Invariant::new("Dubai".to_string())).unwrap();
        assert_eq!(value, json!({ "$invariant": "Dubai" }));
    }

    #[test]
    fn test_invariant_null_becomes_default() {
        let parsed: Invariant<Vec<String>> =
            serde_json::from_value(json!({ "$invariant": null })).unwrap();
        assert!(parsed.value.is_empty());
    }

    #[test]
    fn test_optional_keys_omitted() {
        let doc = EventDocument::default();
        let value = serde_json::to_value(&doc).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("contentTypeAlias"));
        assert!(!obj.contains_key("parentId"));
        assert!(!obj.contains_key("organiserWebsite"));
        assert!(!obj.contains_key("pageBlocks"));
        assert!(obj.contains_key("eventId"));
    }

    #[test]
    fn test_read_partial_cms_document() {
        let doc: EventDocument = serde_json::from_value(json!({
            "eventId": { "$invariant": "42" },
            "lastUpdatedDate": { "$invariant": "\"2024-05-01\"" },
            "title": { "en-US": "Expo", "ar": "Expo" },
            "unknownProperty": { "$invariant": 1 }
        }))
        .unwrap();
        assert_eq!(doc.event_id.value, "42");
        assert_eq!(doc.title.get(Locale::Ar).map(String::as_str), Some("Expo"));
        assert!(doc.page_blocks.is_none());
        assert!(doc.blocks_closed());
    }

    #[test]
    fn test_unexpected_property_shapes_fall_back() {
        let doc: EventDocument = serde_json::from_value(json!({
            "eventId": { "$invariant": 42 },
            "lastUpdatedDate": { "$invariant": "\"2024-05-01\"" },
            "audience": { "$invariant": "Trade" },
            "title": { "en-US": null },
            "organiserWebsite": { "$invariant": [ { "target": null, "url": "https://acme.example" } ] },
            "socialNetworks": { "$invariant": "none" }
        }))
        .unwrap();
        assert_eq!(doc.event_id.value, "42");
        assert_eq!(doc.last_updated_date.value, "\"2024-05-01\"");
        assert!(doc.audience.value.is_empty());
        assert!(doc.title.is_empty());
        assert!(doc.social_networks.value.is_empty());

        let links = doc.organiser_website.unwrap().value;
        assert_eq!(links[0].target, "");
        assert_eq!(links[0].url, "https://acme.example");
    }

    #[test]
    fn test_malformed_page_blocks_read_as_absent() {
        let doc: EventDocument = serde_json::from_value(json!({
            "eventId": { "$invariant": "7" },
            "pageBlocks": { "en-US": { "contentData": [ { "contentTypeKey": "x" } ] } }
        }))
        .unwrap();
        assert_eq!(doc.event_id.value, "7");
        assert!(doc.page_blocks.is_none());
    }
}
