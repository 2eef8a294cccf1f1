use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use eventsync_core::{CmsEvent, CmsSource, CrmEvent, CrmSource, SourceError};

/// Reads a JSON array of events from disk on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read<T: DeserializeOwned>(&self) -> Result<Vec<T>, SourceError> {
        let origin = self.path.display().to_string();
        let contents = std::fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            origin: origin.clone(),
            source,
        })?;
        let events: Vec<T> = serde_json::from_str(&contents)
            .map_err(|source| SourceError::Parse { origin, source })?;
        tracing::debug!(path = %self.path.display(), count = events.len(), "read events");
        Ok(events)
    }
}

impl CrmSource for JsonFileSource {
    fn fetch_events(&self) -> Result<Vec<CrmEvent>, SourceError> {
        self.read()
    }
}

impl CmsSource for JsonFileSource {
    fn fetch_events(&self) -> Result<Vec<CmsEvent>, SourceError> {
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_crm_events() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "crm.json",
            r#"[
                {"eventId": 7, "title": "Gulfood", "venues": ["Dubai World Trade Centre"],
                 "lastUpdatedDate": "2024-01-01", "organiserWebsite": null},
                {"eventId": 8, "title": null}
            ]"#,
        );

        let source = JsonFileSource::new(path);
        let events = CrmSource::fetch_events(&source).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_id, 7);
        assert_eq!(events[0].venues, vec!["Dubai World Trade Centre"]);
        assert_eq!(events[1].title, "");
    }

    #[test]
    fn test_read_cms_events() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "cms.json",
            r#"[
                {"_id": "node-1", "name": {"en-US": "Gulfood", "ar": "Gulfood"},
                 "eventId": {"$invariant": "7"},
                 "lastUpdatedDate": {"$invariant": "\"2024-01-01\""}}
            ]"#,
        );

        let source = JsonFileSource::new(path);
        let events = CmsSource::fetch_events(&source).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id.as_deref(), Some("node-1"));
        assert_eq!(events[0].event_id(), "7");
        assert_eq!(events[0].last_updated_date(), "\"2024-01-01\"");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("missing.json"));

        let err = CrmSource::fetch_events(&source).unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_malformed_json() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "crm.json", r#"{"eventId": 1}"#);

        let err = CrmSource::fetch_events(&JsonFileSource::new(path)).unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
    }

    #[test]
    fn test_odd_cms_item_read_beside_normal_ones() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "cms.json",
            r#"[
                {"_id": "node-1", "eventId": {"$invariant": "7"},
                 "lastUpdatedDate": {"$invariant": "x"}},
                {"_id": "node-2", "eventId": {"$invariant": 8},
                 "audience": {"$invariant": "Trade"},
                 "organiserWebsite": {"$invariant": [{"target": null, "url": "https://acme.example"}]}}
            ]"#,
        );

        let events = CmsSource::fetch_events(&JsonFileSource::new(path)).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].event_id(), "8");
    }
}
