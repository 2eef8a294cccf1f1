use serde::Serialize;
use std::path::{Path, PathBuf};

use eventsync_core::{CmsEvent, CmsSink, EventDocument, SinkError};

/// Writes each payload as pretty JSON into an outbox directory.
///
/// The directory is created on first write. Existing payload files for the
/// same event are overwritten.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Payload files written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write<T: Serialize>(&mut self, file_name: String, payload: &T) -> Result<(), SinkError> {
        let json = serde_json::to_string_pretty(payload)?;
        let path = self.dir.join(file_name);
        let target = path.display().to_string();

        std::fs::create_dir_all(&self.dir).map_err(|source| SinkError::Write {
            target: self.dir.display().to_string(),
            source,
        })?;
        std::fs::write(&path, json).map_err(|source| SinkError::Write { target, source })?;

        tracing::debug!(path = %path.display(), "wrote payload");
        self.written.push(path);
        Ok(())
    }
}

impl CmsSink for DirectorySink {
    fn create(&mut self, document: &EventDocument) -> Result<(), SinkError> {
        let event_id = checked_event_id(&document.event_id.value)?;
        self.write(format!("create-{}.json", event_id), document)
    }

    fn update(&mut self, existing: &CmsEvent, document: &EventDocument) -> Result<(), SinkError> {
        let event_id = checked_event_id(&document.event_id.value)?;
        let payload = CmsEvent {
            id: existing.id.clone(),
            document: document.clone(),
        };
        self.write(format!("update-{}.json", event_id), &payload)
    }
}

/// Event ids become file names, so only plain digits are accepted.
fn checked_event_id(event_id: &str) -> Result<&str, SinkError> {
    if !event_id.is_empty() && event_id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(event_id)
    } else {
        Err(SinkError::Rejected {
            event_id: event_id.to_string(),
            reason: "event id is not numeric".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventsync_core::{CrmEvent, DocumentMapper, NoStaticBlocks};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    fn mapper() -> DocumentMapper<StdRng, NoStaticBlocks> {
        DocumentMapper::new(StdRng::seed_from_u64(3), NoStaticBlocks)
    }

    #[test]
    fn test_create_writes_payload() {
        let dir = tempdir().unwrap();
        let outbox = dir.path().join("outbox");
        let mut sink = DirectorySink::new(&outbox);

        let event = CrmEvent::new(42, "Arab Health").with_last_updated("2024-05-01");
        let document = mapper().build_document(&event, Some("1100"));
        sink.create(&document).unwrap();

        let path = outbox.join("create-42.json");
        assert_eq!(sink.written(), &[path.clone()]);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(written["parentId"], "1100");
        assert_eq!(written["eventId"]["$invariant"], "42");
        assert_eq!(written["name"]["en-US"], "Arab Health");
    }

    #[test]
    fn test_update_carries_node_id() {
        let dir = tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        let mut mapper = mapper();

        let event = CrmEvent::new(9, "GITEX");
        let existing = CmsEvent::new(mapper.build_document(&event, None)).with_id("node-9");
        let document = mapper.build_update(&event.clone().with_last_updated("x"), &existing.document);
        sink.update(&existing, &document).unwrap();

        let written: CmsEvent = serde_json::from_str(
            &std::fs::read_to_string(dir.path().join("update-9.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(written.id.as_deref(), Some("node-9"));
        assert_eq!(written.event_id(), "9");
    }

    #[test]
    fn test_rejects_non_numeric_event_id() {
        let dir = tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());

        let mut document = EventDocument::default();
        document.event_id.value = "../escape".to_string();

        let err = sink.create(&document).unwrap_err();
        assert!(matches!(err, SinkError::Rejected { .. }));
        assert!(sink.written().is_empty());
    }
}
