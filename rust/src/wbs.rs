//! Loading the WBS definition document.
//!
//! The document is a JSON object whose `wbs_elements` array holds one entry
//! per task; unknown fields are ignored.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::{Commitment, WbsTask};

#[derive(Error, Debug)]
pub enum WbsError {
    #[error("Failed to read WBS document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid WBS document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parsed WBS definition.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WbsDocument {
    #[serde(default)]
    pub wbs_elements: Vec<WbsTask>,
}

impl WbsDocument {
    pub fn from_json_str(text: &str) -> Result<Self, WbsError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, WbsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| WbsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Non-negotiable items.
    pub fn locked_tasks(&self) -> impl Iterator<Item = &WbsTask> {
        self.wbs_elements.iter().filter(|t| !t.is_negotiable)
    }

    /// Locked items expressed as commitments at their locked duration and
    /// cost. Used to compute the baseline timeline when a session starts.
    pub fn baseline_commitments(&self) -> Vec<Commitment> {
        self.locked_tasks()
            .map(|t| Commitment {
                wbs_item_id: t.id.clone(),
                duration: Some(t.locked_duration),
                cost: Some(t.locked_cost.unwrap_or(0.0)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "project": "Nytt sykehus",
        "wbs_elements": [
            {"id": "1.1", "name": "Grunnarbeid", "locked_duration": 30, "locked_cost": 1000.0},
            {"id": "1.2", "dependencies": ["1.1"], "locked_duration": 45},
            {"id": "1.3.1", "dependencies": ["1.2"], "is_negotiable": true,
             "baseline_duration": 60, "baseline_cost": 5000.0, "color": "blue"}
        ]
    }"#;

    #[test]
    fn test_parse_document() {
        let doc = WbsDocument::from_json_str(SAMPLE).unwrap();
        assert_eq!(doc.wbs_elements.len(), 3);

        let negotiable = &doc.wbs_elements[2];
        assert!(negotiable.is_negotiable);
        assert_eq!(negotiable.baseline_duration, 60);
        assert_eq!(negotiable.dependencies, vec!["1.2"]);
        assert_eq!(doc.wbs_elements[0].name.as_deref(), Some("Grunnarbeid"));
    }

    #[test]
    fn test_baseline_commitments_cover_locked_items() {
        let doc = WbsDocument::from_json_str(SAMPLE).unwrap();
        let commitments = doc.baseline_commitments();

        assert_eq!(commitments.len(), 2);
        assert_eq!(commitments[0], Commitment {
            wbs_item_id: "1.1".to_string(),
            duration: Some(30),
            cost: Some(1000.0),
        });
        assert_eq!(commitments[1].cost, Some(0.0));
    }

    #[test]
    fn test_missing_elements_is_empty_document() {
        let doc = WbsDocument::from_json_str("{}").unwrap();
        assert!(doc.wbs_elements.is_empty());
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = WbsDocument::from_json_str("{\"wbs_elements\": [").unwrap_err();
        assert!(matches!(err, WbsError::Parse(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let doc = WbsDocument::from_path(file.path()).unwrap();
        assert_eq!(doc.locked_tasks().count(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = WbsDocument::from_path("/nonexistent/wbs.json").unwrap_err();
        assert!(matches!(err, WbsError::Io { .. }));
    }
}
