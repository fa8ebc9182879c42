use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::{PrajnaError, Result};

/// The externally persisted user record.
///
/// Read once when a session starts and never refreshed. `uid` doubles as the
/// session identity sent with every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserIdentity {
    pub fn new(uid: impl Into<String>, email: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
        }
    }

    /// Parse a user record; unknown fields are ignored
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PrajnaError::Identity(format!("malformed user record: {}", e)))
    }

    /// Load the user record from disk. A missing file means no identity yet.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_ignores_extra_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("user.json");
        std::fs::write(
            &path,
            r#"{"uid": "u-42", "email": "reader@example.com", "displayName": "Reader"}"#,
        )
        .unwrap();

        let identity = UserIdentity::load(&path).unwrap().unwrap();
        assert_eq!(identity.uid, "u-42");
        assert_eq!(identity.email.as_deref(), Some("reader@example.com"));
    }

    #[test]
    fn test_missing_file_is_absent_identity() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.json");
        assert_eq!(UserIdentity::load(&path).unwrap(), None);
    }

    #[test]
    fn test_email_optional_and_malformed_rejected() {
        assert_eq!(
            UserIdentity::from_json(r#"{"uid": "abc"}"#).unwrap(),
            UserIdentity::new("abc", None)
        );
        assert!(matches!(
            UserIdentity::from_json("[]"),
            Err(PrajnaError::Identity(_))
        ));
    }
}
