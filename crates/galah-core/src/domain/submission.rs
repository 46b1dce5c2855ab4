//! Submission record (owned by the record layer, consumed here).

use serde::{Deserialize, Serialize};

use super::ids::SubmissionId;

/// Submission record as seen by the store.
///
/// The record layer owns persistence; the store only reads `testables` and,
/// on upload, fills in `id` (when absent) and `testables`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SubmissionId>,

    /// Location string produced by a store backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub testables: Option<String>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: SubmissionId) -> Self {
        Self {
            id: Some(id),
            testables: None,
        }
    }

    /// `testables` を空文字列として扱う（未保存のレコード用）
    pub fn testables_or_empty(&self) -> &str {
        self.testables.as_deref().unwrap_or("")
    }
}

/// Result of a successful `store` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stored {
    /// Identifier the directory was stored under (freshly allocated if none was given).
    pub id: SubmissionId,

    /// `file://`-style location to persist on the record.
    pub location: String,
}

impl Stored {
    /// Write id and location back onto the record.
    pub fn apply_to(&self, submission: &mut Submission) {
        submission.id = Some(self.id.clone());
        submission.testables = Some(self.location.clone());
    }
}
