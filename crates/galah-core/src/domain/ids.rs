//! Domain identifiers (submission ids).
//!
//! # SubmissionId
//! 提出物（submission）と、その展開先ディレクトリを対応付けるキーです。
//! ディレクトリ名としてそのまま使われるため、パース時に文字種を制限します。
//!
//! ## 許可する文字
//! - `[A-Za-z0-9_-]` のみ
//! - 空文字列は不可
//!
//! これにより `..` や `/` を含む値で submission root の外に
//! 出ることはできません。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// SubmissionId のパースエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("submission id must not be empty")]
    Empty,

    #[error("submission id {0:?} contains characters outside [A-Za-z0-9_-]")]
    InvalidCharacter(String),
}

/// Identifier of a Submission (one uploaded archive).
///
/// 文字列としてシリアライズされます（例: `"507f1f77bcf86cd799439011"`）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SubmissionId(String);

impl SubmissionId {
    /// 文字列を検証して SubmissionId を作成
    pub fn parse(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        let valid = value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(IdError::InvalidCharacter(value));
        }
        Ok(Self(value))
    }

    /// 12 バイトの値から 24 文字の小文字 hex id を作成
    pub fn from_object_id_bytes(bytes: [u8; 12]) -> Self {
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Ulid> for SubmissionId {
    fn from(ulid: Ulid) -> Self {
        // ULID の Crockford base32 表現は常に許可文字のみ
        Self(ulid.to_string())
    }
}

impl FromStr for SubmissionId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SubmissionId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SubmissionId> for String {
    fn from(id: SubmissionId) -> Self {
        id.0
    }
}

impl AsRef<str> for SubmissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
