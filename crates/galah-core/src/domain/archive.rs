//! Archive formats accepted for upload.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// アップロードされたアーカイブの形式
///
/// 拡張子のみで判定します（中身は見ない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchiveFormat {
    /// `.tar.gz`
    TarGz,
    /// `.zip`
    Zip,
}

impl ArchiveFormat {
    /// ファイル名の拡張子から形式を判定
    ///
    /// `.tar.gz` と `.zip` 以外は `None`。大文字小文字は区別します。
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        if name.ends_with(".tar.gz") {
            Some(Self::TarGz)
        } else if name.ends_with(".zip") {
            Some(Self::Zip)
        } else {
            None
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::TarGz => ".tar.gz",
            Self::Zip => ".zip",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TarGz => f.write_str("tar.gz"),
            Self::Zip => f.write_str("zip"),
        }
    }
}
