//! Errors - エラー型と分類
//!
//! - `StoreError`: SubmissionStore の操作エラー（呼び出し元へそのまま伝播）
//! - `ExtractError`: ArchiveExtractor のエラー（`StoreError::ExtractionFailure` に包まれる）
//! - `ErrorKind`: 運用上の分類（Web 層が「形式非対応」と「内部エラー」を出し分ける）

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// ErrorKind は実行エラーの分類
///
/// - Transient: 一時的なエラー（リトライ推奨）
/// - Permanent: 恒久的なエラー（入力が悪い。リトライ無意味）
/// - Infrastructure: インフラエラー（ディスク・権限・外部ツール）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transient,
    Permanent,
    Infrastructure,
}

/// StoreError は SubmissionStore の操作エラー
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("submission directory {} already exists", .path.display())]
    DirectoryConflict { path: PathBuf },

    #[error("failed to create submission directory {}", .path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to resolve archive path {}", .path.display())]
    ArchivePath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a supported archive (expected .tar.gz or .zip)", .archive.display())]
    UnsupportedFormat { archive: PathBuf },

    #[error("failed to extract {}", .archive.display())]
    ExtractionFailure {
        archive: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error("cannot open location {location:?}: not handled by this store")]
    IncompatibleLocation { location: String },

    #[error("blocking store task failed: {0}")]
    Join(String),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DirectoryConflict { .. } => ErrorKind::Permanent,
            Self::DirectoryCreation { .. } => ErrorKind::Infrastructure,
            Self::ArchivePath { .. } => ErrorKind::Infrastructure,
            Self::UnsupportedFormat { .. } => ErrorKind::Permanent,
            Self::ExtractionFailure { source, .. } => source.kind(),
            Self::IncompatibleLocation { .. } => ErrorKind::Permanent,
            Self::Join(_) => ErrorKind::Transient,
        }
    }
}

/// ExtractError は展開処理のエラー
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("i/o error during extraction")]
    Io(#[from] io::Error),

    #[error("invalid zip archive")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to launch {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Command {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("archive contained no files")]
    EmptyArchive,
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            // flate2 / tar は壊れた入力を InvalidData / UnexpectedEof で報告する
            Self::Io(e) => match e.kind() {
                io::ErrorKind::InvalidData
                | io::ErrorKind::InvalidInput
                | io::ErrorKind::UnexpectedEof => ErrorKind::Permanent,
                _ => ErrorKind::Infrastructure,
            },
            Self::Zip(zip::result::ZipError::Io(_)) => ErrorKind::Infrastructure,
            Self::Zip(_) => ErrorKind::Permanent,
            Self::Spawn { .. } => ErrorKind::Infrastructure,
            Self::Command { .. } => ErrorKind::Permanent,
            Self::EmptyArchive => ErrorKind::Permanent,
        }
    }
}
