//! StoreConfig - FileStore の設定
//!
//! submission root はプロセス全体の定数ではなく、構築時に渡す値です。
//! テストでは一時ディレクトリを root にします。
//!
//! # 読み込み元
//! - `StoreConfig::from_env()`: 環境変数（未設定ならデフォルト）
//! - `StoreConfig::from_json()`: JSON（CLI の `--config`）

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

pub const DEFAULT_SUBMISSION_ROOT: &str = "/var/local/galah-web/submissions";

pub const ENV_SUBMISSION_ROOT: &str = "GALAH_SUBMISSION_ROOT";
pub const ENV_EXTRACTION: &str = "GALAH_EXTRACTION";
pub const ENV_CLEANUP: &str = "GALAH_CLEANUP";

/// ConfigError は設定の読み込み・検証エラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("submission root must be an absolute path, got {}", .0.display())]
    RelativeRoot(PathBuf),

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("invalid config document")]
    Parse(#[from] serde_json::Error),
}

/// 展開の方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    /// flate2 / tar / zip クレートでプロセス内展開
    #[default]
    InProcess,
    /// `tar` / `unzip` コマンドを子プロセスで実行
    Command,
}

impl FromStr for ExtractionMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_process" => Ok(Self::InProcess),
            "command" => Ok(Self::Command),
            other => Err(ConfigError::InvalidValue {
                key: ENV_EXTRACTION,
                value: other.to_string(),
            }),
        }
    }
}

/// 展開失敗時の後始末
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupPolicy {
    /// ディレクトリごと再帰的に削除
    #[default]
    Recursive,
    /// 空ディレクトリのみ削除。途中まで展開されたファイルは残る（調査用）
    EmptyOnly,
}

impl FromStr for CleanupPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recursive" => Ok(Self::Recursive),
            "empty_only" => Ok(Self::EmptyOnly),
            other => Err(ConfigError::InvalidValue {
                key: ENV_CLEANUP,
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub submission_root: PathBuf,

    #[serde(default)]
    pub extraction: ExtractionMode,

    #[serde(default)]
    pub cleanup: CleanupPolicy,
}

impl StoreConfig {
    pub fn new(submission_root: impl Into<PathBuf>) -> Self {
        Self {
            submission_root: submission_root.into(),
            extraction: ExtractionMode::default(),
            cleanup: CleanupPolicy::default(),
        }
    }

    pub fn with_extraction(mut self, extraction: ExtractionMode) -> Self {
        self.extraction = extraction;
        self
    }

    pub fn with_cleanup(mut self, cleanup: CleanupPolicy) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// 環境変数から読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        let root = load_or_default(ENV_SUBMISSION_ROOT, DEFAULT_SUBMISSION_ROOT);
        let extraction = load_or_default(ENV_EXTRACTION, "in_process").parse()?;
        let cleanup = load_or_default(ENV_CLEANUP, "recursive").parse()?;

        let config = Self {
            submission_root: PathBuf::from(root),
            extraction,
            cleanup,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.submission_root.is_absolute() {
            return Err(ConfigError::RelativeRoot(self.submission_root.clone()));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMISSION_ROOT)
    }
}

fn load_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}
