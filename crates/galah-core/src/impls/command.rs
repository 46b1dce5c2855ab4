//! CommandExtractor - 外部コマンドによる展開
//!
//! `dest` を作業ディレクトリにして `tar xzf <archive>` / `unzip -qq <archive>`
//! を実行します。終了コード 0 なら成功。
//!
//! # 注意
//! - 呼び出しスレッドをブロックする（タイムアウト・キャンセルなし）
//! - archive は絶対パスで渡すこと（cwd が `dest` になるため）

use crate::domain::archive::ArchiveFormat;
use crate::domain::errors::ExtractError;
use crate::ports::ArchiveExtractor;
use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CommandExtractor {
    tar: String,
    unzip: String,
}

impl CommandExtractor {
    pub fn new() -> Self {
        Self {
            tar: "tar".to_string(),
            unzip: "unzip".to_string(),
        }
    }

    /// 実行するプログラムを差し替える
    pub fn with_programs(tar: impl Into<String>, unzip: impl Into<String>) -> Self {
        Self {
            tar: tar.into(),
            unzip: unzip.into(),
        }
    }

    fn command_for<'a>(&'a self, format: ArchiveFormat, archive: &'a Path) -> (&'a str, [&'a OsStr; 2]) {
        match format {
            ArchiveFormat::TarGz => (self.tar.as_str(), [OsStr::new("xzf"), archive.as_os_str()]),
            ArchiveFormat::Zip => (self.unzip.as_str(), [OsStr::new("-qq"), archive.as_os_str()]),
        }
    }
}

impl Default for CommandExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveExtractor for CommandExtractor {
    fn extract(
        &self,
        format: ArchiveFormat,
        archive: &Path,
        dest: &Path,
    ) -> Result<(), ExtractError> {
        let (program, args) = self.command_for(format, archive);
        debug!(program, archive = %archive.display(), dest = %dest.display(), "running extraction command");

        let output = Command::new(program)
            .args(args)
            .current_dir(dest)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ExtractError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExtractError::Command {
                program: program.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
