//! ArchiveExtractor port - アーカイブ展開の抽象化
//!
//! SubmissionStore は形式判定とディレクトリ作成だけを行い、
//! 展開そのものはこの port に任せます。
//!
//! # 実装
//! - **FormatDispatch**: 形式ごとにプロセス内 extractor を選ぶ（デフォルト）
//! - **CommandExtractor**: `tar` / `unzip` を子プロセスとして実行

use crate::domain::archive::ArchiveFormat;
use crate::domain::errors::ExtractError;
use std::path::Path;

/// ArchiveExtractor はアーカイブを既存の空ディレクトリへ展開
///
/// # 契約
/// - `archive` は絶対パス
/// - `dest` は作成済み
/// - 失敗時に `dest` の後始末はしない（呼び出し側の責務）
/// - ブロッキング。タイムアウトなし
pub trait ArchiveExtractor: Send + Sync {
    fn extract(&self, format: ArchiveFormat, archive: &Path, dest: &Path)
    -> Result<(), ExtractError>;
}
