//! SubmissionStore port - 提出物ストレージ
//!
//! ロケーション文字列のスキームで複数バックエンドを見分けます。
//! 現在の実装は FileStore（`file://`）のみ。
//!
//! # 設計原則
//! - `can_handle` は純粋関数（文字列のみ）
//! - `load` はパスを返すだけで、存在確認はしない
//! - ログ・リトライは呼び出し側の責務

use crate::domain::errors::StoreError;
use crate::domain::ids::SubmissionId;
use crate::domain::submission::{Stored, Submission};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait SubmissionStore: Send + Sync {
    /// ロケーション文字列のプレフィックス（例: `file://`）
    fn scheme(&self) -> &'static str;

    /// このバックエンドが作ったロケーションか
    fn can_handle(&self, location: &str) -> bool {
        location.starts_with(self.scheme())
    }

    /// アーカイブを展開して保存
    ///
    /// `id` が `None` なら新しい id を割り当て、`Stored::id` で返します。
    fn store(
        &self,
        id: Option<SubmissionId>,
        archive: &Path,
        overwrite: bool,
    ) -> Result<Stored, StoreError>;

    /// レコードの `testables` からパスを取り出す
    fn load(&self, submission: &Submission) -> Result<PathBuf, StoreError>;

    /// `store` してレコードに id とロケーションを書き戻す
    fn store_submission(
        &self,
        submission: &mut Submission,
        archive: &Path,
        overwrite: bool,
    ) -> Result<String, StoreError> {
        let stored = self.store(submission.id.clone(), archive, overwrite)?;
        stored.apply_to(submission);
        Ok(stored.location)
    }
}

/// AsyncSubmissionStore は async な Web 層向けの SubmissionStore
///
/// ブロッキング処理を executor 上で走らせないためのもの。
/// 実装は `impls::blocking::SpawnBlocking`。
#[async_trait]
pub trait AsyncSubmissionStore: Send + Sync {
    fn can_handle(&self, location: &str) -> bool;

    async fn store(
        &self,
        id: Option<SubmissionId>,
        archive: PathBuf,
        overwrite: bool,
    ) -> Result<Stored, StoreError>;

    async fn load(&self, submission: &Submission) -> Result<PathBuf, StoreError>;
}
