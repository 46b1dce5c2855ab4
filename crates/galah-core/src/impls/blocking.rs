//! SpawnBlocking - SubmissionStore を async から使うためのアダプタ
//!
//! `store` はファイルシステム操作（と外部コマンドの待ち合わせ）でブロックするので、
//! tokio の blocking pool（spawn_blocking）で実行します。
//! `load` は文字列処理だけなのでそのまま呼びます。

use crate::domain::errors::StoreError;
use crate::domain::ids::SubmissionId;
use crate::domain::submission::{Stored, Submission};
use crate::ports::{AsyncSubmissionStore, SubmissionStore};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub struct SpawnBlocking<S> {
    inner: Arc<S>,
}

impl<S> SpawnBlocking<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> Clone for SpawnBlocking<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[async_trait]
impl<S: SubmissionStore + 'static> AsyncSubmissionStore for SpawnBlocking<S> {
    fn can_handle(&self, location: &str) -> bool {
        self.inner.can_handle(location)
    }

    async fn store(
        &self,
        id: Option<SubmissionId>,
        archive: PathBuf,
        overwrite: bool,
    ) -> Result<Stored, StoreError> {
        let inner = self.inner.clone();
        tokio::task::spawn_blocking(move || inner.store(id, &archive, overwrite))
            .await
            .map_err(|e| StoreError::Join(e.to_string()))?
    }

    async fn load(&self, submission: &Submission) -> Result<PathBuf, StoreError> {
        self.inner.load(submission)
    }
}
