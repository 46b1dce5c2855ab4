//! StoreRegistry - ロケーション文字列からバックエンドを選ぶ
//!
//! # 内部実装
//! - 登録順に `can_handle` を試し、最初に受け付けたバックエンドを使う
//! - 同じスキームの二重登録はエラー

use crate::domain::errors::StoreError;
use crate::domain::submission::Submission;
use crate::ports::SubmissionStore;
use std::path::PathBuf;
use std::sync::Arc;

/// RegistryError は StoreRegistry の登録エラー
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("a store for scheme '{0}' is already registered")]
    AlreadyRegistered(String),
}

#[derive(Default)]
pub struct StoreRegistry {
    stores: Vec<Arc<dyn SubmissionStore>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, store: Arc<dyn SubmissionStore>) -> Result<(), RegistryError> {
        let scheme = store.scheme();
        if self.stores.iter().any(|s| s.scheme() == scheme) {
            return Err(RegistryError::AlreadyRegistered(scheme.to_string()));
        }
        self.stores.push(store);
        Ok(())
    }

    /// ロケーションを扱えるバックエンド
    pub fn backend_for(&self, location: &str) -> Option<Arc<dyn SubmissionStore>> {
        self.stores.iter().find(|s| s.can_handle(location)).cloned()
    }

    pub fn registered_schemes(&self) -> Vec<&'static str> {
        self.stores.iter().map(|s| s.scheme()).collect()
    }

    /// レコードを保存したバックエンド経由で `load`
    pub fn load(&self, submission: &Submission) -> Result<PathBuf, StoreError> {
        let location = submission.testables_or_empty();
        let store = self
            .backend_for(location)
            .ok_or_else(|| StoreError::IncompatibleLocation {
                location: location.to_string(),
            })?;
        store.load(submission)
    }
}
