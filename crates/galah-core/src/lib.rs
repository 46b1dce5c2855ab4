//! galah-core
//!
//! Submission archive store for the Galah grading portal.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, submission, archive, location, errors）
//! - **ports**: 抽象化レイヤー（SubmissionStore, ArchiveExtractor, IdGenerator, Clock）
//! - **impls**: 実装（FileStore, extractors, StoreRegistry, SpawnBlocking）
//! - **config**: StoreConfig（submission root などを構築時に渡す）

pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;
