//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **FileStore**: ローカルディレクトリへの SubmissionStore
//! - **FormatDispatch / TarGzExtractor / ZipExtractor**: プロセス内展開
//! - **CommandExtractor**: `tar` / `unzip` コマンドによる展開
//! - **StoreRegistry**: スキームによるバックエンド選択
//! - **SpawnBlocking**: async 向けアダプタ

pub mod blocking;
pub mod command;
pub mod extract;
pub mod file_store;
pub mod registry;

// 主要な型を再エクスポート
pub use self::blocking::SpawnBlocking;
pub use self::command::CommandExtractor;
pub use self::extract::{FormatDispatch, TarGzExtractor, ZipExtractor};
pub use self::file_store::FileStore;
pub use self::registry::{RegistryError, StoreRegistry};
