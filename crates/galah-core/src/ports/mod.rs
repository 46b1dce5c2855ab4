//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait は外部リソース（ファイルシステム、展開ツール、時刻、id 採番）への
//! インターフェースを提供し、実装の詳細を隠蔽します。

pub mod clock;
pub mod extractor;
pub mod id_generator;
pub mod submission_store;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::extractor::ArchiveExtractor;
pub use self::id_generator::{IdGenerator, ObjectIdGenerator, UlidGenerator};
pub use self::submission_store::{AsyncSubmissionStore, SubmissionStore};
