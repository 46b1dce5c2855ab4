//! Location strings - 保存先バックエンドとパスを表す文字列
//!
//! 形式: `<scheme><path>`（例: `file:///var/local/galah-web/submissions/<id>`）
//!
//! Submission レコードの `testables` フィールドにそのまま保存され、
//! 後で `can_handle` / `load` がプレフィックスで解釈します。

use std::path::{Path, PathBuf};

/// ローカルファイルシステムのスキーム
pub const FILE_SCHEME: &str = "file://";

/// パスからロケーション文字列を作成
pub fn encode(scheme: &str, path: &Path) -> String {
    format!("{scheme}{}", path.display())
}

/// スキームが一致すればパス部分を返す
///
/// ファイルシステムにはアクセスしません。
pub fn decode(scheme: &str, location: &str) -> Option<PathBuf> {
    location.strip_prefix(scheme).map(PathBuf::from)
}
