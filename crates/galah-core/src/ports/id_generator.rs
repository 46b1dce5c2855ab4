//! IdGenerator port - ID 生成の抽象化
//!
//! SubmissionStore は id が未割り当てのときだけこの port を使います。
//! テスト容易性のために、trait として抽象化しています。
//!
//! # 実装
//! - **ObjectIdGenerator**: 24 文字 hex（レコード層の id と同じ形）。デフォルト
//! - **UlidGenerator**: ULID ベース

use crate::domain::ids::SubmissionId;
use crate::ports::Clock;
use std::sync::atomic::{AtomicU32, Ordering};
use ulid::Ulid;

/// IdGenerator は一意な SubmissionId を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（複数スレッドから使える）
pub trait IdGenerator: Send + Sync {
    fn generate_submission_id(&self) -> SubmissionId;
}

/// ObjectIdGenerator は 12 バイトの id を生成
///
/// # レイアウト
/// - 4 バイト: 秒単位の timestamp（big-endian）
/// - 5 バイト: generator ごとのランダム値
/// - 3 バイト: カウンタ（初期値はランダム）
pub struct ObjectIdGenerator<C> {
    clock: C,
    process_unique: [u8; 5],
    counter: AtomicU32,
}

impl<C: Clock> ObjectIdGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            process_unique: rand::random(),
            counter: AtomicU32::new(rand::random::<u32>() & 0x00ff_ffff),
        }
    }
}

impl<C: Clock> IdGenerator for ObjectIdGenerator<C> {
    fn generate_submission_id(&self) -> SubmissionId {
        let seconds = self.clock.now().timestamp() as u32;
        let count = self.counter.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&self.process_unique);
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..]);
        SubmissionId::from_object_id_bytes(bytes)
    }
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_submission_id(&self) -> SubmissionId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        SubmissionId::from(Ulid::from_parts(timestamp_ms, rand::random()))
    }
}
