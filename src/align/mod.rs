use std::time::Instant;

use crate::error::AlignError;

pub mod anchor;
pub mod lcs;
pub mod nw;
pub mod scoring;

pub use anchor::{score_pair, AnchoredScorer, PairScore};
pub use lcs::{find_longest_common_substring, Anchor, DpLcs, SuffixArrayLcs};
pub use nw::{global_align, NeedlemanWunsch};
pub use scoring::ScoringConfig;

/// 最长公共子串查找策略。
///
/// 实现必须是纯函数，并在多个等长结果中按固定规则选择：
/// `pos_a` 最小，其次 `pos_b` 最小。
pub trait LcsFinder: Send + Sync {
    fn find(&self, a: &[u8], b: &[u8]) -> Result<Anchor, AlignError>;

    fn name(&self) -> &'static str;
}

/// 全局对齐打分策略，只返回得分，不回溯路径。
/// `deadline` 为 `None` 时不限时。
pub trait GlobalAligner: Send + Sync {
    fn score(&self, a: &[u8], b: &[u8], deadline: Option<Instant>) -> Result<i64, AlignError>;
}
