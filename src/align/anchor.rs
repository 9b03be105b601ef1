//! 锚定打分：以 LCS 为锚点把一对序列切成前缀与后缀两段，分别全局对齐后求和。
//!
//! 这是对完整全局对齐得分的近似：锚点不一定落在最优对齐路径上。

use std::time::Instant;

use super::lcs::{Anchor, SuffixArrayLcs};
use super::nw::NeedlemanWunsch;
use super::scoring::ScoringConfig;
use super::{GlobalAligner, LcsFinder};
use crate::error::{AlignError, PairError, Stage};

/// 一对序列的打分结果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairScore {
    /// 锚点（LCS）长度
    pub lcs_len: usize,
    /// 前缀得分 + 锚点长度 + 后缀得分
    pub score: i64,
    pub anchor: Anchor,
}

/// 组合一个 LCS 查找器与一个全局对齐器
#[derive(Clone, Debug, Default)]
pub struct AnchoredScorer<F = SuffixArrayLcs, G = NeedlemanWunsch> {
    pub finder: F,
    pub aligner: G,
}

impl AnchoredScorer {
    /// 后缀数组 LCS + 线性间隙 Needleman-Wunsch
    pub fn with_scoring(scoring: ScoringConfig) -> Self {
        Self::new(SuffixArrayLcs, NeedlemanWunsch::new(scoring))
    }
}

impl<F: LcsFinder, G: GlobalAligner> AnchoredScorer<F, G> {
    pub fn new(finder: F, aligner: G) -> Self {
        Self { finder, aligner }
    }

    pub fn score_pair(&self, a: &[u8], b: &[u8]) -> Result<PairScore, PairError> {
        self.score_pair_until(a, b, None)
    }

    /// 同 [`score_pair`](Self::score_pair)，两次对齐共享同一个截止时间
    pub fn score_pair_until(
        &self,
        a: &[u8],
        b: &[u8],
        deadline: Option<Instant>,
    ) -> Result<PairScore, PairError> {
        let anchor = self.finder.find(a, b).map_err(PairError::at(Stage::Anchor))?;
        let in_range = |pos: usize, n: usize| pos.checked_add(anchor.len).map_or(false, |end| end <= n);
        if !in_range(anchor.pos_a, a.len()) || !in_range(anchor.pos_b, b.len()) {
            return Err(PairError::at(Stage::Anchor)(AlignError::AnchorOutOfRange {
                len: anchor.len,
                pos_a: anchor.pos_a,
                pos_b: anchor.pos_b,
                len_a: a.len(),
                len_b: b.len(),
            }));
        }

        // 前缀反转后对齐，使两段都从锚点向外延伸
        let pre_a: Vec<u8> = a[..anchor.pos_a].iter().rev().copied().collect();
        let pre_b: Vec<u8> = b[..anchor.pos_b].iter().rev().copied().collect();
        let prefix = self
            .aligner
            .score(&pre_a, &pre_b, deadline)
            .map_err(PairError::at(Stage::Prefix))?;

        let suffix = self
            .aligner
            .score(&a[anchor.end_a()..], &b[anchor.end_b()..], deadline)
            .map_err(PairError::at(Stage::Suffix))?;

        Ok(PairScore {
            lcs_len: anchor.len,
            score: prefix + anchor.len as i64 + suffix,
            anchor,
        })
    }
}

/// 默认策略与默认打分方案下的锚定打分
pub fn score_pair(a: &[u8], b: &[u8]) -> Result<PairScore, PairError> {
    AnchoredScorer::with_scoring(ScoringConfig::default()).score_pair(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::lcs::DpLcs;
    use crate::align::nw::global_align;

    #[test]
    fn disjoint_alphabets_collapse_to_plain_alignment() {
        let res = score_pair(b"AAAA", b"CCCC").unwrap();
        assert_eq!(res.lcs_len, 0);
        assert_eq!(res.score, global_align(b"AAAA", b"CCCC", &ScoringConfig::default()));
    }

    #[test]
    fn empty_sequence_is_gap_only() {
        let s = ScoringConfig::default();
        let res = score_pair(b"", b"ACGT").unwrap();
        assert_eq!(res.lcs_len, 0);
        assert_eq!(res.score, 4 * i64::from(s.gap_penalty));
    }

    #[test]
    fn identical_sequences_score_their_length() {
        let res = score_pair(b"ACGTACGT", b"ACGTACGT").unwrap();
        assert_eq!(res.lcs_len, 8);
        assert_eq!(res.score, 8);
    }

    #[test]
    fn composite_is_prefix_plus_anchor_plus_suffix() {
        let s = ScoringConfig::default();
        let a = b"TTAGCTTAGCAA";
        let b = b"CGGCTTACCAG";
        let res = score_pair(a, b).unwrap();
        let anc = res.anchor;
        assert_eq!(&a[anc.pos_a..anc.end_a()], b"GCTTA");

        let pre_a: Vec<u8> = a[..anc.pos_a].iter().rev().copied().collect();
        let pre_b: Vec<u8> = b[..anc.pos_b].iter().rev().copied().collect();
        let expected = global_align(&pre_a, &pre_b, &s)
            + 5
            + global_align(&a[anc.end_a()..], &b[anc.end_b()..], &s);
        assert_eq!(res.score, expected);
    }

    #[test]
    fn scoring_scheme_flows_through() {
        let scorer = AnchoredScorer::with_scoring(ScoringConfig::new(2, -3, -2));
        // 锚点 "ACGT" (0, 0)，后缀 "ACGT" vs "TTGT"：两处错配 + 两处匹配
        let res = scorer.score_pair(b"ACGTACGT", b"ACGTTTGT").unwrap();
        assert_eq!(res.lcs_len, 4);
        assert_eq!(res.score, 4 + (-3 - 3 + 2 + 2));
    }

    #[test]
    fn strategies_are_swappable() {
        let sa = AnchoredScorer::with_scoring(ScoringConfig::default());
        let dp = AnchoredScorer::new(DpLcs, NeedlemanWunsch::default());
        for (a, b) in [
            (&b"GATTACAGATTACA"[..], &b"TACAGGATT"[..]),
            (&b"ACGTTTGT"[..], &b"TTTTTTTT"[..]),
            (&b"GGXCC"[..], &b"CCYGG"[..]),
        ] {
            assert_eq!(sa.score_pair(a, b).unwrap(), dp.score_pair(a, b).unwrap());
        }
    }

    #[test]
    fn anchor_failure_reports_stage() {
        struct Failing;
        impl LcsFinder for Failing {
            fn find(&self, _: &[u8], _: &[u8]) -> Result<Anchor, AlignError> {
                Err(AlignError::TextTooLong { len: 1, max: 0 })
            }
            fn name(&self) -> &'static str {
                "failing"
            }
        }
        let scorer = AnchoredScorer::new(Failing, NeedlemanWunsch::default());
        let err = scorer.score_pair(b"A", b"A").unwrap_err();
        assert_eq!(err.stage, Stage::Anchor);
    }

    #[test]
    fn anchor_past_sequence_end_is_an_error() {
        struct Overreaching;
        impl LcsFinder for Overreaching {
            fn find(&self, a: &[u8], _: &[u8]) -> Result<Anchor, AlignError> {
                Ok(Anchor { len: 3, pos_a: a.len() - 1, pos_b: 0 })
            }
            fn name(&self) -> &'static str {
                "overreaching"
            }
        }
        let scorer = AnchoredScorer::new(Overreaching, NeedlemanWunsch::default());
        let err = scorer.score_pair(b"ACGT", b"ACGT").unwrap_err();
        assert_eq!(err.stage, Stage::Anchor);
        assert!(matches!(
            err.source,
            AlignError::AnchorOutOfRange { len: 3, pos_a: 3, len_a: 4, .. }
        ));
    }

    #[test]
    fn expired_deadline_fails_in_prefix_stage() {
        let scorer = AnchoredScorer::with_scoring(ScoringConfig::default());
        let deadline = Instant::now();
        std::thread::sleep(std::time::Duration::from_millis(2));
        // 锚点 "GGGG" 位于两条序列末尾，前缀非空
        let err = scorer
            .score_pair_until(b"ACACGGGG", b"TTGGGG", Some(deadline))
            .unwrap_err();
        assert_eq!(err.stage, Stage::Prefix);
    }
}
