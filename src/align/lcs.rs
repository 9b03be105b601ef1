//! 最长公共子串（LCS）查找。
//!
//! 默认实现在 `A · SEP · B` 上构建后缀数组与 LCP 数组：字节 `x` 编码为 `x + 1`，
//! 分隔符编码为 `0`，因此分隔符不可能出现在任何输入中。
//!
//! 当存在多个等长的最长公共子串时，固定选择 `pos_a` 最小者；
//! `pos_a` 相同时选择 `pos_b` 最小者。[`DpLcs`] 遵循同一规则。

use super::LcsFinder;
use crate::error::AlignError;
use crate::index::{lcp, sa};

/// 两条序列之间的一处最长公共子串：`a[pos_a..pos_a + len] == b[pos_b..pos_b + len]`。
/// `len == 0` 时两个位置都为 0。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Anchor {
    pub len: usize,
    pub pos_a: usize,
    pub pos_b: usize,
}

impl Anchor {
    pub fn end_a(&self) -> usize {
        self.pos_a + self.len
    }

    pub fn end_b(&self) -> usize {
        self.pos_b + self.len
    }
}

/// 用默认的后缀数组实现查找最长公共子串
pub fn find_longest_common_substring(a: &[u8], b: &[u8]) -> Result<Anchor, AlignError> {
    SuffixArrayLcs.find(a, b)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
    Sep,
}

/// 基于后缀数组 + LCP 的 LCS 查找，O(n log n)
#[derive(Clone, Copy, Debug, Default)]
pub struct SuffixArrayLcs;

impl SuffixArrayLcs {
    fn encode(a: &[u8], b: &[u8]) -> Vec<u32> {
        let mut text = Vec::with_capacity(a.len() + b.len() + 1);
        text.extend(a.iter().map(|&x| u32::from(x) + 1));
        text.push(0);
        text.extend(b.iter().map(|&x| u32::from(x) + 1));
        text
    }
}

impl LcsFinder for SuffixArrayLcs {
    fn find(&self, a: &[u8], b: &[u8]) -> Result<Anchor, AlignError> {
        if a.is_empty() || b.is_empty() {
            return Ok(Anchor::default());
        }

        let text = Self::encode(a, b);
        let sa = sa::build_sa(&text)?;
        let lcp = lcp::build_lcp(&text, &sa);

        let boundary = a.len();
        let side = |p: u32| {
            let p = p as usize;
            if p < boundary {
                Side::A
            } else if p > boundary {
                Side::B
            } else {
                Side::Sep
            }
        };

        // 第一遍：跨两侧的相邻后缀中最大的 LCP 即 LCS 长度
        let mut best = 0u32;
        for r in 1..sa.len() {
            let (s, t) = (side(sa[r - 1]), side(sa[r]));
            if s != t && s != Side::Sep && t != Side::Sep && lcp[r] > best {
                best = lcp[r];
            }
        }
        if best == 0 {
            return Ok(Anchor::default());
        }

        // 第二遍：LCP >= best 的极大区间对应同一个长度为 best 的子串，
        // 取每个区间内最小的 A 起点与 B 起点，再取字典序最小的候选
        let mut chosen: Option<(usize, usize)> = None;
        let mut min_a: Option<usize> = None;
        let mut min_b: Option<usize> = None;
        for r in 0..=sa.len() {
            let run_ends = r == sa.len() || (r > 0 && lcp[r] < best);
            if run_ends {
                if let (Some(pa), Some(pb)) = (min_a, min_b) {
                    if chosen.map_or(true, |c| (pa, pb) < c) {
                        chosen = Some((pa, pb));
                    }
                }
                min_a = None;
                min_b = None;
            }
            if r == sa.len() {
                break;
            }
            let p = sa[r] as usize;
            match side(sa[r]) {
                Side::A => min_a = Some(min_a.map_or(p, |m| m.min(p))),
                Side::B => {
                    let q = p - boundary - 1;
                    min_b = Some(min_b.map_or(q, |m| m.min(q)));
                }
                Side::Sep => {}
            }
        }

        let (pos_a, pos_b) = chosen.unwrap_or((0, 0));
        Ok(Anchor { len: best as usize, pos_a, pos_b })
    }

    fn name(&self) -> &'static str {
        "suffix-array"
    }
}

/// 朴素动态规划 LCS，O(|a|·|b|) 时间、O(|b|) 空间。
/// 适合短序列，也用作后缀数组实现的对照。
#[derive(Clone, Copy, Debug, Default)]
pub struct DpLcs;

impl LcsFinder for DpLcs {
    fn find(&self, a: &[u8], b: &[u8]) -> Result<Anchor, AlignError> {
        let mut prev = vec![0usize; b.len() + 1];
        let mut cur = vec![0usize; b.len() + 1];
        let mut best = Anchor::default();

        // 按 (i, j) 递增扫描结束位置；长度相同时先遇到的起点最小，所以只在严格更长时替换
        for (i, &x) in a.iter().enumerate() {
            for (j, &y) in b.iter().enumerate() {
                cur[j + 1] = if x == y { prev[j] + 1 } else { 0 };
                let len = cur[j + 1];
                if len > best.len {
                    best = Anchor { len, pos_a: i + 1 - len, pos_b: j + 1 - len };
                }
            }
            std::mem::swap(&mut prev, &mut cur);
        }
        Ok(best)
    }

    fn name(&self) -> &'static str {
        "dp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_witness(a: &[u8], b: &[u8], anc: &Anchor) {
        assert!(anc.end_a() <= a.len());
        assert!(anc.end_b() <= b.len());
        assert_eq!(&a[anc.pos_a..anc.end_a()], &b[anc.pos_b..anc.end_b()]);
    }

    fn pseudo_random(len: usize, seed: u32, alphabet: &[u8]) -> Vec<u8> {
        let mut x = seed;
        (0..len)
            .map(|_| {
                x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                alphabet[(x >> 16) as usize % alphabet.len()]
            })
            .collect()
    }

    #[test]
    fn lcs_known_pair() {
        let a = b"AGCTTAGC";
        let b = b"GGCTTACC";
        let anc = find_longest_common_substring(a, b).unwrap();
        assert_eq!(anc.len, 5);
        assert_eq!(&a[anc.pos_a..anc.end_a()], b"GCTTA");
        assert_eq!((anc.pos_a, anc.pos_b), (1, 1));
        check_witness(a, b, &anc);
    }

    #[test]
    fn lcs_no_shared_symbol() {
        let anc = find_longest_common_substring(b"AAAA", b"CCCC").unwrap();
        assert_eq!(anc, Anchor::default());
    }

    #[test]
    fn lcs_empty_inputs() {
        assert_eq!(find_longest_common_substring(b"", b"ACGT").unwrap(), Anchor::default());
        assert_eq!(find_longest_common_substring(b"ACGT", b"").unwrap(), Anchor::default());
        assert_eq!(find_longest_common_substring(b"", b"").unwrap(), Anchor::default());
    }

    #[test]
    fn lcs_identical_sequences() {
        let anc = find_longest_common_substring(b"ACGTACGT", b"ACGTACGT").unwrap();
        assert_eq!(anc, Anchor { len: 8, pos_a: 0, pos_b: 0 });
    }

    #[test]
    fn lcs_handles_zero_bytes_and_high_bytes() {
        // 输入中的 0 和 255 不能与分隔符混淆
        let a = [0u8, 0, 255, 1];
        let b = [255u8, 1, 0, 0];
        let anc = find_longest_common_substring(&a, &b).unwrap();
        assert_eq!(anc.len, 2);
        check_witness(&a, &b, &anc);
    }

    #[test]
    fn tie_break_prefers_smallest_pos_a() {
        // "GG" 在 (0, 3)，"CC" 在 (3, 0)
        let anc = find_longest_common_substring(b"GGXCC", b"CCYGG").unwrap();
        assert_eq!(anc, Anchor { len: 2, pos_a: 0, pos_b: 3 });
        assert_eq!(DpLcs.find(b"GGXCC", b"CCYGG").unwrap(), anc);
    }

    #[test]
    fn tie_break_prefers_smallest_pos_b() {
        let anc = find_longest_common_substring(b"AC", b"ACxAC").unwrap();
        assert_eq!(anc, Anchor { len: 2, pos_a: 0, pos_b: 0 });
    }

    #[test]
    fn tie_break_sees_non_adjacent_occurrences() {
        // 后缀数组中与 B 相邻的是 A 的第二次出现，规则要求第一次出现
        let anc = find_longest_common_substring(b"abcXabc", b"Yabc").unwrap();
        assert_eq!(anc, Anchor { len: 3, pos_a: 0, pos_b: 1 });
    }

    #[test]
    fn suffix_array_agrees_with_dp_on_random_inputs() {
        for seed in 0..60u32 {
            let alphabet: &[u8] = if seed % 2 == 0 { b"ACGT" } else { b"AB" };
            let a = pseudo_random(5 + (seed as usize * 7) % 40, seed, alphabet);
            let b = pseudo_random(3 + (seed as usize * 13) % 35, seed + 1000, alphabet);
            let fast = SuffixArrayLcs.find(&a, &b).unwrap();
            let slow = DpLcs.find(&a, &b).unwrap();
            assert_eq!(fast, slow, "seed={}", seed);
            check_witness(&a, &b, &fast);
        }
    }
}
