//! # anchor-sim
//!
//! 基于最长公共子串锚点的全对序列相似度计算。
//!
//! 对每一对序列：先找出最长公共子串（LCS）作为锚点，再把两条序列在锚点两侧
//! 切成前缀与后缀，分别做全局对齐，最后把 `前缀得分 + 锚点长度 + 后缀得分`
//! 作为这一对的相似度。该得分是完整全局对齐得分的近似值，而不是精确值。
//!
//! - **LCS 查找**：后缀数组（倍增 + 计数排序）+ Kasai LCP，O(n log n)
//! - **全局对齐**：线性间隙 Needleman-Wunsch，单行滚动，O(min(m, n)) 空间
//! - **锚定打分**：LCS 查找器与对齐器均通过 trait 注入，可独立替换
//! - **矩阵构建**：rayon 并行计算 k(k-1)/2 对，合并成两个对称矩阵
//!
//! ## 快速示例
//!
//! ```rust
//! use anchor_sim::align::{find_longest_common_substring, AnchoredScorer, ScoringConfig};
//! use anchor_sim::matrix::{build_matrices, BuildOptions, Sequence};
//!
//! let anchor = find_longest_common_substring(b"AGCTTAGC", b"GGCTTACC").unwrap();
//! assert_eq!(anchor.len, 5);
//!
//! let seqs = vec![
//!     Sequence::new("S1", "ACGTACGT"),
//!     Sequence::new("S2", "ACGTTTGT"),
//! ];
//! let scorer = AnchoredScorer::with_scoring(ScoringConfig::default());
//! let m = build_matrices(&seqs, &scorer, &BuildOptions::default()).unwrap();
//! assert_eq!(m.lcs.get(0, 1), 4);
//! assert_eq!(m.lcs.get(1, 1), 8);
//! ```
//!
//! ## 模块说明
//!
//! - [`io`] — FASTA 读取、矩阵 CSV 写出
//! - [`index`] — 后缀数组与 LCP 数组
//! - [`align`] — LCS 查找、全局对齐、锚定打分
//! - [`matrix`] — 全对矩阵构建
//! - [`report`] — 结果快照（bincode）
//! - [`error`] — 错误类型

pub mod align;
pub mod error;
pub mod index;
pub mod io;
pub mod matrix;
pub mod report;

pub use error::{AlignError, PairError, Result, SimError, Stage};
