//! 全对相似度矩阵构建。
//!
//! 只计算 `i < j` 的 k(k-1)/2 对，每对结果独立计算后再合并进矩阵；
//! 对角线直接取序列自身长度，不调用打分器。

use std::collections::HashSet;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::align::{AnchoredScorer, GlobalAligner, LcsFinder, PairScore};
use crate::error::{Result, SimError};

/// 带名称的序列，载入后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub id: String,
    pub seq: Vec<u8>,
}

impl Sequence {
    pub fn new(id: impl Into<String>, seq: impl Into<Vec<u8>>) -> Self {
        Self { id: id.into(), seq: seq.into() }
    }

    pub fn len(&self) -> usize {
        self.seq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq.is_empty()
    }
}

/// k×k 对称矩阵，行优先稠密存储。写入总是同时写 `[i][j]` 与 `[j][i]`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymMatrix<T> {
    n: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> SymMatrix<T> {
    pub fn new(n: usize) -> Self {
        Self { n, data: vec![T::default(); n * n] }
    }

    pub fn dim(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.data[i * self.n + j]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, v: T) {
        self.data[i * self.n + j] = v;
        self.data[j * self.n + i] = v;
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // n == 0 时 chunks 的块大小不能为 0
        self.data.chunks(self.n.max(1))
    }
}

impl<T> SymMatrix<T> {
    /// 反序列化得到的矩阵不保证 `data.len() == n * n`
    fn check_dim(&self, name: &str, n: usize) -> Result<()> {
        let cells = self.n.checked_mul(self.n);
        if self.n != n || cells != Some(self.data.len()) {
            return Err(SimError::MatrixShape(format!(
                "{} matrix is {}x{} with {} cells, expected {}x{}",
                name,
                self.n,
                self.n,
                self.data.len(),
                n,
                n
            )));
        }
        Ok(())
    }
}

/// 一对序列 `(i, j)`，`i < j`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairResult {
    pub i: usize,
    pub j: usize,
    pub score: PairScore,
}

/// LCS 长度矩阵与相似度得分矩阵，行列顺序与输入序列顺序一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityMatrices {
    pub ids: Vec<String>,
    pub lcs: SymMatrix<u64>,
    pub similarity: SymMatrix<i64>,
}

impl SimilarityMatrices {
    /// 由各对结果合并出完整矩阵。`lengths[i]` 为第 i 条序列长度，写入对角线。
    pub fn from_pairs(ids: Vec<String>, lengths: &[usize], pairs: &[PairResult]) -> Self {
        let k = ids.len();
        debug_assert_eq!(k, lengths.len());
        let mut lcs = SymMatrix::new(k);
        let mut similarity = SymMatrix::new(k);
        for (i, &len) in lengths.iter().enumerate() {
            lcs.set(i, i, len as u64);
            similarity.set(i, i, len as i64);
        }
        for p in pairs {
            lcs.set(p.i, p.j, p.score.lcs_len as u64);
            similarity.set(p.i, p.j, p.score.score);
        }
        Self { ids, lcs, similarity }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// 检查两个矩阵都是 `ids.len()` 阶方阵
    pub fn check_shape(&self) -> Result<()> {
        let k = self.ids.len();
        self.lcs.check_dim("LCS", k)?;
        self.similarity.check_dim("similarity", k)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// 矩阵构建选项
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// 工作线程数，0 表示使用 rayon 默认值
    pub threads: usize,
    /// 单对计算的时间上限；超时则整个运行失败
    pub pair_timeout: Option<Duration>,
}

/// 所有无序对 `(i, j)`，`i < j`，按行优先顺序
pub fn pair_indices(k: usize) -> Vec<(usize, usize)> {
    (0..k).flat_map(|i| (i + 1..k).map(move |j| (i, j))).collect()
}

/// 计算全部序列对并构建两个对称矩阵。
///
/// 任何一对失败都会中止整个运行，错误中带有两条序列的名称和失败阶段。
/// 结果与线程数、调度顺序无关。
pub fn build_matrices<F, G>(
    sequences: &[Sequence],
    scorer: &AnchoredScorer<F, G>,
    opts: &BuildOptions,
) -> Result<SimilarityMatrices>
where
    F: LcsFinder,
    G: GlobalAligner,
{
    if sequences.is_empty() {
        return Err(SimError::InsufficientInput("no sequences to compare".to_string()));
    }

    let mut seen = HashSet::with_capacity(sequences.len());
    for s in sequences {
        if !seen.insert(s.id.as_str()) {
            log::warn!("duplicate sequence id '{}'; matrix labels will be ambiguous", s.id);
        }
    }

    let pairs = pair_indices(sequences.len());
    log::info!(
        "scoring {} pairs among {} sequences with {} LCS finder",
        pairs.len(),
        sequences.len(),
        scorer.finder.name()
    );

    let score_one = |&(i, j): &(usize, usize)| -> Result<PairResult> {
        let (a, b) = (&sequences[i], &sequences[j]);
        log::debug!("comparing {} vs {}", a.id, b.id);
        let deadline = opts.pair_timeout.map(|t| Instant::now() + t);
        let score = scorer
            .score_pair_until(&a.seq, &b.seq, deadline)
            .map_err(|source| SimError::Pair {
                i,
                j,
                a: a.id.clone(),
                b: b.id.clone(),
                source,
            })?;
        Ok(PairResult { i, j, score })
    };

    let pool = rayon::ThreadPoolBuilder::new().num_threads(opts.threads).build()?;
    let results = pool.install(|| pairs.par_iter().map(score_one).collect::<Result<Vec<_>>>())?;

    let ids: Vec<String> = sequences.iter().map(|s| s.id.clone()).collect();
    let lengths: Vec<usize> = sequences.iter().map(Sequence::len).collect();
    Ok(SimilarityMatrices::from_pairs(ids, &lengths, &results))
}
