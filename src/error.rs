use std::fmt;

use thiserror::Error;

/// 单个算法步骤（后缀数组构建、DP 对齐）内部的失败
#[derive(Debug, Error)]
pub enum AlignError {
    #[error("text of {len} symbols exceeds suffix array capacity of {max}")]
    TextTooLong { len: usize, max: usize },

    #[error("anchor of length {len} at ({pos_a}, {pos_b}) lies outside sequences of length {len_a} and {len_b}")]
    AnchorOutOfRange {
        len: usize,
        pos_a: usize,
        pos_b: usize,
        len_a: usize,
        len_b: usize,
    },

    #[error("alignment exceeded its deadline after {rows_done} of {rows} rows")]
    DeadlineExceeded { rows_done: usize, rows: usize },
}

/// 锚定打分流程中的阶段，用于定位失败位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Anchor,
    Prefix,
    Suffix,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Anchor => "anchor",
            Stage::Prefix => "prefix alignment",
            Stage::Suffix => "suffix alignment",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct PairError {
    pub stage: Stage,
    #[source]
    pub source: AlignError,
}

impl PairError {
    pub fn at(stage: Stage) -> impl FnOnce(AlignError) -> Self {
        move |source| Self { stage, source }
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("insufficient input: {0}")]
    InsufficientInput(String),

    #[error("invalid scoring configuration: {0}")]
    InvalidScoring(String),

    #[error("malformed FASTA at line {line}: {message}")]
    MalformedFasta { line: usize, message: String },

    #[error("pair {a} (#{i}) vs {b} (#{j}): {source}")]
    Pair {
        i: usize,
        j: usize,
        a: String,
        b: String,
        #[source]
        source: PairError,
    },

    #[error("inconsistent matrix shape: {0}")]
    MatrixShape(String),

    #[error("cannot build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
