use std::time::Instant;

use super::scoring::ScoringConfig;
use super::GlobalAligner;
use crate::error::AlignError;

/// 每处理这么多行检查一次截止时间
const DEADLINE_CHECK_ROWS: usize = 64;

/// Needleman-Wunsch 全局对齐，只返回得分。
/// 单行滚动：时间 O(|a|·|b|)，空间 O(min(|a|, |b|))。
pub fn global_align(a: &[u8], b: &[u8], scoring: &ScoringConfig) -> i64 {
    let (long, short) = order_by_len(a, b);
    let mut row = ScoreRow::new(short, scoring);
    for &x in long {
        row.push(x);
    }
    row.finish()
}

/// 打分方案对称，两条序列可以交换；行取较长者，列取较短者。
fn order_by_len<'a>(a: &'a [u8], b: &'a [u8]) -> (&'a [u8], &'a [u8]) {
    if a.len() >= b.len() {
        (a, b)
    } else {
        (b, a)
    }
}

/// DP 表的当前行
struct ScoreRow<'a> {
    cols: &'a [u8],
    scoring: &'a ScoringConfig,
    row: Vec<i64>,
    rows_done: usize,
}

impl<'a> ScoreRow<'a> {
    fn new(cols: &'a [u8], scoring: &'a ScoringConfig) -> Self {
        let gap = scoring.gap();
        // 第 0 行：全间隙
        let row = (0..=cols.len()).map(|j| j as i64 * gap).collect();
        Self { cols, scoring, row, rows_done: 0 }
    }

    fn push(&mut self, x: u8) {
        let gap = self.scoring.gap();
        self.rows_done += 1;
        let mut diag = self.row[0];
        self.row[0] = self.rows_done as i64 * gap;
        for (j, &y) in self.cols.iter().enumerate() {
            let up = self.row[j + 1];
            let sub = diag + self.scoring.substitution(x, y);
            let best = sub.max(up + gap).max(self.row[j] + gap);
            diag = up;
            self.row[j + 1] = best;
        }
    }

    fn finish(self) -> i64 {
        self.row[self.cols.len()]
    }
}

/// 线性间隙全局对齐器，可选每对截止时间
#[derive(Clone, Copy, Debug, Default)]
pub struct NeedlemanWunsch {
    pub scoring: ScoringConfig,
}

impl NeedlemanWunsch {
    pub fn new(scoring: ScoringConfig) -> Self {
        Self { scoring }
    }
}

impl GlobalAligner for NeedlemanWunsch {
    fn score(&self, a: &[u8], b: &[u8], deadline: Option<Instant>) -> Result<i64, AlignError> {
        let Some(deadline) = deadline else {
            return Ok(global_align(a, b, &self.scoring));
        };

        let (long, short) = order_by_len(a, b);
        let mut row = ScoreRow::new(short, &self.scoring);
        for (i, &x) in long.iter().enumerate() {
            if i % DEADLINE_CHECK_ROWS == 0 && Instant::now() >= deadline {
                return Err(AlignError::DeadlineExceeded { rows_done: i, rows: long.len() });
            }
            row.push(x);
        }
        Ok(row.finish())
    }
}
