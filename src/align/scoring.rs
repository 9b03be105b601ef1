use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// 线性间隙打分方案。三个值都直接加到得分上，
/// 因此罚分取负值，得分越高表示越相似。
///
/// 默认值：匹配 `+1`，错配 `-1`，间隙 `-1`。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub match_reward: i32,
    pub mismatch_penalty: i32,
    pub gap_penalty: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_reward: 1,
            mismatch_penalty: -1,
            gap_penalty: -1,
        }
    }
}

impl ScoringConfig {
    pub fn new(match_reward: i32, mismatch_penalty: i32, gap_penalty: i32) -> Self {
        Self { match_reward, mismatch_penalty, gap_penalty }
    }

    /// 匹配必须优于错配和间隙，否则"越高越相似"不再成立
    pub fn validate(&self) -> Result<()> {
        if self.match_reward <= self.mismatch_penalty {
            return Err(SimError::InvalidScoring(format!(
                "match reward ({}) must exceed mismatch penalty ({})",
                self.match_reward, self.mismatch_penalty
            )));
        }
        if self.gap_penalty >= self.match_reward {
            return Err(SimError::InvalidScoring(format!(
                "gap penalty ({}) must be below match reward ({})",
                self.gap_penalty, self.match_reward
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn substitution(&self, x: u8, y: u8) -> i64 {
        if x == y {
            i64::from(self.match_reward)
        } else {
            i64::from(self.mismatch_penalty)
        }
    }

    #[inline]
    pub fn gap(&self) -> i64 {
        i64::from(self.gap_penalty)
    }
}
