use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::align::ScoringConfig;
use crate::error::Result;
use crate::matrix::SimilarityMatrices;

/// 运行元信息，随快照一起保存
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub input_file: Option<String>,
    pub run_args: Option<String>,
    pub timestamp: Option<String>,
}

impl ReportMeta {
    /// 记录当前命令行与 UTC 时间
    pub fn for_run(input_file: &str) -> Self {
        Self {
            input_file: Some(input_file.to_string()),
            run_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
        }
    }
}

/// 一次运行的完整结果快照：矩阵 + 打分方案 + 元信息。
/// 以 bincode 保存，可在不重新计算的情况下重新导出 CSV。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub matrices: SimilarityMatrices,
    pub scoring: ScoringConfig,
    pub meta: ReportMeta,
}

impl SimilarityReport {
    pub fn new(matrices: SimilarityMatrices, scoring: ScoringConfig, meta: ReportMeta) -> Self {
        Self { matrices, scoring, meta }
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let mut w = std::io::BufWriter::new(std::fs::File::create(path)?);
        bincode::serialize_into(&mut w, self)?;
        w.flush()?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let f = std::fs::File::open(path)?;
        let report: Self = bincode::deserialize_from(std::io::BufReader::new(f))?;
        report.matrices.check_shape()?;
        Ok(report)
    }
}
