//! 演示如何在 library 模式下使用 anchor-sim 计算序列相似度。
//!
//! 运行方式：
//! ```bash
//! cargo run --example pairwise
//! ```

use anchor_sim::align::{self, AnchoredScorer, ScoringConfig};
use anchor_sim::io::table;
use anchor_sim::matrix::{build_matrices, BuildOptions, Sequence};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 最长公共子串
    let a = b"AGCTTAGC";
    let b = b"GGCTTACC";
    let anchor = align::find_longest_common_substring(a, b)?;
    println!(
        "LCS: len={} a[{}..{}]={} b[{}..{}]",
        anchor.len,
        anchor.pos_a,
        anchor.end_a(),
        String::from_utf8_lossy(&a[anchor.pos_a..anchor.end_a()]),
        anchor.pos_b,
        anchor.end_b()
    );

    // 2. 全局对齐与锚定打分
    let scoring = ScoringConfig::default();
    println!("global_align: {}", align::global_align(a, b, &scoring));
    let scorer = AnchoredScorer::with_scoring(scoring);
    let pair = scorer.score_pair(a, b)?;
    println!("anchored score: {} (anchor {})", pair.score, pair.lcs_len);

    // 3. 全对矩阵
    let seqs = vec![
        Sequence::new("S1", "ACGTACGT"),
        Sequence::new("S2", "ACGTTTGT"),
        Sequence::new("S3", "TTTTTTTT"),
    ];
    let m = build_matrices(&seqs, &scorer, &BuildOptions::default())?;

    println!("\nLCS 矩阵:");
    table::write_matrix_csv(std::io::stdout(), &m.ids, &m.lcs)?;
    println!("\n相似度矩阵:");
    table::write_matrix_csv(std::io::stdout(), &m.ids, &m.similarity)?;

    println!("\n完成！");
    Ok(())
}
