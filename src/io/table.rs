use std::fmt::Display;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::matrix::{SimilarityMatrices, SymMatrix};

pub const LCS_FILE: &str = "lcs_results.csv";
pub const SIMILARITY_FILE: &str = "similarity_results.csv";

/// Write a labeled square matrix: a header row `["", id_1, .., id_k]`
/// followed by one row per sequence, prefixed by its id.
pub fn write_matrix_csv<W, T>(out: W, ids: &[String], matrix: &SymMatrix<T>) -> Result<()>
where
    W: Write,
    T: Copy + Default + Display,
{
    debug_assert_eq!(ids.len(), matrix.dim());
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(std::iter::once("").chain(ids.iter().map(String::as_str)))?;
    for (id, row) in ids.iter().zip(matrix.rows()) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(id.clone());
        record.extend(row.iter().map(ToString::to_string));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write both matrices into `dir` and return `(lcs_path, similarity_path)`.
/// Nothing is created when the matrices disagree with the id list.
pub fn write_matrices(dir: &Path, m: &SimilarityMatrices) -> Result<(PathBuf, PathBuf)> {
    m.check_shape()?;
    std::fs::create_dir_all(dir)?;
    let lcs_path = dir.join(LCS_FILE);
    let sim_path = dir.join(SIMILARITY_FILE);

    let fh = std::fs::File::create(&lcs_path)?;
    write_matrix_csv(std::io::BufWriter::new(fh), &m.ids, &m.lcs)?;
    let fh = std::fs::File::create(&sim_path)?;
    write_matrix_csv(std::io::BufWriter::new(fh), &m.ids, &m.similarity)?;

    Ok((lcs_path, sim_path))
}
