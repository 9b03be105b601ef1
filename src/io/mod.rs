//! 输入输出边界：FASTA 读取与矩阵 CSV 写出。

pub mod fasta;
pub mod table;
