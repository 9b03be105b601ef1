//! 后缀结构：后缀数组与 LCP 数组，供最长公共子串查找使用。

pub mod lcp;
pub mod sa;
