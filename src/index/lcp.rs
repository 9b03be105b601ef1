/// Kasai 算法构建 LCP 数组，O(n)。
/// `lcp[r]` 为 `sa[r - 1]` 与 `sa[r]` 两个后缀的最长公共前缀长度，`lcp[0] = 0`。
pub fn build_lcp(text: &[u32], sa: &[u32]) -> Vec<u32> {
    let n = text.len();
    debug_assert_eq!(n, sa.len());
    let mut lcp = vec![0u32; n];
    if n == 0 {
        return lcp;
    }

    let mut rank = vec![0usize; n];
    for (r, &p) in sa.iter().enumerate() {
        rank[p as usize] = r;
    }

    let mut h = 0usize;
    for i in 0..n {
        let r = rank[i];
        if r == 0 {
            h = 0;
            continue;
        }
        let j = sa[r - 1] as usize;
        while i + h < n && j + h < n && text[i + h] == text[j + h] {
            h += 1;
        }
        lcp[r] = h as u32;
        h = h.saturating_sub(1);
    }
    lcp
}
