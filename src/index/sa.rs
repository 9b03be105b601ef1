use crate::error::AlignError;

/// 后缀下标以 u32 存储，文本长度上限
pub const MAX_TEXT_LEN: usize = u32::MAX as usize;

/// 构建后缀数组（倍增法，每轮使用计数排序，总复杂度 O(n log n)）。
/// 输入为数值化的文本，字母取值不限；文本末尾视为比任何字母都小。
pub fn build_sa(text: &[u32]) -> Result<Vec<u32>, AlignError> {
    let n = text.len();
    if n > MAX_TEXT_LEN {
        return Err(AlignError::TextTooLong { len: n, max: MAX_TEXT_LEN });
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    // 初始排名：按单个字母排序后压缩为 0..n
    let mut sa: Vec<usize> = (0..n).collect();
    sa.sort_unstable_by_key(|&i| text[i]);
    let mut rank = vec![0usize; n];
    for w in 1..n {
        let bump = usize::from(text[sa[w]] != text[sa[w - 1]]);
        rank[sa[w]] = rank[sa[w - 1]] + bump;
    }

    let mut by_second = vec![0usize; n];
    let mut next_rank = vec![0usize; n];
    let mut bucket = vec![0usize; n + 1];

    let mut k = 1usize;
    while rank[sa[n - 1]] < n - 1 {
        // 第二关键字：rank[i + k]，越界的后缀最小，排在最前
        let mut t = 0;
        for i in n.saturating_sub(k)..n {
            by_second[t] = i;
            t += 1;
        }
        for &p in &sa {
            if p >= k {
                by_second[t] = p - k;
                t += 1;
            }
        }

        // 按第一关键字做稳定计数排序
        bucket.iter_mut().for_each(|c| *c = 0);
        for &r in &rank {
            bucket[r + 1] += 1;
        }
        for r in 1..=n {
            bucket[r] += bucket[r - 1];
        }
        for &p in &by_second {
            let r = rank[p];
            sa[bucket[r]] = p;
            bucket[r] += 1;
        }

        let second = |i: usize| if i + k < n { rank[i + k] + 1 } else { 0 };
        next_rank[sa[0]] = 0;
        for w in 1..n {
            let a = sa[w - 1];
            let b = sa[w];
            let same = rank[a] == rank[b] && second(a) == second(b);
            next_rank[b] = next_rank[a] + usize::from(!same);
        }

        std::mem::swap(&mut rank, &mut next_rank);
        k <<= 1;
    }

    Ok(sa.into_iter().map(|x| x as u32).collect())
}
