/// 构建后缀数组（前缀倍增，每轮按 (rank[i], rank[i+k]) 二元组排序）。
/// 输入为数值化文本，末尾应带一个唯一且最小的哨兵 0。
pub fn build_sa(text: &[u8]) -> Vec<u32> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    let mut sa: Vec<u32> = (0..n as u32).collect();
    let mut rank: Vec<u32> = text.iter().map(|&b| b as u32).collect();
    let mut next: Vec<u32> = vec![0; n];

    let mut k = 1usize;
    loop {
        // 越界的第二关键字记为 0，其余整体 +1，保证短后缀排在前面
        let key = |p: u32| {
            let p = p as usize;
            (rank[p], if p + k < n { rank[p + k] + 1 } else { 0 })
        };
        sa.sort_unstable_by_key(|&p| key(p));

        next[sa[0] as usize] = 0;
        for w in 1..n {
            let prev = sa[w - 1];
            let cur = sa[w];
            next[cur as usize] = next[prev as usize] + u32::from(key(prev) != key(cur));
        }
        std::mem::swap(&mut rank, &mut next);

        if rank[sa[n - 1] as usize] as usize == n - 1 || k >= n {
            break;
        }
        k <<= 1;
    }
    sa
}
