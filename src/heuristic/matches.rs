use log::debug;
use serde::{Deserialize, Serialize};

use super::seeds::SeedSet;
use crate::config::AlignConfig;
use crate::error::Result;
use crate::index::TextIndex;
use crate::util::{Cost, Pos, SeqPair};

/// 种子在 B 上的一次近似出现：A[start.i..end.i) 与 B[start.j..end.j) 的编辑距离为 cost（≤ r）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub start: Pos,
    pub end: Pos,
    pub cost: Cost,
    /// 所属种子编号
    pub seed: u32,
}

/// 某次比对中找到的全部匹配，按 (start, end, cost) 排序
#[derive(Debug, Clone)]
pub struct MatchSet {
    pub seeds: SeedSet,
    pub matches: Vec<Match>,
}

impl MatchSet {
    /// 在 B 上临时构建 FM 索引并查找匹配
    pub fn find(pair: SeqPair<'_>, config: &AlignConfig) -> Result<Self> {
        config.validate()?;
        let index = TextIndex::build(pair.b.as_bytes());
        Self::find_with_index(pair, &index, config)
    }

    /// 使用预先构建好的 B 的索引（须由 B 本身构建，见 [`TextIndex::verify_text`]）。
    /// 配置非法时返回错误，不做任何查找。
    pub fn find_with_index(pair: SeqPair<'_>, index: &TextIndex, config: &AlignConfig) -> Result<Self> {
        config.validate()?;
        let seeds = SeedSet::new(pair.a.len(), config.seed_length, config.seed_potential());
        let mut matches = Vec::new();
        let mut buf = VerifyBuffer::new();
        let mut starts: Vec<u32> = Vec::new();

        for s in 0..seeds.count {
            let row = seeds.start(s);
            let seed = pair.a.slice(row, row + seeds.k);
            candidate_starts(seed, index, config.error_budget, pair.b.len(), &mut starts);
            for &x in &starts {
                verify_start(seed, pair.b.as_bytes(), x, config.error_budget, &mut buf, |end_j, cost| {
                    matches.push(Match {
                        start: Pos::new(row, x),
                        end: Pos::new(row + seeds.k, end_j),
                        cost,
                        seed: s,
                    });
                });
            }
        }

        dedup_matches(&mut matches);
        debug!(
            "seeds={} k={} r={} matches={}",
            seeds.count,
            seeds.k,
            config.error_budget,
            matches.len()
        );
        Ok(Self { seeds, matches })
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Match> {
        self.matches.iter()
    }
}

/// 鸽巢原理：种子切成 r + 1 段互不相交、长 ⌊k/(r+1)⌋ 的片段，
/// 任何编辑数 ≤ r 的出现都至少完整保留一段。
/// 片段在 B 的位置 p、在种子内偏移 o 时，出现的起点只能落在 [p-o-r, p-o+r]。
fn candidate_starts(seed: &[u8], index: &TextIndex, r: u32, b_len: u32, out: &mut Vec<u32>) {
    out.clear();
    let k = seed.len() as u32;
    let parts = r + 1;
    let q = k / parts;
    debug_assert!(q > 0);
    for part in 0..parts {
        let o = part * q;
        let piece = &seed[o as usize..(o + q) as usize];
        for hit in index.occurrences(piece) {
            let center = hit as i64 - o as i64;
            let lo = (center - r as i64).max(0);
            let hi = (center + r as i64).min(b_len as i64);
            for x in lo..=hi {
                out.push(x as u32);
            }
        }
    }
    out.sort_unstable();
    out.dedup();
}

/// 校验用 DP 的两行缓冲，可跨调用复用
pub struct VerifyBuffer {
    prev: Vec<u32>,
    cur: Vec<u32>,
}

impl VerifyBuffer {
    pub fn new() -> Self {
        Self { prev: Vec::new(), cur: Vec::new() }
    }
}

impl Default for VerifyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// 起点固定在 B[x]，计算 seed 与每个 B[x..y)（|y - x - k| ≤ r）的编辑距离，
/// 对代价 ≤ r 的终点调用 emit(y, cost)。
fn verify_start(seed: &[u8], b: &[u8], x: u32, r: u32, buf: &mut VerifyBuffer, mut emit: impl FnMut(u32, Cost)) {
    let k = seed.len();
    let x = x as usize;
    let width = (k + r as usize).min(b.len() - x);
    let window = &b[x..x + width];

    buf.prev.clear();
    buf.prev.extend(0..=width as u32);
    buf.cur.clear();
    buf.cur.resize(width + 1, 0);

    for (row, &sa) in seed.iter().enumerate() {
        buf.cur[0] = row as u32 + 1;
        for c in 1..=width {
            let diag = buf.prev[c - 1] + u32::from(sa != window[c - 1]);
            let up = buf.prev[c] + 1;
            let left = buf.cur[c - 1] + 1;
            buf.cur[c] = diag.min(up).min(left);
        }
        std::mem::swap(&mut buf.prev, &mut buf.cur);
    }

    let lo = k.saturating_sub(r as usize);
    for c in lo..=width {
        let cost = buf.prev[c];
        if cost <= r {
            emit((x + c) as u32, cost);
        }
    }
}

/// 同一锚点 (start, end) 只保留代价最低的一条。
/// 不同锚点即使落在相邻对角线上也不能合并，否则启发式会高估。
fn dedup_matches(matches: &mut Vec<Match>) {
    matches.sort_unstable_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.end.cmp(&b.end))
            .then(a.cost.cmp(&b.cost))
    });
    matches.dedup_by(|later, earlier| later.start == earlier.start && later.end == earlier.end);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::error::AlignError;

    fn edit_distance(a: &[u8], b: &[u8]) -> u32 {
        let mut prev: Vec<u32> = (0..=b.len() as u32).collect();
        for (i, &ca) in a.iter().enumerate() {
            let mut cur = vec![i as u32 + 1; b.len() + 1];
            for j in 1..=b.len() {
                cur[j] = (prev[j - 1] + u32::from(ca != b[j - 1])).min(prev[j] + 1).min(cur[j - 1] + 1);
            }
            prev = cur;
        }
        prev[b.len()]
    }

    /// 暴力枚举 B 的所有子串
    fn brute_force(a: &[u8], b: &[u8], k: u32, r: u32) -> Vec<Match> {
        let seeds = SeedSet::new(a.len() as u32, k, r + 1);
        let mut out = Vec::new();
        for s in 0..seeds.count {
            let row = seeds.start(s);
            let seed = &a[row as usize..(row + k) as usize];
            for x in 0..=b.len() {
                for y in x..=b.len() {
                    let cost = edit_distance(seed, &b[x..y]);
                    if cost <= r {
                        out.push(Match {
                            start: Pos::new(row, x as u32),
                            end: Pos::new(row + k, y as u32),
                            cost,
                            seed: s,
                        });
                    }
                }
            }
        }
        dedup_matches(&mut out);
        out
    }

    fn lcg_seq(len: usize, seed: u32) -> Vec<u8> {
        let bases = [b'A', b'C', b'G', b'T'];
        let mut x = seed;
        (0..len)
            .map(|_| {
                x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                bases[(x >> 16) as usize % 4]
            })
            .collect()
    }

    #[test]
    fn exact_seed_found() {
        let a = b"ACGTTGCA";
        let b = b"GGACGTTGCAGG";
        let config = AlignConfig::explicit(4, 0, false);
        let ms = MatchSet::find(SeqPair::new(a, b), &config).unwrap();
        assert_eq!(ms.seeds.count, 2);
        assert!(ms.iter().any(|m| m.start == Pos::new(0, 2) && m.end == Pos::new(4, 6) && m.cost == 0));
        assert!(ms.iter().any(|m| m.start == Pos::new(4, 6) && m.end == Pos::new(8, 10) && m.cost == 0));
        assert!(ms.iter().all(|m| m.cost == 0));
    }

    #[test]
    fn matches_are_exhaustive_and_exact() {
        for (seed, (k, r)) in [(3u32, (6u32, 1u32)), (11, (8, 2)), (5, (5, 0)), (17, (9, 2))] {
            let a = lcg_seq(40, seed);
            let mut b = a.clone();
            b[7] = b'A';
            b.insert(20, b'C');
            b.remove(31);
            let config = AlignConfig::explicit(k, r, false);
            let found = MatchSet::find(SeqPair::new(&a, &b), &config).unwrap();
            assert_eq!(found.matches, brute_force(&a, &b, k, r), "k={} r={}", k, r);
        }
    }

    #[test]
    fn sorted_by_start() {
        let a = lcg_seq(60, 99);
        let b = lcg_seq(70, 99);
        let ms = MatchSet::find(SeqPair::new(&a, &b), &AlignConfig::explicit(6, 1, false)).unwrap();
        assert!(ms.matches.windows(2).all(|w| (w[0].start, w[0].end) < (w[1].start, w[1].end)));
    }

    #[test]
    fn no_seeds_for_short_a() {
        let ms = MatchSet::find(SeqPair::new(b"ACG", b"ACGACG"), &AlignConfig::default()).unwrap();
        assert_eq!(ms.seeds.count, 0);
        assert!(ms.is_empty());
    }

    #[test]
    fn invalid_config_finds_nothing() {
        let pair = SeqPair::new(b"ACGTACGT", b"ACGTACGT");
        let err = MatchSet::find(pair, &AlignConfig::explicit(0, 0, false)).unwrap_err();
        assert!(matches!(err, AlignError::InvalidConfig(ConfigError::ZeroSeedLength)));
        let index = TextIndex::build(b"ACGTACGT");
        let err = MatchSet::find_with_index(pair, &index, &AlignConfig::explicit(4, 4, false)).unwrap_err();
        assert!(matches!(err, AlignError::InvalidConfig(ConfigError::ErrorBudgetTooLarge { .. })));
    }

    #[test]
    fn matches_near_end_of_b() {
        // 出现在 B 末尾时窗口被截断，仍应找到较短的终点
        let a = b"TTTTACGTAC";
        let b = b"GGGGACGTA";
        let ms = MatchSet::find(SeqPair::new(a, b), &AlignConfig::explicit(5, 1, false)).unwrap();
        assert!(ms.iter().any(|m| m.seed == 1 && m.start == Pos::new(5, 5) && m.end == Pos::new(10, 9) && m.cost == 1));
    }
}
