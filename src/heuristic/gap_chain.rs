//! 间隙链种子启发式（gap-chaining seed heuristic）。
//!
//! 对 u ≼ v 定义
//!
//! ```text
//! γ(u, v) = max(|(v.i - u.i) - (v.j - u.j)|,  P(u.i, v.i))
//! ```
//!
//! 其中第一项是换对角线所需的最少插入/删除数，P 是完全落在两行之间的种子势能之和。
//! 匹配 m 的链值为
//!
//! ```text
//! H(m) = m.cost + min( γ(m.end, t),  min_{m.end ≼ m'.start} γ(m.end, m'.start) + H(m') )
//! ```
//!
//! 而 h(u) = min( γ(u, t), min_{u ≼ m.start} γ(u, m.start) + H(m) )。
//! 最优路径上代价 ≤ r 的种子跨越都对应一个匹配，其余种子至少花费 r + 1，
//! 所以 h 不会超过真实剩余代价。

use log::trace;

use super::matches::{Match, MatchSet};
use super::prune::PruningPolicy;
use super::seeds::SeedSet;
use super::{Heuristic, HeuristicStats};
use crate::config::{AlignConfig, Prune};
use crate::error::Result;
use crate::index::TextIndex;
use crate::util::{Cost, Pos, SeqPair};

pub struct GapChainHeuristic {
    seeds: SeedSet,
    target: Pos,
    matches: Vec<Match>,
    active: Vec<bool>,
    /// 每个匹配的链值 H(m)，仅当下标 ≥ clean_from 时有效
    chain: Vec<Cost>,
    clean_from: usize,
    pruning: PruningPolicy,
    stats: HeuristicStats,
}

impl GapChainHeuristic {
    pub fn new(pair: SeqPair<'_>, set: MatchSet, prune: Prune) -> Self {
        let MatchSet { seeds, matches } = set;
        let n = matches.len();
        let pruning = PruningPolicy::new(prune, &matches);
        let mut h = Self {
            seeds,
            target: pair.target(),
            active: vec![true; n],
            chain: vec![0; n],
            clean_from: n,
            matches,
            pruning,
            stats: HeuristicStats::default(),
        };
        h.stats.seeds = seeds.count;
        h.stats.matches = n;
        h.stats.h0 = h.h(Pos::new(0, 0));
        h
    }

    /// 在 B 上构建临时索引并查找匹配
    pub fn build(pair: SeqPair<'_>, config: &AlignConfig) -> Result<Self> {
        Ok(Self::new(pair, MatchSet::find(pair, config)?, config.prune()))
    }

    pub fn build_with_index(pair: SeqPair<'_>, index: &TextIndex, config: &AlignConfig) -> Result<Self> {
        Ok(Self::new(pair, MatchSet::find_with_index(pair, index, config)?, config.prune()))
    }

    pub fn seeds(&self) -> &SeedSet {
        &self.seeds
    }

    /// γ(from, to)，要求 from ≼ to
    #[inline]
    fn gap_distance(&self, from: Pos, to: Pos) -> Cost {
        debug_assert!(from.precedes(&to));
        let di = (to.i - from.i) as i64;
        let dj = (to.j - from.j) as i64;
        let gap = (di - dj).unsigned_abs() as Cost;
        gap.max(self.seeds.potential_between(from.i, to.i))
    }

    /// 第一个起点行 ≥ row 的匹配下标
    #[inline]
    fn first_match_from_row(&self, row: u32) -> usize {
        self.matches.partition_point(|m| m.start.i < row)
    }

    /// 从 from 出发、只经过下标 ≥ first 的匹配的最小链代价。
    /// 调用前需保证这些下标的链值有效。
    fn best_from(&self, from: Pos, first: usize) -> Cost {
        let mut best = self.gap_distance(from, self.target);
        for idx in first..self.matches.len() {
            let m = &self.matches[idx];
            // P 沿排序方向单调不减，之后的匹配不可能更优
            if self.seeds.potential_between(from.i, m.start.i) >= best {
                break;
            }
            if !self.active[idx] || m.start.j < from.j {
                continue;
            }
            let cand = self.gap_distance(from, m.start) + self.chain[idx];
            if cand < best {
                best = cand;
            }
        }
        best
    }

    /// 保证下标 ≥ first 的链值全部有效：逆序补算 [first, clean_from)
    fn ensure_chain_from(&mut self, first: usize) {
        if first >= self.clean_from {
            return;
        }
        for idx in (first..self.clean_from).rev() {
            if !self.active[idx] {
                continue;
            }
            let m = self.matches[idx];
            let next = self.first_match_from_row(m.end.i);
            let value = m.cost + self.best_from(m.end, next);
            self.chain[idx] = value;
            self.stats.chain_evaluations += 1;
        }
        self.clean_from = first;
    }
}

impl Heuristic for GapChainHeuristic {
    fn h(&mut self, pos: Pos) -> Cost {
        if pos == self.target {
            return 0;
        }
        let first = self.first_match_from_row(pos.i);
        self.ensure_chain_from(first);
        self.best_from(pos, first)
    }

    fn prune(&mut self, pos: Pos) -> usize {
        let before = self.pruning.pruned();
        if let Some(highest) = self.pruning.prune(pos, &mut self.active) {
            // 之前的匹配都可能链接到被剪的匹配上，它们的链值失效
            self.clean_from = self.clean_from.max(highest);
            trace!("pruned at {} -> clean_from={}", pos, self.clean_from);
        }
        let cnt = self.pruning.pruned() - before;
        self.stats.pruned += cnt;
        cnt
    }

    fn is_seed_start_or_end(&self, pos: Pos) -> bool {
        self.seeds.is_seed_start_or_end(pos)
    }

    fn stats(&self) -> HeuristicStats {
        self.stats.clone()
    }
}
