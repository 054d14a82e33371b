//! 搜索使用的下界启发式。

pub mod gap_chain;
pub mod matches;
pub mod prune;
pub mod seeds;

use serde::{Deserialize, Serialize};

use crate::util::{Cost, Pos};

pub use gap_chain::GapChainHeuristic;
pub use matches::{Match, MatchSet};
pub use prune::PruningPolicy;
pub use seeds::SeedSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeuristicStats {
    pub seeds: u32,
    pub matches: usize,
    pub pruned: usize,
    /// 起点处的启发式值
    pub h0: Cost,
    /// 链值（重新）计算次数
    pub chain_evaluations: usize,
}

/// A* 与下界之间的接口。
///
/// `h` 必须始终不超过真实剩余代价；`prune` 之后同一位置的值只能变大。
pub trait Heuristic {
    fn h(&mut self, pos: Pos) -> Cost;

    /// 展开 pos 时调用，返回被剪掉的匹配数
    fn prune(&mut self, _pos: Pos) -> usize {
        0
    }

    /// 快速通道不能越过这些位置，否则会漏掉剪枝
    fn is_seed_start_or_end(&self, _pos: Pos) -> bool {
        false
    }

    fn stats(&self) -> HeuristicStats {
        HeuristicStats::default()
    }
}

/// 只计对角线差的下界，没有种子。
pub struct GapCost {
    target: Pos,
}

impl GapCost {
    pub fn new(target: Pos) -> Self {
        Self { target }
    }
}

impl Heuristic for GapCost {
    #[inline]
    fn h(&mut self, pos: Pos) -> Cost {
        let di = (self.target.i - pos.i) as i64;
        let dj = (self.target.j - pos.j) as i64;
        (di - dj).unsigned_abs() as Cost
    }

    fn stats(&self) -> HeuristicStats {
        let h0 = self.target.diagonal().unsigned_abs() as Cost;
        HeuristicStats { h0, ..HeuristicStats::default() }
    }
}
