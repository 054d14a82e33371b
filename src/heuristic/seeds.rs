use crate::util::{Cost, Pos};

/// A 上不重叠的定长种子划分。
///
/// 种子 s 覆盖 A 的行区间 [s·k, s·k + k)；末尾不足 k 的部分不构成种子。
/// 每个种子的势能为 r + 1：任何路径跨过一个没有代价 ≤ r 匹配的种子，至少需要 r + 1 次编辑。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSet {
    pub k: u32,
    pub count: u32,
    pub potential: Cost,
}

impl SeedSet {
    /// 调用方需保证 k > 0（见 [`AlignConfig::validate`](crate::config::AlignConfig::validate)）
    pub(crate) fn new(a_len: u32, k: u32, potential: Cost) -> Self {
        debug_assert!(k > 0);
        Self { k, count: a_len / k, potential }
    }

    #[inline]
    pub fn start(&self, s: u32) -> u32 {
        s * self.k
    }

    /// 种子覆盖区域的终止行（不含）
    #[inline]
    pub fn covered_end(&self) -> u32 {
        self.count * self.k
    }

    /// 完全落在行区间 [from, to) 内的种子个数
    #[inline]
    pub fn seeds_between(&self, from: u32, to: u32) -> u32 {
        let first = (from + self.k - 1) / self.k;
        let last = (to / self.k).min(self.count);
        last.saturating_sub(first)
    }

    /// 行区间 [from, to) 内种子势能之和
    #[inline]
    pub fn potential_between(&self, from: u32, to: u32) -> Cost {
        self.seeds_between(from, to) * self.potential
    }

    /// pos 是否处于某个种子的起始行或终止行。
    /// 剪枝只在这些行上发生，快速通道不能越过它们。
    #[inline]
    pub fn is_seed_start_or_end(&self, pos: Pos) -> bool {
        self.count > 0 && pos.i % self.k == 0 && pos.i <= self.covered_end()
    }
}
