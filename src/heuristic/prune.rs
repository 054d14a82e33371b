use std::collections::HashMap;

use super::matches::Match;
use crate::config::Prune;
use crate::util::Pos;

/// 匹配剪枝：搜索展开某个匹配的起点（可选：终点）时，将其永久移出启发式。
///
/// 剪枝只会删除匹配，因此启发式值只升不降。
pub struct PruningPolicy {
    mode: Prune,
    by_start: HashMap<Pos, Vec<u32>>,
    by_end: HashMap<Pos, Vec<u32>>,
    pub pruned_by_start: usize,
    pub pruned_by_end: usize,
}

impl PruningPolicy {
    pub fn new(mode: Prune, matches: &[Match]) -> Self {
        let mut by_start: HashMap<Pos, Vec<u32>> = HashMap::new();
        let mut by_end: HashMap<Pos, Vec<u32>> = HashMap::new();
        for (idx, m) in matches.iter().enumerate() {
            if mode.start() {
                by_start.entry(m.start).or_default().push(idx as u32);
            }
            if mode.end() {
                by_end.entry(m.end).or_default().push(idx as u32);
            }
        }
        Self { mode, by_start, by_end, pruned_by_start: 0, pruned_by_end: 0 }
    }

    pub fn mode(&self) -> Prune {
        self.mode
    }

    #[inline]
    pub fn pruned(&self) -> usize {
        self.pruned_by_start + self.pruned_by_end
    }

    /// 剪掉以 pos 为起点/终点的全部活跃匹配。
    /// 返回被剪匹配中的最大下标（没有剪枝时为 None）。
    pub fn prune(&mut self, pos: Pos, active: &mut [bool]) -> Option<usize> {
        let mut highest = None;
        if let Some(idxs) = self.by_start.remove(&pos) {
            self.pruned_by_start += deactivate(&idxs, active, &mut highest);
        }
        if let Some(idxs) = self.by_end.remove(&pos) {
            self.pruned_by_end += deactivate(&idxs, active, &mut highest);
        }
        highest
    }
}

fn deactivate(idxs: &[u32], active: &mut [bool], highest: &mut Option<usize>) -> usize {
    let mut cnt = 0;
    for &idx in idxs {
        let idx = idx as usize;
        if active[idx] {
            active[idx] = false;
            cnt += 1;
            *highest = Some(highest.map_or(idx, |h| h.max(idx)));
        }
    }
    cnt
}
