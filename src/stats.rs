use serde::{Deserialize, Serialize};

use crate::heuristic::HeuristicStats;

/// 一次比对的搜索统计
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AstarStats {
    /// 被展开的状态数（含重开）
    pub expanded: usize,
    /// 被加入边界的状态数
    pub explored: usize,
    /// 快速通道沿对角线直接跳过的匹配数
    pub greedy_extended: usize,
    /// 出队时启发式已变大、以新 f 重新入队的次数
    pub retries: usize,
    /// 展开已展开过的位置的次数
    pub reopened: usize,
    pub heuristic: HeuristicStats,
    /// 匹配查找与启发式初始化耗时（秒）
    pub precomp_secs: f64,
    pub search_secs: f64,
    pub traceback_secs: f64,
}

impl AstarStats {
    pub fn total_secs(&self) -> f64 {
        self.precomp_secs + self.search_secs + self.traceback_secs
    }
}
