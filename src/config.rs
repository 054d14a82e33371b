//! 比对参数。
//!
//! 所有入口函数都只是在选择一条 [`AlignConfig`]；参数只影响搜索工作量，
//! 不影响返回的最优代价。

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 参数校验错误，在任何搜索工作开始之前返回
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("seed length must be positive")]
    ZeroSeedLength,
    #[error("error budget {error_budget} must be smaller than seed length {seed_length}")]
    ErrorBudgetTooLarge { error_budget: u32, seed_length: u32 },
}

/// 剪枝方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Prune {
    None,
    Start,
    End,
    Both,
}

impl Prune {
    pub fn from_flags(start: bool, end: bool) -> Self {
        match (start, end) {
            (false, false) => Prune::None,
            (true, false) => Prune::Start,
            (false, true) => Prune::End,
            (true, true) => Prune::Both,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Prune::None)
    }

    #[inline]
    pub fn start(&self) -> bool {
        matches!(self, Prune::Start | Prune::Both)
    }

    #[inline]
    pub fn end(&self) -> bool {
        matches!(self, Prune::End | Prune::Both)
    }
}

/// 比对配置
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// 种子长度 k
    pub seed_length: u32,
    /// 种子匹配允许的最大编辑数 r（匹配代价 ≤ r）
    pub error_budget: u32,
    /// 展开匹配起点时剪掉该匹配
    pub prune_by_start: bool,
    /// 额外地在展开匹配终点时剪枝
    pub prune_by_end: bool,
    /// 沿对角线贪心地跳过连续精确匹配
    pub enable_fast_path: bool,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            seed_length: 15,
            error_budget: 2,
            prune_by_start: true,
            prune_by_end: false,
            enable_fast_path: false,
        }
    }
}

impl AlignConfig {
    /// 调用方指定 k、r 与是否按终点剪枝
    pub fn explicit(seed_length: u32, error_budget: u32, prune_by_end: bool) -> Self {
        Self { seed_length, error_budget, prune_by_end, ..Self::default() }
    }

    /// 调优预设 A：更短的种子、更小的误差预算
    pub fn tuned_a() -> Self {
        Self { seed_length: 12, error_budget: 1, ..Self::default() }
    }

    /// 调优预设 B：在 A 的基础上按两端剪枝并开启对角线快速通道
    pub fn tuned_b() -> Self {
        Self {
            seed_length: 12,
            error_budget: 1,
            prune_by_start: true,
            prune_by_end: true,
            enable_fast_path: true,
        }
    }

    pub fn with_fast_path(mut self, enabled: bool) -> Self {
        self.enable_fast_path = enabled;
        self
    }

    pub fn with_pruning(mut self, start: bool, end: bool) -> Self {
        self.prune_by_start = start;
        self.prune_by_end = end;
        self
    }

    pub fn prune(&self) -> Prune {
        Prune::from_flags(self.prune_by_start, self.prune_by_end)
    }

    /// 每个种子的势能：找不到代价 ≤ r 的匹配时，跨过该种子至少要 r + 1 次编辑
    #[inline]
    pub fn seed_potential(&self) -> u32 {
        self.error_budget + 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed_length == 0 {
            return Err(ConfigError::ZeroSeedLength);
        }
        if self.error_budget >= self.seed_length {
            return Err(ConfigError::ErrorBudgetTooLarge {
                error_budget: self.error_budget,
                seed_length: self.seed_length,
            });
        }
        Ok(())
    }
}
