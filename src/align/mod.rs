//! 比对入口：配置校验、启发式构建、A* 搜索与批量比对。

pub mod astar;
pub mod cigar;
pub mod graph;
pub mod nw;
mod traceback;

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::AlignConfig;
use crate::error::{AlignError, Result};
use crate::heuristic::{GapChainHeuristic, Heuristic};
use crate::index::TextIndex;
use crate::stats::AstarStats;
use crate::util::{Cost, SeqPair};

pub use astar::{astar, SearchResult};

/// 单条序列的最大长度
pub const MAX_SEQ_LEN: usize = u32::MAX as usize;
pub use cigar::{Cigar, CigarOp};

/// 一次全局比对的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alignment {
    /// 最小编辑数
    pub cost: Cost,
    /// 把 A 变成 B 的编辑脚本，其代价恰为 cost
    pub cigar: Cigar,
    pub stats: AstarStats,
}

impl From<SearchResult> for Alignment {
    fn from(r: SearchResult) -> Self {
        Self { cost: r.cost, cigar: r.cigar, stats: r.stats }
    }
}

/// 默认配置（k = 15, r = 2，仅按起点剪枝）
pub fn align(a: &[u8], b: &[u8]) -> Result<Alignment> {
    align_with_config(a, b, &AlignConfig::default())
}

/// 显式指定种子长度、误差预算与是否按终点剪枝
pub fn align_explicit(a: &[u8], b: &[u8], seed_length: u32, error_budget: u32, prune_by_end: bool) -> Result<Alignment> {
    align_with_config(a, b, &AlignConfig::explicit(seed_length, error_budget, prune_by_end))
}

pub fn align_tuned_a(a: &[u8], b: &[u8]) -> Result<Alignment> {
    align_with_config(a, b, &AlignConfig::tuned_a())
}

pub fn align_tuned_b(a: &[u8], b: &[u8]) -> Result<Alignment> {
    align_with_config(a, b, &AlignConfig::tuned_b())
}

pub fn align_with_config(a: &[u8], b: &[u8], config: &AlignConfig) -> Result<Alignment> {
    config.validate()?;
    check_lengths(a, b)?;
    if let Some(trivial) = align_trivial(a, b) {
        return Ok(trivial);
    }
    let pair = SeqPair::new(a, b);
    let t = Instant::now();
    let mut h = GapChainHeuristic::build(pair, config)?;
    let precomp = t.elapsed().as_secs_f64();
    run_search(pair, &mut h, config.enable_fast_path, precomp)
}

/// 复用预先构建的 B 的索引（例如同一条 B 对多条 A）
pub fn align_with_index(a: &[u8], b: &[u8], index: &TextIndex, config: &AlignConfig) -> Result<Alignment> {
    config.validate()?;
    check_lengths(a, b)?;
    if index.text_len as usize != b.len() {
        return Err(AlignError::IndexMismatch { expected: b.len(), found: index.text_len as usize });
    }
    // 错误的索引会漏掉匹配，启发式随之高估
    index.verify_text(b).map_err(|e| AlignError::IndexTextMismatch(e.to_string()))?;
    if let Some(trivial) = align_trivial(a, b) {
        return Ok(trivial);
    }
    let pair = SeqPair::new(a, b);
    let t = Instant::now();
    let mut h = GapChainHeuristic::build_with_index(pair, index, config)?;
    let precomp = t.elapsed().as_secs_f64();
    run_search(pair, &mut h, config.enable_fast_path, precomp)
}

/// 使用调用方提供的启发式，例如无种子的 [`GapCost`](crate::heuristic::GapCost)
pub fn align_with_heuristic<H: Heuristic>(a: &[u8], b: &[u8], h: &mut H, enable_fast_path: bool) -> Result<Alignment> {
    check_lengths(a, b)?;
    run_search(SeqPair::new(a, b), h, enable_fast_path, 0.0)
}

/// 并行比对多对序列，结果顺序与输入一致。
/// 每对之间没有共享的可变状态。
pub fn align_batch<S>(pairs: &[(S, S)], config: &AlignConfig) -> Vec<Result<Alignment>>
where
    S: AsRef<[u8]> + Sync,
{
    let t = Instant::now();
    let results: Vec<Result<Alignment>> = pairs
        .par_iter()
        .map(|(a, b)| align_with_config(a.as_ref(), b.as_ref(), config))
        .collect();
    info!(
        "aligned {} pairs in {:.3}s ({} failed)",
        pairs.len(),
        t.elapsed().as_secs_f64(),
        results.iter().filter(|r| r.is_err()).count()
    );
    results
}

fn run_search<H: Heuristic>(pair: SeqPair<'_>, h: &mut H, fast_path: bool, precomp_secs: f64) -> Result<Alignment> {
    let mut res = astar(pair, h, fast_path)?;
    res.stats.precomp_secs = precomp_secs;
    debug_assert_eq!(res.cigar.cost(), res.cost);
    debug!(
        "cost={} h0={} matches={} pruned={} total={:.4}s",
        res.cost,
        res.stats.heuristic.h0,
        res.stats.heuristic.matches,
        res.stats.heuristic.pruned,
        res.stats.total_secs()
    );
    Ok(res.into())
}

/// 位置坐标是 u32，更长的输入直接拒绝而不是截断
fn check_lengths(a: &[u8], b: &[u8]) -> Result<()> {
    check_lengths_within(a, b, MAX_SEQ_LEN)
}

fn check_lengths_within(a: &[u8], b: &[u8], max: usize) -> Result<()> {
    for len in [a.len(), b.len()] {
        if len > max {
            return Err(AlignError::SequenceTooLong { len, max });
        }
    }
    Ok(())
}

/// 任一条序列为空时，比对只能是全插入或全删除
fn align_trivial(a: &[u8], b: &[u8]) -> Option<Alignment> {
    if !a.is_empty() && !b.is_empty() {
        return None;
    }
    let mut cigar = Cigar::new();
    cigar.push_n(CigarOp::Del, a.len() as u32);
    cigar.push_n(CigarOp::Ins, b.len() as u32);
    Some(Alignment { cost: cigar.cost(), cigar, stats: AstarStats::default() })
}
