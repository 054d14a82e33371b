//! 编辑图上的 A* 搜索。
//!
//! 启发式在搜索过程中会因剪枝而变大，因此出队时重新计算 h：若 f 变大则带新值重新入队；
//! 位置可以以更小的 g 被重新打开。

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::time::Instant;

use log::{debug, trace};

use super::cigar::Cigar;
use super::graph::{Edge, EditGraph};
use super::traceback::traceback;
use crate::error::{AlignError, Result};
use crate::heuristic::Heuristic;
use crate::stats::AstarStats;
use crate::util::{Cost, Pos, SeqPair};

pub(crate) type NodeId = u32;

/// 到达某状态的最后一步：从 parent 经 edge，再沿对角线贪心匹配 run 个碱基
#[derive(Debug, Clone, Copy)]
pub(crate) struct Link {
    pub parent: NodeId,
    pub edge: Edge,
    pub run: u32,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    pub pos: Pos,
    pub g: Cost,
    /// 起点为 None
    pub link: Option<Link>,
    pub expanded: bool,
}

/// 只追加的状态表，外加每个位置当前最优状态的索引
#[derive(Default)]
pub(crate) struct SearchTree {
    pub nodes: Vec<Node>,
    pub best: HashMap<Pos, NodeId>,
}

impl SearchTree {
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    #[inline]
    pub fn best_id(&self, pos: Pos) -> Option<NodeId> {
        self.best.get(&pos).copied()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.best.insert(node.pos, id);
        self.nodes.push(node);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct QueueEntry {
    f: Cost,
    g: Cost,
    node: NodeId,
}

impl Ord for QueueEntry {
    /// BinaryHeap 是大顶堆：f 小者优先，其次 g 大者，最后按入表顺序
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| self.g.cmp(&other.g))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// 搜索结果：最优代价、编辑脚本、统计
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub cost: Cost,
    pub cigar: Cigar,
    pub stats: AstarStats,
}

/// 在 pair 的编辑图上从 (0, 0) 搜索到 (n, m)。
///
/// `greedy_matching` 打开快速通道：有精确匹配时只走匹配边，并沿对角线直接延伸到
/// 失配或种子起止行为止。
pub fn astar<H: Heuristic>(pair: SeqPair<'_>, h: &mut H, greedy_matching: bool) -> Result<SearchResult> {
    let start_time = Instant::now();
    let graph = EditGraph::new(pair, greedy_matching);
    let target = graph.target();
    let mut stats = AstarStats::default();
    let mut tree = SearchTree::default();
    let mut queue = BinaryHeap::new();

    let root = tree.push(Node { pos: Pos::new(0, 0), g: 0, link: None, expanded: false });
    queue.push(QueueEntry { f: h.h(Pos::new(0, 0)), g: 0, node: root });
    stats.explored += 1;

    let end = loop {
        let Some(QueueEntry { f, g, node }) = queue.pop() else {
            return Err(AlignError::FrontierExhausted { expanded: stats.expanded, target });
        };
        let pos = tree.node(node).pos;
        // 已被更小 g 的状态取代，或已展开
        if tree.best_id(pos) != Some(node) || tree.node(node).expanded {
            continue;
        }

        let f_now = g + h.h(pos);
        if f_now > f {
            stats.retries += 1;
            queue.push(QueueEntry { f: f_now, g, node });
            continue;
        }

        tree.nodes[node as usize].expanded = true;
        stats.expanded += 1;
        if pos == target {
            break node;
        }
        if h.is_seed_start_or_end(pos) {
            let cnt = h.prune(pos);
            if cnt > 0 {
                trace!("expanded {} g={} pruned {} matches", pos, g, cnt);
            }
        }

        for (edge, next) in graph.successors(pos).into_iter().flatten() {
            let (next, run) = if greedy_matching { graph.extend_greedy(next, &*h) } else { (next, 0) };
            let next_g = g + edge.cost();
            if let Some(old) = tree.best_id(next) {
                let old = tree.node(old);
                if old.g <= next_g {
                    continue;
                }
                if old.expanded {
                    stats.reopened += 1;
                }
            }
            let id = tree.push(Node { pos: next, g: next_g, link: Some(Link { parent: node, edge, run }), expanded: false });
            queue.push(QueueEntry { f: next_g + h.h(next), g: next_g, node: id });
            stats.explored += 1;
            stats.greedy_extended += run as usize;
        }
    };
    stats.search_secs = start_time.elapsed().as_secs_f64();

    let tb_time = Instant::now();
    let cost = tree.node(end).g;
    let cigar = traceback(pair, &tree, end);
    stats.traceback_secs = tb_time.elapsed().as_secs_f64();
    stats.heuristic = h.stats();

    debug!(
        "astar n={} m={} cost={} expanded={} explored={} retries={} reopened={}",
        pair.a.len(),
        pair.b.len(),
        cost,
        stats.expanded,
        stats.explored,
        stats.retries,
        stats.reopened
    );
    Ok(SearchResult { cost, cigar, stats })
}
