use super::astar::{NodeId, SearchTree};
use super::cigar::{Cigar, CigarOp};
use super::graph::Edge;
use crate::util::{Pos, SeqPair};

/// 从终点状态回溯出编辑脚本。
///
/// 在每个记录过的状态上，先看邻居中是否有经替换、插入、删除（按此顺序）一步到达且 g 恰好相差 1 的，
/// 有则走过去；否则沿自身的父指针回退（贪心匹配段 + 最后一条边）。
/// 这样得到的脚本仍是最优的，并且与展开顺序无关地偏向先做替换。
pub(crate) fn traceback(pair: SeqPair<'_>, tree: &SearchTree, end: NodeId) -> Cigar {
    let mut ops: Vec<CigarOp> = Vec::new();
    let mut cur = end;
    loop {
        let node = tree.node(cur);
        let Some(link) = node.link else {
            break;
        };
        if let Some((edge, prev)) = preferred_predecessor(pair, tree, node.pos, node.g) {
            ops.push(edge.op());
            cur = prev;
            continue;
        }
        // 父指针：先撤销贪心段，再撤销边本身
        ops.extend(std::iter::repeat(CigarOp::Match).take(link.run as usize));
        ops.push(link.edge.op());
        cur = link.parent;
    }
    debug_assert_eq!(tree.node(cur).pos, Pos::new(0, 0));
    ops.reverse();
    Cigar::from_ops(ops)
}

fn preferred_predecessor(pair: SeqPair<'_>, tree: &SearchTree, pos: Pos, g: u32) -> Option<(Edge, NodeId)> {
    if g == 0 {
        return None;
    }
    for edge in [Edge::Sub, Edge::Ins, Edge::Del] {
        let Some(prev) = edge.back(pos) else {
            continue;
        };
        // 替换边只存在于失配位置
        if edge == Edge::Sub && pair.is_match(prev) {
            continue;
        }
        if let Some(id) = tree.best_id(prev) {
            if tree.node(id).g + 1 == g {
                return Some((edge, id));
            }
        }
    }
    None
}
