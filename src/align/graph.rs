use super::cigar::CigarOp;
use crate::heuristic::Heuristic;
use crate::util::{Cost, Pos, SeqPair};

/// 编辑图上的边
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// 对角线，A[i] == B[j]，代价 0
    Match,
    /// 对角线，A[i] != B[j]，代价 1
    Sub,
    /// 只前进 j，代价 1
    Ins,
    /// 只前进 i，代价 1
    Del,
}

impl Edge {
    #[inline]
    pub fn cost(self) -> Cost {
        match self {
            Edge::Match => 0,
            _ => 1,
        }
    }

    #[inline]
    pub fn op(self) -> CigarOp {
        match self {
            Edge::Match => CigarOp::Match,
            Edge::Sub => CigarOp::Sub,
            Edge::Ins => CigarOp::Ins,
            Edge::Del => CigarOp::Del,
        }
    }

    #[inline]
    pub fn forward(self, p: Pos) -> Pos {
        match self {
            Edge::Match | Edge::Sub => Pos::new(p.i + 1, p.j + 1),
            Edge::Ins => Pos::new(p.i, p.j + 1),
            Edge::Del => Pos::new(p.i + 1, p.j),
        }
    }

    /// 沿该边回退一步，越界时返回 None
    #[inline]
    pub fn back(self, p: Pos) -> Option<Pos> {
        Some(match self {
            Edge::Match | Edge::Sub => Pos::new(p.i.checked_sub(1)?, p.j.checked_sub(1)?),
            Edge::Ins => Pos::new(p.i, p.j.checked_sub(1)?),
            Edge::Del => Pos::new(p.i.checked_sub(1)?, p.j),
        })
    }
}

/// 两条序列构成的隐式编辑图
pub struct EditGraph<'a> {
    pub pair: SeqPair<'a>,
    /// 贪心匹配：能走精确匹配时只走匹配边，并沿对角线一次走完
    pub greedy_matching: bool,
}

impl<'a> EditGraph<'a> {
    pub fn new(pair: SeqPair<'a>, greedy_matching: bool) -> Self {
        Self { pair, greedy_matching }
    }

    #[inline]
    pub fn target(&self) -> Pos {
        self.pair.target()
    }

    /// 对角线边（若存在）的类型
    #[inline]
    pub fn diagonal_edge(&self, p: Pos) -> Option<Edge> {
        if p.i < self.pair.a.len() && p.j < self.pair.b.len() {
            Some(if self.pair.a.at(p.i) == self.pair.b.at(p.j) { Edge::Match } else { Edge::Sub })
        } else {
            None
        }
    }

    /// pos 的出边。
    /// 开启贪心匹配时，若对角线是精确匹配则只保留这一条：
    /// A[i] == B[j] 时 (i, j) 到终点的距离等于 (i+1, j+1) 到终点的距离。
    pub fn successors(&self, p: Pos) -> [Option<(Edge, Pos)>; 3] {
        let diag = self.diagonal_edge(p);
        if self.greedy_matching && diag == Some(Edge::Match) {
            return [Some((Edge::Match, Edge::Match.forward(p))), None, None];
        }
        let ins = (p.j < self.pair.b.len()).then(|| (Edge::Ins, Edge::Ins.forward(p)));
        let del = (p.i < self.pair.a.len()).then(|| (Edge::Del, Edge::Del.forward(p)));
        [diag.map(|e| (e, e.forward(p))), ins, del]
    }

    /// 从 p 开始沿对角线跳过连续精确匹配，但不越过种子起止行（剪枝只在那些行上触发）。
    /// 返回停下的位置与跳过的匹配数。
    pub fn extend_greedy<H: Heuristic>(&self, mut p: Pos, h: &H) -> (Pos, u32) {
        let mut run = 0;
        while self.pair.is_match(p) && !h.is_seed_start_or_end(p) {
            p = Pos::new(p.i + 1, p.j + 1);
            run += 1;
        }
        (p, run)
    }
}
