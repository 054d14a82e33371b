use serde::{Deserialize, Serialize};
use std::fmt;

/// 编辑代价（单位代价模型下的编辑次数）
pub type Cost = u32;

/// 编辑图上的位置 (i, j)：已消耗 A 的前 i 个碱基、B 的前 j 个碱基。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Pos {
    pub i: u32,
    pub j: u32,
}

impl Pos {
    #[inline]
    pub const fn new(i: u32, j: u32) -> Self {
        Self { i, j }
    }

    /// 对角线编号 i - j
    #[inline]
    pub fn diagonal(&self) -> i64 {
        self.i as i64 - self.j as i64
    }

    /// 偏序关系：self 在 other 的左上方（两个坐标都不大于）
    #[inline]
    pub fn precedes(&self, other: &Pos) -> bool {
        self.i <= other.i && self.j <= other.j
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// 只读序列视图，不拷贝、不校验内容。
#[derive(Debug, Clone, Copy)]
pub struct SeqView<'a> {
    bytes: &'a [u8],
}

impl<'a> SeqView<'a> {
    /// 长度须不超过 u32::MAX，比对入口会先行拒绝更长的输入
    #[inline]
    pub fn new(bytes: &'a [u8]) -> Self {
        debug_assert!(bytes.len() <= u32::MAX as usize);
        Self { bytes }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.bytes.len() as u32
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn at(&self, i: u32) -> u8 {
        self.bytes[i as usize]
    }

    #[inline]
    pub fn slice(&self, from: u32, to: u32) -> &'a [u8] {
        &self.bytes[from as usize..to as usize]
    }

    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

/// 一对待比对序列：A 沿 i 方向，B 沿 j 方向。
#[derive(Debug, Clone, Copy)]
pub struct SeqPair<'a> {
    pub a: SeqView<'a>,
    pub b: SeqView<'a>,
}

impl<'a> SeqPair<'a> {
    pub fn new(a: &'a [u8], b: &'a [u8]) -> Self {
        Self { a: SeqView::new(a), b: SeqView::new(b) }
    }

    /// 编辑图右下角 (n, m)
    #[inline]
    pub fn target(&self) -> Pos {
        Pos::new(self.a.len(), self.b.len())
    }

    /// pos 处的对角线边是否为精确匹配
    #[inline]
    pub fn is_match(&self, pos: Pos) -> bool {
        pos.i < self.a.len() && pos.j < self.b.len() && self.a.at(pos.i) == self.b.at(pos.j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_partial_order() {
        let a = Pos::new(2, 3);
        assert!(a.precedes(&Pos::new(2, 3)));
        assert!(a.precedes(&Pos::new(5, 3)));
        assert!(!a.precedes(&Pos::new(1, 9)));
        assert!(!a.precedes(&Pos::new(9, 2)));
        assert_eq!(Pos::new(3, 7).diagonal(), -4);
    }

    #[test]
    fn pair_target_and_match() {
        let p = SeqPair::new(b"ACGT", b"AGT");
        assert_eq!(p.target(), Pos::new(4, 3));
        assert!(p.is_match(Pos::new(0, 0)));
        assert!(!p.is_match(Pos::new(1, 1)));
        assert!(p.is_match(Pos::new(2, 1)));
        // 边界处没有对角线边
        assert!(!p.is_match(Pos::new(4, 2)));
        assert_eq!(p.a.slice(1, 3), b"CG");
    }
}
