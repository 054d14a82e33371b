use super::cigar::{Cigar, CigarOp};
use crate::util::Cost;

/// 单位代价全局比对（Needleman-Wunsch），二次时间与空间。
/// 主要用作正确性参照，以及很短序列的直接比对。
pub fn nw_align(a: &[u8], b: &[u8]) -> (Cost, Cigar) {
    nw_align_with_buf(a, b, &mut NwBuffer::new())
}

/// DP 工作缓冲区，可跨调用复用
#[derive(Default)]
pub struct NwBuffer {
    d: Vec<Cost>,
    prev: Vec<Cost>,
    cur: Vec<Cost>,
}

impl NwBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    fn resize(&mut self, size: usize) {
        self.d.clear();
        self.d.resize(size, 0);
    }
}

pub fn nw_align_with_buf(a: &[u8], b: &[u8], buf: &mut NwBuffer) -> (Cost, Cigar) {
    let n = a.len();
    let m = b.len();
    let cols = m + 1;
    buf.resize((n + 1) * cols);
    let d = &mut buf.d;

    for j in 0..=m {
        d[j] = j as Cost;
    }
    for i in 1..=n {
        d[i * cols] = i as Cost;
        for j in 1..=m {
            let diag = d[(i - 1) * cols + j - 1] + Cost::from(a[i - 1] != b[j - 1]);
            let up = d[(i - 1) * cols + j] + 1;
            let left = d[i * cols + j - 1] + 1;
            d[i * cols + j] = diag.min(up).min(left);
        }
    }

    // traceback: 对角线优先，其次 I、D
    let mut ops = Vec::with_capacity(n + m);
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        let here = d[i * cols + j];
        if i > 0 && j > 0 {
            let mismatch = a[i - 1] != b[j - 1];
            if d[(i - 1) * cols + j - 1] + Cost::from(mismatch) == here {
                ops.push(if mismatch { CigarOp::Sub } else { CigarOp::Match });
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if j > 0 && d[i * cols + j - 1] + 1 == here {
            ops.push(CigarOp::Ins);
            j -= 1;
        } else {
            ops.push(CigarOp::Del);
            i -= 1;
        }
    }
    ops.reverse();
    (d[n * cols + m], Cigar::from_ops(ops))
}

/// 只求编辑距离（两行滚动）
pub fn edit_distance(a: &[u8], b: &[u8]) -> Cost {
    edit_distance_with_buf(a, b, &mut NwBuffer::new())
}

pub fn edit_distance_with_buf(a: &[u8], b: &[u8], buf: &mut NwBuffer) -> Cost {
    let m = b.len();
    buf.prev.clear();
    buf.prev.extend(0..=m as Cost);
    buf.cur.clear();
    buf.cur.resize(m + 1, 0);
    for (i, &ca) in a.iter().enumerate() {
        buf.cur[0] = i as Cost + 1;
        for (j, &cb) in b.iter().enumerate() {
            let diag = buf.prev[j] + Cost::from(ca != cb);
            buf.cur[j + 1] = diag.min(buf.prev[j + 1] + 1).min(buf.cur[j] + 1);
        }
        std::mem::swap(&mut buf.prev, &mut buf.cur);
    }
    buf.prev[m]
}
