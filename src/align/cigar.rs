use anyhow::{anyhow, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::util::Cost;

/// 编辑脚本操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CigarOp {
    /// `=` 精确匹配
    Match,
    /// `X` 替换
    Sub,
    /// `I` B 中有而 A 中没有的碱基
    Ins,
    /// `D` A 中有而 B 中没有的碱基
    Del,
}

impl CigarOp {
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            CigarOp::Match => '=',
            CigarOp::Sub => 'X',
            CigarOp::Ins => 'I',
            CigarOp::Del => 'D',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '=' => CigarOp::Match,
            'X' => CigarOp::Sub,
            'I' => CigarOp::Ins,
            'D' => CigarOp::Del,
            _ => return None,
        })
    }

    #[inline]
    pub fn cost(self) -> Cost {
        match self {
            CigarOp::Match => 0,
            _ => 1,
        }
    }

    /// (Δi, Δj)
    #[inline]
    pub fn delta(self) -> (u32, u32) {
        match self {
            CigarOp::Match | CigarOp::Sub => (1, 1),
            CigarOp::Ins => (0, 1),
            CigarOp::Del => (1, 0),
        }
    }
}

/// 游程编码的编辑脚本
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cigar {
    pub ops: Vec<(CigarOp, u32)>,
}

impl Cigar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: CigarOp) {
        self.push_n(op, 1);
    }

    pub fn push_n(&mut self, op: CigarOp, n: u32) {
        if n == 0 {
            return;
        }
        match self.ops.last_mut() {
            Some((last, len)) if *last == op => *len += n,
            _ => self.ops.push((op, n)),
        }
    }

    /// 由逐个操作符构建（相邻相同操作合并）
    pub fn from_ops(ops: impl IntoIterator<Item = CigarOp>) -> Self {
        let mut c = Self::new();
        for op in ops {
            c.push(op);
        }
        c
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// X、I、D 覆盖的碱基数之和
    pub fn cost(&self) -> Cost {
        self.ops.iter().map(|&(op, n)| op.cost() * n).sum()
    }

    /// 脚本消耗的 A 的长度（= + X + D）
    pub fn a_len(&self) -> u32 {
        self.ops.iter().map(|&(op, n)| op.delta().0 * n).sum()
    }

    /// 脚本消耗的 B 的长度（= + X + I）
    pub fn b_len(&self) -> u32 {
        self.ops.iter().map(|&(op, n)| op.delta().1 * n).sum()
    }

    /// 在 a、b 上逐步重放脚本，检查每个 = / X 是否名副其实，且恰好走到两条序列末尾
    pub fn verify(&self, a: &[u8], b: &[u8]) -> bool {
        let (mut i, mut j) = (0usize, 0usize);
        for &(op, n) in &self.ops {
            for _ in 0..n {
                match op {
                    CigarOp::Match | CigarOp::Sub => {
                        if i >= a.len() || j >= b.len() {
                            return false;
                        }
                        if (a[i] == b[j]) != (op == CigarOp::Match) {
                            return false;
                        }
                        i += 1;
                        j += 1;
                    }
                    CigarOp::Ins => {
                        if j >= b.len() {
                            return false;
                        }
                        j += 1;
                    }
                    CigarOp::Del => {
                        if i >= a.len() {
                            return false;
                        }
                        i += 1;
                    }
                }
            }
        }
        i == a.len() && j == b.len()
    }
}

impl fmt::Display for Cigar {
    /// 长度为 1 时省略数字，例如 `=I4=X=`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &(op, n) in &self.ops {
            if n > 1 {
                write!(f, "{}", n)?;
            }
            write!(f, "{}", op.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for Cigar {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let mut cigar = Cigar::new();
        let mut num: Option<u32> = None;
        for ch in s.chars() {
            if let Some(d) = ch.to_digit(10) {
                let v = num.unwrap_or(0);
                num = Some(
                    v.checked_mul(10)
                        .and_then(|v| v.checked_add(d))
                        .ok_or_else(|| anyhow!("run length overflow in '{}'", s))?,
                );
            } else {
                let op = CigarOp::from_char(ch).ok_or_else(|| anyhow!("unknown operator '{}' in '{}'", ch, s))?;
                cigar.push_n(op, num.take().unwrap_or(1));
            }
        }
        if num.is_some() {
            bail!("dangling run length at end of '{}'", s);
        }
        Ok(cigar)
    }
}
