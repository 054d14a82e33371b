use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::sa::build_sa;
use crate::util::dna;

/// 默认 Occ 采样间隔
pub const DEFAULT_BLOCK: usize = 64;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct IndexMeta {
    pub source: Option<String>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}

/// 单条序列上的 FM 索引，用于精确查找种子片段在 B 中的出现位置。
/// - 字母表见 [`dna::to_alphabet`]，0 预留为 $。
/// - 定长分块的 Occ 采样（块内顺扫补偿）。
/// - 保存完整 SA，区间可直接映射为文本位置。
#[derive(Debug, Serialize, Deserialize)]
pub struct TextIndex {
    pub sigma: u8,
    pub block: u32,
    /// 被索引序列的长度（不含 $）
    pub text_len: u32,
    /// C[c] = 文本中字母 < c 的累计数量
    pub c: Vec<u32>,
    pub bwt: Vec<u8>,
    /// occ_samples[block_id * sigma + c]
    pub occ_samples: Vec<u32>,
    pub sa: Vec<u32>,
    #[serde(default)]
    pub meta: IndexMeta,
}

impl TextIndex {
    pub fn build(seq: &[u8]) -> Self {
        Self::build_with_block(seq, DEFAULT_BLOCK)
    }

    pub fn build_with_block(seq: &[u8], block: usize) -> Self {
        let block = block.max(1);
        let mut text = dna::encode(seq);
        text.push(0);
        let sa = build_sa(&text);
        let n = text.len();

        // BWT[k] = text[SA[k] - 1]（循环）
        let bwt: Vec<u8> = sa
            .iter()
            .map(|&p| if p == 0 { text[n - 1] } else { text[p as usize - 1] })
            .collect();

        let sigma_us = dna::SIGMA;
        let (c, occ_samples) = derive_tables(&bwt, sigma_us, block);

        Self {
            sigma: sigma_us as u8,
            block: block as u32,
            text_len: seq.len() as u32,
            c,
            bwt,
            occ_samples,
            sa,
            meta: IndexMeta::default(),
        }
    }

    /// 记录来源与构建时间
    pub fn stamp(&mut self, source: &str) {
        self.meta = IndexMeta {
            source: Some(source.to_string()),
            build_args: Some(format!("block={}", self.block)),
            build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
        };
    }

    /// BWT[0..pos) 中 c 的出现次数
    #[inline]
    pub fn occ(&self, c: u8, pos: usize) -> u32 {
        if pos == 0 { return 0; }
        let sigma_us = self.sigma as usize;
        let block = self.block as usize;
        let bi = (pos - 1) / block;
        let base = self.occ_samples[bi * sigma_us + c as usize];
        let add = self.bwt[bi * block..pos].iter().filter(|&&ch| ch == c).count() as u32;
        base + add
    }

    /// 在 SA 区间 [l, r) 前扩展字符 c 后的新区间
    #[inline]
    pub fn rank_range(&self, c: u8, l: usize, r: usize) -> (usize, usize) {
        let c0 = self.c[c as usize] as usize;
        (c0 + self.occ(c, l) as usize, c0 + self.occ(c, r) as usize)
    }

    /// 反向搜索精确匹配，pat 为已编码字母（不含 0）
    pub fn backward_search(&self, pat: &[u8]) -> Option<(usize, usize)> {
        if self.bwt.is_empty() { return None; }
        let mut l = 0usize;
        let mut r = self.bwt.len();
        for &a in pat.iter().rev() {
            let (nl, nr) = self.rank_range(a, l, r);
            if nl >= nr { return None; }
            l = nl;
            r = nr;
        }
        Some((l, r))
    }

    pub fn sa_interval_positions(&self, l: usize, r: usize) -> &[u32] {
        &self.sa[l..r]
    }

    /// 原始字节模式在文本中的全部出现位置（升序）。
    /// 由于字母表合并了非 ACGT 字节，结果可能包含假阳性，调用方需在原始序列上校验。
    pub fn occurrences(&self, pattern: &[u8]) -> Vec<u32> {
        if pattern.is_empty() {
            return Vec::new();
        }
        let pat = dna::encode(pattern);
        let mut out = match self.backward_search(&pat) {
            Some((l, r)) => self.sa_interval_positions(l, r).to_vec(),
            None => Vec::new(),
        };
        out.sort_unstable();
        out
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let f = std::fs::File::create(path)?;
        let mut w = std::io::BufWriter::new(f);
        bincode::serialize_into(&mut w, self)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let f = std::fs::File::open(path)?;
        let idx: Self = bincode::deserialize_from(std::io::BufReader::new(f))?;
        idx.check_consistency()
            .map_err(|e| anyhow::anyhow!("index file '{}' is truncated or inconsistent: {}", path, e))?;
        Ok(idx)
    }

    /// 检查各表之间是否自洽：长度、字母范围、SA 为排列、C 表与 Occ 采样可由 BWT 重新推出。
    /// 通过后，查询不会越界。
    pub fn check_consistency(&self) -> Result<()> {
        let sigma = self.sigma as usize;
        let block = self.block as usize;
        let n = self.text_len as usize + 1;
        if sigma != dna::SIGMA {
            bail!("alphabet size {} (expected {})", sigma, dna::SIGMA);
        }
        if block == 0 {
            bail!("zero occ block size");
        }
        if self.sa.len() != n || self.bwt.len() != n {
            bail!("sa/bwt length {}/{} for a text of {} bases", self.sa.len(), self.bwt.len(), self.text_len);
        }
        if let Some(&ch) = self.bwt.iter().find(|&&ch| ch as usize >= sigma) {
            bail!("bwt symbol {} outside the alphabet", ch);
        }
        if self.bwt.iter().filter(|&&ch| ch == 0).count() != 1 {
            bail!("bwt must contain exactly one sentinel");
        }
        let mut seen = vec![false; n];
        for &p in &self.sa {
            match seen.get_mut(p as usize) {
                Some(s) if !*s => *s = true,
                _ => bail!("suffix array is not a permutation (entry {})", p),
            }
        }
        let (c, occ_samples) = derive_tables(&self.bwt, sigma, block);
        if self.c != c {
            bail!("C table does not match the bwt");
        }
        if self.occ_samples != occ_samples {
            bail!("occ samples do not match the bwt");
        }
        Ok(())
    }

    /// 确认索引确实建在 seq 上。
    ///
    /// 从 $ 所在行沿 LF 映射逆向走完整个文本：每一步的 BWT 字符必须等于编码后的 seq，
    /// SA 值必须等于当前后缀的起点。走遍全部行说明 BWT 与 SA 都属于这条序列。
    pub fn verify_text(&self, seq: &[u8]) -> Result<()> {
        if self.text_len as usize != seq.len() {
            bail!("index covers {} bases, sequence has {}", self.text_len, seq.len());
        }
        self.check_consistency()?;
        let text = dna::encode(seq);
        let mut row = 0usize;
        for p in (0..text.len()).rev() {
            let ch = self.bwt[row];
            if self.sa[row] as usize != p + 1 || ch != text[p] {
                bail!("indexed text differs from the sequence at position {}", p);
            }
            row = self.c[ch as usize] as usize + self.occ(ch, row) as usize;
        }
        if self.sa[row] != 0 || self.bwt[row] != 0 {
            bail!("indexed text differs from the sequence at position 0");
        }
        Ok(())
    }
}

/// 由 BWT 推导 C 表与 Occ 采样
fn derive_tables(bwt: &[u8], sigma: usize, block: usize) -> (Vec<u32>, Vec<u32>) {
    let n = bwt.len();
    let mut freq = vec![0u32; sigma];
    for &ch in bwt {
        freq[ch as usize] += 1;
    }
    let mut c = vec![0u32; sigma];
    let mut acc = 0u32;
    for (a, &f) in freq.iter().enumerate() {
        c[a] = acc;
        acc += f;
    }

    let num_blocks = (n + block - 1) / block;
    let mut occ_samples = vec![0u32; num_blocks * sigma];
    let mut running = vec![0u32; sigma];
    for bi in 0..num_blocks {
        occ_samples[bi * sigma..(bi + 1) * sigma].copy_from_slice(&running);
        for &ch in &bwt[bi * block..((bi + 1) * block).min(n)] {
            running[ch as usize] += 1;
        }
    }
    (c, occ_samples)
}
