//! 成对序列输入。
//!
//! 支持两种格式：
//! - `.seq`：每对两行，`>` 开头的是 A，紧接着 `<` 开头的是 B；
//! - FASTA：记录按出现顺序两两组成 (A, B)。

use anyhow::{bail, Context, Result};
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use super::fasta::FastaReader;

/// 一对待比对序列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencePair {
    pub a: Vec<u8>,
    pub b: Vec<u8>,
}

impl SequencePair {
    pub fn as_tuple(&self) -> (&[u8], &[u8]) {
        (&self.a, &self.b)
    }
}

pub fn read_pairs_from_file(path: impl AsRef<Path>) -> Result<Vec<SequencePair>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("cannot open pair file '{}'", path.display()))?;
    let pairs = read_pairs(BufReader::new(f)).with_context(|| format!("while reading '{}'", path.display()))?;
    info!("read {} pairs from {}", pairs.len(), path.display());
    Ok(pairs)
}

/// 自动识别格式：第二个非空行以 `<` 开头则按 `.seq` 解析，否则按 FASTA
pub fn read_pairs<R: BufRead>(mut reader: R) -> Result<Vec<SequencePair>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let mut lines = text.lines().map(str::trim_end).filter(|l| !l.is_empty());
    let _first = lines.next();
    let is_seq = lines.next().is_some_and(|l| l.starts_with('<'));
    if is_seq {
        parse_seq_pairs(&text)
    } else {
        parse_fasta_pairs(Cursor::new(text.as_bytes()))
    }
}

fn parse_seq_pairs(text: &str) -> Result<Vec<SequencePair>> {
    let mut pairs = Vec::new();
    let mut pending_a: Option<Vec<u8>> = None;
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(a) = line.strip_prefix('>') {
            if pending_a.is_some() {
                bail!("line {}: '>' line without a following '<' line", lineno + 1);
            }
            pending_a = Some(clean(a));
        } else if let Some(b) = line.strip_prefix('<') {
            let Some(a) = pending_a.take() else {
                bail!("line {}: '<' line without a preceding '>' line", lineno + 1);
            };
            pairs.push(SequencePair { a, b: clean(b) });
        } else {
            bail!("line {}: expected '>' or '<', found '{}'", lineno + 1, line);
        }
    }
    if pending_a.is_some() {
        bail!("last '>' line has no matching '<' line");
    }
    Ok(pairs)
}

fn parse_fasta_pairs<R: BufRead>(reader: R) -> Result<Vec<SequencePair>> {
    let mut records = FastaReader::new(reader);
    let mut pairs = Vec::new();
    while let Some(a) = records.next_record()? {
        let Some(b) = records.next_record()? else {
            bail!("odd number of FASTA records: '{}' has no partner", a.name);
        };
        pairs.push(SequencePair { a: a.seq, b: b.seq });
    }
    Ok(pairs)
}

fn clean(s: &str) -> Vec<u8> {
    s.bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .map(|b| b.to_ascii_uppercase())
        .collect()
}
