use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub name: String,
    pub desc: Option<String>,
    /// 去掉空白并转为大写
    pub seq: Vec<u8>,
}

/// 流式 FASTA 读取器。`;` 开头的行视为注释。
pub struct FastaReader<R: BufRead> {
    reader: R,
    line: String,
    pending_header: Option<String>,
    eof: bool,
}

impl FastaReader<BufReader<File>> {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("cannot open FASTA '{}'", path.display()))?;
        Ok(Self::new(BufReader::new(f)))
    }
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: String::new(), pending_header: None, eof: false }
    }

    /// 读一行到内部缓冲；文件结束时返回 false
    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            self.eof = true;
            return Ok(false);
        }
        Ok(true)
    }

    fn header_of(line: &str) -> Option<String> {
        line.strip_prefix('>').map(|h| h.trim().to_string())
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        let header = match self.pending_header.take() {
            Some(h) => h,
            None => loop {
                if self.eof || !self.read_line()? {
                    return Ok(None);
                }
                if let Some(h) = Self::header_of(&self.line) {
                    break h;
                }
                let stray = self.line.trim();
                if !stray.is_empty() && !stray.starts_with(';') {
                    anyhow::bail!("sequence data before first FASTA header: '{}'", stray);
                }
            },
        };

        let (name, desc) = match header.split_once(char::is_whitespace) {
            Some((n, d)) => (n.to_string(), Some(d.trim().to_string()).filter(|d| !d.is_empty())),
            None => (header, None),
        };

        let mut seq = Vec::new();
        while !self.eof && self.read_line()? {
            if let Some(h) = Self::header_of(&self.line) {
                self.pending_header = Some(h);
                break;
            }
            if self.line.starts_with(';') {
                continue;
            }
            seq.extend(
                self.line
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .map(|b| b.to_ascii_uppercase()),
            );
        }
        Ok(Some(FastaRecord { name, desc, seq }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
