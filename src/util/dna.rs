/// FM 索引字母表大小 {0:$, 1:A, 2:C, 3:G, 4:T, 5:其他}
pub const SIGMA: usize = 6;

/// 将任意字节映射到索引字母表。
/// 大小写视为相同，U 视为 T；ACGT 之外的字节全部归入同一个符号 5。
/// 映射只会把不同字节合并、不会把相同字节拆开，因此精确查找得到的是候选的超集。
#[inline]
pub fn to_alphabet(b: u8) -> u8 {
    if b == 0 { return 5; }
    match b.to_ascii_uppercase() {
        b'A' => 1,
        b'C' => 2,
        b'G' => 3,
        b'T' | b'U' => 4,
        _ => 5,
    }
}

/// 编码整条序列（不含结尾的 $）
pub fn encode(seq: &[u8]) -> Vec<u8> {
    seq.iter().map(|&b| to_alphabet(b)).collect()
}
