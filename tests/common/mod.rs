#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_seq(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| BASES[rng.gen_range(0..4)]).collect()
}

/// 随机 A，以及按 error_rate 逐位施加替换/插入/删除得到的 B
pub fn random_pair(rng: &mut StdRng, len: usize, error_rate: f64) -> (Vec<u8>, Vec<u8>) {
    let a = random_seq(rng, len);
    let b = mutate(rng, &a, error_rate);
    (a, b)
}

/// 由 1 到 3 个碱基的短周期重复构成的低复杂度 A，B 同样由它突变而来
pub fn repetitive_pair(rng: &mut StdRng, len: usize, error_rate: f64) -> (Vec<u8>, Vec<u8>) {
    let period = rng.gen_range(1..=3);
    let motif = random_seq(rng, period);
    let a: Vec<u8> = motif.iter().copied().cycle().take(len).collect();
    let b = mutate(rng, &a, error_rate);
    (a, b)
}

pub fn mutate(rng: &mut StdRng, a: &[u8], error_rate: f64) -> Vec<u8> {
    let mut b = Vec::with_capacity(a.len() + a.len() / 8);
    for &c in a {
        if !rng.gen_bool(error_rate) {
            b.push(c);
            continue;
        }
        match rng.gen_range(0..3) {
            0 => {
                let other = BASES.iter().copied().filter(|&x| x != c).nth(rng.gen_range(0..3));
                b.push(other.unwrap_or(c));
            }
            1 => {
                b.push(BASES[rng.gen_range(0..4)]);
                b.push(c);
            }
            _ => {}
        }
    }
    b
}
