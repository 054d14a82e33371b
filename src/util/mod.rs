pub mod dna;
pub mod seq;

pub use seq::{Cost, Pos, SeqPair, SeqView};
