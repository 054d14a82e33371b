pub mod fasta;
pub mod pairs;

pub use fasta::{FastaReader, FastaRecord};
pub use pairs::{read_pairs, read_pairs_from_file, SequencePair};
