pub mod fm;
pub mod sa;

pub use fm::{IndexMeta, TextIndex};
