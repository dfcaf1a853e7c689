//! Reading and writing embedding files

pub mod text;
pub mod word2vec;

pub use text::write_text;
pub use word2vec::{load, read_word2vec_binary, save, write_word2vec_binary};
