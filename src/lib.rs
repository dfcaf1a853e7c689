//! # Wordscout Library
//!
//! Word embedding similarity and analogy search over word2vec binary
//! files. The embeddings live in one row-major matrix; queries score every
//! row with a matrix-vector product and keep the best `k` without sorting
//! the whole vocabulary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod storage;
pub mod ui;

pub use crate::core::{Embeddings, Error, Result, ScoreBackend, WordSimilarity};
