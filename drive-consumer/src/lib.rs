#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Implements a binary that segments a stream of drive samples into
//! contiguous per-drive batches, computes each drive's fare concurrently and
//! merges the results into an output file.

pub mod error;
pub mod merger;
pub mod processor;
pub mod segmenter;
pub mod settings;
pub mod startup;
