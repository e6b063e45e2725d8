//! Splitting normalized text into tokens and subsamples.

use crate::errors::{self, Result};
use itertools::Itertools;

/// One contiguous chunk of the token stream.
pub type Subsample<'a> = &'a [&'a str];

pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect_vec()
}

/// Maximum number of subsamples that a corpus capped at `cap` tokens can produce.
pub fn subsample_count(cap: usize, size: usize) -> usize {
    cap.div_ceil(size)
}

/// Keep the first `cap` tokens and cut them into consecutive chunks of `size` tokens.
///
/// Tokens beyond the cap are discarded. The last chunk may be shorter than `size`.
pub fn subsamples<'a>(tokens: &'a [&'a str], cap: usize, size: usize) -> Result<Vec<Subsample<'a>>> {
    if size == 0 {
        return Err(errors::invalid_argument_ref("subsample size must be positive"));
    }
    let kept = &tokens[..tokens.len().min(cap)];
    Ok(kept.chunks(size).collect_vec())
}
