//! Per-subsample frequency counting.

use crate::errors::{self, Result};
use crate::samples::Subsample;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Occurrence counts, one slot per subsample.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FrequencyVector(Vec<u64>);

impl FrequencyVector {
    pub fn new(width: usize) -> FrequencyVector {
        FrequencyVector(vec![0; width])
    }

    pub fn width(&self) -> usize {
        self.0.len()
    }

    pub fn slots(&self) -> &[u64] {
        &self.0
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Count one more occurrence in subsample `i`.
    pub fn increment(&mut self, i: usize) {
        self.0[i] += 1;
    }

    /// Element-wise sum. Both vectors must have the same width.
    pub fn add(&mut self, other: &FrequencyVector) {
        assert_eq!(self.width(), other.width());
        for (a, b) in self.0.iter_mut().zip(&other.0) {
            *a += b;
        }
    }
}

impl From<Vec<u64>> for FrequencyVector {
    fn from(slots: Vec<u64>) -> FrequencyVector {
        FrequencyVector(slots)
    }
}

/// A distinct wordform together with its per-subsample counts.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct WordformFrequency<'a> {
    pub wordform: &'a str,
    pub vector: FrequencyVector,
}

/// Count every distinct token in every subsample.
///
/// The result lists wordforms in order of first occurrence.
pub fn count_wordforms<'a>(
    subsamples: &[Subsample<'a>],
    width: usize,
) -> Result<Vec<WordformFrequency<'a>>> {
    if subsamples.len() > width {
        return Err(errors::invalid_input(format!(
            "{} subsamples do not fit in vectors of width {}",
            subsamples.len(),
            width
        )));
    }
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<WordformFrequency<'a>> = vec![];
    for (i, subsample) in subsamples.iter().enumerate() {
        for &token in subsample.iter() {
            let id = *index.entry(token).or_insert_with(|| {
                counts.push(WordformFrequency {
                    wordform: token,
                    vector: FrequencyVector::new(width),
                });
                counts.len() - 1
            });
            counts[id].vector.increment(i);
        }
    }
    Ok(counts)
}

/// Total number of tokens covered by the counts.
pub fn count_tokens(wordforms: &[WordformFrequency]) -> u64 {
    wordforms.iter().map(|w| w.vector.total()).sum()
}
