//! Data structures for representing the output.

use crate::counter::FrequencyVector;
use crate::errors::Result;
use crate::pos::Pos;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::{fs, io};

#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct WordformRecord {
    pub wordform: String,
    pub total: u64,
    pub vector: FrequencyVector,
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct LemmaRecord {
    pub lemma: String,
    /// Part of speech of the first wordform that produced this lemma.
    pub pos: Pos,
    pub total: u64,
    pub vector: FrequencyVector,
}

#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct PosRecord {
    pub pos: Pos,
    pub total: u64,
    pub vector: FrequencyVector,
}

/// One row per distinct wordform, joined with its lemma and part of speech.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct IntermediateRecord {
    pub wordform: String,
    pub lemma: String,
    pub pos: Pos,
    pub total: u64,
    pub vector: FrequencyVector,
}

/// Everything computed for one corpus sample.
#[derive(PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct Output {
    /// Tokens in the normalized text, before the cap.
    pub tokens: u64,
    /// Tokens that were actually counted.
    pub counted_tokens: u64,
    pub token_cap: usize,
    pub subsample_size: usize,
    pub subsamples: usize,
    pub capacity: usize,
    pub wordforms: Vec<WordformRecord>,
    pub lemmas: Vec<LemmaRecord>,
    pub pos: Vec<PosRecord>,
    pub intermediate: Vec<IntermediateRecord>,
}

impl Output {
    pub fn truncated(&self) -> bool {
        self.counted_tokens < self.tokens
    }
}

pub fn write_json(output: &Output, path: &Path, compact: bool) -> Result<()> {
    let file = fs::File::create(path)?;
    let writer = io::BufWriter::new(file);
    if compact {
        serde_json::to_writer(writer, output)?;
    } else {
        serde_json::to_writer_pretty(writer, output)?;
    }
    Ok(())
}

pub fn pretty_vector(vector: &FrequencyVector, subsamples: usize) -> String {
    let slots = &vector.slots()[..subsamples.min(vector.width())];
    format!("[{}]", slots.iter().join(", "))
}
