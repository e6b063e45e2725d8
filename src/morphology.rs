//! Morphological analysis.
//!
//! The pipeline only needs the most likely parse of a wordform: its normal form and
//! its tag. [Analyzer] is the seam; [Lexicon] is a dictionary-backed implementation
//! that reads a tab-separated file with one `wordform<TAB>lemma<TAB>tag` entry per line.

use crate::errors::{self, Result};
use crate::normalizer;
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// The best guess of an analyzer for one wordform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parse {
    pub normal_form: String,
    pub tag: String,
}

pub trait Analyzer {
    /// Most likely parse of `wordform`, or `None` if the analyzer knows nothing about it.
    fn parse(&self, wordform: &str) -> Option<Parse>;
}

impl<T: Analyzer + ?Sized> Analyzer for &T {
    fn parse(&self, wordform: &str) -> Option<Parse> {
        (**self).parse(wordform)
    }
}

/// Dictionary of wordforms and their parses, best parse first.
#[derive(Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<Parse>>,
}

impl Lexicon {
    pub fn new() -> Lexicon {
        Lexicon::default()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Lexicon> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let lexicon = Lexicon::parse_str(&data)
            .map_err(|e| errors::invalid_input(format!("{}: {e}", path.display())))?;
        debug!(target: "ukrfreq", "lexicon {}: {} wordforms", path.display(), lexicon.len());
        Ok(lexicon)
    }

    /// Read lexicon entries. Blank lines and lines starting with `#` are skipped.
    /// A missing tag is allowed and leaves the part of speech undetermined.
    pub fn parse_str(data: &str) -> Result<Lexicon> {
        let mut lexicon = Lexicon::new();
        for (lineno, line) in data.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let wordform = fields.next().unwrap_or("");
            let lemma = match fields.next() {
                Some(lemma) => lemma,
                None => {
                    return Err(errors::invalid_input(format!(
                        "line {}: expected 'wordform<TAB>lemma<TAB>tag'",
                        lineno + 1
                    )));
                }
            };
            let tag = fields.next().unwrap_or("");
            lexicon.insert(wordform, lemma, tag);
        }
        Ok(lexicon)
    }

    /// Add a parse. Earlier parses of the same wordform take precedence.
    pub fn insert(&mut self, wordform: &str, lemma: &str, tag: &str) {
        let wordform = normalizer::normalize(wordform.trim());
        let parse = Parse {
            normal_form: normalizer::normalize(lemma.trim()),
            tag: tag.trim().to_owned(),
        };
        self.entries.entry(wordform).or_default().push(parse);
    }

    /// All known parses of a wordform.
    pub fn parses(&self, wordform: &str) -> &[Parse] {
        match self.entries.get(wordform) {
            None => &[],
            Some(p) => p,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Analyzer for Lexicon {
    fn parse(&self, wordform: &str) -> Option<Parse> {
        self.parses(wordform).first().cloned()
    }
}
