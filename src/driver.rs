//! Main entry point for calculating everything.

use crate::aggregate;
use crate::counter;
use crate::errors::{self, Result};
use crate::information;
use crate::morphology::Analyzer;
use crate::normalizer;
use crate::output::Output;
use crate::samples;
use crate::schema::DEFAULT_CAPACITY;
use log::warn;

/// Default maximum number of tokens taken from a corpus.
pub const DEFAULT_TOKEN_CAP: usize = 20000;

/// Default number of tokens per subsample.
pub const DEFAULT_SUBSAMPLE_SIZE: usize = 1000;

/// How to cut and count a corpus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriverArgs {
    /// Maximum number of tokens.
    /// Tokens after the first `token_cap` are ignored.
    pub token_cap: usize,

    /// Number of tokens per subsample.
    pub subsample_size: usize,

    /// Width of the frequency vectors.
    /// Must be large enough to hold every subsample that `token_cap` and `subsample_size` can produce.
    pub capacity: usize,
}

impl Default for DriverArgs {
    fn default() -> DriverArgs {
        DriverArgs {
            token_cap: DEFAULT_TOKEN_CAP,
            subsample_size: DEFAULT_SUBSAMPLE_SIZE,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl DriverArgs {
    pub fn validate(&self) -> Result<()> {
        if self.subsample_size == 0 {
            return Err(errors::invalid_argument_ref("subsample size must be positive"));
        }
        let needed = samples::subsample_count(self.token_cap, self.subsample_size);
        if needed > self.capacity {
            return Err(errors::invalid_argument(format!(
                "a cap of {} tokens in subsamples of {} needs {} subsample columns, capacity is {}",
                self.token_cap, self.subsample_size, needed, self.capacity
            )));
        }
        Ok(())
    }
}

/// Calculate everything for one corpus text.
///
/// This is the main entry point for the library.
pub fn calc(args: &DriverArgs, text: &str, analyzer: &dyn Analyzer) -> Result<Output> {
    args.validate()?;
    let normalized = normalizer::normalize(text);
    let tokens = samples::tokenize(&normalized);
    if tokens.len() > args.token_cap {
        warn!(
            target: "ukrfreq",
            "corpus has {} tokens, counting only the first {}",
            tokens.len(),
            args.token_cap
        );
    }
    let subsamples = samples::subsamples(&tokens, args.token_cap, args.subsample_size)?;
    let counts = counter::count_wordforms(&subsamples, args.capacity)?;
    let resolutions = aggregate::resolve_all(analyzer, &counts);
    let output = Output {
        tokens: tokens.len() as u64,
        counted_tokens: counter::count_tokens(&counts),
        token_cap: args.token_cap,
        subsample_size: args.subsample_size,
        subsamples: subsamples.len(),
        capacity: args.capacity,
        wordforms: aggregate::wordform_records(&counts),
        lemmas: aggregate::lemma_frequencies(&counts, &resolutions)?,
        pos: aggregate::pos_frequencies(&subsamples, &resolutions, args.capacity)?,
        intermediate: aggregate::intermediate_records(&counts, &resolutions)?,
    };
    information::statistics(&output);
    Ok(output)
}
