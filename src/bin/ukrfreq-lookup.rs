use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cliclack::log;
use itertools::Itertools;
use ukrfreq::errors;
use ukrfreq::normalizer;
use ukrfreq::schema::Schema;
use ukrfreq::store::{Lookup, Store};

/// Look up wordforms interactively
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Database file
    #[arg(long, default_value = "frequencies.db")]
    db: String,
}

const EXIT: &str = "exit";

fn lib<T>(r: errors::Result<T>) -> Result<T> {
    r.map_err(|e| anyhow!("{e}"))
}

fn describe(found: &Lookup) -> String {
    let options = textwrap::Options::new(70).subsequent_indent("  ");
    let line = format!(
        "wordform '{}': lemma '{}', {}, {} occurrences",
        found.wordform, found.lemma, found.pos, found.total
    );
    textwrap::fill(&line, &options)
}

fn main() -> Result<()> {
    let args = Args::parse();
    cliclack::intro("ukrfreq-lookup")?;
    let store = lib(Store::open(&args.db, Schema::default()))
        .with_context(|| format!("cannot open {}", args.db))?;
    let samples = lib(store.samples())?;
    if samples.is_empty() {
        log::warning(format!("No samples stored in {}", args.db))?;
    } else {
        log::info(format!("Samples: {}", samples.iter().join(", ")))?;
    }
    let mut last_sample = samples.first().cloned().unwrap_or_default();
    loop {
        let word: String = cliclack::input(format!("Wordform ('{EXIT}' to quit)"))
            .placeholder("кіт")
            .interact()?;
        if word.trim() == EXIT {
            break;
        }
        let sample: String = cliclack::input("Sample")
            .default_input(&last_sample)
            .interact()?;
        let sample = sample.trim().to_owned();
        if sample == EXIT {
            break;
        }
        let wordform = normalizer::normalize(word.trim());
        match lib(store.lookup(&sample, &wordform)) {
            Ok(Some(found)) => cliclack::note(&sample, describe(&found))?,
            Ok(None) => log::warning(format!("'{wordform}' not found in {sample}"))?,
            Err(e) => log::error(format!("{e}"))?,
        }
        last_sample = sample;
    }
    cliclack::outro("Bye!")?;
    Ok(())
}
