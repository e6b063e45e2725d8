use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use log::{error, info, warn};
use std::path::PathBuf;
use std::{fs, process};
use ukrfreq::driver::{self, DEFAULT_SUBSAMPLE_SIZE, DEFAULT_TOKEN_CAP, DriverArgs};
use ukrfreq::errors::{self, Result};
use ukrfreq::morphology::Lexicon;
use ukrfreq::schema::{self, DEFAULT_CAPACITY, Schema};
use ukrfreq::store::Store;
use ukrfreq::{output, spreadsheet};

/// Count wordforms, lemmas and parts of speech in Ukrainian texts and store them
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Inputs, each of the form 'sample=path'
    #[arg(required = true)]
    inputs: Vec<String>,
    /// Database file
    #[arg(long, default_value = "frequencies.db")]
    db: String,
    /// Lexicon file (wordform, lemma and tag separated by tabs)
    #[arg(long)]
    lexicon: Option<String>,
    /// Maximum number of tokens per text
    #[arg(long, default_value_t = DEFAULT_TOKEN_CAP)]
    cap: usize,
    /// Number of tokens per subsample
    #[arg(long, default_value_t = DEFAULT_SUBSAMPLE_SIZE)]
    subsample_size: usize,
    /// Number of subsample columns
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
    /// Also write results as JSON files to this directory
    #[arg(long)]
    json: Option<String>,
    /// Also write results as Excel workbooks to this directory
    #[arg(long)]
    xlsx: Option<String>,
    /// Produce compact JSON files
    #[arg(long)]
    compact: bool,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn parse_input(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((sample, path)) if !path.is_empty() => {
            schema::check_sample(sample)?;
            Ok((sample, path))
        }
        _ => Err(errors::invalid_argument(format!(
            "input should be of the form 'sample=path', got '{arg}'"
        ))),
    }
}

fn export_path(dir: &str, sample: &str, ext: &str) -> PathBuf {
    let mut path = PathBuf::from(dir);
    path.push(format!("{sample}.{ext}"));
    path
}

fn process(args: &Args) -> Result<()> {
    let driver_args = DriverArgs {
        token_cap: args.cap,
        subsample_size: args.subsample_size,
        capacity: args.capacity,
    };
    driver_args.validate()?;
    let inputs = args
        .inputs
        .iter()
        .map(|a| parse_input(a))
        .collect::<Result<Vec<_>>>()?;
    let lexicon = match &args.lexicon {
        Some(path) => {
            info!(target: "ukrfreq", "lexicon: {path}");
            Lexicon::load(path)?
        }
        None => {
            warn!(target: "ukrfreq", "no lexicon given, all parts of speech will be undetermined");
            Lexicon::new()
        }
    };
    let mut store = Store::open(&args.db, Schema::new(args.capacity))?;
    for (sample, path) in inputs {
        info!(target: "ukrfreq", "read: {path} as {sample}");
        let text = fs::read_to_string(path)?;
        let output = driver::calc(&driver_args, &text, &lexicon)?;
        let inserted = store.write_output(sample, &output)?;
        info!(
            target: "ukrfreq",
            "{sample}: stored {} wordforms, {} lemmas, {} parts of speech, {} joined rows",
            inserted.wordforms,
            inserted.lemmas,
            inserted.pos,
            inserted.intermediate
        );
        if let Some(dir) = &args.json {
            let path = export_path(dir, sample, "json");
            info!(target: "ukrfreq", "write: {}", path.display());
            output::write_json(&output, &path, args.compact)?;
        }
        if let Some(dir) = &args.xlsx {
            let path = export_path(dir, sample, "xlsx");
            info!(target: "ukrfreq", "write: {}", path.display());
            spreadsheet::write_xlsx(&output, &path)?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    pretty_env_logger::formatted_timed_builder()
        .filter_level(args.verbose.log_level_filter())
        .init();
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            error!(target: "ukrfreq", "{e}");
            process::exit(1);
        }
    }
}
