use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use itertools::Itertools;
use log::{error, info};
use std::process;
use ukrfreq::errors::{self, Result};
use ukrfreq::schema::{self, Schema, Table};
use ukrfreq::store::Store;

/// Run an SQL query against the tables of one sample
///
/// The placeholders {lemmas}, {wordforms}, {pos} and {intermediate} are replaced
/// by the names of the tables of the sample.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Sample identifier
    sample: String,
    /// SQL query, e.g. "select pos, sum(total) from {lemmas} group by pos"
    query: String,
    /// Database file
    #[arg(long, default_value = "frequencies.db")]
    db: String,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn expand(schema: &Schema, sample: &str, query: &str) -> String {
    let mut sql = query.to_owned();
    for table in Table::ALL {
        let placeholder = format!("{{{}}}", table.suffix());
        let name = schema::quote(&schema.table_name(sample, table));
        sql = sql.replace(&placeholder, &name);
    }
    sql
}

fn process(args: &Args) -> Result<()> {
    let store = Store::open(&args.db, Schema::default())?;
    if !store.samples()?.contains(&args.sample) {
        return Err(errors::unknown_sample(&args.sample));
    }
    let sql = expand(store.schema(), &args.sample, &args.query);
    info!(target: "ukrfreq", "query: {sql}");
    let result = store.query(&sql)?;
    println!("{}", result.columns.iter().join("\t"));
    for row in &result.rows {
        println!("{}", row.iter().join("\t"));
    }
    info!(target: "ukrfreq", "{} rows", result.rows.len());
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
