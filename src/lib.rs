pub mod aggregate;
pub mod counter;
pub mod driver;
pub mod errors;
mod information;
pub mod morphology;
pub mod normalizer;
pub mod output;
pub mod pos;
pub mod samples;
pub mod schema;
pub mod spreadsheet;
pub mod store;
