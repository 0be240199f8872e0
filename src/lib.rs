//! Regional population rollup for semicolon-delimited village census files.
//!
//! A run loads the census table, keeps one regional subtree by village-code
//! prefix, sums population by gender at regency, district and village level,
//! pivots genders into columns and writes a five-column report.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod report;

pub use config::Config;
pub use error::{PipelineError, Result};
pub use pipeline::{run, RunSummary};
