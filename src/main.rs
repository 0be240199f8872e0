use anyhow::{Context, Result};
use census_pivot::{
    config::{Config, FILTER_PREFIX, INPUT_FILE, OUTPUT_FILE},
    run, PipelineError,
};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "census-pivot")]
#[command(about = "Roll village census rows up to regency, district and village totals by gender")]
struct Args {
    /// Semicolon-delimited census file
    #[arg(short, long, default_value = INPUT_FILE)]
    input: PathBuf,

    /// Report file (.xlsx, .csv or .parquet)
    #[arg(short, long, default_value = OUTPUT_FILE)]
    output: PathBuf,

    /// Village-code prefix selecting the region
    #[arg(short, long, default_value = FILTER_PREFIX)]
    prefix: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            input_path: args.input,
            output_path: args.output,
            prefix: args.prefix,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_level = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    // ─── 2) run ──────────────────────────────────────────────────────
    let config = Config::from(args);
    match run(&config) {
        Ok(summary) => {
            info!(
                rows_matched = summary.rows_matched,
                report_rows = summary.report_rows,
                format = %summary.format,
                "wrote {}",
                summary.output_path.display()
            );
            Ok(())
        }
        Err(e) if e.is_graceful() => {
            if matches!(e, PipelineError::InputNotFound(_)) {
                error!("{e}");
            } else {
                warn!("{e}");
            }
            info!("no report written");
            Ok(())
        }
        Err(e) => Err(e).with_context(|| {
            format!(
                "processing {} into {}",
                config.input_path.display(),
                config.output_path.display()
            )
        }),
    }
}
