//! sqlcompress - evaluate COMPRESS / EXPAND expressions from the command line

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::debug;
use sqlcompress::compress::{CompressConfig, StandardCompressTool};
use sqlcompress::expression::{evaluate_expression, optimize_expression, parse_expression};

/// Parse, optimize and evaluate a scalar SQL expression
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Algorithm used when COMPRESS is called without one
    #[arg(short, long, default_value = CompressConfig::DEFAULT_ALGORITHM)]
    algorithm: String,

    /// Inputs shorter than this are stored uncompressed
    #[arg(short, long, default_value_t = CompressConfig::DEFAULT_MIN_COMPRESS_LEN)]
    min_length: usize,

    /// Skip constant folding and evaluate the tree as written
    #[arg(long)]
    no_optimize: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Expression to evaluate, e.g. "EXPAND(COMPRESS(X'001122', 'DEFLATE'))"
    expr: String,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = CompressConfig::default()
        .with_default_algorithm(args.algorithm.clone())
        .with_min_compress_len(args.min_length);
    let tool = StandardCompressTool::new(config).context("Invalid compression settings")?;
    debug!("default algorithm: {}", tool.default_algorithm());

    let mut expr = parse_expression(&args.expr, &[])?;
    println!("expression: {}", expr);

    if !args.no_optimize {
        expr = optimize_expression(expr, &tool).context("Failed to optimize expression")?;
        println!("optimized:  {}", expr);
    }

    let value = evaluate_expression(&expr, &[], &tool).context("Failed to evaluate expression")?;
    println!("value:      {}", value);

    Ok(())
}
