//! Command-line parsing for the curve comparison tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the comparison/math code.

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "curvecmp", version, about = "Curve comparison and replicate quality ranking")]
pub struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the available scoring algorithms.
    Algorithms,
    /// Score synthetic candidates against a reference curve and print the ranking table.
    Rank(RankArgs),
    /// Pick the more trustworthy of two synthetic replicates.
    Pick(PickArgs),
}

/// Options for `curvecmp rank`.
#[derive(Debug, Args, Clone)]
pub struct RankArgs {
    /// Number of candidates (the first one is an identical copy of the reference).
    #[arg(short = 'c', long, default_value_t = 5)]
    pub candidates: usize,

    /// Points per curve [env: CURVECMP_POINTS].
    #[arg(short = 'n', long)]
    pub points: Option<usize>,

    /// Random seed [env: CURVECMP_SEED].
    #[arg(long)]
    pub seed: Option<u64>,

    /// Jitter standard deviation of the synthetic curves (mass %).
    #[arg(long, default_value_t = 0.2)]
    pub noise: f64,

    /// Algorithm id used to order the table.
    #[arg(long, default_value = "nrmse")]
    pub sort: String,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Options for `curvecmp pick`.
#[derive(Debug, Args, Clone)]
pub struct PickArgs {
    /// Points per curve [env: CURVECMP_POINTS].
    #[arg(short = 'n', long)]
    pub points: Option<usize>,

    /// Random seed [env: CURVECMP_SEED].
    #[arg(long)]
    pub seed: Option<u64>,

    /// LOESS span fraction in (0, 1] [env: CURVECMP_LOESS_SPAN].
    #[arg(long)]
    pub span: Option<f64>,

    /// Jitter standard deviation of replicate A.
    #[arg(long, default_value_t = 0.05)]
    pub noise_a: f64,

    /// Jitter standard deviation of replicate B.
    #[arg(long, default_value_t = 0.5)]
    pub noise_b: f64,

    /// Height of a narrow kink added to replicate B (0 disables it).
    #[arg(long, default_value_t = 0.0)]
    pub kink: f64,

    /// Print JSON instead of a summary.
    #[arg(long)]
    pub json: bool,
}
