//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - installs logging
//! - resolves settings (flags, then environment, then defaults)
//! - runs ranking / pick-best
//! - prints tables or JSON

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, PickArgs, RankArgs};
use crate::compare::ComparisonService;
use crate::config::Settings;
use crate::error::AppError;
use crate::metrics::Strategy;

pub mod pipeline;

use pipeline::{PickConfig, RankConfig};

/// Entry point for the `curvecmp` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = Settings::from_env()?;
    let service = ComparisonService::new();

    match cli.command {
        Command::Algorithms => {
            print!("{}", crate::report::format_algorithms(&service.available_algorithms()));
            Ok(())
        }
        Command::Rank(args) => handle_rank(&service, &args, &settings),
        Command::Pick(args) => handle_pick(&service, &args, &settings),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("curve_rank=debug,info")
    } else {
        EnvFilter::new("curve_rank=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn handle_rank(service: &ComparisonService, args: &RankArgs, settings: &Settings) -> Result<(), AppError> {
    let config = rank_config_from_args(args, settings)?;
    let out = pipeline::run_rank(service, &config)?;

    if args.json {
        let data = RankJson {
            reference_id: out.reference.sample_id,
            reference_name: &out.reference.name,
            sort_by: out.sort_by,
            rows: out.ordered_rows(),
        };
        println!("{}", crate::report::to_json("rank", &data)?);
    } else {
        print!(
            "{}",
            crate::report::format_ranking(&out.reference.name, &out.rows, &out.order, service.strategies(), out.sort_by)
        );
    }
    Ok(())
}

fn handle_pick(service: &ComparisonService, args: &PickArgs, settings: &Settings) -> Result<(), AppError> {
    let config = pick_config_from_args(args, settings)?;
    let out = pipeline::run_pick(service, &config)?;

    if args.json {
        println!("{}", crate::report::to_json("pick", &out.result)?);
    } else {
        print!(
            "{}",
            crate::report::format_pick_best([out.curve_a.name.as_str(), out.curve_b.name.as_str()], &out.result)
        );
    }
    Ok(())
}

#[derive(serde::Serialize)]
struct RankJson<'a> {
    reference_id: i64,
    reference_name: &'a str,
    sort_by: Strategy,
    rows: Vec<&'a crate::domain::DifferenceResultRow>,
}

pub fn rank_config_from_args(args: &RankArgs, settings: &Settings) -> Result<RankConfig, AppError> {
    let sort_by = Strategy::from_id(&args.sort).ok_or_else(|| {
        AppError::new(
            2,
            format!("Unknown algorithm '{}'. Run `curvecmp algorithms` for the list.", args.sort),
        )
    })?;
    let points = args.points.unwrap_or(settings.points);
    if points < 2 {
        return Err(AppError::new(2, "Point count must be >= 2."));
    }
    Ok(RankConfig {
        candidates: args.candidates,
        points,
        seed: args.seed.unwrap_or(settings.seed),
        noise: args.noise,
        sort_by,
    })
}

pub fn pick_config_from_args(args: &PickArgs, settings: &Settings) -> Result<PickConfig, AppError> {
    let span = args.span.unwrap_or(settings.loess_span);
    if !(span.is_finite() && span > 0.0 && span <= 1.0) {
        return Err(AppError::new(2, "LOESS span must be in (0, 1]."));
    }
    let points = args.points.unwrap_or(settings.points);
    if points < 2 {
        return Err(AppError::new(2, "Point count must be >= 2."));
    }
    Ok(PickConfig {
        points,
        seed: args.seed.unwrap_or(settings.seed),
        span,
        noise_a: args.noise_a,
        noise_b: args.noise_b,
        kink: args.kink,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank_args(sort: &str) -> RankArgs {
        RankArgs {
            candidates: 3,
            points: None,
            seed: Some(9),
            noise: 0.2,
            sort: sort.to_string(),
            json: false,
        }
    }

    #[test]
    fn flags_override_settings() {
        let settings = Settings { seed: 1, points: 80, loess_span: 0.2 };
        let config = rank_config_from_args(&rank_args("pearson"), &settings).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.points, 80);
        assert_eq!(config.sort_by, Strategy::Pearson);
    }

    #[test]
    fn unknown_sort_is_a_usage_error() {
        let err = rank_config_from_args(&rank_args("cosine"), &Settings::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn pick_span_is_validated() {
        let args = PickArgs {
            points: Some(50),
            seed: None,
            span: Some(0.0),
            noise_a: 0.1,
            noise_b: 0.2,
            kink: 0.0,
            json: false,
        };
        assert!(pick_config_from_args(&args, &Settings::default()).is_err());
        let ok = PickArgs { span: None, ..args };
        assert_eq!(pick_config_from_args(&ok, &Settings::default()).unwrap().span, 0.1);
    }
}
