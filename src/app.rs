//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - reads SALT results and model tables
//! - runs the standardization selection, crossing search and Phillips summary
//! - prints reports
//! - writes optional exports

use clap::Parser;
use tracing::info;

use crate::analysis::PhillipsRelation;
use crate::cli::{
    Command, CommonArgs, CrossingArgs, DecayArgs, ModelsArgs, PhillipsArgs, RunArgs, SelectArgs, StandardizationArgs,
};
use crate::domain::{AnalysisConfig, DecayConstants, StandardizationParameters};
use crate::error::AppError;
use crate::io::export::{
    RunSummary, write_classification_csv, write_crossings_csv, write_phillips_csv, write_summary_json,
};
use crate::io::lbol::LBOL_EXTENSION;
use crate::io::salt::SaltColumns;
use crate::io::tt::TT_EXTENSION;

pub mod pipeline;

/// Entry point for the `light` binary.
pub fn run() -> Result<(), AppError> {
    // Load `.env` before clap reads LIGHT_DATA_DIR.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Models(args) => handle_models(args),
        Command::Select(args) => handle_select(args),
        Command::Crossing(args) => handle_crossing(args),
        Command::Phillips(args) => handle_phillips(args),
        Command::Run(args) => handle_run(args),
    }
}

fn handle_models(args: ModelsArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.common, None, None);
    let ids = crate::io::discover::discover_models(&config.data_dir, &args.ext)?;
    println!("{}", crate::report::format_models(&ids, &args.ext));
    Ok(())
}

fn handle_select(args: SelectArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.common, Some(&args.standardization), None);
    let selection = pipeline::run_selection(&config, &args.standardization.salt, &salt_columns(&args.standardization))?;

    println!(
        "{}",
        crate::report::format_selection(&selection, &config.standardization, config.rule)
    );

    if let Some(path) = &config.export_csv {
        write_classification_csv(path, &selection.classification)?;
    }
    if let Some(path) = &config.export_json {
        let mut summary = RunSummary::new("select", &config);
        summary.classification = Some(selection.classification);
        summary.skipped = selection.skipped;
        write_summary_json(path, &summary)?;
    }

    Ok(())
}

fn handle_crossing(args: CrossingArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.common, None, Some(&args.decay));
    let ids = pipeline::resolve_models(&config, &args.models, LBOL_EXTENSION)?;
    let output = pipeline::run_crossings(&config, &ids);

    println!("{}", crate::report::format_crossings(&output, config.eps));

    if let Some(path) = &config.export_csv {
        write_crossings_csv(path, &output.crossings)?;
    }
    if let Some(path) = &config.export_json {
        let mut summary = RunSummary::new("crossing", &config);
        summary.crossings = output.crossings;
        summary.skipped = output.skipped;
        write_summary_json(path, &summary)?;
    }

    Ok(())
}

fn handle_phillips(args: PhillipsArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.common, None, None);
    let relation = PhillipsRelation::default();
    let ids = pipeline::resolve_models(&config, &args.models, TT_EXTENSION)?;
    let output = pipeline::run_phillips(&config, &ids, &relation);

    println!("{}", crate::report::format_phillips(&output, &relation));

    if let Some(path) = &config.export_csv {
        write_phillips_csv(path, &output.rows)?;
    }
    if let Some(path) = &config.export_json {
        let mut summary = RunSummary::new("phillips", &config);
        summary.phillips = output.rows;
        summary.skipped = output.skipped;
        write_summary_json(path, &summary)?;
    }

    Ok(())
}

/// Selection first, then crossing times for the accepted models only.
fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let config = config_from_args(&args.common, Some(&args.standardization), Some(&args.decay));
    let selection = pipeline::run_selection(&config, &args.standardization.salt, &salt_columns(&args.standardization))?;

    println!(
        "{}",
        crate::report::format_selection(&selection, &config.standardization, config.rule)
    );

    let accepted = selection.classification.accepted_ids();
    if accepted.is_empty() {
        return Err(AppError::new(3, "No models fall inside the standardization band."));
    }
    info!(accepted = accepted.len(), "computing crossing times for accepted models");

    let output = pipeline::run_crossings(&config, &accepted);
    println!("{}", crate::report::format_crossings(&output, config.eps));

    if let Some(path) = &config.export_csv {
        write_crossings_csv(path, &output.crossings)?;
    }
    if let Some(path) = &config.export_json {
        let mut summary = RunSummary::new("run", &config);
        summary.classification = Some(selection.classification);
        summary.crossings = output.crossings;
        summary.skipped = selection.skipped;
        summary.skipped.extend(output.skipped);
        write_summary_json(path, &summary)?;
    }

    Ok(())
}

/// Build the analysis configuration; groups a subcommand lacks keep their defaults.
pub fn config_from_args(
    common: &CommonArgs,
    standardization: Option<&StandardizationArgs>,
    decay: Option<&DecayArgs>,
) -> AnalysisConfig {
    let mut config = AnalysisConfig {
        data_dir: common.data_dir.clone(),
        tt_header_rows: common.tt_header_rows,
        export_csv: common.export.clone(),
        export_json: common.export_json.clone(),
        ..AnalysisConfig::default()
    };

    if let Some(s) = standardization {
        config.standardization = StandardizationParameters {
            intercept: s.intercept,
            slope_x1: s.alpha,
            slope_color: s.beta,
            half_band_width: s.band,
        };
        config.rule = s.rule;
    }

    if let Some(d) = decay {
        config.eps = d.eps;
        config.decay = DecayConstants {
            half_life_ni: d.half_life_ni,
            half_life_co: d.half_life_co,
            ..DecayConstants::default()
        };
    }

    config
}

fn salt_columns(args: &StandardizationArgs) -> SaltColumns {
    SaltColumns {
        id: args.id_column,
        x1: args.x1_column,
        color: args.color_column,
        magnitude: args.mag_column,
    }
}
