//! Command-line parsing for the light-curve analysis tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the analysis code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{AcceptanceRule, DEFAULT_CROSSING_EPS};
use crate::io::tt::TT_HEADER_ROWS;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "light", version, about = "Characteristic times and standardization checks for simulated supernova light curves")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List models available in the data directory.
    Models(ModelsArgs),
    /// Classify SALT catalog models against the standardization relation.
    Select(SelectArgs),
    /// Find crossing times t_A / t_B with the radioactive deposition curve.
    Crossing(CrossingArgs),
    /// Peak magnitudes and decline rates against the Phillips relation.
    Phillips(PhillipsArgs),
    /// Select models from SALT results, then find their crossing times.
    Run(RunArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Directory with `<model>.tt` and `<model>.lbol` tables.
    #[arg(long, env = "LIGHT_DATA_DIR", default_value = "data/raw_data")]
    pub data_dir: PathBuf,

    /// Header lines to skip in `.tt` tables.
    #[arg(long, default_value_t = TT_HEADER_ROWS)]
    pub tt_header_rows: usize,

    /// Export per-row results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export a JSON summary of the run.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Standardization relation calibration.
#[derive(Debug, Args, Clone)]
pub struct StandardizationArgs {
    /// SALT results table (comma-separated, one header row).
    #[arg(long, value_name = "CSV")]
    pub salt: PathBuf,

    /// Intercept M_B of the relation.
    #[arg(long, default_value_t = -19.48, allow_hyphen_values = true)]
    pub intercept: f64,

    /// Stretch slope (alpha).
    #[arg(long, default_value_t = 0.154, allow_hyphen_values = true)]
    pub alpha: f64,

    /// Color slope (beta).
    #[arg(long, default_value_t = 3.02, allow_hyphen_values = true)]
    pub beta: f64,

    /// Half width of the acceptance band (mag).
    #[arg(long, default_value_t = 0.5)]
    pub band: f64,

    /// How magnitudes are compared against the band.
    #[arg(long, value_enum, default_value_t = AcceptanceRule::EmbeddedRadius)]
    pub rule: AcceptanceRule,

    /// Column of the object identifier (0-based).
    #[arg(long, default_value_t = 1)]
    pub id_column: usize,

    /// Column of the x1 covariate (0-based).
    #[arg(long, default_value_t = 7)]
    pub x1_column: usize,

    /// Column of the color covariate (0-based).
    #[arg(long, default_value_t = 9)]
    pub color_column: usize,

    /// Use measured peak magnitudes from this column instead of `.tt` tables.
    #[arg(long)]
    pub mag_column: Option<usize>,
}

/// Decay deposition settings.
#[derive(Debug, Args, Clone)]
pub struct DecayArgs {
    /// Tolerance for `deposition - observed < eps`.
    #[arg(long, default_value_t = DEFAULT_CROSSING_EPS, allow_hyphen_values = true)]
    pub eps: f64,

    /// Ni56 half-life (days).
    #[arg(long, default_value_t = crate::domain::NI56_HALF_LIFE_DAYS)]
    pub half_life_ni: f64,

    /// Co56 half-life (days).
    #[arg(long, default_value_t = crate::domain::CO56_HALF_LIFE_DAYS)]
    pub half_life_co: f64,
}

#[derive(Debug, Args, Clone)]
pub struct ModelsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// File extension to look for (`tt` or `lbol`).
    #[arg(long, default_value = "tt")]
    pub ext: String,
}

#[derive(Debug, Args, Clone)]
pub struct SelectArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub standardization: StandardizationArgs,
}

#[derive(Debug, Args, Clone)]
pub struct CrossingArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub decay: DecayArgs,

    /// Models to analyze (default: every `.lbol` table in the data directory).
    #[arg(long, value_delimiter = ',')]
    pub models: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct PhillipsArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Models to summarize (default: every `.tt` table in the data directory).
    #[arg(long, value_delimiter = ',')]
    pub models: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub standardization: StandardizationArgs,

    #[command(flatten)]
    pub decay: DecayArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn select_defaults() {
        let cli = Cli::parse_from(["light", "select", "--salt", "res.csv"]);
        let Command::Select(args) = cli.command else {
            panic!("expected select");
        };
        assert_eq!(args.standardization.intercept, -19.48);
        assert_eq!(args.standardization.band, 0.5);
        assert_eq!(args.standardization.rule, AcceptanceRule::EmbeddedRadius);
        assert_eq!(args.standardization.mag_column, None);
        assert_eq!(args.common.tt_header_rows, TT_HEADER_ROWS);
    }

    #[test]
    fn crossing_model_list_and_negative_values() {
        let cli = Cli::parse_from([
            "light",
            "crossing",
            "--models",
            "m16,m13",
            "--eps",
            "1e-3",
            "--data-dir",
            "runs",
        ]);
        let Command::Crossing(args) = cli.command else {
            panic!("expected crossing");
        };
        assert_eq!(args.models, vec!["m16", "m13"]);
        assert_eq!(args.decay.eps, 1e-3);
        assert_eq!(args.common.data_dir, PathBuf::from("runs"));

        let cli = Cli::parse_from(["light", "run", "--salt", "r.csv", "--intercept", "-19.3", "--rule", "linear"]);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.standardization.intercept, -19.3);
        assert_eq!(args.standardization.rule, AcceptanceRule::Linear);
    }
}
