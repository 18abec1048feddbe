//! hyphy-run - run HyPhy selection and rate analyses.
//!
//! This crate locates a HyPhy installation, validates alignments, trees and
//! analysis parameters, launches the matching batch file and moves the JSON
//! result where the caller wants it.

#![warn(missing_docs)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod hyphy;
pub mod input;
pub mod output;

use analysis::runner::{RunSummary, Runner};
use analysis::{
    Absrel, Analysis, AnalysisOptions, Busted, Fel, FelParams, GeneticCode, Meme, NucleotideRates,
    ProteinRates, Relax, RelaxParams, Slac, SlacParams,
};
use clap::Parser;
use cli::{Cli, CodonArgs, Command, CommonArgs, ConfigAction, GlobalArgs, InputArgs};
use config::{
    Config, OutputMode, config_file_path, load_default_config, save_default_config,
    validate_config,
};
use hyphy::HyPhy;
use output::{
    AnalysisPayload, ConfigPayload, GeneticCodesPayload, LabelsPayload, ResultType,
    emit_json_error, emit_json_result,
};
use tracing::info;

pub use error::{Error, Result};

/// Main entry point for hyphy-run CLI.
///
/// In JSON output mode a failure is also reported as an error envelope on
/// stdout before it is returned.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.global.verbose, cli.global.quiet);

    let mode = cli.global.output_mode;
    let result = handle_command(cli);
    if mode.is_structured()
        && let Err(error) = &result
    {
        emit_json_error(error)?;
    }
    result
}

fn handle_command(cli: Cli) -> Result<()> {
    let global = &cli.global;
    match cli.command {
        Command::Config { action } => handle_config_command(action, global.output_mode),
        Command::Codes => handle_codes_command(global.output_mode),
        Command::Labels(input) => handle_labels_command(&input, global.output_mode),
        Command::Fel(args) => execute_analysis(global, &args.branch.common, |config| {
            let branch = &args.branch;
            let params = FelParams {
                branches: branch.branches.clone(),
                srv: !args.no_srv,
            };
            let (input, options) = prepare(&branch.common, Some(&branch.codon), config)?;
            Ok(Box::new(Fel::new(input, options, params)?))
        }),
        Command::Meme(args) => execute_analysis(global, &args.common, |config| {
            let (input, options) = prepare(&args.common, Some(&args.codon), config)?;
            Ok(Box::new(Meme::new(input, options, &args.branches)?))
        }),
        Command::Slac(args) => execute_analysis(global, &args.branch.common, |config| {
            let branch = &args.branch;
            let params = SlacParams {
                branches: branch.branches.clone(),
                bootstrap_samples: args.samples,
            };
            let (input, options) = prepare(&branch.common, Some(&branch.codon), config)?;
            Ok(Box::new(Slac::new(input, options, params)?))
        }),
        Command::Absrel(args) => execute_analysis(global, &args.common, |config| {
            let (input, options) = prepare(&args.common, Some(&args.codon), config)?;
            Ok(Box::new(Absrel::new(input, options, &args.branches)?))
        }),
        Command::Busted(args) => execute_analysis(global, &args.common, |config| {
            let (input, options) = prepare(&args.common, Some(&args.codon), config)?;
            Ok(Box::new(Busted::new(input, options, &args.branches)?))
        }),
        Command::Relax(args) => execute_analysis(global, &args.common, |config| {
            let params = RelaxParams {
                test_label: args.test_label.clone(),
                reference_label: args.reference_label.clone(),
                analysis_type: args.analysis_type,
            };
            let (input, options) = prepare(&args.common, Some(&args.codon), config)?;
            Ok(Box::new(Relax::new(input, options, params)?))
        }),
        Command::ProtRates(args) => execute_analysis(global, &args.common, |config| {
            let (input, options) = prepare(&args.common, None, config)?;
            Ok(Box::new(ProteinRates::new(
                input,
                options,
                args.model,
                !args.no_plus_f,
            )))
        }),
        Command::NucRates(args) => execute_analysis(global, &args.common, |config| {
            let (input, options) = prepare(&args.common, None, config)?;
            Ok(Box::new(NucleotideRates::new(input, options, args.model)))
        }),
    }
}

/// Initialize the tracing subscriber. Logs go to stderr so stdout only
/// carries results.
fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Locate HyPhy, build the analysis, then run or plan it and report.
fn execute_analysis<F>(global: &GlobalArgs, common: &CommonArgs, build: F) -> Result<()>
where
    F: FnOnce(&Config) -> Result<Box<dyn Analysis>>,
{
    let config = load_default_config()?;
    validate_config(&config)?;

    let hyphy = build_hyphy(global, &config)?;
    let analysis = build(&config)?;

    let runner = Runner::new(&hyphy).with_progress(!global.output_mode.is_structured());
    let summary = if common.dry_run {
        runner.plan(analysis.as_ref())
    } else {
        runner.run(analysis.as_ref())?
    };

    report_summary(&summary, global.output_mode)
}

/// Resolve input files and merge CLI options over config defaults.
fn prepare(
    common: &CommonArgs,
    codon: Option<&CodonArgs>,
    config: &Config,
) -> Result<(input::ResolvedInput, AnalysisOptions)> {
    let input = common.input.to_input()?.resolve()?;

    let genetic_code = match codon.and_then(|c| c.genetic_code) {
        Some(code) => code,
        None => config.defaults.genetic_code.parse::<GeneticCode>()?,
    };
    let alpha = codon
        .and_then(|c| c.alpha)
        .unwrap_or(config.defaults.alpha);

    let options = AnalysisOptions {
        genetic_code,
        alpha,
        output: common.output.clone(),
    };
    Ok((input, options))
}

/// Build the HyPhy installation: CLI > environment > config > defaults.
///
/// A build or install path given on the command line replaces both
/// location settings from the config file. `-q`/`--no-quiet` replace the
/// config's `quiet`. In JSON mode HyPhy's screen output is always discarded
/// so stdout stays machine-readable.
fn build_hyphy(global: &GlobalArgs, config: &Config) -> Result<HyPhy> {
    let executable = global
        .executable
        .clone()
        .unwrap_or_else(|| config.hyphy.executable.clone());

    let (build_path, install_path) = if global.build_path.is_some() || global.install_path.is_some()
    {
        (global.build_path.clone(), global.install_path.clone())
    } else {
        (
            config.hyphy.build_path.clone(),
            config.hyphy.install_path.clone(),
        )
    };

    let mut builder = HyPhy::builder()
        .executable(executable)
        .cpu(global.cpu.or(config.hyphy.cpu))
        .quiet(
            global.quiet_override().unwrap_or(config.hyphy.quiet)
                || global.output_mode.is_structured(),
        );
    if let Some(path) = build_path {
        builder = builder.build_path(path);
    }
    if let Some(path) = install_path {
        builder = builder.install_path(path);
    }
    builder.build()
}

fn report_summary(summary: &RunSummary, mode: OutputMode) -> Result<()> {
    if mode.is_structured() {
        return emit_json_result(&AnalysisPayload::from(summary));
    }

    if summary.dry_run {
        println!("{}", summary.command);
    } else {
        println!("{}", summary.output_file.display());
    }
    Ok(())
}

fn handle_labels_command(input: &InputArgs, mode: OutputMode) -> Result<()> {
    let resolved = input.to_input()?.resolve()?;
    let labels = resolved.labels();

    if mode.is_structured() {
        return emit_json_result(&LabelsPayload {
            result_type: ResultType::Labels,
            tree: resolved.tree().to_string(),
            labels: labels.into(),
        });
    }

    if labels.is_empty() {
        info!("No branch labels found in the tree");
    }
    for label in &labels {
        println!("{label}");
    }
    Ok(())
}

fn handle_codes_command(mode: OutputMode) -> Result<()> {
    if mode.is_structured() {
        return emit_json_result(&GeneticCodesPayload {
            result_type: ResultType::GeneticCodes,
            codes: GeneticCode::all().collect(),
        });
    }

    for code in GeneticCode::all() {
        println!("{:>2}  {}", code.id(), code.name());
    }
    Ok(())
}

fn handle_config_command(action: ConfigAction, mode: OutputMode) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default())?;
                println!("Created configuration file: {}", saved_path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            if mode.is_structured() {
                let value = serde_json::to_value(&config)
                    .map_err(|source| Error::JsonSerialize { source })?;
                return emit_json_result(&ConfigPayload {
                    result_type: ResultType::Config,
                    config_path: config_file_path()?,
                    config: value,
                });
            }
            let contents = toml::to_string_pretty(&config)
                .map_err(|source| Error::ConfigSerialize { source })?;
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
