//! CLI argument definitions.

use super::validators::parse_alpha;
use crate::analysis::{GeneticCode, NucleotideModel, ProteinModel, RelaxType};
use crate::config::OutputMode;
use crate::constants::bootstrap;
use crate::input::AnalysisInput;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Run HyPhy selection and rate analyses from the command line.
#[derive(Debug, Parser)]
#[command(name = "hyphy-run")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Logging, output and HyPhy location options.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and discard HyPhy's screen output.
    #[arg(short, long, global = true, overrides_with = "no_quiet")]
    pub quiet: bool,

    /// Show HyPhy's screen output even when the config file sets `quiet`.
    #[arg(long, global = true, overrides_with = "quiet")]
    pub no_quiet: bool,

    /// Output mode for results.
    #[arg(long, value_enum, default_value_t, global = true, env = "HYPHY_RUN_OUTPUT_MODE")]
    pub output_mode: OutputMode,

    /// HyPhy executable name or path (default: HYPHYMP).
    #[arg(long, global = true, env = "HYPHY_RUN_EXECUTABLE")]
    pub executable: Option<String>,

    /// Local HyPhy build directory (contains `res/`).
    #[arg(long, global = true, env = "HYPHY_RUN_BUILD_PATH", conflicts_with = "install_path")]
    pub build_path: Option<PathBuf>,

    /// HyPhy install prefix (contains `bin/` and `lib/hyphy/`).
    #[arg(long, global = true, env = "HYPHY_RUN_INSTALL_PATH")]
    pub install_path: Option<PathBuf>,

    /// Maximum number of CPUs per analysis.
    #[arg(long, global = true, env = "HYPHY_RUN_CPU")]
    pub cpu: Option<u32>,
}

impl GlobalArgs {
    /// Quiet setting given on the command line, if any.
    pub const fn quiet_override(&self) -> Option<bool> {
        if self.quiet {
            Some(true)
        } else if self.no_quiet {
            Some(false)
        } else {
            None
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fixed Effects Likelihood: pervasive site-level selection.
    Fel(FelArgs),
    /// Mixed Effects Model of Evolution: episodic site-level selection.
    Meme(BranchArgs),
    /// Single-Likelihood Ancestor Counting.
    Slac(SlacArgs),
    /// Adaptive branch-site random effects likelihood.
    Absrel(BranchArgs),
    /// Gene-wide episodic diversifying selection.
    Busted(BranchArgs),
    /// Relaxed or intensified selection between labelled branch sets.
    Relax(RelaxArgs),
    /// Site-wise relative rates for a protein alignment.
    ProtRates(ProteinRatesArgs),
    /// Site-wise relative rates for a nucleotide alignment.
    NucRates(NucleotideRatesArgs),
    /// List branch labels found in the tree.
    Labels(InputArgs),
    /// List supported genetic codes.
    Codes,
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Alignment and tree, or a combined data file.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Alignment file.
    #[arg(short, long)]
    pub alignment: Option<PathBuf>,

    /// Newick tree file.
    #[arg(short, long)]
    pub tree: Option<PathBuf>,

    /// Combined file holding both alignment and tree (FASTA + Newick, or NEXUS).
    #[arg(short, long)]
    pub data: Option<PathBuf>,
}

impl InputArgs {
    /// Validate the combination of input options.
    pub fn to_input(&self) -> crate::Result<AnalysisInput> {
        AnalysisInput::from_parts(self.alignment.clone(), self.tree.clone(), self.data.clone())
    }
}

/// Options every analysis accepts.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Input files.
    #[command(flatten)]
    pub input: InputArgs,

    /// Move the JSON result here (file or existing directory).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the HyPhy command without running it.
    #[arg(long)]
    pub dry_run: bool,
}

/// Options for codon-based analyses.
#[derive(Debug, Clone, Args)]
pub struct CodonArgs {
    /// Genetic code, by name or number (see `hyphy-run codes`).
    #[arg(short, long)]
    pub genetic_code: Option<GeneticCode>,

    /// Significance threshold (0.0-1.0).
    #[arg(long, value_parser = parse_alpha)]
    pub alpha: Option<f64>,
}

/// Analyses parameterised by a branch selection only.
#[derive(Debug, Clone, Args)]
pub struct BranchArgs {
    /// Common options.
    #[command(flatten)]
    pub common: CommonArgs,

    /// Codon options.
    #[command(flatten)]
    pub codon: CodonArgs,

    /// Branches to test: All, Internal, Leaves, "Unlabeled branches", or a tree label.
    #[arg(short, long, default_value = "All")]
    pub branches: String,
}

/// FEL options.
#[derive(Debug, Clone, Args)]
pub struct FelArgs {
    /// Branch selection and shared options.
    #[command(flatten)]
    pub branch: BranchArgs,

    /// Keep synonymous rates constant across sites.
    #[arg(long)]
    pub no_srv: bool,
}

/// SLAC options.
#[derive(Debug, Clone, Args)]
pub struct SlacArgs {
    /// Branch selection and shared options.
    #[command(flatten)]
    pub branch: BranchArgs,

    /// Number of samples for ancestral reconstruction uncertainty.
    #[arg(long, default_value_t = bootstrap::DEFAULT)]
    pub samples: u32,
}

/// RELAX options.
#[derive(Debug, Clone, Args)]
pub struct RelaxArgs {
    /// Common options.
    #[command(flatten)]
    pub common: CommonArgs,

    /// Codon options.
    #[command(flatten)]
    pub codon: CodonArgs,

    /// Label of the test branch set; must appear in the tree.
    #[arg(long)]
    pub test_label: Option<String>,

    /// Label of the reference branch set (default: all unlabelled branches).
    #[arg(long)]
    pub reference_label: Option<String>,

    /// Analysis type: All or Minimal.
    #[arg(long, default_value_t)]
    pub analysis_type: RelaxType,
}

/// Relative protein rate options.
#[derive(Debug, Clone, Args)]
pub struct ProteinRatesArgs {
    /// Common options.
    #[command(flatten)]
    pub common: CommonArgs,

    /// Protein model: JC69, WAG, LG or JTT.
    #[arg(short, long, default_value_t)]
    pub model: ProteinModel,

    /// Take equilibrium frequencies from the model instead of the data.
    #[arg(long)]
    pub no_plus_f: bool,
}

/// Relative nucleotide rate options.
#[derive(Debug, Clone, Args)]
pub struct NucleotideRatesArgs {
    /// Common options.
    #[command(flatten)]
    pub common: CommonArgs,

    /// Nucleotide model: GTR, HKY85 or JC69.
    #[arg(short, long, default_value_t)]
    pub model: NucleotideModel,
}
