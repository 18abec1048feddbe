//! HyPhy analysis methods.
//!
//! Every method validates its parameters on construction and knows the
//! positional-argument order its batch file expects. Running is shared,
//! see [`runner`].

mod command;
mod genetic_code;
mod rates;
mod relax;
pub mod runner;
mod selection;

pub use command::AnalysisCommand;
pub use genetic_code::GeneticCode;
pub use rates::{NucleotideModel, NucleotideRates, ProteinModel, ProteinRates};
pub use relax::{Relax, RelaxParams, RelaxType};
pub use selection::{Absrel, Busted, Fel, FelParams, Meme, Slac, SlacParams};

use crate::constants::{DEFAULT_ALPHA, alpha, batch_dirs, output_suffixes};
use crate::error::{Error, Result};
use crate::hyphy::HyPhy;
use crate::input::{BranchLabelSet, ResolvedInput};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Branch sets every tree offers, labelled or not.
pub const SHARED_BRANCH_CHOICES: [&str; 4] = ["All", "Internal", "Leaves", "Unlabeled branches"];

/// The supported analysis methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Fixed Effects Likelihood.
    Fel,
    /// Mixed Effects Model of Evolution.
    Meme,
    /// Single-Likelihood Ancestor Counting.
    Slac,
    /// Adaptive branch-site random effects.
    Absrel,
    /// Branch-site Unrestricted Statistical Test for Episodic Diversification.
    Busted,
    /// Test for relaxed or intensified selection.
    Relax,
    /// Site-wise relative rates under a protein model.
    ProteinRates,
    /// Site-wise relative rates under a nucleotide model.
    NucleotideRates,
}

impl Method {
    /// Batch file name.
    pub const fn batch_file(self) -> &'static str {
        match self {
            Self::Fel => "FEL.bf",
            Self::Meme => "MEME.bf",
            Self::Slac => "SLAC.bf",
            Self::Absrel => "aBSREL.bf",
            Self::Busted => "BUSTED.bf",
            Self::Relax => "RELAX.bf",
            Self::ProteinRates => "relative_prot_rates.bf",
            Self::NucleotideRates => "relative_nucleotide_rates.bf",
        }
    }

    /// Batch file directory relative to the HyPhy library path.
    pub const fn batch_dir(self) -> &'static str {
        match self {
            Self::ProteinRates => batch_dirs::PROTEIN,
            Self::NucleotideRates => batch_dirs::TEMPLATE,
            _ => batch_dirs::SELECTION,
        }
    }

    /// Suffix HyPhy appends to the alignment path for its JSON output.
    pub const fn output_suffix(self) -> &'static str {
        match self {
            Self::Fel => output_suffixes::FEL,
            Self::Meme => output_suffixes::MEME,
            Self::Slac => output_suffixes::SLAC,
            Self::Absrel => output_suffixes::ABSREL,
            Self::Busted => output_suffixes::BUSTED,
            Self::Relax => output_suffixes::RELAX,
            Self::ProteinRates | Self::NucleotideRates => output_suffixes::SITE_RATES,
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fel => write!(f, "FEL"),
            Self::Meme => write!(f, "MEME"),
            Self::Slac => write!(f, "SLAC"),
            Self::Absrel => write!(f, "aBSREL"),
            Self::Busted => write!(f, "BUSTED"),
            Self::Relax => write!(f, "RELAX"),
            Self::ProteinRates => write!(f, "relative protein rates"),
            Self::NucleotideRates => write!(f, "relative nucleotide rates"),
        }
    }
}

/// Options shared by all analyses.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOptions {
    /// Codon translation table. Unused by the relative rate analyses.
    pub genetic_code: GeneticCode,
    /// Significance threshold for selection tests.
    pub alpha: f64,
    /// Final location of the JSON result. `None` leaves it next to the
    /// alignment.
    pub output: Option<PathBuf>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            genetic_code: GeneticCode::UNIVERSAL,
            alpha: DEFAULT_ALPHA,
            output: None,
        }
    }
}

/// A configured analysis, ready to be turned into a HyPhy command.
pub trait Analysis {
    /// Which method this is.
    fn method(&self) -> Method;

    /// The validated input.
    fn input(&self) -> &ResolvedInput;

    /// User-requested final location of the JSON result.
    fn output(&self) -> Option<&Path>;

    /// Positional arguments following the batch file, in batch file order.
    fn arguments(&self) -> Vec<String>;

    /// Batch file path under `hyphy`'s library path plus arguments.
    fn build_command(&self, hyphy: &HyPhy) -> AnalysisCommand {
        let method = self.method();
        let batch_file = hyphy
            .batch_dir(method.batch_dir())
            .join(method.batch_file());
        AnalysisCommand::new(batch_file, self.arguments())
    }

    /// Where HyPhy writes its JSON: `<alignment><suffix>`.
    fn default_json_path(&self) -> PathBuf {
        let mut path = OsString::from(self.input().alignment().as_os_str());
        path.push(self.method().output_suffix());
        PathBuf::from(path)
    }
}

/// Check a branch selection against the shared keywords and tree labels.
///
/// # Errors
///
/// Returns [`Error::InvalidBranchSelection`] listing every allowed value.
pub fn validate_branch_selection(selection: &str, labels: &BranchLabelSet) -> Result<String> {
    if SHARED_BRANCH_CHOICES.contains(&selection) || labels.contains(selection) {
        return Ok(selection.to_string());
    }

    let allowed = SHARED_BRANCH_CHOICES
        .iter()
        .copied()
        .chain(labels.iter().map(String::as_str))
        .map(|choice| format!("'{choice}'"))
        .collect::<Vec<_>>()
        .join(", ");

    Err(Error::InvalidBranchSelection {
        value: selection.to_string(),
        allowed,
    })
}

/// Check the significance threshold lies in `[0, 1]`.
///
/// # Errors
///
/// Returns [`Error::OutOfRange`] otherwise (including NaN).
pub fn validate_alpha(value: f64) -> Result<f64> {
    if (alpha::MIN..=alpha::MAX).contains(&value) {
        Ok(value)
    } else {
        Err(Error::OutOfRange {
            name: "alpha",
            value: value.to_string(),
            min: alpha::MIN.to_string(),
            max: alpha::MAX.to_string(),
        })
    }
}

/// HyPhy's answer for a boolean prompt.
pub const fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// Fields every codon analysis shares: input, validated options, and the
/// leading `code, alignment, tree` tokens.
#[derive(Debug, Clone)]
struct CodonBase {
    input: ResolvedInput,
    genetic_code: GeneticCode,
    alpha: f64,
    output: Option<PathBuf>,
}

impl CodonBase {
    fn new(input: ResolvedInput, options: AnalysisOptions) -> Result<Self> {
        Ok(Self {
            input,
            genetic_code: options.genetic_code,
            alpha: validate_alpha(options.alpha)?,
            output: options.output,
        })
    }

    /// `genetic code, alignment, [tree]`.
    fn leading_arguments(&self) -> Vec<String> {
        let mut args = vec![
            self.genetic_code.name().to_string(),
            self.input.alignment().display().to_string(),
        ];
        args.extend(self.input.tree_argument().token());
        args
    }

    fn alpha_argument(&self) -> String {
        self.alpha.to_string()
    }
}
