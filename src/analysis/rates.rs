//! Site-wise relative rate analyses for protein and nucleotide alignments.
//!
//! These batch files take no genetic code: arguments start at the
//! alignment.

use super::{Analysis, AnalysisOptions, Method, yes_no};
use crate::error::{Error, Result};
use crate::input::ResolvedInput;
use std::path::{Path, PathBuf};

/// Protein substitution models available to `relative_prot_rates.bf`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProteinModel {
    /// Jukes-Cantor (equal rates).
    #[default]
    Jc69,
    /// Whelan and Goldman.
    Wag,
    /// Le and Gascuel.
    Lg,
    /// Jones, Taylor and Thornton.
    Jtt,
}

impl ProteinModel {
    const ALL: [Self; 4] = [Self::Jc69, Self::Wag, Self::Lg, Self::Jtt];
}

impl std::fmt::Display for ProteinModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Jc69 => write!(f, "JC69"),
            Self::Wag => write!(f, "WAG"),
            Self::Lg => write!(f, "LG"),
            Self::Jtt => write!(f, "JTT"),
        }
    }
}

impl std::str::FromStr for ProteinModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|model| model.to_string() == s)
            .ok_or_else(|| Error::InvalidModel {
                kind: "protein",
                value: s.to_string(),
                allowed: join_models(&Self::ALL),
            })
    }
}

/// Nucleotide substitution models available to
/// `relative_nucleotide_rates.bf`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NucleotideModel {
    /// General time-reversible.
    #[default]
    Gtr,
    /// Hasegawa, Kishino and Yano.
    Hky85,
    /// Jukes-Cantor.
    Jc69,
}

impl NucleotideModel {
    const ALL: [Self; 3] = [Self::Gtr, Self::Hky85, Self::Jc69];
}

impl std::fmt::Display for NucleotideModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gtr => write!(f, "GTR"),
            Self::Hky85 => write!(f, "HKY85"),
            Self::Jc69 => write!(f, "JC69"),
        }
    }
}

impl std::str::FromStr for NucleotideModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|model| model.to_string() == s)
            .ok_or_else(|| Error::InvalidModel {
                kind: "nucleotide",
                value: s.to_string(),
                allowed: join_models(&Self::ALL),
            })
    }
}

fn join_models<T: std::fmt::Display>(models: &[T]) -> String {
    models
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Relative site rates under a protein model.
///
/// Arguments: `alignment, [tree], model, +F`.
#[derive(Debug, Clone)]
pub struct ProteinRates {
    input: ResolvedInput,
    output: Option<PathBuf>,
    model: ProteinModel,
    plus_f: bool,
}

impl ProteinRates {
    /// Create the analysis. With `plus_f`, equilibrium frequencies are
    /// estimated from the data instead of taken from the model.
    pub fn new(
        input: ResolvedInput,
        options: AnalysisOptions,
        model: ProteinModel,
        plus_f: bool,
    ) -> Self {
        Self {
            input,
            output: options.output,
            model,
            plus_f,
        }
    }
}

impl Analysis for ProteinRates {
    fn method(&self) -> Method {
        Method::ProteinRates
    }

    fn input(&self) -> &ResolvedInput {
        &self.input
    }

    fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    fn arguments(&self) -> Vec<String> {
        let mut args = vec![self.input.alignment().display().to_string()];
        args.extend(self.input.tree_argument().token());
        args.push(self.model.to_string());
        args.push(yes_no(self.plus_f).to_string());
        args
    }
}

/// Relative site rates under a nucleotide model.
///
/// Arguments: `alignment, [tree], model`.
#[derive(Debug, Clone)]
pub struct NucleotideRates {
    input: ResolvedInput,
    output: Option<PathBuf>,
    model: NucleotideModel,
}

impl NucleotideRates {
    /// Create the analysis.
    pub fn new(input: ResolvedInput, options: AnalysisOptions, model: NucleotideModel) -> Self {
        Self {
            input,
            output: options.output,
            model,
        }
    }
}

impl Analysis for NucleotideRates {
    fn method(&self) -> Method {
        Method::NucleotideRates
    }

    fn input(&self) -> &ResolvedInput {
        &self.input
    }

    fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    fn arguments(&self) -> Vec<String> {
        let mut args = vec![self.input.alignment().display().to_string()];
        args.extend(self.input.tree_argument().token());
        args.push(self.model.to_string());
        args
    }
}
