//! Site- and branch-level selection analyses: FEL, MEME, SLAC, aBSREL and
//! BUSTED.
//!
//! All five share the `code, alignment, tree, branches` prefix and differ
//! only in what follows it.

use super::{
    Analysis, AnalysisOptions, CodonBase, Method, validate_branch_selection, yes_no,
};
use crate::constants::bootstrap;
use crate::error::{Error, Result};
use crate::input::ResolvedInput;
use std::path::Path;

/// Codon analysis with a validated branch selection.
#[derive(Debug, Clone)]
struct BranchTest {
    base: CodonBase,
    branches: String,
}

impl BranchTest {
    fn new(input: ResolvedInput, options: AnalysisOptions, branches: &str) -> Result<Self> {
        let branches = validate_branch_selection(branches, &input.labels())?;
        Ok(Self {
            base: CodonBase::new(input, options)?,
            branches,
        })
    }

    /// `code, alignment, [tree], branches`.
    fn leading_arguments(&self) -> Vec<String> {
        let mut args = self.base.leading_arguments();
        args.push(self.branches.clone());
        args
    }
}

macro_rules! impl_analysis_accessors {
    ($method:expr) => {
        fn method(&self) -> Method {
            $method
        }

        fn input(&self) -> &ResolvedInput {
            &self.test.base.input
        }

        fn output(&self) -> Option<&Path> {
            self.test.base.output.as_deref()
        }
    };
}

/// FEL parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FelParams {
    /// Branches to test: a shared keyword or a tree label.
    pub branches: String,
    /// Allow synonymous rates to vary across sites.
    pub srv: bool,
}

impl Default for FelParams {
    fn default() -> Self {
        Self {
            branches: "All".to_string(),
            srv: true,
        }
    }
}

/// Fixed Effects Likelihood: pervasive site-level selection.
///
/// Arguments: `code, alignment, [tree], branches, srv, alpha`.
#[derive(Debug, Clone)]
pub struct Fel {
    test: BranchTest,
    srv: bool,
}

impl Fel {
    /// Validate parameters against the input.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown branch selection or bad alpha.
    pub fn new(input: ResolvedInput, options: AnalysisOptions, params: FelParams) -> Result<Self> {
        Ok(Self {
            test: BranchTest::new(input, options, &params.branches)?,
            srv: params.srv,
        })
    }
}

impl Analysis for Fel {
    impl_analysis_accessors!(Method::Fel);

    fn arguments(&self) -> Vec<String> {
        let mut args = self.test.leading_arguments();
        args.push(yes_no(self.srv).to_string());
        args.push(self.test.base.alpha_argument());
        args
    }
}

/// Mixed Effects Model of Evolution: episodic site-level selection.
///
/// Arguments: `code, alignment, [tree], branches, alpha`.
#[derive(Debug, Clone)]
pub struct Meme {
    test: BranchTest,
}

impl Meme {
    /// Validate parameters against the input.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown branch selection or bad alpha.
    pub fn new(input: ResolvedInput, options: AnalysisOptions, branches: &str) -> Result<Self> {
        Ok(Self {
            test: BranchTest::new(input, options, branches)?,
        })
    }
}

impl Analysis for Meme {
    impl_analysis_accessors!(Method::Meme);

    fn arguments(&self) -> Vec<String> {
        let mut args = self.test.leading_arguments();
        args.push(self.test.base.alpha_argument());
        args
    }
}

/// SLAC parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlacParams {
    /// Branches to test: a shared keyword or a tree label.
    pub branches: String,
    /// Samples used to assess ancestral reconstruction uncertainty.
    pub bootstrap_samples: u32,
}

impl Default for SlacParams {
    fn default() -> Self {
        Self {
            branches: "All".to_string(),
            bootstrap_samples: bootstrap::DEFAULT,
        }
    }
}

/// Single-Likelihood Ancestor Counting.
///
/// Arguments: `code, alignment, [tree], branches, samples, alpha`.
#[derive(Debug, Clone)]
pub struct Slac {
    test: BranchTest,
    bootstrap_samples: u32,
}

impl Slac {
    /// Validate parameters against the input.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown branch selection, bad alpha, or a
    /// sample count outside `[0, 100000]`.
    pub fn new(input: ResolvedInput, options: AnalysisOptions, params: SlacParams) -> Result<Self> {
        if !(bootstrap::MIN..=bootstrap::MAX).contains(&params.bootstrap_samples) {
            return Err(Error::OutOfRange {
                name: "bootstrap samples",
                value: params.bootstrap_samples.to_string(),
                min: bootstrap::MIN.to_string(),
                max: bootstrap::MAX.to_string(),
            });
        }

        Ok(Self {
            test: BranchTest::new(input, options, &params.branches)?,
            bootstrap_samples: params.bootstrap_samples,
        })
    }
}

impl Analysis for Slac {
    impl_analysis_accessors!(Method::Slac);

    fn arguments(&self) -> Vec<String> {
        let mut args = self.test.leading_arguments();
        args.push(self.bootstrap_samples.to_string());
        args.push(self.test.base.alpha_argument());
        args
    }
}

/// Adaptive branch-site random effects likelihood.
///
/// Arguments: `code, alignment, [tree], branches`.
#[derive(Debug, Clone)]
pub struct Absrel {
    test: BranchTest,
}

impl Absrel {
    /// Validate parameters against the input.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown branch selection.
    pub fn new(input: ResolvedInput, options: AnalysisOptions, branches: &str) -> Result<Self> {
        Ok(Self {
            test: BranchTest::new(input, options, branches)?,
        })
    }
}

impl Analysis for Absrel {
    impl_analysis_accessors!(Method::Absrel);

    fn arguments(&self) -> Vec<String> {
        self.test.leading_arguments()
    }
}

/// Gene-wide test for episodic diversifying selection.
///
/// Arguments: `code, alignment, [tree], branches`.
#[derive(Debug, Clone)]
pub struct Busted {
    test: BranchTest,
}

impl Busted {
    /// Validate parameters against the input.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown branch selection.
    pub fn new(input: ResolvedInput, options: AnalysisOptions, branches: &str) -> Result<Self> {
        Ok(Self {
            test: BranchTest::new(input, options, branches)?,
        })
    }
}

impl Analysis for Busted {
    impl_analysis_accessors!(Method::Busted);

    fn arguments(&self) -> Vec<String> {
        self.test.leading_arguments()
    }
}
