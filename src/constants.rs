//! Application-wide constants.
//!
//! HyPhy's calling convention (paths, batch files, output suffixes) lives
//! here so the analysis modules only deal with ordering.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "hyphy-run";

/// Default HyPhy executable (multi-threaded build).
pub const DEFAULT_EXECUTABLE: &str = "HYPHYMP";

/// Library path of a canonical `make install` into `/usr/local`.
pub const DEFAULT_LIBPATH: &str = "/usr/local/lib/hyphy/";

/// Default significance threshold for selection tests.
pub const DEFAULT_ALPHA: f64 = 0.1;

/// Default genetic code name.
pub const DEFAULT_GENETIC_CODE: &str = "Universal";

/// Layout of a HyPhy build or install tree.
pub mod layout {
    /// Library directory relative to a local build directory.
    pub const BUILD_LIBDIR: &str = "res";
    /// Library directory relative to an install prefix.
    pub const INSTALL_LIBDIR: &str = "lib/hyphy";
    /// Executable directory relative to an install prefix.
    pub const INSTALL_BINDIR: &str = "bin";
}

/// Batch file directories relative to the library path.
pub mod batch_dirs {
    /// Codon selection analyses (FEL, MEME, SLAC, aBSREL, BUSTED, RELAX).
    pub const SELECTION: &str = "TemplateBatchFiles/SelectionAnalyses";
    /// Protein analyses.
    pub const PROTEIN: &str = "TemplateBatchFiles/ProteinAnalyses";
    /// Top-level template batch files.
    pub const TEMPLATE: &str = "TemplateBatchFiles";
}

/// Suffixes HyPhy appends to the alignment path for its JSON output.
pub mod output_suffixes {
    /// FEL output.
    pub const FEL: &str = ".FEL.json";
    /// MEME output.
    pub const MEME: &str = ".MEME.json";
    /// SLAC output.
    pub const SLAC: &str = ".SLAC.json";
    /// aBSREL output (no method tag).
    pub const ABSREL: &str = ".json";
    /// BUSTED output.
    pub const BUSTED: &str = ".BUSTED.json";
    /// RELAX output.
    pub const RELAX: &str = ".RELAX.json";
    /// Relative rate analyses output.
    pub const SITE_RATES: &str = ".site-rates.json";
}

/// SLAC ancestral reconstruction bootstrap bounds.
pub mod bootstrap {
    /// Minimum number of samples.
    pub const MIN: u32 = 0;
    /// Maximum number of samples.
    pub const MAX: u32 = 100_000;
    /// Default number of samples.
    pub const DEFAULT: u32 = 100;
}

/// Significance threshold bounds.
pub mod alpha {
    /// Minimum valid threshold.
    pub const MIN: f64 = 0.0;
    /// Maximum valid threshold.
    pub const MAX: f64 = 1.0;
}

/// Literal answer telling HyPhy to use the tree found in the data file.
pub const USE_EMBEDDED_TREE_FLAG: &str = "Y";
