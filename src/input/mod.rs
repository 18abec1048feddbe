//! Alignment/tree inputs and branch label discovery.

mod labels;
mod nexus;
mod resolve;

pub use labels::BranchLabelSet;
pub use nexus::read_single_tree;
pub use resolve::{AnalysisInput, ResolvedInput, TreeArgument, extract_newick};
