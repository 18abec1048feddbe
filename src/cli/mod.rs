//! CLI argument parsing.

mod args;
pub mod validators;

pub use args::{
    BranchArgs, Cli, CodonArgs, Command, CommonArgs, ConfigAction, FelArgs, GlobalArgs, InputArgs,
    NucleotideRatesArgs, ProteinRatesArgs, RelaxArgs, SlacArgs,
};
