//! Locating and validating a HyPhy installation.

mod executable;
mod locate;

pub use executable::{HyPhy, HyPhyBuilder};
pub use locate::{find_executable, get_executable_search_paths, resolve_executable};
