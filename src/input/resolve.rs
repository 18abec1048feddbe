//! Alignment and tree input resolution.

use super::labels::BranchLabelSet;
use super::nexus::read_single_tree;
use crate::constants::USE_EMBEDDED_TREE_FLAG;
use crate::error::{Error, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::debug;

/// A parenthesised Newick expression on a single line, ending in `;`.
static NEWICK_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn newick_pattern() -> Option<&'static Regex> {
    NEWICK_PATTERN
        .get_or_init(|| Regex::new(r"(\(.+\);)").ok())
        .as_ref()
}

/// User-supplied analysis input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisInput {
    /// Separate alignment and tree files.
    Split {
        /// Alignment file (FASTA, NEXUS, PHYLIP, ...).
        alignment: PathBuf,
        /// Newick tree file.
        tree: PathBuf,
    },
    /// One file holding both: NEXUS with a TREES block, or FASTA followed
    /// by a Newick tree.
    Combined {
        /// Combined data file.
        data: PathBuf,
    },
}

/// How the tree reaches HyPhy on its command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeArgument {
    /// Pass the tree file path.
    File(PathBuf),
    /// HyPhy reads the tree from the NEXUS file without asking.
    Embedded,
    /// Answer HyPhy's "use the tree found in the file?" prompt with `Y`.
    UseEmbedded,
}

impl TreeArgument {
    /// Positional token for this argument, if any.
    pub fn token(&self) -> Option<String> {
        match self {
            Self::File(path) => Some(path.display().to_string()),
            Self::Embedded => None,
            Self::UseEmbedded => Some(USE_EMBEDDED_TREE_FLAG.to_string()),
        }
    }
}

/// Input after validation: absolute alignment path, tree string, and the
/// tree argument for the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    alignment: PathBuf,
    tree: String,
    tree_argument: TreeArgument,
}

impl ResolvedInput {
    /// Absolute path HyPhy reads the alignment from.
    pub fn alignment(&self) -> &Path {
        &self.alignment
    }

    /// The tree as a Newick string.
    pub fn tree(&self) -> &str {
        &self.tree
    }

    /// Tree argument for the command line.
    pub fn tree_argument(&self) -> &TreeArgument {
        &self.tree_argument
    }

    /// Branch labels annotated in the tree.
    pub fn labels(&self) -> BranchLabelSet {
        BranchLabelSet::scan(&self.tree)
    }
}

impl AnalysisInput {
    /// Separate alignment and tree files.
    pub fn split(alignment: impl Into<PathBuf>, tree: impl Into<PathBuf>) -> Self {
        Self::Split {
            alignment: alignment.into(),
            tree: tree.into(),
        }
    }

    /// A single combined data file.
    pub fn combined(data: impl Into<PathBuf>) -> Self {
        Self::Combined { data: data.into() }
    }

    /// Build from optional CLI-style parts.
    ///
    /// # Errors
    ///
    /// Exactly one of (`alignment` and `tree`) or `data` must be given.
    pub fn from_parts(
        alignment: Option<PathBuf>,
        tree: Option<PathBuf>,
        data: Option<PathBuf>,
    ) -> Result<Self> {
        match (alignment, tree, data) {
            (Some(alignment), Some(tree), None) => Ok(Self::split(alignment, tree)),
            (Some(_), None, None) => Err(Error::TreeRequired),
            (None, None, Some(data)) => Ok(Self::combined(data)),
            (None, Some(_), None) => Err(Error::InvalidInputMode {
                message: "a tree was given without an alignment".to_string(),
            }),
            (None, None, None) => Err(Error::InvalidInputMode {
                message: "provide an alignment and a tree, or a combined data file".to_string(),
            }),
            _ => Err(Error::InvalidInputMode {
                message: "provide either an alignment and a tree, or a combined data file, not both"
                    .to_string(),
            }),
        }
    }

    /// Check the files exist and extract the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is missing or unreadable, or if no tree
    /// can be found in it.
    pub fn resolve(&self) -> Result<ResolvedInput> {
        match self {
            Self::Split { alignment, tree } => resolve_split(alignment, tree),
            Self::Combined { data } => resolve_combined(data),
        }
    }
}

fn resolve_split(alignment: &Path, tree: &Path) -> Result<ResolvedInput> {
    if !alignment.exists() {
        return Err(Error::AlignmentNotFound {
            path: alignment.to_path_buf(),
        });
    }
    if !tree.exists() {
        return Err(Error::TreeNotFound {
            path: tree.to_path_buf(),
        });
    }

    let alignment = std::path::absolute(alignment)?;
    let tree_path = std::path::absolute(tree)?;
    let tree_string = std::fs::read_to_string(&tree_path)?.trim().to_string();
    if tree_string.is_empty() {
        return Err(Error::MalformedTree { path: tree_path });
    }

    Ok(ResolvedInput {
        alignment,
        tree: tree_string,
        tree_argument: TreeArgument::File(tree_path),
    })
}

fn resolve_combined(data: &Path) -> Result<ResolvedInput> {
    if !data.exists() {
        return Err(Error::DataNotFound {
            path: data.to_path_buf(),
        });
    }

    let data = std::path::absolute(data)?;
    let contents = std::fs::read_to_string(&data)?;

    if let Some(tree) = read_single_tree(&contents) {
        debug!("Read tree from NEXUS TREES block in {}", data.display());
        return Ok(ResolvedInput {
            alignment: data,
            tree,
            tree_argument: TreeArgument::Embedded,
        });
    }

    match extract_newick(&contents) {
        Some(tree) => {
            debug!("Found embedded Newick tree in {}", data.display());
            Ok(ResolvedInput {
                alignment: data,
                tree: tree.to_string(),
                tree_argument: TreeArgument::UseEmbedded,
            })
        }
        None => Err(Error::MalformedTree { path: data }),
    }
}

/// First single-line `( ... );` expression in `text`.
pub fn extract_newick(text: &str) -> Option<&str> {
    newick_pattern()?
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_extract_newick_single_line() {
        let text = ">a\nATGATG\n>b\nATGATG\n((a,b){Fg},c);\n";
        assert_eq!(extract_newick(text), Some("((a,b){Fg},c);"));
    }

    #[test]
    fn test_extract_newick_none() {
        assert!(extract_newick(">a\nATG\n>b\nATG\n").is_none());
        assert!(extract_newick("(a,\nb);").is_none());
    }

    #[test]
    fn test_from_parts_modes() {
        let a = Some(PathBuf::from("aln.fa"));
        let t = Some(PathBuf::from("tree.nwk"));
        let d = Some(PathBuf::from("data.nex"));

        assert!(matches!(
            AnalysisInput::from_parts(a.clone(), t.clone(), None),
            Ok(AnalysisInput::Split { .. })
        ));
        assert!(matches!(
            AnalysisInput::from_parts(None, None, d.clone()),
            Ok(AnalysisInput::Combined { .. })
        ));
        assert!(matches!(
            AnalysisInput::from_parts(a.clone(), None, None),
            Err(Error::TreeRequired)
        ));
        assert!(matches!(
            AnalysisInput::from_parts(None, t.clone(), None),
            Err(Error::InvalidInputMode { .. })
        ));
        assert!(matches!(
            AnalysisInput::from_parts(a, t, d),
            Err(Error::InvalidInputMode { .. })
        ));
        assert!(matches!(
            AnalysisInput::from_parts(None, None, None),
            Err(Error::InvalidInputMode { .. })
        ));
    }

    #[test]
    fn test_resolve_split_reads_tree() {
        let alignment = write_temp(">a\nATG\n>b\nATG\n");
        let tree = write_temp("  ((a,b),c);\n\n");

        let resolved = AnalysisInput::split(alignment.path(), tree.path())
            .resolve()
            .unwrap();
        assert_eq!(resolved.tree(), "((a,b),c);");
        assert_eq!(resolved.alignment(), alignment.path());
        assert_eq!(
            resolved.tree_argument(),
            &TreeArgument::File(tree.path().to_path_buf())
        );
    }

    #[test]
    fn test_resolve_split_missing_files() {
        let tree = write_temp("(a,b);");
        let result = AnalysisInput::split("/nonexistent/aln.fa", tree.path()).resolve();
        assert!(matches!(result, Err(Error::AlignmentNotFound { .. })));

        let alignment = write_temp(">a\nATG\n");
        let result = AnalysisInput::split(alignment.path(), "/nonexistent/tree.nwk").resolve();
        assert!(matches!(result, Err(Error::TreeNotFound { .. })));
    }

    #[test]
    fn test_resolve_split_empty_tree() {
        let alignment = write_temp(">a\nATG\n");
        let tree = write_temp("   \n");
        let result = AnalysisInput::split(alignment.path(), tree.path()).resolve();
        assert!(matches!(result, Err(Error::MalformedTree { .. })));
    }

    #[test]
    fn test_resolve_combined_fasta_newick() {
        let data = write_temp(">a\nATG\n>b\nATG\n>c\nATG\n((a{Fg},b),c);\n");
        let resolved = AnalysisInput::combined(data.path()).resolve().unwrap();
        assert_eq!(resolved.tree(), "((a{Fg},b),c);");
        assert_eq!(resolved.tree_argument(), &TreeArgument::UseEmbedded);
        assert_eq!(resolved.tree_argument().token().as_deref(), Some("Y"));
        assert_eq!(resolved.labels().as_slice(), &["Fg".to_string()]);
    }

    #[test]
    fn test_resolve_combined_nexus() {
        let data = write_temp(
            "#NEXUS\nbegin data;\n dimensions ntax=2 nchar=3;\n matrix\n a ATG\n b ATG\n ;\nend;\nbegin trees;\n tree t = (a,b);\nend;\n",
        );
        let resolved = AnalysisInput::combined(data.path()).resolve().unwrap();
        assert_eq!(resolved.tree(), "(a,b);");
        assert_eq!(resolved.tree_argument(), &TreeArgument::Embedded);
        assert!(resolved.tree_argument().token().is_none());
    }

    #[test]
    fn test_resolve_nexus_with_several_trees_uses_embedded_flag() {
        let data = write_temp(
            "#NEXUS\nbegin data;\n dimensions ntax=3 nchar=3;\n matrix\n a ATG\n b ATG\n c ATG\n ;\nend;\nbegin trees;\n tree one = ((a{T},b),c);\n tree two = (a,(b,c));\nend;\n",
        );
        let resolved = AnalysisInput::combined(data.path()).resolve().unwrap();
        assert_eq!(resolved.tree(), "((a{T},b),c);");
        assert_eq!(resolved.tree_argument(), &TreeArgument::UseEmbedded);
        assert_eq!(resolved.tree_argument().token().as_deref(), Some("Y"));
    }

    #[test]
    fn test_resolve_combined_without_tree() {
        let data = write_temp(">a\nATG\n>b\nATG\n");
        let result = AnalysisInput::combined(data.path()).resolve();
        assert!(matches!(result, Err(Error::MalformedTree { .. })));
    }

    #[test]
    fn test_resolve_combined_missing() {
        let result = AnalysisInput::combined("/nonexistent/data.nex").resolve();
        assert!(matches!(result, Err(Error::DataNotFound { .. })));
    }
}
