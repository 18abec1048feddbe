//! RELAX: test for relaxation or intensification of selection between a
//! labelled test branch set and a reference set.

use super::{Analysis, AnalysisOptions, CodonBase, Method, SHARED_BRANCH_CHOICES};
use crate::error::{Error, Result};
use crate::input::ResolvedInput;
use std::path::Path;
use tracing::warn;

/// Help pointer for users whose tree lacks labels.
const LABELING_HINT: &str = "Visit http://veg.github.io/phylotree.js/ for assistance labeling your tree.";

/// Which RELAX models are fitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RelaxType {
    /// Hypothesis test plus descriptive models.
    #[default]
    All,
    /// Hypothesis test only.
    Minimal,
}

impl std::fmt::Display for RelaxType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Minimal => write!(f, "Minimal"),
        }
    }
}

impl std::str::FromStr for RelaxType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "minimal" => Ok(Self::Minimal),
            _ => Err(Error::InvalidAnalysisType {
                value: s.to_string(),
            }),
        }
    }
}

/// RELAX parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelaxParams {
    /// Label of the test branch set. Required.
    pub test_label: Option<String>,
    /// Label of the reference branch set. Only meaningful when the tree
    /// carries more than one label.
    pub reference_label: Option<String>,
    /// Models to fit.
    pub analysis_type: RelaxType,
}

/// RELAX analysis.
///
/// Arguments: `code, alignment, [tree], test, [reference], type`.
#[derive(Debug, Clone)]
pub struct Relax {
    base: CodonBase,
    test_label: String,
    reference_label: Option<String>,
    analysis_type: RelaxType,
}

impl Relax {
    /// Validate labels against the tree.
    ///
    /// With several labels in the tree and no reference given, all
    /// unlabelled branches become the reference. With a single label any
    /// reference is ignored with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingLabel`] if the tree has no labels, the test
    /// label is absent or unknown, or the reference label is unknown.
    pub fn new(input: ResolvedInput, options: AnalysisOptions, params: RelaxParams) -> Result<Self> {
        let labels = input.labels();
        if labels.is_empty() {
            return Err(Error::MissingLabel {
                message: format!("RELAX requires at least one label in the tree. {LABELING_HINT}"),
            });
        }

        let test_label = params
            .test_label
            .filter(|label| labels.contains(label))
            .ok_or_else(|| Error::MissingLabel {
                message: format!(
                    "a test label that corresponds to a label in your tree is required. {LABELING_HINT}"
                ),
            })?;

        let reference_label = if labels.len() > 1 {
            match params.reference_label {
                Some(reference) if labels.contains(&reference) => Some(reference),
                Some(reference) => {
                    return Err(Error::MissingLabel {
                        message: format!(
                            "reference label '{reference}' does not correspond to a label in your tree; \
                             omit it to use all non-test branches as reference"
                        ),
                    });
                }
                None => {
                    let fallback = SHARED_BRANCH_CHOICES[3];
                    warn!(
                        "No branches were selected as reference even though multiple labels exist in the tree; using '{fallback}'"
                    );
                    Some(fallback.to_string())
                }
            }
        } else {
            if let Some(reference) = params.reference_label {
                warn!(
                    "Ignoring reference label '{reference}': the tree has a single label, so all non-test branches are the reference"
                );
            }
            None
        };

        Ok(Self {
            base: CodonBase::new(input, options)?,
            test_label,
            reference_label,
            analysis_type: params.analysis_type,
        })
    }

    /// Label of the test branch set.
    pub fn test_label(&self) -> &str {
        &self.test_label
    }

    /// Reference branch set, if one is passed to HyPhy.
    pub fn reference_label(&self) -> Option<&str> {
        self.reference_label.as_deref()
    }
}

impl Analysis for Relax {
    fn method(&self) -> Method {
        Method::Relax
    }

    fn input(&self) -> &ResolvedInput {
        &self.base.input
    }

    fn output(&self) -> Option<&Path> {
        self.base.output.as_deref()
    }

    fn arguments(&self) -> Vec<String> {
        let mut args = self.base.leading_arguments();
        args.push(self.test_label.clone());
        args.extend(self.reference_label.clone());
        args.push(self.analysis_type.to_string());
        args
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::input::AnalysisInput;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn resolved_with_tree(tree: &str) -> (ResolvedInput, NamedTempFile) {
        let mut data = NamedTempFile::new().unwrap();
        write!(data, ">a\nATG\n>b\nATG\n>c\nATG\n{tree}\n").unwrap();
        let resolved = AnalysisInput::combined(data.path()).resolve().unwrap();
        (resolved, data)
    }

    fn params(test: Option<&str>, reference: Option<&str>) -> RelaxParams {
        RelaxParams {
            test_label: test.map(str::to_string),
            reference_label: reference.map(str::to_string),
            analysis_type: RelaxType::All,
        }
    }

    #[test]
    fn test_relax_requires_labels() {
        let (resolved, _data) = resolved_with_tree("((a,b),c);");
        let result = Relax::new(resolved, AnalysisOptions::default(), params(Some("T"), None));
        assert!(matches!(result, Err(Error::MissingLabel { .. })));
    }

    #[test]
    fn test_relax_requires_known_test_label() {
        let (resolved, _data) = resolved_with_tree("((a{T},b),c);");
        let result = Relax::new(resolved.clone(), AnalysisOptions::default(), params(None, None));
        assert!(matches!(result, Err(Error::MissingLabel { .. })));

        let result = Relax::new(resolved, AnalysisOptions::default(), params(Some("X"), None));
        assert!(matches!(result, Err(Error::MissingLabel { .. })));
    }

    #[test]
    fn test_relax_single_label_omits_reference() {
        let (resolved, data) = resolved_with_tree("((a{T},b),c);");
        let relax = Relax::new(resolved, AnalysisOptions::default(), params(Some("T"), Some("R")))
            .unwrap();
        assert!(relax.reference_label().is_none());
        assert_eq!(
            relax.arguments(),
            vec![
                "Universal".to_string(),
                data.path().display().to_string(),
                "Y".to_string(),
                "T".to_string(),
                "All".to_string(),
            ]
        );
    }

    #[test]
    fn test_relax_multiple_labels_default_reference() {
        let (resolved, _data) = resolved_with_tree("((a{T},b{R}),c);");
        let relax =
            Relax::new(resolved, AnalysisOptions::default(), params(Some("T"), None)).unwrap();
        assert_eq!(relax.reference_label(), Some("Unlabeled branches"));
    }

    #[test]
    fn test_relax_multiple_labels_explicit_reference() {
        let (resolved, data) = resolved_with_tree("((a{T},b{R}),c);");
        let mut p = params(Some("T"), Some("R"));
        p.analysis_type = RelaxType::Minimal;
        let relax = Relax::new(resolved, AnalysisOptions::default(), p).unwrap();
        assert_eq!(
            relax.arguments(),
            vec![
                "Universal".to_string(),
                data.path().display().to_string(),
                "Y".to_string(),
                "T".to_string(),
                "R".to_string(),
                "Minimal".to_string(),
            ]
        );
    }

    #[test]
    fn test_relax_unknown_reference_rejected() {
        let (resolved, _data) = resolved_with_tree("((a{T},b{R}),c);");
        let result = Relax::new(resolved, AnalysisOptions::default(), params(Some("T"), Some("Q")));
        assert!(matches!(result, Err(Error::MissingLabel { .. })));
    }

    #[test]
    fn test_relax_type_parse() {
        assert_eq!("all".parse::<RelaxType>().unwrap(), RelaxType::All);
        assert_eq!("MINIMAL".parse::<RelaxType>().unwrap(), RelaxType::Minimal);
        assert!(matches!(
            "partial".parse::<RelaxType>(),
            Err(Error::InvalidAnalysisType { .. })
        ));
    }
}
