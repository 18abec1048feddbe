//! Branch label discovery.
//!
//! HyPhy marks branch subsets by annotating tree nodes with `{label}`.
//! Any character is allowed inside the braces, so labels are found with a
//! plain character scan rather than a Newick parser.

/// Distinct branch labels of a tree, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchLabelSet {
    labels: Vec<String>,
}

impl BranchLabelSet {
    /// Scan a tree string once, left to right, collecting `{...}` labels.
    ///
    /// A `{` restarts the current label. An unterminated `{` and an empty
    /// `{}` contribute nothing.
    pub fn scan(tree: &str) -> Self {
        let mut labels: Vec<String> = Vec::new();
        let mut current: Option<String> = None;

        for c in tree.chars() {
            match c {
                '{' => current = Some(String::new()),
                '}' => {
                    if let Some(label) = current.take()
                        && !label.is_empty()
                        && !labels.contains(&label)
                    {
                        labels.push(label);
                    }
                }
                _ => {
                    if let Some(label) = current.as_mut() {
                        label.push(c);
                    }
                }
            }
        }

        Self { labels }
    }

    /// Whether `label` occurs in the tree.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the tree carries no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in first-appearance order.
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    /// Iterate over labels in first-appearance order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.labels.iter()
    }
}

impl<'a> IntoIterator for &'a BranchLabelSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

impl From<BranchLabelSet> for Vec<String> {
    fn from(set: BranchLabelSet) -> Self {
        set.labels
    }
}
