//! Tree extraction from NEXUS files.
//!
//! Only what HyPhy needs from a combined NEXUS file is read: the single
//! `tree` statement of a TREES block, with its `Translate` table applied.
//! Everything else (DATA, TAXA, assumption blocks) is skipped.

use std::collections::HashMap;
use tracing::debug;

/// NEXUS file header.
const NEXUS_HEADER: &str = "#nexus";

/// Extract the tree of the TREES block as a Newick string.
///
/// Square-bracket comments (including rooting hints such as `[&R]`) are
/// removed; `{label}` annotations are kept. The returned string ends in `;`.
///
/// Returns `None` if the text is not NEXUS, holds no tree, or holds more
/// than one tree. HyPhy asks which tree to use when a file carries several,
/// so those files go through the embedded-tree prompt instead.
pub fn read_single_tree(text: &str) -> Option<String> {
    let text = text.trim_start_matches('\u{feff}').trim_start();
    if !text
        .get(..NEXUS_HEADER.len())
        .is_some_and(|h| h.eq_ignore_ascii_case(NEXUS_HEADER))
    {
        return None;
    }

    let text = strip_comments(&text[NEXUS_HEADER.len()..]);
    let mut in_trees = false;
    let mut translate: HashMap<String, String> = HashMap::new();
    let mut found: Option<String> = None;

    for statement in split_statements(&text) {
        let statement = statement.trim();
        let (keyword, rest) = split_keyword(statement);
        let keyword = keyword.to_ascii_lowercase();

        match keyword.as_str() {
            "begin" => in_trees = rest.trim().eq_ignore_ascii_case("trees"),
            "end" | "endblock" => in_trees = false,
            "translate" if in_trees => translate = parse_translate(rest),
            "tree" | "utree" if in_trees => {
                if found.is_some() {
                    debug!("NEXUS TREES block holds more than one tree");
                    return None;
                }
                let (_, newick) = rest.split_once('=')?;
                let newick = newick.trim();
                if newick.is_empty() {
                    return None;
                }
                let newick = if translate.is_empty() {
                    newick.to_string()
                } else {
                    apply_translation(newick, &translate)
                };
                found = Some(format!("{newick};"));
            }
            _ => {}
        }
    }

    found
}

/// Remove `[...]` comments outside single-quoted tokens.
fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut quoted = false;

    for c in text.chars() {
        match c {
            '\'' if depth == 0 => {
                quoted = !quoted;
                out.push(c);
            }
            '[' if !quoted => depth += 1,
            ']' if !quoted && depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Split on `;` outside single-quoted tokens.
fn split_statements(text: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut quoted = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        match c {
            '\'' => quoted = !quoted,
            ';' if !quoted => {
                statements.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    statements
}

fn split_keyword(statement: &str) -> (&str, &str) {
    statement
        .split_once(char::is_whitespace)
        .unwrap_or((statement, ""))
}

/// Parse `key value, key value, ...` pairs.
fn parse_translate(body: &str) -> HashMap<String, String> {
    body.split(',')
        .filter_map(|pair| {
            let (key, value) = pair.trim().split_once(char::is_whitespace)?;
            Some((key.to_string(), unquote(value.trim()).to_string()))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .unwrap_or(value)
}

/// Replace leaf names that appear in the translate table.
///
/// A leaf name starts after `(` or `,` and runs until a Newick delimiter,
/// whitespace, or a `{` annotation.
fn apply_translation(newick: &str, translate: &HashMap<String, String>) -> String {
    let chars: Vec<char> = newick.chars().collect();
    let mut out = String::with_capacity(newick.len());
    let mut i = 0;
    let mut at_leaf = false;

    while i < chars.len() {
        let c = chars[i];
        if at_leaf && !c.is_whitespace() && !"(),:;{".contains(c) {
            let start = i;
            if c == '\'' {
                i += 1;
                while i < chars.len() && chars[i] != '\'' {
                    i += 1;
                }
                i = (i + 1).min(chars.len());
            } else {
                while i < chars.len()
                    && !chars[i].is_whitespace()
                    && !"(),:;{".contains(chars[i])
                {
                    i += 1;
                }
            }
            let name: String = chars[start..i].iter().collect();
            match translate.get(unquote(&name)) {
                Some(replacement) => out.push_str(replacement),
                None => out.push_str(&name),
            }
            at_leaf = false;
            continue;
        }

        if c == '(' || c == ',' {
            at_leaf = true;
        } else if !c.is_whitespace() {
            at_leaf = false;
        }
        out.push(c);
        i += 1;
    }
    out
}
