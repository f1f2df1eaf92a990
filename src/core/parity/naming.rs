//! Name normalization: derive an entity token from a file name.
//!
//! A [`NamingConvention`] is an ordered list of [`StripRule`]s. The first
//! rule that matches a file name produces the token; files matching no rule
//! are not part of the inventory.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::TokenSet;

/// Strip an optional prefix and a required suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AffixRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    pub suffix: String,
    /// Disqualifies the rule when the file name ends with it
    /// (generated companions such as `.Designer.cs`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_suffix: Option<String>,
    /// Appended to the stripped stem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<String>,
}

impl AffixRule {
    fn apply(&self, file_name: &str) -> Option<String> {
        if let Some(excluded) = &self.exclude_suffix {
            if file_name.ends_with(excluded.as_str()) {
                return None;
            }
        }

        let rest = match &self.prefix {
            Some(p) => file_name.strip_prefix(p.as_str())?,
            None => file_name,
        };
        let stem = rest.strip_suffix(self.suffix.as_str())?;
        if stem.is_empty() {
            return None;
        }

        let mut token = stem.to_string();
        if let Some(marker) = &self.append {
            token.push_str(marker);
        }
        Some(token)
    }
}

/// Exactly one file name, mapped to a fixed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExactRule {
    pub file_name: String,
    pub token: String,
}

/// One way of turning a file name into a token.
///
/// Both shapes reject unknown keys, so a misspelled field fails to parse
/// instead of silently loosening the rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StripRule {
    Exact(ExactRule),
    Affix(AffixRule),
}

impl StripRule {
    pub fn affix(prefix: Option<&str>, suffix: &str) -> Self {
        StripRule::Affix(AffixRule {
            prefix: prefix.map(str::to_string),
            suffix: suffix.to_string(),
            exclude_suffix: None,
            append: None,
        })
    }

    pub fn exact(file_name: &str, token: &str) -> Self {
        StripRule::Exact(ExactRule {
            file_name: file_name.to_string(),
            token: token.to_string(),
        })
    }

    pub fn excluding(mut self, excluded: &str) -> Self {
        if let StripRule::Affix(rule) = &mut self {
            rule.exclude_suffix = Some(excluded.to_string());
        }
        self
    }

    pub fn appending(mut self, marker: &str) -> Self {
        if let StripRule::Affix(rule) = &mut self {
            rule.append = Some(marker.to_string());
        }
        self
    }

    /// Apply this rule to a bare file name.
    pub fn apply(&self, file_name: &str) -> Option<String> {
        match self {
            StripRule::Exact(rule) => (rule.file_name == file_name).then(|| rule.token.clone()),
            StripRule::Affix(rule) => rule.apply(file_name),
        }
    }
}

/// A labelled, ordered rule set for one codebase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingConvention {
    pub label: String,
    pub rules: Vec<StripRule>,
}

impl NamingConvention {
    pub fn new(label: impl Into<String>, rules: Vec<StripRule>) -> Self {
        Self {
            label: label.into(),
            rules,
        }
    }
}

/// Derive the entity token for `raw` under `convention`.
///
/// Only the final path component is considered, so the same file name in two
/// directories yields the same token.
pub fn normalize(raw: &str, convention: &NamingConvention) -> Option<String> {
    let file_name = Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(raw);

    convention
        .rules
        .iter()
        .find_map(|rule| rule.apply(file_name))
}

/// Normalize a whole inventory into a token set. Duplicates collapse.
pub fn collect_tokens<I, S>(names: I, convention: &NamingConvention) -> TokenSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| normalize(name.as_ref(), convention))
        .collect()
}
