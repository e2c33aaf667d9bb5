use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagSelectorError {
    #[error("Invalid tag: {0}")]
    InvalidTag(String),
}

/// Grouping-tag filter applied to the registered repositories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagSelector {
    /// Every repository is selected
    #[default]
    NoTag,
    /// Only repositories carrying exactly this tag are selected
    Tag(String),
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("tag pattern is valid"))
}

impl TagSelector {
    /// Interpret a command-line argument as an `@tag` prefix.
    ///
    /// Anything that is not `@` followed by at least one character is
    /// `NoTag`, including the empty string.
    pub fn parse(arg: &str) -> Self {
        match arg.strip_prefix('@') {
            Some(tag) if !tag.is_empty() => TagSelector::Tag(tag.to_string()),
            _ => TagSelector::NoTag,
        }
    }

    /// Build a selector from a plain filter string, empty meaning no filter
    pub fn from_filter(filter: &str) -> Self {
        if filter.is_empty() {
            TagSelector::NoTag
        } else {
            TagSelector::Tag(filter.to_string())
        }
    }

    /// The selected tag, if any
    pub fn tag(&self) -> Option<&str> {
        match self {
            TagSelector::NoTag => None,
            TagSelector::Tag(tag) => Some(tag),
        }
    }

    /// Check a repository's tag against this selector.
    ///
    /// An untagged (or empty-tagged) repository is excluded by any tag.
    pub fn matches(&self, repo_tag: Option<&str>) -> bool {
        match self {
            TagSelector::NoTag => true,
            TagSelector::Tag(wanted) => {
                matches!(repo_tag, Some(tag) if !tag.is_empty() && tag == wanted)
            }
        }
    }

    /// Reject tags that could not have been written by `register`
    pub fn validate(&self) -> Result<(), TagSelectorError> {
        match self {
            TagSelector::Tag(tag) if !tag_pattern().is_match(tag) => {
                Err(TagSelectorError::InvalidTag(tag.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// Split a leading `@tag` off the argument list.
///
/// Only the first argument is inspected.
pub fn split_tag_prefix(args: &[String]) -> Result<(TagSelector, Vec<String>), TagSelectorError> {
    let Some(first) = args.first() else {
        return Ok((TagSelector::NoTag, Vec::new()));
    };

    match TagSelector::parse(first) {
        TagSelector::NoTag => Ok((TagSelector::NoTag, args.to_vec())),
        selector => {
            selector.validate()?;
            Ok((selector, args[1..].to_vec()))
        }
    }
}
