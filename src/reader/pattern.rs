//! Naming patterns with a single `{}` placeholder.
//!
//! A pattern such as `data/run_{}/coords.npy` is turned into a glob expression
//! (`data/run_?*/coords.npy`) for discovery, and into a matcher that recovers the
//! text standing in for `{}` from each discovered path. Both halves are pure.

use std::path::{Component, Path};

use super::ReaderError;

/// Placeholder token marking the chunk key in a naming pattern
pub const PLACEHOLDER: &str = "{}";

/// A parsed naming pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPattern {
    template: String,
    head: String,
    tail: String,
    prefix: String,
    suffix: String,
    trailing: usize,
}

impl ChunkPattern {
    /// Parse a pattern containing exactly one placeholder
    pub fn parse(template: impl Into<String>) -> Result<Self, ReaderError> {
        let template = template.into();
        let count = template.matches(PLACEHOLDER).count();
        if count != 1 {
            let reason = if count == 0 {
                format!("no placeholder ({}) present", PLACEHOLDER)
            } else {
                format!("{} placeholders ({}) present, expected one", count, PLACEHOLDER)
            };
            return Err(ReaderError::Pattern { pattern: template, reason });
        }

        let (head, tail) = template
            .split_once(PLACEHOLDER)
            .ok_or_else(|| ReaderError::Pattern {
                pattern: template.clone(),
                reason: "placeholder not found".to_string(),
            })?;

        // Locate the path component carrying the placeholder, counted from the end so
        // that extraction does not depend on how the leading part of a path is spelled.
        let components: Vec<&str> = Path::new(&template)
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => name.to_str(),
                _ => None,
            })
            .collect();
        let position = components
            .iter()
            .position(|c| c.contains(PLACEHOLDER))
            .ok_or_else(|| ReaderError::Pattern {
                pattern: template.clone(),
                reason: "placeholder must be part of a file or directory name".to_string(),
            })?;
        let (prefix, suffix) = components[position]
            .split_once(PLACEHOLDER)
            .unwrap_or_default();

        Ok(Self {
            head: head.to_string(),
            tail: tail.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            trailing: components.len() - position - 1,
            template,
        })
    }

    /// Parse a pattern relative to a parent directory
    pub fn with_parent(parent: impl AsRef<Path>, template: &str) -> Result<Self, ReaderError> {
        let joined = parent.as_ref().join(template);
        let joined = joined.to_str().ok_or_else(|| ReaderError::Pattern {
            pattern: template.to_string(),
            reason: "parent directory is not valid UTF-8".to_string(),
        })?;
        Self::parse(joined)
    }

    /// The pattern as written
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Glob expression matching every candidate file
    ///
    /// The placeholder becomes `?*` so that it never matches an empty string; all
    /// other text is escaped and matched literally.
    pub fn glob_pattern(&self) -> String {
        format!(
            "{}?*{}",
            glob::Pattern::escape(&self.head),
            glob::Pattern::escape(&self.tail)
        )
    }

    /// Recover the placeholder text from a discovered path
    ///
    /// Returns `None` when the path does not fit the pattern or the match is empty.
    pub fn extract_key(&self, path: &Path) -> Option<String> {
        let components: Vec<Component<'_>> = path.components().collect();
        let index = components.len().checked_sub(self.trailing + 1)?;
        let name = match components[index] {
            Component::Normal(name) => name.to_str()?,
            _ => return None,
        };
        let key = name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())?;
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    }

    /// Fill the placeholder with a key
    pub fn resolve(&self, key: &str) -> String {
        format!("{}{}{}", self.head, key, self.tail)
    }
}
