//! Locator module - where ontology bytes come from

use std::fmt;
use std::path::{Path, PathBuf};

/// Source of an ontology document
///
/// Strings starting with `http` or `ftp` are remote; anything else is a
/// local filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Local filesystem path
    Path(PathBuf),

    /// Remote URL
    Url(String),
}

impl Locator {
    /// Parse a locator string
    ///
    /// # Errors
    /// Returns error if the string is empty
    pub fn parse(value: &str) -> Result<Self, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err("Locator cannot be empty".to_string());
        }

        if value.starts_with("http") || value.starts_with("ftp") {
            Ok(Locator::Url(value.to_string()))
        } else {
            Ok(Locator::Path(PathBuf::from(value)))
        }
    }

    /// Whether the bytes must be fetched over the network
    pub fn is_remote(&self) -> bool {
        matches!(self, Locator::Url(_))
    }

    /// Whether the locator can be used without a base
    pub fn is_absolute(&self) -> bool {
        match self {
            Locator::Path(path) => path.is_absolute(),
            Locator::Url(_) => true,
        }
    }

    /// Resolve an import declared by the document at `self`
    ///
    /// Absolute paths and URLs are used as-is; relative paths are taken
    /// relative to the directory containing `self`.
    pub fn join(&self, import: &str) -> Result<Self, String> {
        let target = Self::parse(import)?;
        if target.is_absolute() {
            return Ok(target);
        }

        match self {
            Locator::Path(path) => {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                Ok(Locator::Path(base.join(import.trim())))
            }
            Locator::Url(url) => {
                let base = match url.rfind('/') {
                    Some(idx) if idx > url.find("//").map_or(0, |i| i + 1) => &url[..=idx],
                    _ => url.as_str(),
                };
                let separator = if base.ends_with('/') { "" } else { "/" };
                Ok(Locator::Url(format!("{}{}{}", base, separator, import.trim())))
            }
        }
    }

    /// File extension, lowercased
    pub fn extension(&self) -> Option<String> {
        let name = match self {
            Locator::Path(path) => path.file_name()?.to_str()?.to_string(),
            Locator::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                path.rsplit('/').next()?.to_string()
            }
        };
        name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Path(path) => write!(f, "{}", path.display()),
            Locator::Url(url) => write!(f, "{}", url),
        }
    }
}
