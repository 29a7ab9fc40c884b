//! Built-in defaults loaded from the embedded `defaults.toml`.

use crate::error::{Result, ToolError};
use serde::Deserialize;
use std::path::PathBuf;

// Embed the TOML file directly in the binary at compile time
const DEFAULTS_TOML: &str = include_str!("../defaults.toml");

/// Defaults for both subcommands
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub clear: ClearSettings,
    pub count: CountSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClearSettings {
    /// Directory scanned for build logs
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountSettings {
    /// Root of the line-count walk
    pub root: PathBuf,
    /// Extensions of counted files, without the leading dot
    pub extensions: Vec<String>,
    /// Directory names never descended into
    pub exclude_dirs: Vec<String>,
}

impl Settings {
    /// Parse the embedded defaults
    pub fn load() -> Result<Self> {
        Self::from_toml(DEFAULTS_TOML)
    }

    fn from_toml(content: &str) -> Result<Self> {
        let mut settings: Settings = toml::from_str(content)
            .map_err(|e| ToolError::Settings(format!("failed to parse defaults: {e}")))?;

        for ext in &mut settings.count.extensions {
            // Accept ".cpp" as well as "cpp"
            if let Some(stripped) = ext.strip_prefix('.') {
                *ext = stripped.to_string();
            }
            if ext.is_empty() {
                return Err(ToolError::Settings(
                    "empty extension in count.extensions".to_string(),
                ));
            }
        }

        if settings.count.exclude_dirs.iter().any(|d| d.is_empty()) {
            return Err(ToolError::Settings(
                "empty name in count.exclude_dirs".to_string(),
            ));
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_defaults() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.clear.directory, PathBuf::from("build"));
        assert_eq!(settings.count.root, PathBuf::from("."));
        assert_eq!(settings.count.extensions, vec!["cpp", "h", "hpp", "txt"]);
        assert_eq!(
            settings.count.exclude_dirs,
            vec!["build", "cmake-build-debug", "cmake-build-release", "mimalloc"]
        );
    }

    #[test]
    fn test_leading_dot_is_stripped() {
        let settings = Settings::from_toml(
            r#"
            [clear]
            directory = "out"
            [count]
            root = "src"
            extensions = [".cpp", "h"]
            exclude_dirs = []
            "#,
        )
        .unwrap();
        assert_eq!(settings.count.extensions, vec!["cpp", "h"]);
    }

    #[test]
    fn test_rejects_empty_extension() {
        let err = Settings::from_toml(
            r#"
            [clear]
            directory = "out"
            [count]
            root = "."
            extensions = ["."]
            exclude_dirs = []
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("empty extension"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = Settings::from_toml("[clear\n").unwrap_err();
        assert!(matches!(err, ToolError::Settings(_)));
    }
}
