//! Configuration for symcat.
//!
//! Loads config from:
//! 1. Global: ~/.config/symcat/config.toml (or $XDG_CONFIG_HOME/symcat/config.toml)
//! 2. Per-project: .symcat/config.toml (overrides global)
//!
//! Example config.toml:
//! ```toml
//! [rules]
//! invocation_member = "forward"
//! abstract_classes = ["Module"]
//!
//! [output]
//! format = "json"
//!
//! [[categories]]
//! name = "layers"
//! strategy = "classes"
//! call_annotations = true
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use symcat::{Category, RulesConfig};
use symcat_output::OutputConfig;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SymcatConfig {
    pub rules: RulesConfig,
    pub output: OutputConfig,
    /// Extra categories; a name matching a built-in replaces it.
    pub categories: Vec<Category>,
}

impl SymcatConfig {
    /// Load configuration for a project root.
    ///
    /// Unreadable or invalid files are skipped with a warning.
    pub fn load(root: &Path) -> Self {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::load_file(&global_path) {
                config = config.merge(global);
            }
        }

        let project_path = root.join(".symcat").join("config.toml");
        if let Some(project) = Self::load_file(&project_path) {
            config = config.merge(project);
        }

        config
    }

    fn global_config_path() -> Option<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .ok()
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(config_home.join("symcat").join("config.toml"))
    }

    fn load_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "loaded config");
                Some(config)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Field-wise merge; `other` wins. Categories are merged by name.
    pub fn merge(self, other: Self) -> Self {
        let mut categories = self.categories;
        for category in other.categories {
            match categories.iter_mut().find(|c| c.name == category.name) {
                Some(existing) => *existing = category,
                None => categories.push(category),
            }
        }
        Self {
            rules: self.rules.merge(other.rules),
            output: self.output.merge(other.output),
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use symcat::Strategy;
    use symcat_output::DefaultFormat;
    use tempfile::TempDir;

    fn write_project_config(dir: &TempDir, content: &str) {
        let config_dir = dir.path().join(".symcat");
        std::fs::create_dir_all(&config_dir).unwrap();
        let mut file = std::fs::File::create(config_dir.join("config.toml")).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = SymcatConfig::default();
        assert_eq!(config.rules.resolve(), symcat::ExtractRules::default());
        assert!(config.categories.is_empty());
    }

    #[test]
    fn test_project_config() {
        let dir = TempDir::new().unwrap();
        write_project_config(
            &dir,
            r#"
[rules]
invocation_member = "forward"

[output]
format = "json"

[[categories]]
name = "layers"
strategy = "classes"
call_annotations = true
"#,
        );

        let config = SymcatConfig::load_file(&dir.path().join(".symcat/config.toml")).unwrap();
        assert_eq!(config.rules.resolve().invocation_member, "forward");
        assert_eq!(config.output.format, Some(DefaultFormat::Json));
        assert_eq!(config.categories.len(), 1);
        assert_eq!(config.categories[0].strategy, Strategy::Classes);
    }

    #[test]
    fn test_invalid_config_is_ignored() {
        let dir = TempDir::new().unwrap();
        write_project_config(&dir, "[rules]\nunknown_key = 1\n");
        assert!(SymcatConfig::load_file(&dir.path().join(".symcat/config.toml")).is_none());
    }

    #[test]
    fn test_merge_project_overrides_global() {
        let global: SymcatConfig = toml::from_str(
            r#"
[rules]
root_type = "Object"
invocation_member = "call"

[[categories]]
name = "layers"
strategy = "functions"
"#,
        )
        .unwrap();
        let project: SymcatConfig = toml::from_str(
            r#"
[rules]
invocation_member = "forward"

[[categories]]
name = "layers"
strategy = "classes"

[[categories]]
name = "losses"
strategy = "functions"
"#,
        )
        .unwrap();

        let merged = global.merge(project);
        let rules = merged.rules.resolve();
        assert_eq!(rules.root_type, "Object");
        assert_eq!(rules.invocation_member, "forward");
        let names: Vec<_> = merged.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["layers", "losses"]);
        assert_eq!(merged.categories[0].strategy, Strategy::Classes);
    }
}
