pub mod check;
pub mod classify;
pub mod rules;

use anyhow::Context;
use core_classifier::Registry;
use std::fs;
use std::path::Path;

/// Built-in registry, or the table at `path` when given
pub fn load_registry(path: Option<&Path>) -> anyhow::Result<Registry> {
    tracing::debug!(
        source = %path.map_or_else(|| "built-in".into(), |p| p.display().to_string()),
        "Loading rule table"
    );
    match path {
        None => Registry::builtin().context("Built-in rule table is invalid"),
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read rule table {}", path.display()))?;
            Registry::from_toml(&content)
                .with_context(|| format!("Invalid rule table {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtin_registry() {
        let registry = load_registry(None).unwrap();
        assert_eq!(registry.rule_count(), 21);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_registry(Some(Path::new("/nonexistent/rules.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rules.toml"));
    }

    #[test]
    fn test_load_invalid_table_keeps_cause() {
        let path = std::env::temp_dir().join(format!("procgate-empty-{}.toml", std::process::id()));
        fs::write(&path, "").unwrap();

        let err = load_registry(Some(&path)).unwrap_err();
        fs::remove_file(&path).unwrap();

        assert!(format!("{err:#}").contains("at least one stage"));
    }
}
