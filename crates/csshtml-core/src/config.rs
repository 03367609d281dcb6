use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Flavour of the emitted module, picked from the output file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Js,
    Ts,
}

impl OutputKind {
    /// `.ts` selects TypeScript; anything else is plain JavaScript.
    pub fn from_path(path: &Path) -> Self {
        if path.to_string_lossy().ends_with(".ts") {
            OutputKind::Ts
        } else {
            OutputKind::Js
        }
    }

    pub fn is_typed(self) -> bool {
        self == OutputKind::Ts
    }
}

/// What kind of export the module carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// One exported string constant.
    #[default]
    Single,
    /// One exported `<template>` element built from CSS and HTML.
    Template,
}

/// How content is embedded inside the generated template literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiteralEscape {
    /// Content is copied as-is. A backtick or `${` in the content ends up
    /// in the literal unchanged.
    #[default]
    Verbatim,
    /// Backslashes, backticks, `${` and carriage returns are escaped so the
    /// literal evaluates to the original content.
    TemplateLiteral,
}

/// Immutable settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Export name in [`Mode::Single`]. Template mode always exports `template`.
    pub export_name: String,
    pub output_kind: OutputKind,
    pub mode: Mode,
    /// Resolved `// language=` hint, if any.
    pub language_hint: Option<String>,
    pub escape: LiteralEscape,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            export_name: DEFAULT_EXPORT_NAME.to_string(),
            output_kind: OutputKind::Js,
            mode: Mode::Single,
            language_hint: None,
            escape: LiteralEscape::Verbatim,
        }
    }
}

/// Export name used when neither `--name` nor the defaults file set one.
pub const DEFAULT_EXPORT_NAME: &str = "content";

/// Milliseconds to wait before generating when no delay is configured.
pub const DEFAULT_DELAY_MS: u64 = 5;

/// Default project defaults file name.
pub const CONFIG_FILE_NAME: &str = ".csshtml-module.yaml";

/// Project-level defaults loaded from `.csshtml-module.yaml`.
///
/// Command-line flags always take precedence over these values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectDefaults {
    pub name: String,
    pub delay: u64,
    pub escape: LiteralEscape,
}

impl Default for ProjectDefaults {
    fn default() -> Self {
        Self {
            name: DEFAULT_EXPORT_NAME.to_string(),
            delay: DEFAULT_DELAY_MS,
            escape: LiteralEscape::Verbatim,
        }
    }
}

/// Load project defaults from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_defaults(path: &Path) -> Result<Option<ProjectDefaults>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadDefaults {
        path: path.to_path_buf(),
        source,
    })?;
    let defaults: ProjectDefaults =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::ParseDefaults {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(defaults))
}

/// Resolve the project defaults for a run.
///
/// A path named explicitly must exist. Without one, [`CONFIG_FILE_NAME`] in
/// the current directory is used when present, otherwise the built-in
/// defaults.
pub fn resolve_defaults(explicit: Option<&Path>) -> Result<ProjectDefaults, ConfigError> {
    match explicit {
        Some(path) => {
            load_defaults(path)?.ok_or_else(|| ConfigError::DefaultsNotFound(path.to_path_buf()))
        }
        None => Ok(load_defaults(Path::new(CONFIG_FILE_NAME))?.unwrap_or_default()),
    }
}

/// Generate the default project defaults file content.
pub fn default_config_content() -> &'static str {
    r#"# csshtml-module defaults; command-line flags override these values
name: content         # export name for single-file modules (some projects use `css`)
delay: 5              # milliseconds to wait before reading the inputs
escape: verbatim      # verbatim | template-literal
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_kind_from_path() {
        assert_eq!(OutputKind::from_path(Path::new("dist/styles.ts")), OutputKind::Ts);
        assert_eq!(OutputKind::from_path(Path::new("dist/styles.js")), OutputKind::Js);
        assert_eq!(OutputKind::from_path(Path::new("types.d.ts")), OutputKind::Ts);
        assert_eq!(OutputKind::from_path(Path::new("out.tsx")), OutputKind::Js);
        assert!(OutputKind::Ts.is_typed());
        assert!(!OutputKind::Js.is_typed());
    }

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert_eq!(config.export_name, "content");
        assert_eq!(config.mode, Mode::Single);
        assert_eq!(config.escape, LiteralEscape::Verbatim);
        assert!(config.language_hint.is_none());
    }

    #[test]
    fn test_parse_defaults_yaml() {
        let yaml = "name: css\ndelay: 20\nescape: template-literal\n";
        let defaults: ProjectDefaults = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(defaults.name, "css");
        assert_eq!(defaults.delay, 20);
        assert_eq!(defaults.escape, LiteralEscape::TemplateLiteral);
    }

    #[test]
    fn test_parse_minimal_defaults() {
        let defaults: ProjectDefaults = serde_yaml_ng::from_str("name: css\n").unwrap();
        assert_eq!(defaults.name, "css");
        assert_eq!(defaults.delay, DEFAULT_DELAY_MS);
        assert_eq!(defaults.escape, LiteralEscape::Verbatim);
    }

    #[test]
    fn test_default_config_content_parses() {
        let defaults: ProjectDefaults =
            serde_yaml_ng::from_str(default_config_content()).unwrap();
        assert_eq!(defaults, ProjectDefaults::default());
    }

    #[test]
    fn test_load_defaults_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_defaults(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_resolve_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = resolve_defaults(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::DefaultsNotFound(p) if p == path));
    }

    #[test]
    fn test_resolve_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("defaults.yaml");
        fs::write(&path, "name: css\n").unwrap();
        let defaults = resolve_defaults(Some(&path)).unwrap();
        assert_eq!(defaults.name, "css");
    }

    #[test]
    fn test_parse_error_message_names_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "delay: soon\n").unwrap();
        let err = load_defaults(&path).unwrap_err();
        assert_eq!(err.to_string(), format!("failed to parse config {}", path.display()));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_load_defaults_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "delay: soon\n").unwrap();
        let err = load_defaults(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseDefaults { .. }));
    }
}
