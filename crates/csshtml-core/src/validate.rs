use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{GenerationConfig, LiteralEscape, Mode, OutputKind, ProjectDefaults};
use crate::error::{ConfigError, GenerateError};
use crate::generator::{self, SourceContent};
use crate::loader;

/// Raw, unvalidated options as collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub name: Option<String>,
    pub template: bool,
    pub html: Option<PathBuf>,
    pub css: Option<PathBuf>,
    pub language: Option<String>,
    pub delay: Option<u64>,
    pub escape: Option<LiteralEscape>,
}

/// Files feeding a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sources {
    Single {
        input: PathBuf,
    },
    Template {
        css: Option<PathBuf>,
        html: Option<PathBuf>,
    },
}

/// A validated generation run: everything needed to load, render and write.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub config: GenerationConfig,
    pub sources: Sources,
    pub output: PathBuf,
    pub delay: Duration,
}

impl GenerationPlan {
    /// Read every referenced file. Unreadable template sources load as empty.
    pub fn load(&self) -> SourceContent {
        match &self.sources {
            Sources::Single { input } => SourceContent::Single {
                text: loader::load(Some(input)),
            },
            Sources::Template { css, html } => SourceContent::Template {
                css: loader::load(css.as_deref()),
                html: loader::load(html.as_deref()),
            },
        }
    }

    /// Load the sources and render the module text.
    pub fn render(&self) -> Result<String, GenerateError> {
        generator::generate(&self.config, &self.load())
    }
}

/// Check `options` and turn them into a [`GenerationPlan`].
///
/// Nothing is read or written when this fails. Flags win over `defaults`.
pub fn plan(options: Options, defaults: &ProjectDefaults) -> Result<GenerationPlan, ConfigError> {
    check_output(options.output.as_deref())?;
    let output = options.output.ok_or(ConfigError::MissingOutput)?;

    let (mode, sources) = if options.template {
        if options.css.is_none() && options.html.is_none() {
            return Err(ConfigError::MissingTemplateSource);
        }
        let any_readable = [options.css.as_deref(), options.html.as_deref()]
            .into_iter()
            .flatten()
            .any(loader::is_readable);
        if !any_readable {
            return Err(ConfigError::UnreadableTemplateSource);
        }
        let sources = Sources::Template {
            css: options.css,
            html: options.html,
        };
        (Mode::Template, sources)
    } else {
        let input = options.input.ok_or(ConfigError::MissingInput)?;
        if !loader::is_readable(&input) {
            return Err(ConfigError::UnreadableInput(input));
        }
        (Mode::Single, Sources::Single { input })
    };

    // Extension sniffing only applies to single-file input.
    let sniffed = match &sources {
        Sources::Single { input } => Some(input.as_path()),
        Sources::Template { .. } => None,
    };
    let language_hint = generator::resolve_language_hint(options.language.as_deref(), sniffed);

    let config = GenerationConfig {
        export_name: options.name.unwrap_or_else(|| defaults.name.clone()),
        output_kind: OutputKind::from_path(&output),
        mode,
        language_hint,
        escape: options.escape.unwrap_or(defaults.escape),
    };
    log::debug!("resolved {config:?}");

    Ok(GenerationPlan {
        config,
        sources,
        output,
        delay: Duration::from_millis(options.delay.unwrap_or(defaults.delay)),
    })
}

/// Check that an output path is present and names a `.ts` or `.js` file.
///
/// Touches no files, so callers can run it before loading anything else.
pub fn check_output(output: Option<&Path>) -> Result<(), ConfigError> {
    let output = output.ok_or(ConfigError::MissingOutput)?;
    let name = output.to_string_lossy();
    if name.ends_with(".ts") || name.ends_with(".js") {
        Ok(())
    } else {
        Err(ConfigError::UnsupportedOutput(output.to_path_buf()))
    }
}
