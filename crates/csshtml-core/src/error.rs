use std::path::PathBuf;

use thiserror::Error;

/// Problems detected before any content is read or generated.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("an output file must be specified")]
    MissingOutput,

    #[error("output file must end with .ts or .js: {0}")]
    UnsupportedOutput(PathBuf),

    #[error("either --input or --template must be specified")]
    MissingInput,

    #[error("{0} does not exist or is not readable")]
    UnreadableInput(PathBuf),

    #[error("either a --css or --html file must be specified when using --template")]
    MissingTemplateSource,

    #[error("neither the --css nor the --html file exists or is readable")]
    UnreadableTemplateSource,

    #[error("config file {0} does not exist")]
    DefaultsNotFound(PathBuf),

    #[error("failed to read config {path}")]
    ReadDefaults {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}")]
    ParseDefaults {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("template render failed: {0}")]
    Render(#[from] minijinja::Error),
}
