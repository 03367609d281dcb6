pub mod config;
pub mod error;
pub mod escape;
pub mod generator;
pub mod loader;
pub mod validate;

pub use config::{GenerationConfig, LiteralEscape, Mode, OutputKind, ProjectDefaults};
pub use generator::{SourceContent, generate, merge_fragment, render_single, render_template};
pub use validate::{GenerationPlan, Options, Sources};
