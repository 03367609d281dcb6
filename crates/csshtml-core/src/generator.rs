use std::path::Path;

use minijinja::{AutoEscape, Environment, context};

use crate::config::GenerationConfig;
use crate::error::GenerateError;
use crate::escape;

/// Loaded content for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceContent {
    Single { text: String },
    Template { css: String, html: String },
}

/// Render the module text for `source`, dispatching on its shape.
///
/// The configured [`Mode`](crate::config::Mode) decides which
/// [`SourceContent`] the caller loads; this function follows the content.
pub fn generate(config: &GenerationConfig, source: &SourceContent) -> Result<String, GenerateError> {
    match source {
        SourceContent::Single { text } => render_single(config, text),
        SourceContent::Template { css, html } => render_template(config, css, html),
    }
}

/// Emit a module exporting `content` as a string constant named
/// `config.export_name`.
pub fn render_single(config: &GenerationConfig, content: &str) -> Result<String, GenerateError> {
    let env = environment()?;
    let tmpl = env.get_template("single.j2")?;
    let rendered = tmpl.render(context! {
        hint => config.language_hint.as_deref(),
        name => &config.export_name,
        typed => config.output_kind.is_typed(),
        content => escape::embed(content, config.escape),
    })?;
    Ok(rendered)
}

/// Emit a module exporting a `template` element whose markup is the merged
/// CSS and HTML. The configured export name is ignored.
pub fn render_template(
    config: &GenerationConfig,
    css: &str,
    html: &str,
) -> Result<String, GenerateError> {
    let fragment = merge_fragment(css, html);
    let env = environment()?;
    let tmpl = env.get_template("template.j2")?;
    let rendered = tmpl.render(context! {
        hint => config.language_hint.as_deref(),
        typed => config.output_kind.is_typed(),
        fragment => escape::embed(&fragment, config.escape),
    })?;
    Ok(rendered)
}

/// Wrap `css` in a `<style>` element in front of `html`. Empty CSS produces
/// no style element at all.
pub fn merge_fragment(css: &str, html: &str) -> String {
    if css.is_empty() {
        html.to_string()
    } else {
        format!("<style>{css}</style>{html}")
    }
}

/// Pick the `// language=` hint: an explicit hint wins over the input file's
/// extension. `None` means the hint line is left out.
pub fn resolve_language_hint(explicit: Option<&str>, input: Option<&Path>) -> Option<String> {
    if let Some(hint) = explicit.filter(|h| !h.is_empty()) {
        return Some(hint.to_string());
    }
    input
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(String::from)
}

fn environment() -> Result<Environment<'static>, GenerateError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template("single.j2", include_str!("../templates/single.j2"))?;
    env.add_template("template.j2", include_str!("../templates/template.j2"))?;
    Ok(env)
}
