use std::borrow::Cow;

use crate::config::LiteralEscape;

/// Prepare `content` for embedding between backticks.
pub fn embed(content: &str, escape: LiteralEscape) -> Cow<'_, str> {
    match escape {
        LiteralEscape::Verbatim => Cow::Borrowed(content),
        LiteralEscape::TemplateLiteral => escape_template_literal(content),
    }
}

/// Escape `\`, `` ` ``, `${` and `\r` so a JS template literal evaluates to
/// `content`. A raw CR would be normalised to LF by the JS parser.
pub fn escape_template_literal(content: &str) -> Cow<'_, str> {
    if !content.contains(['\\', '`', '\r']) && !content.contains("${") {
        return Cow::Borrowed(content);
    }

    let mut out = String::with_capacity(content.len() + 8);
    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '\r' => out.push_str("\\r"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
