//! Pretty-printing for editable fragments.
//!
//! Only the Script fragment has a formatter; asking for any other kind is a
//! transient error and leaves the text untouched.

use biome_formatter::IndentStyle;
use biome_js_formatter::{context::JsFormatOptions, format_node};
use biome_js_parser::{JsParserOptions, parse};
use biome_js_syntax::JsFileSource;
use log::debug;
use sandpen_core::FragmentKind;

#[cfg(test)]
mod tests;

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("Formatting {0} is not supported")]
    Unsupported(FragmentKind),
    #[error("Could not format code: {0} syntax error(s)")]
    Syntax(usize),
    #[error("Could not format code: {0}")]
    Printer(String),
}

/// Format `code` as the given fragment kind
///
/// # Errors
///
/// Fails for kinds without a formatter and for scripts that do not parse
pub fn format_fragment(kind: FragmentKind, code: &str) -> Result<String, FormatError> {
    match kind {
        FragmentKind::Script => format_js(code),
        FragmentKind::Markup | FragmentKind::Style => Err(FormatError::Unsupported(kind)),
    }
}

fn format_js(code: &str) -> Result<String, FormatError> {
    let source = JsFileSource::js_script();
    let parsed = parse(code, source, JsParserOptions::default());
    if parsed.has_errors() {
        let count = parsed.diagnostics().len();
        debug!("Not formatting script with {count} syntax error(s)");
        return Err(FormatError::Syntax(count));
    }

    let options = JsFormatOptions::new(source).with_indent_style(IndentStyle::Space);
    let formatted = format_node(options, &parsed.syntax())
        .map_err(|e| FormatError::Printer(e.to_string()))?;
    let printed = formatted
        .print()
        .map_err(|e| FormatError::Printer(e.to_string()))?;

    Ok(printed.into_code())
}
