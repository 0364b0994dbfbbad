use std::fmt;
use std::sync::Arc;

use crate::instrumentation::PAYLOAD;
use crate::snapshot::SettledSnapshot;

/// A complete, self-contained document ready to be loaded into the sandbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledDocument(Arc<str>);

impl AssembledDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AssembledDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssembledDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Assemble a runnable document from a settled snapshot.
///
/// The output is a pure function of the snapshot, laid out in a fixed order:
/// 1. style library links
/// 2. the style fragment in an inline `<style>` block
/// 3. the instrumentation payload, ahead of any user content
/// 4. the markup fragment
/// 5. script library tags, after the markup so they can query the DOM
/// 6. the script fragment as the last inline `<script>` block
///
/// Fragments are embedded verbatim. They run in the isolated context only, so
/// broken user code fails there and never here.
pub fn assemble(snapshot: &SettledSnapshot) -> AssembledDocument {
    let fragments = snapshot.fragments();
    let libraries = snapshot.libraries();

    let style_links = libraries
        .styles
        .iter()
        .map(|url| format!("<link rel=\"stylesheet\" href=\"{url}\">"))
        .collect::<Vec<_>>()
        .join("\n");
    let script_tags = libraries
        .scripts
        .iter()
        .map(|url| format!("<script src=\"{url}\"></script>"))
        .collect::<Vec<_>>()
        .join("\n");

    let document = format!(
        "<!DOCTYPE html>
<html>
  <head>
    <meta charset=\"utf-8\">
    {style_links}
    <style>{style}</style>
    <script>{PAYLOAD}</script>
  </head>
  <body>
    {markup}
    {script_tags}
    <script>{script}</script>
  </body>
</html>
",
        style = fragments.style,
        markup = fragments.markup,
        script = fragments.script,
    );

    AssembledDocument(document.into())
}
