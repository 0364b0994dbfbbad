use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three editable source slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    Markup,
    Style,
    Script,
}

impl FragmentKind {
    pub const ALL: [FragmentKind; 3] = [Self::Markup, Self::Style, Self::Script];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markup => "markup",
            Self::Style => "style",
            Self::Script => "script",
        }
    }

    /// File name used when the fragment is exported on its own
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Markup => "index.html",
            Self::Style => "style.css",
            Self::Script => "script.js",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fragment \"{0}\", expected one of markup, style, script")]
pub struct UnknownFragment(pub String);

impl FromStr for FragmentKind {
    type Err = UnknownFragment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markup" | "html" => Ok(Self::Markup),
            "style" | "css" => Ok(Self::Style),
            "script" | "js" | "javascript" => Ok(Self::Script),
            _ => Err(UnknownFragment(s.to_string())),
        }
    }
}

/// Raw text of all three fragments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragments {
    pub markup: String,
    pub style: String,
    pub script: String,
}

impl Fragments {
    pub fn new(
        markup: impl Into<String>,
        style: impl Into<String>,
        script: impl Into<String>,
    ) -> Self {
        Self {
            markup: markup.into(),
            style: style.into(),
            script: script.into(),
        }
    }

    pub fn get(&self, kind: FragmentKind) -> &str {
        match kind {
            FragmentKind::Markup => &self.markup,
            FragmentKind::Style => &self.style,
            FragmentKind::Script => &self.script,
        }
    }

    pub fn set(&mut self, kind: FragmentKind, text: String) {
        match kind {
            FragmentKind::Markup => self.markup = text,
            FragmentKind::Style => self.style = text,
            FragmentKind::Script => self.script = text,
        }
    }
}
