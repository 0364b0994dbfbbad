use serde::{Deserialize, Serialize};

use crate::fragment::{FragmentKind, Fragments};

/// External library references, kept in the order the user supplied them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Libraries {
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub scripts: Vec<String>,
}

/// Which list a library URL belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryKind {
    Style,
    Script,
}

impl LibraryKind {
    /// Classify by extension: `.css` is a style, `.js` a script
    pub fn of(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.ends_with(".css") {
            Some(Self::Style)
        } else if path.ends_with(".js") {
            Some(Self::Script)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot tell whether {0} is a stylesheet or a script, expected a .css or .js URL")]
pub struct UnknownLibrary(pub String);

impl Libraries {
    pub fn new(styles: Vec<String>, scripts: Vec<String>) -> Self {
        Self { styles, scripts }
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty() && self.scripts.is_empty()
    }

    pub fn list(&self, kind: LibraryKind) -> &[String] {
        match kind {
            LibraryKind::Style => &self.styles,
            LibraryKind::Script => &self.scripts,
        }
    }

    /// Append `url` to the list matching its extension; already present URLs are kept once
    ///
    /// # Errors
    ///
    /// Fails when the URL is neither a `.css` nor a `.js` file
    pub fn add(&mut self, url: &str) -> Result<LibraryKind, UnknownLibrary> {
        let url = url.trim();
        let kind = LibraryKind::of(url).ok_or_else(|| UnknownLibrary(url.to_string()))?;
        let list = match kind {
            LibraryKind::Style => &mut self.styles,
            LibraryKind::Script => &mut self.scripts,
        };
        if !list.iter().any(|existing| existing == url) {
            list.push(url.to_string());
        }
        Ok(kind)
    }

    /// Remove `url` from whichever list holds it
    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.styles.len() + self.scripts.len();
        self.styles.retain(|existing| existing != url);
        self.scripts.retain(|existing| existing != url);
        before != self.styles.len() + self.scripts.len()
    }

    /// Parse one URL per line, skipping blank lines
    pub fn parse_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Settled value of every fragment plus the library list.
///
/// Immutable once built; a newer snapshot replaces an older one wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettledSnapshot {
    fragments: Fragments,
    libraries: Libraries,
}

impl SettledSnapshot {
    pub fn new(fragments: Fragments, libraries: Libraries) -> Self {
        Self {
            fragments,
            libraries,
        }
    }

    pub fn fragments(&self) -> &Fragments {
        &self.fragments
    }

    pub fn fragment(&self, kind: FragmentKind) -> &str {
        self.fragments.get(kind)
    }

    pub fn libraries(&self) -> &Libraries {
        &self.libraries
    }
}
