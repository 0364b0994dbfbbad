//! Project files: the fragments, libraries and appearance saved together.
//!
//! Export writes every field. Import is lenient: each field is applied only
//! when it has the expected type, and unknown or malformed fields are
//! skipped rather than rejecting the whole file.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ImportError;
use crate::fragment::Fragments;
use crate::snapshot::Libraries;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    #[serde(rename = "vs-dark")]
    Dark,
    #[serde(rename = "light")]
    Light,
}

/// Editor appearance; persisted but not interpreted by the core
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub layout: Layout,
    pub theme: Theme,
}

/// On-disk project shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub html: String,
    pub css: String,
    pub js: String,
    pub css_libraries: Vec<String>,
    pub js_libraries: Vec<String>,
    pub layout: Layout,
    pub theme: Theme,
}

impl Project {
    pub fn new(fragments: &Fragments, libraries: &Libraries, appearance: Appearance) -> Self {
        Self {
            html: fragments.markup.clone(),
            css: fragments.style.clone(),
            js: fragments.script.clone(),
            css_libraries: libraries.styles.clone(),
            js_libraries: libraries.scripts.clone(),
            layout: appearance.layout,
            theme: appearance.theme,
        }
    }

    pub fn fragments(&self) -> Fragments {
        Fragments::new(self.html.clone(), self.css.clone(), self.js.clone())
    }

    pub fn libraries(&self) -> Libraries {
        Libraries::new(self.css_libraries.clone(), self.js_libraries.clone())
    }

    pub fn appearance(&self) -> Appearance {
        Appearance {
            layout: self.layout,
            theme: self.theme,
        }
    }

    /// Pretty-printed JSON export
    ///
    /// # Errors
    ///
    /// Only fails if serialization itself fails, which plain strings never do
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a project file, keeping only the well-typed fields
    ///
    /// # Errors
    ///
    /// Fails when the text is not JSON or not a JSON object
    pub fn import(text: &str) -> Result<ProjectPatch, ImportError> {
        let value: Value = serde_json::from_str(text)?;
        ProjectPatch::from_value(&value)
    }

    /// Apply an imported patch on top of this project
    pub fn apply(&mut self, patch: ProjectPatch) {
        if let Some(html) = patch.html {
            self.html = html;
        }
        if let Some(css) = patch.css {
            self.css = css;
        }
        if let Some(js) = patch.js {
            self.js = js;
        }
        if let Some(libs) = patch.css_libraries {
            self.css_libraries = libs;
        }
        if let Some(libs) = patch.js_libraries {
            self.js_libraries = libs;
        }
        if let Some(layout) = patch.layout {
            self.layout = layout;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
    }
}

/// Fields of an imported project that passed validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub html: Option<String>,
    pub css: Option<String>,
    pub js: Option<String>,
    pub css_libraries: Option<Vec<String>>,
    pub js_libraries: Option<Vec<String>>,
    pub layout: Option<Layout>,
    pub theme: Option<Theme>,
}

impl ProjectPatch {
    /// # Errors
    ///
    /// Fails when `value` is not a JSON object
    pub fn from_value(value: &Value) -> Result<Self, ImportError> {
        let obj = value.as_object().ok_or(ImportError::NotAnObject)?;

        let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
        let urls = |key: &str| {
            obj.get(key).and_then(Value::as_array).map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
        };
        let parsed = |key: &str| obj.get(key).cloned();

        Ok(Self {
            html: text("html"),
            css: text("css"),
            js: text("js"),
            css_libraries: urls("cssLibraries"),
            js_libraries: urls("jsLibraries"),
            layout: parsed("layout").and_then(|v| serde_json::from_value(v).ok()),
            theme: parsed("theme").and_then(|v| serde_json::from_value(v).ok()),
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
