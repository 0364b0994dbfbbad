//! Wire contract between the sandbox and the host.
//!
//! A message is `{source, type, message}` where `source` must equal
//! [`SOURCE_TAG`], `type` is one of the [`LogKind`]s and `message` is the
//! ordered argument list. Arguments are decoded into the closed
//! [`DiagnosticArg`] set; anything outside it is rejected.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::instrumentation::UNSERIALIZABLE_KEY;

/// Fixed channel tag identifying bridge messages
pub const SOURCE_TAG: &str = "iframe-console";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Log,
    Warn,
    Error,
    Info,
    Debug,
}

impl LogKind {
    pub const ALL: [LogKind; 5] = [
        Self::Log,
        Self::Warn,
        Self::Error,
        Self::Info,
        Self::Debug,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Log => "log",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain shape an `Error` is converted to before it crosses the boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorShape {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// One decoded console argument
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticArg {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Structured(Value),
    Error(ErrorShape),
    /// The sandbox could not transmit the value (cycle, function, DOM node)
    Unserializable,
}

/// Why an inbound message was not turned into an event
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("message is not an object")]
    NotAnObject,
    #[error("message has no channel tag")]
    MissingTag,
    #[error("message tag \"{0}\" does not belong to the bridge")]
    ForeignTag(String),
    #[error("unknown diagnostic kind {0}")]
    UnknownKind(String),
    #[error("message arguments are not a list")]
    MalformedArgs,
}

/// A validated message, before it is timestamped
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    pub kind: LogKind,
    pub args: Vec<DiagnosticArg>,
}

/// Validate the channel tag and decode a raw inbound message.
///
/// # Errors
///
/// Returns a [`Rejection`] when the message is not a bridge message or does
/// not follow the wire contract. Callers are expected to ignore it.
pub fn decode(data: &Value) -> Result<DecodedMessage, Rejection> {
    let obj = data.as_object().ok_or(Rejection::NotAnObject)?;

    match obj.get("source") {
        Some(Value::String(tag)) if tag == SOURCE_TAG => {}
        Some(Value::String(tag)) => return Err(Rejection::ForeignTag(tag.clone())),
        Some(other) => return Err(Rejection::ForeignTag(other.to_string())),
        None => return Err(Rejection::MissingTag),
    }

    let kind = match obj.get("type") {
        Some(Value::String(s)) => {
            LogKind::parse(s).ok_or_else(|| Rejection::UnknownKind(s.clone()))?
        }
        Some(other) => return Err(Rejection::UnknownKind(other.to_string())),
        None => return Err(Rejection::UnknownKind("<missing>".into())),
    };

    let args = match obj.get("message") {
        Some(Value::Array(items)) => items.iter().map(DiagnosticArg::from_wire).collect(),
        // no argument list is an event without arguments
        Some(Value::Null) | None => Vec::new(),
        Some(_) => return Err(Rejection::MalformedArgs),
    };

    Ok(DecodedMessage { kind, args })
}

/// Build the raw message the payload would post for `kind` and `args`
pub fn encode(kind: LogKind, args: &[DiagnosticArg]) -> Value {
    serde_json::json!({
        "source": SOURCE_TAG,
        "type": kind.as_str(),
        "message": args.iter().map(DiagnosticArg::to_wire).collect::<Vec<_>>(),
    })
}

fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    matches!(obj.get(key), Some(Value::Bool(true)))
}

impl DiagnosticArg {
    pub fn from_wire(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.clone()),
            Value::String(s) => Self::Text(s.clone()),
            Value::Object(obj) if flag(obj, "__isError") || flag(obj, "isError") => {
                let message = match obj.get("message") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                };
                let stack = match obj.get("stack") {
                    Some(Value::String(s)) => Some(s.clone()),
                    _ => None,
                };
                Self::Error(ErrorShape { message, stack })
            }
            Value::Object(obj) if flag(obj, UNSERIALIZABLE_KEY) => {
                Self::Unserializable
            }
            Value::Array(_) | Value::Object(_) => Self::Structured(value.clone()),
        }
    }

    pub fn to_wire(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::Text(s) => Value::String(s.clone()),
            Self::Structured(v) => v.clone(),
            Self::Error(e) => serde_json::json!({
                "__isError": true,
                "message": e.message,
                "stack": e.stack,
            }),
            Self::Unserializable => {
                let mut marker = Map::new();
                marker.insert(UNSERIALIZABLE_KEY.to_string(), Value::Bool(true));
                Value::Object(marker)
            }
        }
    }
}
