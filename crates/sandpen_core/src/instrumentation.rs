//! Console interceptor injected into every assembled document.
//!
//! The script wraps `console.{log,warn,error,info,debug}` so the original call
//! still runs, then posts a [`crate::protocol`] message to `window.parent`
//! with target origin `'*'`. Uncaught errors and unhandled rejections are
//! forwarded as `error` messages. It has no dependencies and runs before any
//! user content.

pub use crate::protocol::SOURCE_TAG;

/// The interceptor source, embedded verbatim as an inline script block
pub const PAYLOAD: &str = include_str!("../js/instrumentation.js");

/// Marker key the payload uses when an argument could not be transmitted
pub const UNSERIALIZABLE_KEY: &str = "__unserializable";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::LogKind;

    #[test]
    fn test_payload_carries_channel_tag() {
        assert!(PAYLOAD.contains(&format!("'{SOURCE_TAG}'")));
    }

    #[test]
    fn test_payload_wraps_every_kind() {
        for kind in LogKind::ALL {
            assert!(
                PAYLOAD.contains(&format!("'{}'", kind.as_str())),
                "payload should wrap console.{kind}"
            );
        }
    }

    #[test]
    fn test_payload_has_no_closing_script_tag() {
        assert!(!PAYLOAD.to_ascii_lowercase().contains("</script"));
    }
}
