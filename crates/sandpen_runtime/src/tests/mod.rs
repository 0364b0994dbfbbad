//! Tests for the headless runtime
//!
//! Each test runs a script in a fresh isolate and decodes the captured wire
//! messages with the same decoder the host uses.
