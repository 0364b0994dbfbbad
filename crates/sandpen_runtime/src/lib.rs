//! # sandpen runtime
//!
//! Runs a Script fragment without a browser. A bare `deno_core` isolate gets a
//! minimal `window` (no DOM), the same instrumentation payload the preview
//! document carries, and then the user script. Everything the payload posts
//! to `parent` is collected as raw wire messages for the host to decode.
//!
//! ```rust,no_run
//! use sandpen_runtime::{RunOptions, run_script};
//!
//! # async fn example() -> Result<(), sandpen_runtime::RuntimeError> {
//! let run = run_script("console.log('hi')", &RunOptions::default()).await?;
//! for message in &run.messages {
//!     println!("{message}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Markup and external libraries are not available here; scripts that touch
//! the DOM fail with an uncaught error that is reported like any other.

mod error;
pub mod ops;
mod watchdog;

#[cfg(test)]
mod tests;

use deno_core::{JsRuntime, PollEventLoopOptions, RuntimeOptions};
use log::{debug, warn};
use sandpen_core::instrumentation::PAYLOAD;
use sandpen_core::protocol::{DiagnosticArg, ErrorShape, LogKind, encode};
use serde_json::Value;
use std::time::Duration;

pub use error::RuntimeError;
pub use ops::Outbox;

use crate::watchdog::Watchdog;

const BOOTSTRAP: &str = include_str!("bootstrap.js");

/// Prefix the payload puts in front of a rejection reason
const REJECTION_PREFIX: &str = "Unhandled Promise Rejection:";

deno_core::extension!(
    sandpen_bridge,
    ops = [ops::op_bridge_post],
    options = {
        outbox: Outbox,
    },
    state = |state, options| {
        state.put(options.outbox);
    },
);

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Wall-clock limit for the script and everything it schedules
    pub timeout: Duration,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

/// Outcome of one headless run
#[derive(Debug, Clone, Default)]
pub struct HeadlessRun {
    /// Wire messages in posting order
    pub messages: Vec<Value>,
    /// The run was cut short by [`RunOptions::timeout`]
    pub timed_out: bool,
}

/// Execute `script` in a fresh isolate and collect what it logs.
///
/// Uncaught errors and unhandled rejections become `error` messages, the way
/// they would inside the preview.
///
/// # Errors
///
/// Only fails if the runtime cannot be prepared; user code never makes this fail
pub async fn run_script(script: &str, options: &RunOptions) -> Result<HeadlessRun, RuntimeError> {
    let outbox = Outbox::default();
    let mut runtime = JsRuntime::new(RuntimeOptions {
        extensions: vec![sandpen_bridge::init(outbox.clone())],
        ..Default::default()
    });

    runtime
        .execute_script("ext:sandpen/bootstrap.js", BOOTSTRAP)
        .map_err(|e| RuntimeError::Bootstrap(e.to_string()))?;
    runtime
        .execute_script("ext:sandpen/instrumentation.js", PAYLOAD)
        .map_err(|e| RuntimeError::Bootstrap(e.to_string()))?;

    let watchdog = Watchdog::arm(runtime.v8_isolate().thread_safe_handle(), options.timeout);

    if let Err(e) = runtime.execute_script("sandpen:script.js", script.to_string()) {
        if watchdog.fired() {
            warn!("Script terminated after {:?}", options.timeout);
            return Ok(HeadlessRun {
                messages: outbox.take(),
                timed_out: true,
            });
        }
        report_uncaught(&mut runtime, &e.to_string())?;
    }

    let event_loop = runtime.run_event_loop(PollEventLoopOptions::default());
    let timed_out = match tokio::time::timeout(options.timeout, event_loop).await {
        Ok(Ok(())) => watchdog.fired(),
        Ok(Err(e)) if watchdog.fired() => {
            debug!("Event loop terminated: {e}");
            true
        }
        Ok(Err(e)) => {
            outbox.push(event_loop_error(&e.to_string()));
            false
        }
        Err(_) => true,
    };
    if timed_out {
        warn!("Script still running after {:?}, stopped", options.timeout);
    }

    Ok(HeadlessRun {
        messages: outbox.take(),
        timed_out,
    })
}

/// Whether an uncaught exception report comes from a rejected promise
fn is_rejection(report: &str) -> bool {
    report
        .strip_prefix("Uncaught ")
        .unwrap_or(report)
        .starts_with("(in promise)")
}

/// Split an uncaught exception report into the message and the stack
fn split_exception(report: &str) -> (String, String) {
    let report = report.strip_prefix("Uncaught ").unwrap_or(report);
    let report = report
        .strip_prefix("(in promise) ")
        .unwrap_or(report)
        .trim_end();
    let first_line = report.lines().next().unwrap_or_default();
    let message = first_line
        .split_once(": ")
        .map_or(first_line, |(_, message)| message);
    (message.to_string(), report.to_string())
}

/// Hand an uncaught exception to the payload's `error` listener
fn report_uncaught(runtime: &mut JsRuntime, report: &str) -> Result<(), RuntimeError> {
    let (message, stack) = split_exception(report);
    debug!("Uncaught exception in script: {message}");

    let message = serde_json::to_string(&message).map_err(|e| RuntimeError::Report(e.to_string()))?;
    let stack = serde_json::to_string(&stack).map_err(|e| RuntimeError::Report(e.to_string()))?;
    let dispatch = format!(
        "globalThis.__sandpenDispatch('error', {{ error: globalThis.__sandpenError({message}, {stack}), message: {message} }});"
    );

    runtime
        .execute_script("ext:sandpen/report.js", dispatch)
        .map_err(|e| RuntimeError::Report(e.to_string()))?;
    Ok(())
}

/// The message the payload would send for an error that stopped the event
/// loop: its `unhandledrejection` form for a rejected promise, its `error`
/// form for anything thrown from a scheduled callback
fn event_loop_error(report: &str) -> Value {
    let (message, stack) = split_exception(report);
    let error = DiagnosticArg::Error(ErrorShape {
        message,
        stack: Some(stack),
    });
    if is_rejection(report) {
        encode(
            LogKind::Error,
            &[DiagnosticArg::Text(REJECTION_PREFIX.to_string()), error],
        )
    } else {
        debug!("Uncaught exception in scheduled callback");
        encode(LogKind::Error, &[error])
    }
}
