use spinoff::{Color, Spinner as Spinoff, spinners};

use crate::utils::{
    CHECK, MARK,
    styles::{fmt_green, fmt_red},
};

/// Terminal spinner for slow network calls
pub(crate) struct Spinner {
    inner: Spinoff,
}

impl Spinner {
    pub(crate) fn new(text: impl Into<String>) -> Self {
        let text: String = text.into();
        Self {
            inner: Spinoff::new(spinners::Dots, text, Color::Cyan),
        }
    }

    fn stop_and_persist(mut self, symbol: &str, text: impl Into<String>) {
        let text: String = text.into();
        self.inner.stop_and_persist(symbol, &text);
    }

    pub(crate) fn stop_success(self, text: impl Into<String>) {
        self.stop_and_persist(&fmt_green(CHECK), text);
    }

    pub(crate) fn stop_error(self, text: impl Into<String>) {
        self.stop_and_persist(&fmt_red(MARK), text);
    }
}
