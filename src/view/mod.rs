//! Text renderers for every widget.
//!
//! Each renderer is a pure function of the widget's state and returns the
//! lines to print. Nothing here reaches back into a component.

pub mod animation;
pub mod calendar;
pub mod email;
pub mod greeting;
pub mod quote;
pub mod weather;

use crate::settings::Theme;

/// Local display state of a fetch-driven widget
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState<T> {
    #[default]
    Loading,
    Error(String),
    Empty,
    Populated(T),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// The populated value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            ViewState::Populated(value) => Some(value),
            _ => None,
        }
    }
}

/// ANSI styling derived from the current theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub heading: &'static str,
    pub accent: &'static str,
    pub muted: &'static str,
    pub error: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                heading: "\x1b[1;34m",
                accent: "\x1b[35m",
                muted: "\x1b[2m",
                error: "\x1b[31m",
                reset: "\x1b[0m",
            },
            Theme::Dark => Self {
                heading: "\x1b[1;33m",
                accent: "\x1b[36m",
                muted: "\x1b[90m",
                error: "\x1b[91m",
                reset: "\x1b[0m",
            },
        }
    }

    /// No escape codes at all, for logs and tests
    pub fn plain() -> Self {
        Self {
            heading: "",
            accent: "",
            muted: "",
            error: "",
            reset: "",
        }
    }

    pub fn heading(&self, text: &str) -> String {
        format!("{}{}{}", self.heading, text, self.reset)
    }

    pub fn accent(&self, text: &str) -> String {
        format!("{}{}{}", self.accent, text, self.reset)
    }

    pub fn muted(&self, text: &str) -> String {
        format!("{}{}{}", self.muted, text, self.reset)
    }

    pub fn error(&self, text: &str) -> String {
        format!("{}{}{}", self.error, text, self.reset)
    }
}
