//! Terminal styling for command outcomes.

use console::Style;
use is_terminal::IsTerminal;
use std::fmt::Display;
use std::sync::LazyLock;

pub static THEME: LazyLock<Theme> = LazyLock::new(Theme::detect);

/// How a command, or one file of a command, ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Finished with some documents or files missing
    Partial,
    Failed,
}

impl Outcome {
    pub fn icon(self) -> &'static str {
        match self {
            Outcome::Done => "✓",
            Outcome::Partial => "⚠",
            Outcome::Failed => "✗",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    colors: bool,
    done: Style,
    partial: Style,
    failed: Style,
    pub header: Style,
    pub path: Style,
    pub number: Style,
}

impl Theme {
    /// Colors are on unless `NO_COLOR` is set or stdout is not a terminal.
    pub fn detect() -> Self {
        let colors = std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
        Self::with_colors(colors)
    }

    pub fn plain() -> Self {
        Self::with_colors(false)
    }

    fn with_colors(colors: bool) -> Self {
        Self {
            colors,
            done: Style::new().green().bright(),
            partial: Style::new().yellow().bright(),
            failed: Style::new().red().bright(),
            header: Style::new().cyan().bold(),
            path: Style::new().magenta(),
            number: Style::new().cyan(),
        }
    }

    /// An icon and message styled for the outcome
    pub fn outcome(&self, outcome: Outcome, text: &str) -> String {
        let style = match outcome {
            Outcome::Done => &self.done,
            Outcome::Partial => &self.partial,
            Outcome::Failed => &self.failed,
        };
        format!("{} {}", self.apply(style, outcome.icon()), self.apply(style, text))
    }

    pub fn apply<T: Display>(&self, style: &Style, text: T) -> String {
        if self.colors {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
