//! TOML highlighting and terminal styling for jm.
//!
//! Styling is only applied when stdout is a terminal and `NO_COLOR` is unset, so piped output
//! such as `jm config > file.toml` stays plain.

#![warn(missing_docs)]

use std::{
    env,
    io::{self, IsTerminal},
    sync::LazyLock,
};

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Whether stdout accepts ANSI styling.
static COLOR: LazyLock<bool> =
    LazyLock::new(|| env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal());

/// True when styled output should be produced.
pub fn color_enabled() -> bool {
    *COLOR
}

/// Highlights TOML for terminal output.
pub struct Highlighter {
    /// Syntax definitions, including TOML from the two-face extras.
    syntax_set: SyntaxSet,
    /// Embedded color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Theme in use.
    theme: EmbeddedThemeName,
    /// Emit escapes at all.
    enabled: bool,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter that styles only when stdout is a terminal.
    pub fn new() -> Self {
        Self::with_color(color_enabled())
    }

    /// Creates a highlighter with styling forced on or off.
    pub fn with_color(enabled: bool) -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
            enabled,
        }
    }

    /// Highlights TOML content, or returns it unchanged when styling is off.
    pub fn highlight_toml(&self, content: &str) -> String {
        if !self.enabled {
            return content.to_string();
        }
        let syntax = self
            .syntax_set
            .find_syntax_by_extension("toml")
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, self.theme_set.get(self.theme));

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI escape codes.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Cyan text.
    pub const CYAN: &str = "\x1b[36m";
    /// Green text.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow text.
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim text.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in `codes` when `enabled`.
fn paint(enabled: bool, codes: &[&str], text: &str) -> String {
    if enabled {
        format!("{}{text}{}", codes.concat(), colors::RESET)
    } else {
        text.to_string()
    }
}

/// Bold cyan, for section headers.
pub fn header(text: &str) -> String {
    paint(color_enabled(), &[colors::BOLD, colors::CYAN], text)
}

/// Bold, for subheaders and column titles.
pub fn subheader(text: &str) -> String {
    paint(color_enabled(), &[colors::BOLD], text)
}

/// Dimmed, for secondary information.
pub fn dim(text: &str) -> String {
    paint(color_enabled(), &[colors::DIM], text)
}

/// Green, for matched items.
pub fn success(text: &str) -> String {
    paint(color_enabled(), &[colors::GREEN], text)
}

/// Yellow, for warnings.
pub fn warning(text: &str) -> String {
    paint(color_enabled(), &[colors::YELLOW], text)
}
