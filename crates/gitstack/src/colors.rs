//! Semantic color theme for terminal output
//!
//! - `current` => green - the checked-out branch in the stack listing
//! - `warning` => yellow - warnings
//! - `fail` => red - errors

use std::io::IsTerminal;
use std::sync::LazyLock;

use owo_colors::Style;

/// Semantic color definitions for terminal output
pub struct SemanticColors {
    /// Green - the checked-out branch
    pub current: Style,
    /// Yellow - warnings
    pub warning: Style,
    /// Red - errors
    pub fail: Style,
}

impl Default for SemanticColors {
    fn default() -> Self {
        Self {
            current: Style::new().green().bold(),
            warning: Style::new().yellow(),
            fail: Style::new().red(),
        }
    }
}

/// Global default theme
pub static COLORS: LazyLock<SemanticColors> = LazyLock::new(SemanticColors::default);

/// Whether stdout should carry color codes
pub fn stdout_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Whether stderr should carry color codes
pub fn stderr_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal()
}
