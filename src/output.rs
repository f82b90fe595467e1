//! # Output Configuration
//!
//! Controls how nix-apply prints its own status lines. Output from git and
//! the deployment tools is never touched; it goes straight to the terminal.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals
//!
//! ## Usage
//!
//! ```rust
//! use nix_apply::output::{status_line, OutputConfig};
//!
//! let config = OutputConfig::from_env_and_flag("never");
//! let line = status_line(&config, "📦", "[COMMIT]", "Committed changes");
//! assert_eq!(line, "[COMMIT] Committed changes");
//! ```

use console::style;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from the process environment and the
    /// value of the `--color` flag (`always`, `never`, or `auto`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        Self::from_flag_with(color_flag, |name| std::env::var(name).ok(), || {
            console::Term::stderr().features().colors_supported()
        })
    }

    /// Same as [`OutputConfig::from_env_and_flag`] with the environment
    /// lookup and terminal detection supplied by the caller.
    ///
    /// In auto mode, colors are disabled if:
    /// - `NO_COLOR` is set (any value, including empty)
    /// - `CLICOLOR=0` is set
    /// - `TERM=dumb` is set
    /// - stderr is not a color-capable TTY (unless `CLICOLOR_FORCE=1`)
    pub fn from_flag_with<F, T>(color_flag: &str, lookup: F, terminal_supports_color: T) -> Self
    where
        F: Fn(&str) -> Option<String>,
        T: FnOnce() -> bool,
    {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => detect_color_support(lookup, terminal_supports_color),
        };

        Self { use_color }
    }
}

fn detect_color_support<F, T>(lookup: F, terminal_supports_color: T) -> bool
where
    F: Fn(&str) -> Option<String>,
    T: FnOnce() -> bool,
{
    if lookup("NO_COLOR").is_some() {
        return false;
    }

    if lookup("CLICOLOR").is_some_and(|v| v == "0") {
        return false;
    }

    if lookup("CLICOLOR_FORCE").is_some_and(|v| v != "0" && !v.is_empty()) {
        return true;
    }

    if lookup("TERM").is_some_and(|v| v == "dumb") {
        return false;
    }

    terminal_supports_color()
}

/// Returns the emoji when colors are enabled, otherwise the plain tag.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Format a status line: a marker followed by a message, bold when colors
/// are on.
pub fn status_line(config: &OutputConfig, emoji_str: &str, plain: &str, message: &str) -> String {
    let marker = emoji(config, emoji_str, plain);
    if config.use_color {
        format!("{} {}", marker, style(message).bold().force_styling(true))
    } else {
        format!("{} {}", marker, message)
    }
}
