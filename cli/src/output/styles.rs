//! Terminal stylesheet.
//!
//! All color decisions live here so commands never build `Style` values
//! inline. `Styles::default()` is the plain (no-color) variant;
//! [`Styles::colored`] is used when stdout is a color-capable terminal.

use owo_colors::Style;

/// Styles for `agora` terminal output.
#[derive(Default, Clone)]
pub struct Styles {
    /// Passing checks and completed steps.
    pub success: Style,
    /// Degradations that do not stop an installation.
    pub warning: Style,
    /// Failing checks.
    pub error: Style,
    /// Secondary text: keys, not-yet-answering endpoints.
    pub dim: Style,
    /// Section titles.
    pub header: Style,
    /// Service URLs in the installation summary.
    pub url: Style,
}

impl Styles {
    /// Stylesheet for color-capable terminals.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            dim: Style::new().dimmed(),
            header: Style::new().bold().cyan(),
            url: Style::new().cyan().underline(),
        }
    }
}
