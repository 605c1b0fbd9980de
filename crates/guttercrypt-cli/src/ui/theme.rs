//! Theme definitions for colors, symbols, and badges.

use owo_colors::{OwoColorize, Style};

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
    Cat,
}

impl Badge {
    /// Badge text for terminals without unicode.
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Err => "[ERR]",
            Self::Cat => "[=^.^=]",
        }
    }

    /// Badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        if !unicode {
            return self.text();
        }
        match self {
            Self::Ok => "\u{1F510}",           // 🔐
            Self::Warn => "\u{26A0}\u{FE0F} ", // ⚠️
            Self::Err => "\u{274C}",           // ❌
            Self::Cat => "\u{1F431}",          // 🐱
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::neon(),
            Self::Warn => styles::gold(),
            Self::Err => styles::skull(),
            Self::Cat => styles::pink(),
        }
    }
}

/// KatBot palette.
pub mod styles {
    use owo_colors::Style;

    pub fn pink() -> Style {
        Style::new().truecolor(0xFF, 0x69, 0xB4)
    }

    pub fn neon() -> Style {
        Style::new().truecolor(0x39, 0xFF, 0x14)
    }

    pub fn skull() -> Style {
        Style::new().truecolor(0xFF, 0x44, 0x44)
    }

    pub fn gold() -> Style {
        Style::new().truecolor(0xFF, 0xD7, 0x00)
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }
}

/// Apply `style` when color is enabled.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

/// Spinner frames.
pub fn spinner_frames(unicode: bool) -> &'static [&'static str] {
    if unicode {
        &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""]
    } else {
        &["|", "/", "-", "\\", ""]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_display_ascii() {
        assert_eq!(Badge::Ok.display(false), "[OK]");
        assert_eq!(Badge::Cat.display(false), "[=^.^=]");
    }

    #[test]
    fn test_styled_without_color_is_plain() {
        assert_eq!(styled("meow", styles::pink(), false), "meow");
    }

    #[test]
    fn test_styled_with_color_wraps_text() {
        let out = styled("meow", styles::pink(), true);
        assert!(out.contains("meow"));
        assert!(out.starts_with("\x1b["));
    }
}
