use std::io;

use termion::{clear, color, cursor, style};

/// Escape sequences used by the report. The plain palette is all empty
/// strings, so rendering code never has to branch on color support.
#[derive(Debug, Clone, Default)]
pub struct Palette {
    pub yellow: String,
    pub green: String,
    pub blue: String,
    pub red: String,
    pub bold: String,
    pub reset: String,
}

impl Palette {
    pub fn ansi() -> Self {
        Palette {
            yellow: color::Fg(color::LightYellow).to_string(),
            green: color::Fg(color::LightGreen).to_string(),
            blue: color::Fg(color::LightBlue).to_string(),
            red: color::Fg(color::LightRed).to_string(),
            bold: style::Bold.to_string(),
            reset: style::Reset.to_string(),
        }
    }

    pub fn plain() -> Self {
        Palette::default()
    }

    /// Colors only when stdout is a terminal.
    pub fn for_stdout(plain: bool) -> Self {
        if plain || !termion::is_tty(&io::stdout()) {
            Palette::plain()
        } else {
            Palette::ansi()
        }
    }

    pub fn is_plain(&self) -> bool {
        self.reset.is_empty()
    }

    /// Full-screen clear and cursor home, or nothing for the plain palette.
    pub fn clear_screen(&self) -> String {
        if self.is_plain() {
            String::new()
        } else {
            format!("{}{}", clear::All, cursor::Goto(1, 1))
        }
    }
}
