use ratatui::style::Color;

use crate::model::config::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub blue: Color,
    pub purple: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0B, 0x11, 0x20),
            text: Color::Rgb(0xC7, 0xD0, 0xE0),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x38, 0xBD, 0xF8),
            dim: Color::Rgb(0x64, 0x74, 0x8B),
            red: Color::Rgb(0xF8, 0x71, 0x71),
            yellow: Color::Rgb(0xFB, 0xBF, 0x24),
            green: Color::Rgb(0x34, 0xD3, 0x99),
            cyan: Color::Rgb(0x22, 0xD3, 0xEE),
            blue: Color::Rgb(0x60, 0xA5, 0xFA),
            purple: Color::Rgb(0xA7, 0x8B, 0xFA),
            selection_bg: Color::Rgb(0x1E, 0x29, 0x3B),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (name, hex) in &ui.colors {
            let Some(color) = parse_hex_color(hex) else {
                continue;
            };
            match name.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "cyan" => theme.cyan = color,
                "blue" => theme.blue = color,
                "purple" => theme.purple = color,
                "selection_bg" => theme.selection_bg = color,
                _ => {}
            }
        }
        theme
    }

    /// A subject's own card color, falling back to the theme blue
    pub fn subject_color(&self, hex: &str) -> Color {
        parse_hex_color(hex).unwrap_or(self.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#FF4444"), Some(Color::Rgb(0xFF, 0x44, 0x44)));
        assert_eq!(parse_hex_color("#3B82F6"), Some(Color::Rgb(0x3B, 0x82, 0xF6)));
        assert_eq!(parse_hex_color("FF4444"), None);
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn config_overrides_apply() {
        let mut colors = HashMap::new();
        colors.insert("highlight".to_string(), "#FF0000".to_string());
        colors.insert("bogus".to_string(), "#00FF00".to_string());
        colors.insert("dim".to_string(), "notacolor".to_string());
        let theme = Theme::from_config(&UiConfig { colors });
        assert_eq!(theme.highlight, Color::Rgb(0xFF, 0, 0));
        assert_eq!(theme.dim, Theme::default().dim);
    }

    #[test]
    fn subject_color_falls_back_to_blue() {
        let theme = Theme::default();
        assert_eq!(theme.subject_color("#10B981"), Color::Rgb(0x10, 0xB9, 0x81));
        assert_eq!(theme.subject_color("teal"), theme.blue);
    }
}
