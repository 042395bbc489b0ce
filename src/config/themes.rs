use std::collections::HashSet;

use ratatui::style::Color;

use super::ThemeName;

#[derive(Debug, Clone)]
pub struct ThemeRegistry {
    names: HashSet<ThemeName>,
}

impl ThemeRegistry {
    pub fn contains(&self, theme: &ThemeName) -> bool {
        self.names.contains(theme)
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        let names = [ThemeName::Dark, ThemeName::Light, ThemeName::HighContrast]
            .into_iter()
            .collect();
        Self { names }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub muted: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl Palette {
    pub fn for_theme(theme: ThemeName) -> Self {
        match theme {
            ThemeName::Dark => Self {
                accent: Color::Cyan,
                muted: Color::Gray,
                selection_bg: Color::Blue,
                selection_fg: Color::Black,
            },
            ThemeName::Light => Self {
                accent: Color::Blue,
                muted: Color::DarkGray,
                selection_bg: Color::LightBlue,
                selection_fg: Color::Black,
            },
            ThemeName::HighContrast => Self {
                accent: Color::Yellow,
                muted: Color::White,
                selection_bg: Color::White,
                selection_fg: Color::Black,
            },
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::for_theme(ThemeName::Dark)
    }
}
