//! Theme presets and resolution
//!
//! A document selects its look either by naming one of four built-in
//! presets or with the key `custom`, in which case the document's inline
//! custom theme is used as-is. Unknown keys resolve to the `modern` preset
//! rather than leaving the renderer without a theme.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Theme key that selects the document's inline custom theme
pub const CUSTOM_THEME_KEY: &str = "custom";

/// Fonts a theme may use: (key, label)
pub const FONTS: &[(&str, &str)] = &[
    ("font-sans", "Clean (Sans)"),
    ("font-serif", "Elegant (Serif)"),
    ("font-mono", "Code (Mono)"),
    ("font-handwriting", "Handwritten"),
];

/// Check whether a font key is one of [`FONTS`]
pub fn is_known_font(key: &str) -> bool {
    FONTS.iter().any(|(k, _)| *k == key)
}

/// A named bundle of colours, font and decorative glyphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDef {
    pub name: String,
    /// Page background: a colour or a gradient/class name
    #[serde(rename = "bg", alias = "background")]
    pub background: String,
    pub primary: String,
    pub secondary: String,
    pub text: String,
    /// One of the keys in [`FONTS`]
    pub font: String,
    /// Glyphs floated over the page
    #[serde(default)]
    pub particles: Vec<String>,
}

/// The built-in presets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum ThemePreset {
    Romantic,
    Friendship,
    #[default]
    Modern,
    Party,
}

impl ThemePreset {
    /// The theme definition for this preset
    pub fn theme(&self) -> ThemeDef {
        match self {
            ThemePreset::Romantic => theme_def(
                "Romantic Red",
                "bg-gradient-to-br from-rose-50 to-pink-100",
                "#f43f5e",
                "#ffe4e6",
                "#881337",
                "font-serif",
                &["\u{2764}\u{fe0f}", "\u{1f339}", "\u{1f48b}", "\u{1f48c}"],
            ),
            ThemePreset::Friendship => theme_def(
                "Sunny Friendship",
                "bg-gradient-to-br from-amber-50 to-orange-100",
                "#fb923c",
                "#ffedd5",
                "#7c2d12",
                "font-sans",
                &["\u{2600}\u{fe0f}", "\u{1f33b}", "\u{1f366}", "\u{1f49b}"],
            ),
            ThemePreset::Modern => theme_def(
                "Modern Minimalist",
                "bg-slate-50",
                "#1e293b",
                "#e2e8f0",
                "#0f172a",
                "font-mono",
                &["\u{2728}", "\u{25fc}\u{fe0f}", "\u{1f58a}\u{fe0f}", "\u{1f3d0}"],
            ),
            ThemePreset::Party => theme_def(
                "Neon Party",
                "bg-slate-900",
                "#a855f7",
                "#581c87",
                "#ffffff",
                "font-sans",
                &["\u{1f389}", "\u{1f388}", "\u{1faa9}", "\u{1f942}"],
            ),
        }
    }
}

fn theme_def(
    name: &str,
    background: &str,
    primary: &str,
    secondary: &str,
    text: &str,
    font: &str,
    particles: &[&str],
) -> ThemeDef {
    ThemeDef {
        name: name.to_string(),
        background: background.to_string(),
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        text: text.to_string(),
        font: font.to_string(),
        particles: particles.iter().map(|p| p.to_string()).collect(),
    }
}

impl Default for ThemeDef {
    fn default() -> Self {
        ThemePreset::default().theme()
    }
}

impl ThemeDef {
    /// Set the primary colour; the secondary becomes the same colour at 25% alpha
    pub fn set_primary(&mut self, color: impl Into<String>) {
        let color = color.into();
        self.secondary = format!("{}40", color);
        self.primary = color;
    }

    /// Replace the particle glyphs from a space separated list
    pub fn set_particles_from_str(&mut self, glyphs: &str) {
        self.particles = glyphs.split_whitespace().map(str::to_string).collect();
    }
}

/// All presets with their keys, in display order
pub fn presets() -> Vec<(ThemePreset, ThemeDef)> {
    ThemePreset::iter().map(|p| (p, p.theme())).collect()
}

/// Check whether a key names a preset or the custom theme
pub fn is_known_key(theme_key: &str) -> bool {
    theme_key == CUSTOM_THEME_KEY || theme_key.parse::<ThemePreset>().is_ok()
}

/// Resolve the active theme
///
/// `custom` yields `custom_theme` unchanged, preset keys yield the preset,
/// and anything else falls back to the default preset.
pub fn resolve(theme_key: &str, custom_theme: &ThemeDef) -> ThemeDef {
    if theme_key == CUSTOM_THEME_KEY {
        return custom_theme.clone();
    }

    match theme_key.parse::<ThemePreset>() {
        Ok(preset) => preset.theme(),
        Err(_) => {
            tracing::debug!("Unknown theme key {:?}, using default preset", theme_key);
            ThemePreset::default().theme()
        }
    }
}
