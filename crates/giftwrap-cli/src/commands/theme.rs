//! Theme command handlers

use anyhow::{bail, Result};

use giftwrap_core::theme::{self, CUSTOM_THEME_KEY, FONTS};
use giftwrap_core::BlockStore;

use super::report_save_warning;
use crate::output::Output;

/// Custom theme edits given on the command line
#[derive(Debug, Default)]
pub struct CustomThemeArgs {
    pub name: Option<String>,
    pub primary: Option<String>,
    pub background: Option<String>,
    pub text: Option<String>,
    pub font: Option<String>,
    pub particles: Option<String>,
    /// Switch the document to the custom theme afterwards
    pub activate: bool,
}

impl CustomThemeArgs {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.primary.is_none()
            && self.background.is_none()
            && self.text.is_none()
            && self.font.is_none()
            && self.particles.is_none()
    }
}

/// List presets and the custom theme
pub fn list(store: &BlockStore, output: &Output) -> Result<()> {
    let mut themes: Vec<_> = theme::presets()
        .into_iter()
        .map(|(preset, def)| (preset.to_string(), def))
        .collect();
    themes.push((
        CUSTOM_THEME_KEY.to_string(),
        store.document().custom_theme.clone(),
    ));

    output.print_themes(&themes, &store.document().theme_key)
}

/// Show the theme the document renders with
pub fn show(store: &BlockStore, output: &Output) -> Result<()> {
    output.print_theme(&store.document().theme_key, &store.theme())
}

/// Select a preset or the custom theme
pub fn set(store: &mut BlockStore, key: String, output: &Output) -> Result<()> {
    let key = key.trim().to_lowercase();
    if !theme::is_known_key(&key) {
        let valid = theme::presets()
            .into_iter()
            .map(|(preset, _)| preset.to_string())
            .chain(std::iter::once(CUSTOM_THEME_KEY.to_string()))
            .collect::<Vec<_>>()
            .join(", ");
        bail!("Unknown theme: '{}'. Valid themes: {}", key, valid);
    }

    store.set_theme(&key);
    report_save_warning(store, output);
    output.success(&format!("Theme set to {}", store.theme().name));

    Ok(())
}

/// Edit the custom theme
///
/// Editing does not switch the document to it unless `activate` is set.
pub fn custom(store: &mut BlockStore, args: CustomThemeArgs, output: &Output) -> Result<()> {
    if args.is_empty() && !args.activate {
        return output.print_theme(CUSTOM_THEME_KEY, &store.document().custom_theme);
    }

    // Validate before touching anything
    if let Some(ref font) = args.font {
        if !theme::is_known_font(font) {
            let valid = FONTS
                .iter()
                .map(|(key, _)| *key)
                .collect::<Vec<_>>()
                .join(", ");
            bail!("Unknown font: '{}'. Valid fonts: {}", font, valid);
        }
    }

    if args.name.is_some() || args.text.is_some() {
        let mut custom = store.document().custom_theme.clone();
        if let Some(name) = args.name {
            custom.name = name;
        }
        if let Some(text) = args.text {
            custom.text = text;
        }
        store.set_custom_theme(custom);
    }
    if let Some(primary) = args.primary {
        store.set_custom_primary(&primary);
    }
    if let Some(background) = args.background {
        store.set_custom_background(&background);
    }
    if let Some(font) = args.font {
        store.set_custom_font(&font)?;
    }
    if let Some(particles) = args.particles {
        store.set_custom_particles(&particles);
    }

    if args.activate {
        store.set_theme(CUSTOM_THEME_KEY);
    }

    report_save_warning(store, output);
    output.success(&format!(
        "Updated custom theme{}",
        if args.activate { " (active)" } else { "" }
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_set_rejects_unknown_theme() {
        let mut store = BlockStore::in_memory();
        assert!(set(&mut store, "neon".to_string(), &quiet()).is_err());
        assert_eq!(store.document().theme_key, "modern");

        set(&mut store, "Romantic".to_string(), &quiet()).unwrap();
        assert_eq!(store.document().theme_key, "romantic");
        assert_eq!(store.theme().primary, "#f43f5e");
    }

    #[test]
    fn test_custom_edit_keeps_active_theme() {
        let mut store = BlockStore::in_memory();
        store.set_theme("party");

        let args = CustomThemeArgs {
            primary: Some("#123456".to_string()),
            particles: Some("✨ 🎁".to_string()),
            ..Default::default()
        };
        custom(&mut store, args, &quiet()).unwrap();

        let doc = store.document();
        assert_eq!(doc.theme_key, "party");
        assert_eq!(doc.custom_theme.primary, "#123456");
        assert_eq!(doc.custom_theme.secondary, "#12345640");
        assert_eq!(doc.custom_theme.particles, vec!["✨", "🎁"]);
    }

    #[test]
    fn test_custom_activate() {
        let mut store = BlockStore::in_memory();
        let args = CustomThemeArgs {
            font: Some("font-mono".to_string()),
            activate: true,
            ..Default::default()
        };
        custom(&mut store, args, &quiet()).unwrap();

        assert_eq!(store.document().theme_key, "custom");
        assert_eq!(store.theme().font, "font-mono");
    }

    #[test]
    fn test_custom_sets_every_field() {
        let mut store = BlockStore::in_memory();
        let args = CustomThemeArgs {
            name: Some("Birthday".to_string()),
            primary: Some("#ff8800".to_string()),
            background: Some("#101010".to_string()),
            text: Some("#fafafa".to_string()),
            font: Some("font-serif".to_string()),
            particles: Some("🎈 🎂".to_string()),
            activate: false,
        };
        custom(&mut store, args, &quiet()).unwrap();

        let theme = &store.document().custom_theme;
        assert_eq!(theme.name, "Birthday");
        assert_eq!(theme.primary, "#ff8800");
        assert_eq!(theme.secondary, "#ff880040");
        assert_eq!(theme.background, "#101010");
        assert_eq!(theme.text, "#fafafa");
        assert_eq!(theme.font, "font-serif");
        assert_eq!(theme.particles, vec!["🎈", "🎂"]);
    }

    #[test]
    fn test_custom_rejects_unknown_font() {
        let mut store = BlockStore::in_memory();
        let before = store.document().custom_theme.clone();
        let args = CustomThemeArgs {
            primary: Some("#000000".to_string()),
            font: Some("comic-sans".to_string()),
            ..Default::default()
        };

        assert!(custom(&mut store, args, &quiet()).is_err());
        assert_eq!(store.document().custom_theme, before);
    }
}
