//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::Result;
use serde_json::{json, Value};

use giftwrap_core::{Block, BlockStore, Selection, ThemeDef};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single block with its content and style
    pub fn print_block(&self, store: &BlockStore, block: &Block) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                let position = store.index_of(&block.id).map(|i| i + 1).unwrap_or(0);
                let style = &block.style;
                println!("ID:       {}", block.id);
                println!("Type:     {}", block.type_tag());
                println!("Position: {} of {}", position, store.len());
                println!(
                    "Style:    background={} align={} padding={} width={}",
                    style_name(&style.background),
                    style_name(&style.align),
                    style_name(&style.padding),
                    style_name(&style.width)
                );
                if store.selection().contains(&block.id) {
                    println!("Selected: yes");
                }
                println!();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&block.content.to_value()?)?
                );
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&block_json(block)?)?);
            }
            OutputFormat::Quiet => {
                println!("{}", block.id);
            }
        }
        Ok(())
    }

    /// Print the blocks in render order
    pub fn print_blocks(&self, blocks: &[Block], selection: &Selection) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if blocks.is_empty() {
                    println!("No blocks yet. Add one with `giftwrap add <type>`.");
                    return Ok(());
                }
                for (index, block) in blocks.iter().enumerate() {
                    let marker = if selection.contains(&block.id) {
                        "*"
                    } else {
                        " "
                    };
                    let half = if block.style.width == giftwrap_core::Width::Half {
                        " (half)"
                    } else {
                        ""
                    };
                    println!(
                        "{}{:>3} | {} | {:<10} | {}{}",
                        marker,
                        index + 1,
                        block.id.short(),
                        block.type_tag(),
                        truncate(&summary(block), 40),
                        half
                    );
                }
                println!("\n{} block(s), {} selected", blocks.len(), selection.len());
            }
            OutputFormat::Json => {
                let items = blocks.iter().map(block_json).collect::<Result<Vec<_>>>()?;
                println!("{}", serde_json::to_string_pretty(&items)?);
            }
            OutputFormat::Quiet => {
                for block in blocks {
                    println!("{}", block.id);
                }
            }
        }
        Ok(())
    }

    /// Print the current selection
    pub fn print_selection(&self, store: &BlockStore) -> Result<()> {
        let selection = store.selection();
        match self.format {
            OutputFormat::Human => {
                if selection.is_empty() {
                    println!("Nothing selected.");
                    return Ok(());
                }
                for id in selection.ids() {
                    let tag = store.get(id).map(|b| b.type_tag()).unwrap_or("?");
                    println!("{} | {}", id.short(), tag);
                }
                println!("\n{} of {} block(s) selected", selection.len(), store.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(selection.ids())?);
            }
            OutputFormat::Quiet => {
                for id in selection.ids() {
                    println!("{}", id);
                }
            }
        }
        Ok(())
    }

    /// Print the theme presets, marking the active key
    pub fn print_themes(&self, themes: &[(String, ThemeDef)], active: &str) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                for (key, theme) in themes {
                    let marker = if key == active { "*" } else { " " };
                    println!(
                        "{} {:<10} | {:<16} | {} | {}",
                        marker,
                        key,
                        theme.name,
                        theme.primary,
                        theme.font
                    );
                }
            }
            OutputFormat::Json => {
                let items: Vec<Value> = themes
                    .iter()
                    .map(|(key, theme)| {
                        json!({"key": key, "active": key == active, "theme": theme})
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&items)?);
            }
            OutputFormat::Quiet => {
                for (key, _) in themes {
                    println!("{}", key);
                }
            }
        }
        Ok(())
    }

    /// Print a resolved theme
    pub fn print_theme(&self, key: &str, theme: &ThemeDef) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("Theme:      {} ({})", theme.name, key);
                println!("Background: {}", theme.background);
                println!("Primary:    {}", theme.primary);
                println!("Secondary:  {}", theme.secondary);
                println!("Text:       {}", theme.text);
                println!("Font:       {}", theme.font);
                if !theme.particles.is_empty() {
                    println!("Particles:  {}", theme.particles.join(" "));
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({"key": key, "theme": theme}))?
                );
            }
            OutputFormat::Quiet => {
                println!("{}", key);
            }
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a non-fatal warning to stderr
    pub fn warning(&self, message: &str) {
        if !self.is_quiet() {
            eprintln!("Warning: {}", message);
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// A block as it appears in the export file
pub fn block_json(block: &Block) -> Result<Value> {
    Ok(json!({
        "id": block.id,
        "type": block.type_tag(),
        "content": block.content.to_value()?,
        "style": block.style,
    }))
}

/// One-line description of a block's content
fn summary(block: &Block) -> String {
    const FIELDS: &[&str] = &[
        "title", "text", "question", "label", "location", "caption", "hint", "quote",
    ];

    let Ok(Value::Object(map)) = block.content.to_value() else {
        return String::new();
    };
    FIELDS
        .iter()
        .find_map(|field| map.get(*field).and_then(Value::as_str))
        .map(|s| s.lines().next().unwrap_or("").to_string())
        .unwrap_or_default()
}

/// Serialized name of a style enum value
fn style_name<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(s)) => s,
        _ => String::from("?"),
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftwrap_core::{Align, Background};

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
        assert_eq!(truncate("héllo wörld again", 8), "héllo...");
    }

    #[test]
    fn test_summary_picks_first_text_field() {
        assert_eq!(summary(&Block::new("hero")), "Celebrate!");
        assert_eq!(summary(&Block::new("note")), "Write a heartfelt message...");
        assert_eq!(
            summary(&Block::new("quiz")),
            "Who is my favorite superhero?"
        );
        assert_eq!(summary(&Block::new("sticker")), "");
    }

    #[test]
    fn test_style_name() {
        assert_eq!(style_name(&Background::PrimaryTint), "primary");
        assert_eq!(style_name(&Align::Center), "center");
    }

    #[test]
    fn test_block_json_shape() {
        let block = Block::new("section");
        let value = block_json(&block).unwrap();

        assert_eq!(value["type"], "section");
        assert_eq!(value["id"], block.id.as_str());
        assert_eq!(value["content"]["title"], "New Chapter");
        assert_eq!(value["style"]["background"], "transparent");
    }
}
