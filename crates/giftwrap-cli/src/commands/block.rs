//! Block command handlers

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use strum::IntoEnumIterator;

use giftwrap_core::{BlockCategory, BlockContent, BlockKind, BlockStore, Direction};

use super::{confirm_action, parse_block_id, report_save_warning};
use crate::output::{Output, OutputFormat};

/// Style options given on the command line; `None` keeps the current value
#[derive(Debug, Default)]
pub struct StyleArgs {
    pub background: Option<String>,
    pub align: Option<String>,
    pub padding: Option<String>,
    pub width: Option<String>,
}

/// List the block library grouped by category
pub fn library(output: &Output) -> Result<()> {
    const CATEGORIES: [BlockCategory; 5] = [
        BlockCategory::Basic,
        BlockCategory::Content,
        BlockCategory::Media,
        BlockCategory::Interactive,
        BlockCategory::Special,
    ];

    match output.format {
        OutputFormat::Json => {
            let items: Vec<Value> = BlockKind::iter()
                .map(|kind| {
                    json!({
                        "type": kind.as_str(),
                        "label": kind.label(),
                        "category": kind.category().to_string(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        OutputFormat::Quiet => {
            for kind in BlockKind::iter() {
                println!("{}", kind.as_str());
            }
        }
        OutputFormat::Human => {
            for category in CATEGORIES {
                println!("{}", category);
                for kind in BlockKind::iter().filter(|k| k.category() == category) {
                    println!("  {:<12} {}", kind.as_str(), kind.label());
                }
                println!();
            }
        }
    }

    Ok(())
}

/// Append a block with default content
pub fn add(store: &mut BlockStore, kind: String, output: &Output) -> Result<()> {
    let kind = kind.trim();
    if kind.is_empty() {
        bail!("Block type must not be empty. Run `giftwrap blocks` to see the library.");
    }
    if kind.parse::<BlockKind>().is_err() {
        output.warning(&format!(
            "'{}' is not a known block type; it will render as a placeholder",
            kind
        ));
    }

    let id = store.add_block(kind);
    report_save_warning(store, output);

    match output.format {
        OutputFormat::Quiet => println!("{}", id),
        _ => output.success(&format!("Added {} block: {}", kind, id.short())),
    }

    Ok(())
}

/// List blocks in render order
pub fn list(store: &BlockStore, output: &Output) -> Result<()> {
    output.print_blocks(store.blocks(), store.selection())
}

/// Show one block
pub fn show(store: &BlockStore, id: String, output: &Output) -> Result<()> {
    let id = parse_block_id(&id, store)?;
    let block = store
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Block not found: {}", id))?;
    output.print_block(store, block)
}

/// Replace a block's content
///
/// `content` is a whole JSON record; each `key=value` in `fields` is then
/// applied on top of it (or of the current content when no record is
/// given). Values that parse as JSON are used as such, anything else as a
/// string.
pub fn edit(
    store: &mut BlockStore,
    id: String,
    content: Option<String>,
    fields: Vec<String>,
    output: &Output,
) -> Result<()> {
    let id = parse_block_id(&id, store)?;
    let block = store
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Block not found: {}", id))?;
    let tag = block.type_tag().to_string();

    if content.is_none() && fields.is_empty() {
        bail!("Nothing to change. Pass a JSON content record or --set key=value.");
    }

    let mut value = match content {
        Some(text) => serde_json::from_str(&text).context("Content is not valid JSON")?,
        None => block.content.to_value()?,
    };
    apply_fields(&mut value, &fields)?;

    let content = BlockContent::from_tagged_value(&tag, value)
        .with_context(|| format!("Content does not fit a {} block", tag))?;

    store.update_content(&id, content);
    report_save_warning(store, output);
    output.success(&format!("Updated {} block: {}", tag, id.short()));

    Ok(())
}

/// Change a block's style
pub fn style(store: &mut BlockStore, id: String, args: StyleArgs, output: &Output) -> Result<()> {
    let id = parse_block_id(&id, store)?;
    let mut style = store
        .get(&id)
        .map(|b| b.style)
        .ok_or_else(|| anyhow::anyhow!("Block not found: {}", id))?;

    if let Some(v) = args.background {
        style.background = parse_style_value("background", &v)?;
    }
    if let Some(v) = args.align {
        style.align = parse_style_value("align", &v)?;
    }
    if let Some(v) = args.padding {
        style.padding = parse_style_value("padding", &v)?;
    }
    if let Some(v) = args.width {
        style.width = parse_style_value("width", &v)?;
    }

    store.update_style(&id, style);
    report_save_warning(store, output);
    output.success(&format!("Updated style of block: {}", id.short()));

    Ok(())
}

/// Move a block one place up or down
pub fn move_block(
    store: &mut BlockStore,
    id: String,
    direction: Direction,
    output: &Output,
) -> Result<()> {
    let id = parse_block_id(&id, store)?;
    let index = store
        .index_of(&id)
        .ok_or_else(|| anyhow::anyhow!("Block not found: {}", id))?;

    if !store.move_block(index, direction) {
        output.message(&format!(
            "Block {} is already at the {}",
            id.short(),
            match direction {
                Direction::Up => "top",
                Direction::Down => "bottom",
            }
        ));
        return Ok(());
    }

    report_save_warning(store, output);
    let position = store.index_of(&id).map(|i| i + 1).unwrap_or(0);
    output.success(&format!("Moved block {} to position {}", id.short(), position));

    Ok(())
}

/// Copy a block to just after itself
pub fn duplicate(store: &mut BlockStore, id: String, output: &Output) -> Result<()> {
    let id = parse_block_id(&id, store)?;
    let copy = store
        .duplicate_block(&id)
        .ok_or_else(|| anyhow::anyhow!("Block not found: {}", id))?;
    report_save_warning(store, output);

    match output.format {
        OutputFormat::Quiet => println!("{}", copy),
        _ => output.success(&format!("Duplicated block {} as {}", id.short(), copy.short())),
    }

    Ok(())
}

/// Delete a block
pub fn remove(store: &mut BlockStore, id: String, yes: bool, output: &Output) -> Result<()> {
    let id = parse_block_id(&id, store)?;
    let tag = store
        .get(&id)
        .map(|b| b.type_tag().to_string())
        .ok_or_else(|| anyhow::anyhow!("Block not found: {}", id))?;

    let what = format!("Delete block: {} - {}", id.short(), tag);
    if !confirm_action(output, yes, &what)? {
        return Ok(());
    }

    store.remove_block(&id);
    report_save_warning(store, output);
    output.success(&format!("Deleted block: {}", id));

    Ok(())
}

/// Remove every block, keeping the theme
pub fn clear(store: &mut BlockStore, yes: bool, output: &Output) -> Result<()> {
    if store.is_empty() {
        output.message("There are no blocks to clear.");
        return Ok(());
    }

    let what = format!("Remove all {} block(s)?", store.len());
    if !confirm_action(output, yes, &what)? {
        return Ok(());
    }

    let count = store.len();
    store.clear_blocks();
    report_save_warning(store, output);
    output.success(&format!("Removed {} block(s)", count));

    Ok(())
}

/// Parse one of the style enumerations by its serialized name
fn parse_style_value<T: DeserializeOwned>(field: &str, value: &str) -> Result<T> {
    serde_json::from_value(Value::String(value.trim().to_lowercase())).map_err(|_| {
        let valid = match field {
            "background" => "transparent, white, primary, dark",
            "align" => "left, center, right",
            "padding" => "compact, normal, spacious",
            _ => "full, half",
        };
        anyhow::anyhow!("Invalid {}: '{}'. Valid values: {}", field, value, valid)
    })
}

/// Apply `key=value` assignments to a content record
fn apply_fields(value: &mut Value, fields: &[String]) -> Result<()> {
    if fields.is_empty() {
        return Ok(());
    }

    let Value::Object(map) = value else {
        bail!("Content must be a JSON object to set fields on it");
    };

    for field in fields {
        let Some((key, raw)) = field.split_once('=') else {
            bail!("Expected key=value, got '{}'", field);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Expected key=value, got '{}'", field);
        }
        let parsed = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        map.insert(key.to_string(), parsed);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftwrap_core::{Align, Background, Padding, Width};

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_parse_style_value() {
        let bg: Background = parse_style_value("background", "primary").unwrap();
        assert_eq!(bg, Background::PrimaryTint);
        let align: Align = parse_style_value("align", " Left ").unwrap();
        assert_eq!(align, Align::Left);
        assert!(parse_style_value::<Padding>("padding", "huge").is_err());
        let width: Width = parse_style_value("width", "half").unwrap();
        assert_eq!(width, Width::Half);
    }

    #[test]
    fn test_apply_fields() {
        let mut value = json!({"title": "Old", "subtitle": "Keep"});
        apply_fields(&mut value, &["title=New title".to_string()]).unwrap();
        assert_eq!(value, json!({"title": "New title", "subtitle": "Keep"}));

        let mut value = json!({"correctIndex": 0});
        apply_fields(&mut value, &["correctIndex=2".to_string()]).unwrap();
        assert_eq!(value["correctIndex"], 2);

        assert!(apply_fields(&mut value, &["novalue".to_string()]).is_err());
        assert!(apply_fields(&mut value, &["=x".to_string()]).is_err());
    }

    #[test]
    fn test_edit_keeps_block_type() {
        let mut store = BlockStore::in_memory();
        let id = store.add_block("hero");

        edit(
            &mut store,
            id.to_string(),
            None,
            vec!["title=Happy Birthday".to_string()],
            &quiet(),
        )
        .unwrap();

        let block = store.get(&id).unwrap();
        assert_eq!(block.type_tag(), "hero");
        assert_eq!(block.content.to_value().unwrap()["title"], "Happy Birthday");
        assert_eq!(
            block.content.to_value().unwrap()["subtitle"],
            "This is for you."
        );
    }

    #[test]
    fn test_edit_rejects_content_of_wrong_shape() {
        let mut store = BlockStore::in_memory();
        let id = store.add_block("quiz");
        let before = store.get(&id).unwrap().content.clone();

        let result = edit(
            &mut store,
            id.to_string(),
            Some(r#"{"question": 5}"#.to_string()),
            vec![],
            &quiet(),
        );

        assert!(result.is_err());
        assert_eq!(store.get(&id).unwrap().content, before);
    }

    #[test]
    fn test_style_changes_only_given_fields() {
        let mut store = BlockStore::in_memory();
        let id = store.add_block("note");

        let args = StyleArgs {
            align: Some("right".to_string()),
            width: Some("half".to_string()),
            ..Default::default()
        };
        style(&mut store, id.to_string(), args, &quiet()).unwrap();

        let style = store.get(&id).unwrap().style;
        assert_eq!(style.align, Align::Right);
        assert_eq!(style.width, Width::Half);
        assert_eq!(style.background, Background::Transparent);
        assert_eq!(style.padding, Padding::Normal);
    }

    #[test]
    fn test_move_and_remove_by_prefix() {
        let mut store = BlockStore::in_memory();
        let a = store.add_block("hero");
        let b = store.add_block("note");

        move_block(&mut store, b.short().to_string(), Direction::Up, &quiet()).unwrap();
        assert_eq!(store.index_of(&b), Some(0));

        // Already at the top: nothing happens
        move_block(&mut store, b.to_string(), Direction::Up, &quiet()).unwrap();
        assert_eq!(store.index_of(&b), Some(0));

        remove(&mut store, a.to_string(), false, &quiet()).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get(&a).is_none());
    }

    #[test]
    fn test_clear_keeps_theme() {
        let mut store = BlockStore::in_memory();
        store.set_theme("party");
        store.add_block("hero");
        store.add_block("note");

        clear(&mut store, true, &quiet()).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.document().theme_key, "party");
    }
}
