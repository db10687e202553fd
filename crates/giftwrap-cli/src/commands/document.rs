//! Whole-document handlers: status, preview, reset

use anyhow::Result;

use giftwrap_core::{BlockStore, Config, RendererRegistry};

use super::{confirm_action, report_save_warning};
use crate::output::{Output, OutputFormat};

/// Name shown for the gift: the first hero's title
fn gift_name(store: &BlockStore) -> String {
    store
        .blocks()
        .iter()
        .find(|b| b.type_tag() == "hero")
        .and_then(|b| b.content.to_value().ok())
        .and_then(|v| v.get("title").and_then(|t| t.as_str()).map(str::to_string))
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "My Gift".to_string())
}

/// Show status information
pub fn status(store: &BlockStore, config: &Config, output: &Output) -> Result<()> {
    let doc = store.document();
    let theme = store.theme();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "name": gift_name(store),
                    "document_id": doc.document_id,
                    "theme_key": doc.theme_key,
                    "theme": theme.name,
                    "blocks": store.len(),
                    "selected": store.selection().len(),
                    "data_dir": config.data_dir,
                    "ai_configured": config.ai_api_key.is_some()
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", doc.document_id);
        }
        OutputFormat::Human => {
            println!("{}", gift_name(store));
            println!("{}", "=".repeat(gift_name(store).chars().count()));
            println!();
            println!("Document: {}", doc.document_id);
            println!("Theme:    {} ({})", theme.name, doc.theme_key);
            println!(
                "Blocks:   {} ({} selected)",
                store.len(),
                store.selection().len()
            );
            println!();
            println!("Storage:  {}", config.data_dir.display());
            println!(
                "AI:       {}",
                if config.ai_api_key.is_some() {
                    "configured"
                } else {
                    "not configured"
                }
            );
        }
    }

    Ok(())
}

/// Render the document as text
pub fn preview(store: &BlockStore, editing: bool, output: &Output) -> Result<()> {
    let text = RendererRegistry::text().render_document(store.document(), editing);

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "preview": text }));
        }
        _ => print!("{}", text),
    }

    Ok(())
}

/// Start over with an empty document on the default theme
pub fn reset(store: &mut BlockStore, yes: bool, output: &Output) -> Result<()> {
    let what = format!(
        "Discard the current document ({} block(s)) and start fresh?",
        store.len()
    );
    if !store.is_empty() && !confirm_action(output, yes, &what)? {
        return Ok(());
    }

    store.reset();
    report_save_warning(store, output);

    match output.format {
        OutputFormat::Quiet => println!("{}", store.document().document_id),
        _ => output.success(&format!("Started new document {}", store.document().document_id)),
    }

    Ok(())
}
