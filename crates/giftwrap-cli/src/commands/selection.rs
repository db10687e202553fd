//! Selection and bulk action handlers
//!
//! The selection is saved with the document, so blocks can be selected in
//! one invocation and acted on in the next.

use anyhow::Result;

use giftwrap_core::BlockStore;

use super::{confirm_action, parse_block_id, report_save_warning};
use crate::output::{Output, OutputFormat};

/// Show the selection
pub fn show(store: &BlockStore, output: &Output) -> Result<()> {
    output.print_selection(store)
}

/// Toggle each given block in or out of the selection
pub fn toggle(store: &mut BlockStore, ids: Vec<String>, output: &Output) -> Result<()> {
    // Resolve everything first so a typo doesn't leave a half-applied toggle
    let ids = ids
        .iter()
        .map(|id| parse_block_id(id, store))
        .collect::<Result<Vec<_>>>()?;

    for id in &ids {
        let selected = store.toggle_selection(id);
        if !output.is_json() {
            output.message(&format!(
                "{} {}",
                if selected { "Selected" } else { "Deselected" },
                id.short()
            ));
        }
    }
    report_save_warning(store, output);

    if output.is_json() {
        output.print_selection(store)?;
    }

    Ok(())
}

/// Select every block, or clear the selection when all are selected
pub fn select_all(store: &mut BlockStore, output: &Output) -> Result<()> {
    store.select_all();
    report_save_warning(store, output);
    output.success(&format!(
        "{} of {} block(s) selected",
        store.selection().len(),
        store.len()
    ));
    Ok(())
}

pub fn clear(store: &mut BlockStore, output: &Output) -> Result<()> {
    store.clear_selection();
    report_save_warning(store, output);
    output.success("Selection cleared");
    Ok(())
}

/// Duplicate the selected blocks; the copies become the new selection
pub fn bulk_duplicate(store: &mut BlockStore, output: &Output) -> Result<()> {
    if store.selection().is_empty() {
        output.message("Nothing selected. Select blocks with `giftwrap select <id>`.");
        return Ok(());
    }

    let copies = store.duplicate_selected();
    report_save_warning(store, output);

    match output.format {
        OutputFormat::Quiet => {
            for id in &copies {
                println!("{}", id);
            }
        }
        _ => output.success(&format!("Duplicated {} block(s)", copies.len())),
    }

    Ok(())
}

/// Delete the selected blocks
pub fn bulk_delete(store: &mut BlockStore, yes: bool, output: &Output) -> Result<()> {
    if store.selection().is_empty() {
        output.message("Nothing selected. Select blocks with `giftwrap select <id>`.");
        return Ok(());
    }

    let what = format!("Delete {} selected block(s)?", store.selection().len());
    if !confirm_action(output, yes, &what)? {
        return Ok(());
    }

    let removed = store.delete_selected();
    report_save_warning(store, output);
    output.success(&format!("Deleted {} block(s)", removed));

    Ok(())
}
