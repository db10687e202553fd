//! Command handlers

pub mod block;
pub mod config;
pub mod document;
pub mod generate;
pub mod selection;
pub mod theme;
pub mod transfer;

use std::io::{self, Write};

use anyhow::{bail, Result};

use giftwrap_core::{BlockId, BlockStore, Config, FilePersistence};

use crate::output::Output;

/// Resolve a block from its full id or an unambiguous id prefix
pub fn parse_block_id(query: &str, store: &BlockStore) -> Result<BlockId> {
    let query = query.trim();
    if query.is_empty() {
        bail!("Block ID must not be empty");
    }

    if let Some(id) = store.document().resolve_id(query) {
        return Ok(id);
    }

    let matches: Vec<_> = store
        .blocks()
        .iter()
        .filter(|b| b.id.matches_prefix(query))
        .collect();

    if matches.len() < 2 {
        bail!("No block found matching: {}", query);
    }

    eprintln!("Multiple blocks match '{}':", query);
    for block in &matches {
        eprintln!("  {} - {}", block.id, block.type_tag());
    }
    bail!("Ambiguous ID. Please provide more characters.")
}

/// Ask for confirmation before a destructive action
///
/// Skipped with `--yes` or outside human output; with no TTY on stdin the
/// answer is no.
pub fn confirm_action(output: &Output, yes: bool, what: &str) -> Result<bool> {
    if yes || !output.should_prompt() {
        return Ok(true);
    }

    println!("{}", what);
    if !confirm("Are you sure?")? {
        println!("Cancelled.");
        return Ok(false);
    }
    Ok(true)
}

/// Prompt user for yes/no confirmation
///
/// Returns true if user confirms, false otherwise.
/// In non-interactive mode (no TTY), returns false.
pub fn confirm(prompt: &str) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}

/// Surface a failed write-through as a warning
///
/// The change itself is kept in memory for this run only.
pub fn report_save_warning(store: &mut BlockStore, output: &Output) {
    if let Some(e) = store.take_save_warning() {
        output.warning(&format!("Changes were not saved: {}", e));
        if let Some(hint) = e.recovery_suggestion() {
            output.warning(hint);
        }
    }
}

/// Tell the user the saved document was unreadable and has been replaced
pub fn report_load_warning(store: &mut BlockStore, config: &Config, output: &Output) {
    if let Some(discarded) = store.take_load_warning() {
        output.warning(&discarded.to_string());
        if let Some(key) = discarded.backup_key {
            let path = FilePersistence::from_config(config).path_for(&key);
            output.warning(&format!("The unreadable copy was kept at {}", path.display()));
        }
    }
}
