//! Export and import handlers

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};

use giftwrap_core::{BlockStore, EXPORT_FILE_NAME};

use super::{confirm_action, report_save_warning};
use crate::output::{Output, OutputFormat};

/// Write the document to a file, or to stdout for `-`
pub fn export(store: &BlockStore, path: Option<PathBuf>, output: &Output) -> Result<()> {
    let text = store.export().context("Failed to serialize document")?;

    let path = path.unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME));
    if path.as_os_str() == "-" {
        println!("{}", text);
        return Ok(());
    }

    fs::write(&path, &text).with_context(|| format!("Failed to write {:?}", path))?;

    match output.format {
        OutputFormat::Quiet => println!("{}", path.display()),
        _ => output.success(&format!("Exported {} block(s) to {}", store.len(), path.display())),
    }

    Ok(())
}

/// Replace the document with the contents of a file, or stdin for `-`
///
/// The current document is kept when the file is rejected.
pub fn import(store: &mut BlockStore, path: PathBuf, yes: bool, output: &Output) -> Result<()> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read from stdin")?;
        text
    } else {
        fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?
    };

    if !store.is_empty() {
        let what = format!(
            "Replace the current {} block(s) with {}?",
            store.len(),
            path.display()
        );
        if !confirm_action(output, yes, &what)? {
            return Ok(());
        }
    }

    store.import(&text).context("Invalid configuration file")?;
    report_save_warning(store, output);

    output.success(&format!(
        "Imported {} block(s) with theme {}",
        store.len(),
        store.document().theme_key
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_export_then_import_into_fresh_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);

        let mut source = BlockStore::in_memory();
        source.set_theme("friendship");
        source.add_block("hero");
        let note = source.add_block("note");
        export(&source, Some(path.clone()), &quiet()).unwrap();

        let mut target = BlockStore::in_memory();
        import(&mut target, path, true, &quiet()).unwrap();

        assert_eq!(target.document(), source.document());
        assert_eq!(target.index_of(&note), Some(1));
    }

    #[test]
    fn test_import_invalid_file_keeps_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not valid json").unwrap();

        let mut store = BlockStore::in_memory();
        store.add_block("hero");
        let before = store.document().clone();

        let err = import(&mut store, path, true, &quiet()).unwrap_err();

        assert_eq!(err.to_string(), "Invalid configuration file");
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn test_import_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut store = BlockStore::in_memory();

        let result = import(&mut store, dir.path().join("nope.json"), true, &quiet());
        assert!(result.is_err());
    }
}
