//! AI content generation handler

use anyhow::{bail, Context, Result};
use tracing::debug;

use giftwrap_core::generate::{cancel_pair, fill_block};
use giftwrap_core::{AiTask, BlockStore, Config, GeminiClient, GenerateError, Generator, Tone};

use super::{parse_block_id, report_save_warning};
use crate::output::{Output, OutputFormat};

/// Fill a note, secret, quiz, poll or wisdom block with generated content
///
/// Ctrl-C cancels the request and leaves the block as it was.
pub async fn generate(
    store: &mut BlockStore,
    config: &Config,
    id: String,
    input: Option<String>,
    tone: Option<String>,
    output: &Output,
) -> Result<()> {
    let client = GeminiClient::from_config(config).context("Failed to set up AI client")?;
    if !client.has_api_key() {
        return Err(GenerateError::MissingApiKey.into());
    }
    run(store, config, &client, id, input, tone, output).await
}

async fn run(
    store: &mut BlockStore,
    config: &Config,
    generator: &dyn Generator,
    id: String,
    input: Option<String>,
    tone: Option<String>,
    output: &Output,
) -> Result<()> {
    let id = parse_block_id(&id, store)?;
    let tone = match tone {
        Some(t) => match t.parse::<Tone>() {
            Ok(tone) => tone,
            Err(_) => bail!("Unknown tone: '{}'. Valid tones: fun, sweet, poetic", t),
        },
        None => Tone::default(),
    };

    let block = store
        .get(&id)
        .ok_or_else(|| anyhow::anyhow!("Block not found: {}", id))?;
    let input = input.unwrap_or_default();
    let Some(task) = AiTask::for_content(&block.content, &input, tone) else {
        bail!(
            "No assistant for {} blocks. Try a note, secret, quiz, poll or wisdom block.",
            block.type_tag()
        );
    };
    debug!("Running {} task for block {}", task.name(), id);

    if output.format == OutputFormat::Human {
        eprintln!("Generating {}... (Ctrl-C to cancel)", task.name());
    }

    let (handle, mut signal) = cancel_pair();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            handle.cancel();
        }
    });

    let result = fill_block(
        store,
        &id,
        &task,
        generator,
        config.ai_timeout(),
        &mut signal,
    )
    .await;
    watcher.abort();

    match result {
        Ok(true) => {
            report_save_warning(store, output);
            output.success(&format!("Generated {} for block {}", task.name(), id.short()));
            Ok(())
        }
        Ok(false) => {
            output.message("The block no longer exists, nothing was changed.");
            Ok(())
        }
        Err(GenerateError::Cancelled) => {
            output.message("Cancelled.");
            Ok(())
        }
        Err(e) => Err(e).context("AI generation failed"),
    }
}
