//! AI transformation commands.

use crate::{AiCommands, AiOpts};
use numen_core::{Config, NoteStore};
use numen_provider::{
    create_provider, GenerateOptions, ProviderSettings, TextProvider, Transform,
};

pub async fn handle(config: &Config, command: AiCommands) -> anyhow::Result<()> {
    let (note, transform, opts) = match command {
        AiCommands::Expand { note, opts } => (note, Transform::Expand, opts),
        AiCommands::Summarize { note, opts } => (note, Transform::Summarize, opts),
        AiCommands::Poetic { note, opts } => (note, Transform::Poetic, opts),
        AiCommands::Custom {
            note,
            instruction,
            opts,
        } => (note, Transform::Custom(instruction), opts),
    };

    let store = NoteStore::new(config.notes_dir()?).await?;
    let provider = match create_provider(&provider_settings(config)) {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(());
        }
    };
    let options = GenerateOptions {
        temperature: Some(config.ai.temperature),
        ..Default::default()
    };

    transform_note(&store, provider.as_ref(), &options, &note, &transform, &opts).await
}

/// Run one transformation against a note, with the provider injected so
/// the flow is testable without network access.
async fn transform_note(
    store: &NoteStore,
    provider: &dyn TextProvider,
    options: &GenerateOptions,
    note: &str,
    transform: &Transform,
    opts: &AiOpts,
) -> anyhow::Result<()> {
    let content = match store.section_content(note, opts.section).await {
        Ok(content) => content,
        Err(e) => {
            eprintln!("{e}");
            return Ok(());
        }
    };

    println!("Sending to AI ({})...", transform.name());

    let prompt = transform.prompt(&content);
    let result = match provider.generate(&prompt, options).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(());
        }
    };

    if opts.preview {
        println!();
        println!("{result}");
        return Ok(());
    }

    match store
        .update_content(note, &result, opts.section, !opts.replace)
        .await
    {
        Ok(()) => {
            println!("Successfully processed text with AI ({}).", transform.name());
            if !opts.replace {
                println!("Original text preserved with AI content appended.");
            }
        }
        Err(e) => {
            // Print the generated text so it is not lost.
            eprintln!("Failed to update note: {e}");
            println!("{result}");
        }
    }
    Ok(())
}

fn provider_settings(config: &Config) -> ProviderSettings {
    ProviderSettings {
        provider: config.ai.default_provider.clone(),
        anthropic_api_key: config.ai.anthropic_api_key.clone(),
        openai_api_key: config.ai.openai_api_key.clone(),
        gemini_api_key: config.ai.gemini_api_key.clone(),
        ollama_base_url: config.ai.ollama_base_url.clone(),
        model: config.ai.default_model.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use numen_provider::test::TestProvider;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, NoteStore) {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::new(dir.path().join("notes")).await.unwrap();
        (dir, store)
    }

    fn opts(replace: bool) -> AiOpts {
        AiOpts {
            section: None,
            replace,
            preview: false,
        }
    }

    #[tokio::test]
    async fn test_transform_appends_by_default() {
        let (_dir, store) = setup().await;
        store.create("Ideas", Some("a rough sketch")).await.unwrap();

        let provider = TestProvider::new("polished prose");
        transform_note(
            &store,
            &provider,
            &GenerateOptions::default(),
            "ideas",
            &Transform::Expand,
            &opts(false),
        )
        .await
        .unwrap();

        let body = store.section_content("ideas", None).await.unwrap();
        assert!(body.contains("a rough sketch"));
        assert!(body.contains("polished prose"));

        // The prompt sent carried the note content.
        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("a rough sketch"));
    }

    #[tokio::test]
    async fn test_transform_replace_drops_original() {
        let (_dir, store) = setup().await;
        store.create("Ideas", Some("a rough sketch")).await.unwrap();

        let provider = TestProvider::new("summary only");
        transform_note(
            &store,
            &provider,
            &GenerateOptions::default(),
            "ideas",
            &Transform::Summarize,
            &opts(true),
        )
        .await
        .unwrap();

        let body = store.section_content("ideas", None).await.unwrap();
        assert_eq!(body, "summary only");
    }

    #[tokio::test]
    async fn test_transform_missing_note_leaves_store_untouched() {
        let (_dir, store) = setup().await;
        let provider = TestProvider::new("never sent");

        transform_note(
            &store,
            &provider,
            &GenerateOptions::default(),
            "nope",
            &Transform::Poetic,
            &opts(false),
        )
        .await
        .unwrap();

        assert!(provider.prompts().is_empty());
    }
}
