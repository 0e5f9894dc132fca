//! Template commands.

use crate::TemplateCommands;
use numen_core::{Config, TemplateStore};

pub async fn handle(config: &Config, command: TemplateCommands) -> anyhow::Result<()> {
    let store = TemplateStore::new(config.templates_dir()?).await?;

    match command {
        TemplateCommands::List => {
            let templates = store.list().await?;
            println!("{:<16} {:<24} {}", "NAME", "TITLE", "DESCRIPTION");
            println!("{}", "-".repeat(72));
            for template in templates {
                println!(
                    "{:<16} {:<24} {}",
                    template.name, template.title, template.description
                );
            }
        }
        TemplateCommands::New {
            name,
            title,
            description,
        } => {
            let title = title.unwrap_or_else(|| name.clone());
            let path = store
                .create(
                    &name,
                    &title,
                    description.as_deref().unwrap_or_default(),
                    "# {{title}}\n\n",
                )
                .await?;
            println!("Created template at: {}", path.display());
            super::open_editor(config, &path)?;
        }
        TemplateCommands::Edit { name } => {
            let path = store.template_path(&name);
            if !path.exists() {
                eprintln!("Template not found: {name}");
                return Ok(());
            }
            super::open_editor(config, &path)?;
        }
        TemplateCommands::Delete { name, force } => match store.delete(&name, force).await {
            Ok(()) => println!("Deleted template: {name}"),
            Err(e) => eprintln!("{e}"),
        },
        TemplateCommands::Reset { name } => match store.reset(&name).await {
            Ok(()) => println!("Reset template to default: {name}"),
            Err(e) => eprintln!("{e}"),
        },
    }
    Ok(())
}
