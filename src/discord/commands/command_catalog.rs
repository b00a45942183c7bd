// Slash command catalog.
//
// Commands live in one file each, grouped into category folders
// (`misc/`, `booru/`). Adding a command means adding its file here and
// listing it under its category in `local_commands`.

#[path = "misc/ping.rs"]
pub mod ping;

#[path = "booru/booru_reply.rs"]
pub mod booru_reply;

#[path = "booru/lum.rs"]
pub mod lum;

#[path = "booru/sakugabooru.rs"]
pub mod sakugabooru;

use async_trait::async_trait;
use serenity::all::{CommandInteraction, Context};

use crate::core::commands::CommandDefinition;
use crate::discord::{Data, Error};

/// A slash command: its registration data plus the code that runs it.
#[async_trait]
pub trait SlashCommand: Send + Sync {
    fn definition(&self) -> CommandDefinition;

    async fn run(
        &self,
        ctx: &Context,
        interaction: &CommandInteraction,
        data: &Data,
    ) -> Result<(), Error>;
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Command category {0} has no commands")]
    EmptyCategory(&'static str),
    #[error("Command {0} is defined more than once")]
    Duplicate(String),
    #[error("No local commands found")]
    Empty,
}

pub struct CatalogEntry {
    category: &'static str,
    definition: CommandDefinition,
    command: Box<dyn SlashCommand>,
}

impl CatalogEntry {
    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn definition(&self) -> &CommandDefinition {
        &self.definition
    }

    pub fn command(&self) -> &dyn SlashCommand {
        self.command.as_ref()
    }
}

pub struct CommandCatalog {
    entries: Vec<CatalogEntry>,
}

impl CommandCatalog {
    pub fn builder() -> CommandCatalogBuilder {
        CommandCatalogBuilder {
            categories: Vec::new(),
        }
    }

    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.definition.name == name)
    }

    /// Every definition in catalog order, including ones marked deleted.
    pub fn definitions(&self) -> Vec<CommandDefinition> {
        self.entries.iter().map(|e| e.definition.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

pub struct CommandCatalogBuilder {
    categories: Vec<(&'static str, Vec<Box<dyn SlashCommand>>)>,
}

impl CommandCatalogBuilder {
    pub fn category(mut self, name: &'static str, commands: Vec<Box<dyn SlashCommand>>) -> Self {
        self.categories.push((name, commands));
        self
    }

    pub fn build(self) -> Result<CommandCatalog, CatalogError> {
        let mut entries: Vec<CatalogEntry> = Vec::new();

        for (category, commands) in self.categories {
            if commands.is_empty() {
                return Err(CatalogError::EmptyCategory(category));
            }
            tracing::info!("{}: {} command files found", category, commands.len());

            for command in commands {
                let definition = command.definition();
                if entries.iter().any(|e| e.definition.name == definition.name) {
                    return Err(CatalogError::Duplicate(definition.name));
                }
                tracing::debug!(category, command = %definition.name, "Loaded command");
                entries.push(CatalogEntry {
                    category,
                    definition,
                    command,
                });
            }
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(CommandCatalog { entries })
    }
}

/// The bot's own commands.
pub fn local_commands() -> Result<CommandCatalog, CatalogError> {
    CommandCatalog::builder()
        .category("misc", vec![Box::new(ping::Ping)])
        .category(
            "booru",
            vec![Box::new(lum::Lum), Box::new(sakugabooru::Sakugabooru)],
        )
        .build()
}
