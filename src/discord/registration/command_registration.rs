// Slash command registration.
//
// Translates between the core command model and serenity's builders/models,
// then either diffs against what's registered (`sync_commands`, run on every
// ready) or replaces the whole set in one request (`overwrite_commands`).

use std::fmt;
use std::future::Future;

use serenity::all::{
    Command, CommandId, CommandOption as SerenityOption, CommandOptionType, CreateCommand,
    CreateCommandOption, GuildId, Http,
};

use crate::core::commands::{
    plan_sync, ChoiceValue, CommandDefinition, CommandOption, OptionChoice, OptionKind,
    RemoteCommand, SyncAction,
};
use crate::discord::commands::CommandCatalog;

/// Where commands are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandScope {
    Guild(GuildId),
    Global,
}

impl CommandScope {
    pub fn from_guild_id(guild_id: Option<u64>) -> Self {
        match guild_id {
            Some(id) => CommandScope::Guild(GuildId::new(id)),
            None => CommandScope::Global,
        }
    }
}

/// Counts of what a sync run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub edited: usize,
    pub deleted: usize,
    pub unchanged: usize,
    pub failed: usize,
}

fn option_type(kind: OptionKind) -> Option<CommandOptionType> {
    match kind {
        OptionKind::String => Some(CommandOptionType::String),
        OptionKind::Integer => Some(CommandOptionType::Integer),
        OptionKind::Boolean => Some(CommandOptionType::Boolean),
        OptionKind::User => Some(CommandOptionType::User),
        OptionKind::Channel => Some(CommandOptionType::Channel),
        OptionKind::Role => Some(CommandOptionType::Role),
        OptionKind::Mentionable => Some(CommandOptionType::Mentionable),
        OptionKind::Number => Some(CommandOptionType::Number),
        OptionKind::Attachment => Some(CommandOptionType::Attachment),
        OptionKind::Unsupported => None,
    }
}

fn option_kind(kind: CommandOptionType) -> OptionKind {
    match kind {
        CommandOptionType::String => OptionKind::String,
        CommandOptionType::Integer => OptionKind::Integer,
        CommandOptionType::Boolean => OptionKind::Boolean,
        CommandOptionType::User => OptionKind::User,
        CommandOptionType::Channel => OptionKind::Channel,
        CommandOptionType::Role => OptionKind::Role,
        CommandOptionType::Mentionable => OptionKind::Mentionable,
        CommandOptionType::Number => OptionKind::Number,
        CommandOptionType::Attachment => OptionKind::Attachment,
        _ => OptionKind::Unsupported,
    }
}

/// Read a registered choice value. The option's kind decides the numeric type,
/// Discord sends `2` for a number choice declared as `2.0`.
fn choice_value(kind: OptionKind, value: &serde_json::Value) -> Option<ChoiceValue> {
    match value {
        serde_json::Value::String(s) => Some(ChoiceValue::String(s.clone())),
        serde_json::Value::Number(n) if kind == OptionKind::Number => {
            n.as_f64().map(ChoiceValue::Number)
        }
        serde_json::Value::Number(n) => match n.as_i64().and_then(|i| i32::try_from(i).ok()) {
            Some(i) => Some(ChoiceValue::Integer(i)),
            None => n.as_f64().map(ChoiceValue::Number),
        },
        _ => None,
    }
}

fn to_create_option(option: &CommandOption) -> Option<CreateCommandOption> {
    let kind = option_type(option.kind)?;

    let mut builder = CreateCommandOption::new(kind, &option.name, &option.description)
        .required(option.required);

    for choice in &option.choices {
        builder = match &choice.value {
            ChoiceValue::String(value) => builder.add_string_choice(&choice.name, value),
            ChoiceValue::Integer(value) => builder.add_int_choice(&choice.name, (*value).into()),
            ChoiceValue::Number(value) => builder.add_number_choice(&choice.name, *value),
        };
    }

    Some(builder)
}

pub fn to_create_command(definition: &CommandDefinition) -> CreateCommand {
    let options = definition
        .options
        .iter()
        .filter_map(|option| {
            let built = to_create_option(option);
            if built.is_none() {
                tracing::warn!(
                    command = %definition.name,
                    option = %option.name,
                    "Skipping option with an unsupported type"
                );
            }
            built
        })
        .collect();

    CreateCommand::new(&definition.name)
        .description(&definition.description)
        .set_options(options)
}

fn to_remote_option(option: &SerenityOption) -> CommandOption {
    let kind = option_kind(option.kind);
    CommandOption {
        name: option.name.clone(),
        description: option.description.clone(),
        kind,
        required: option.required,
        choices: option
            .choices
            .iter()
            .filter_map(|choice| {
                choice_value(kind, &choice.value).map(|value| OptionChoice {
                    name: choice.name.clone(),
                    value,
                })
            })
            .collect(),
    }
}

pub fn to_remote_command(command: &Command) -> RemoteCommand {
    RemoteCommand {
        id: command.id.get(),
        name: command.name.clone(),
        description: command.description.clone(),
        options: command.options.iter().map(to_remote_option).collect(),
    }
}

pub async fn fetch_remote_commands(
    http: &Http,
    scope: CommandScope,
) -> Result<Vec<Command>, serenity::Error> {
    match scope {
        CommandScope::Guild(guild_id) => guild_id.get_commands(http).await,
        CommandScope::Global => Command::get_global_commands(http).await,
    }
}

async fn apply_action(
    http: &Http,
    scope: CommandScope,
    action: &SyncAction,
) -> Result<(), serenity::Error> {
    match (action, scope) {
        (SyncAction::Create { definition }, CommandScope::Guild(guild_id)) => {
            guild_id
                .create_command(http, to_create_command(definition))
                .await?;
        }
        (SyncAction::Create { definition }, CommandScope::Global) => {
            Command::create_global_command(http, to_create_command(definition)).await?;
        }
        (SyncAction::Edit { id, definition }, CommandScope::Guild(guild_id)) => {
            guild_id
                .edit_command(http, CommandId::new(*id), to_create_command(definition))
                .await?;
        }
        (SyncAction::Edit { id, definition }, CommandScope::Global) => {
            Command::edit_global_command(http, CommandId::new(*id), to_create_command(definition))
                .await?;
        }
        (SyncAction::Delete { id, .. }, CommandScope::Guild(guild_id)) => {
            guild_id.delete_command(http, CommandId::new(*id)).await?;
        }
        (SyncAction::Delete { id, .. }, CommandScope::Global) => {
            Command::delete_global_command(http, CommandId::new(*id)).await?;
        }
        (SyncAction::Unchanged { .. }, _) => {}
    }
    Ok(())
}

/// Run every planned action through `apply`, in order. A failed action is
/// logged and counted, the rest still run.
pub async fn apply_actions<'a, F, Fut, E>(actions: &'a [SyncAction], mut apply: F) -> SyncReport
where
    F: FnMut(&'a SyncAction) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: fmt::Display,
{
    let mut report = SyncReport::default();

    for action in actions {
        let name = action.command_name();
        if let Err(e) = apply(action).await {
            tracing::error!(command = name, "Failed to apply command change: {}", e);
            report.failed += 1;
            continue;
        }

        match action {
            SyncAction::Create { .. } => {
                tracing::info!(command = name, "Created command");
                report.created += 1;
            }
            SyncAction::Edit { .. } => {
                tracing::info!(command = name, "Updated command");
                report.edited += 1;
            }
            SyncAction::Delete { .. } => {
                tracing::info!(command = name, "Deleted command");
                report.deleted += 1;
            }
            SyncAction::Unchanged { .. } => {
                tracing::debug!(command = name, "Command already up to date");
                report.unchanged += 1;
            }
        }
    }

    report
}

/// Bring the registered commands in line with the catalog.
///
/// Only a failure to list the registered commands is returned. Individual
/// create/edit/delete failures are logged and counted so one bad command
/// doesn't block the rest.
pub async fn sync_commands(
    http: &Http,
    scope: CommandScope,
    catalog: &CommandCatalog,
) -> Result<SyncReport, serenity::Error> {
    tracing::info!(?scope, "Started refreshing application (/) commands.");

    let remote: Vec<RemoteCommand> = fetch_remote_commands(http, scope)
        .await?
        .iter()
        .map(to_remote_command)
        .collect();

    let actions = plan_sync(&catalog.definitions(), &remote);
    let report = apply_actions(&actions, |action| apply_action(http, scope, action)).await;

    tracing::info!(?report, "Successfully reloaded application (/) commands.");
    Ok(report)
}

/// Replace every registered command in the scope with the catalog's
/// non-deleted definitions, in a single bulk request.
pub async fn overwrite_commands(
    http: &Http,
    scope: CommandScope,
    catalog: &CommandCatalog,
) -> Result<usize, serenity::Error> {
    let builders: Vec<CreateCommand> = catalog
        .definitions()
        .iter()
        .filter(|definition| !definition.deleted)
        .map(to_create_command)
        .collect();

    let registered = match scope {
        CommandScope::Guild(guild_id) => guild_id.set_commands(http, builders).await?,
        CommandScope::Global => Command::set_global_commands(http, builders).await?,
    };

    Ok(registered.len())
}
