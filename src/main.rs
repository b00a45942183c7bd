// This is the entry point of the bot.
//
// **Architecture Overview:**
// - `core/` = Command model, sync planning, access rules, booru and alert logic (platform-agnostic)
// - `infra/` = Implementations of core traits (Sakugabooru and Resend HTTP clients)
// - `discord/` = Discord-specific adapters (slash commands, gateway events, registration)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Either register commands once (`lum_bot register`) or run the gateway client

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use std::sync::Arc;

use anyhow::Context as _;
use serenity::all::{ApplicationId, Client, GatewayIntents, Http};

use crate::core::access::AccessPolicy;
use crate::core::alerts::AlertService;
use crate::core::booru::BooruService;
use crate::core::config::BotConfig;
use crate::discord::commands::{local_commands, CommandCatalog};
use crate::discord::data::ShardManagerContainer;
use crate::discord::events::bot_events;
use crate::discord::gateway::GatewayHandler;
use crate::discord::registration::{overwrite_commands, CommandScope};
use crate::discord::Data;
use crate::infra::alerts::ResendClient;
use crate::infra::booru::SakugabooruClient;

/// One-shot registration: replace every command in the scope without opening
/// a gateway session.
async fn register_commands(config: &BotConfig, catalog: &CommandCatalog) -> anyhow::Result<()> {
    let client_id = config.client_id.context("CLIENT_ID is not defined")?;

    let http = Http::new(&config.discord_token);
    http.set_application_id(ApplicationId::new(client_id));

    let scope = CommandScope::from_guild_id(config.guild_id);
    tracing::info!(?scope, "Started refreshing application (/) commands.");

    let registered = overwrite_commands(&http, scope, catalog)
        .await
        .context("Failed to overwrite application commands")?;

    tracing::info!(
        registered,
        "Successfully reloaded application (/) commands."
    );
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = BotConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let commands = local_commands().unwrap_or_else(|e| {
        tracing::error!("Failed to load commands: {}", e);
        std::process::exit(1);
    });
    tracing::info!("Loaded {} local commands", commands.len());

    if std::env::args().nth(1).as_deref() == Some("register") {
        if let Err(e) = register_commands(&config, &commands).await {
            tracing::error!("{:#}", e);
            std::process::exit(1);
        }
        return;
    }

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let booru_client = SakugabooruClient::new(config.booru.base_url.clone()).unwrap_or_else(|e| {
        tracing::error!("Failed to create booru client: {}", e);
        std::process::exit(1);
    });
    let booru = Arc::new(BooruService::new(
        booru_client,
        config.booru.tags.clone(),
        config.booru.max_page,
        config.booru.page_size,
    ));

    let alerts = Arc::new(AlertService::new(
        config.alerts.as_ref().map(ResendClient::new),
    ));
    if !alerts.is_enabled() {
        tracing::warn!("Error alerts disabled: RESEND_API_KEY or ALERT_DESTINATION not set");
    }

    if config.guild_id.is_none() {
        tracing::warn!("GUILD_ID not set, registering global commands");
    }

    let data = Arc::new(Data {
        access: AccessPolicy::new(config.dev_id, config.guild_id),
        commands,
        booru,
        alerts: Arc::clone(&alerts),
        config,
    });

    // ========================================================================
    // GATEWAY CLIENT
    // ========================================================================

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let handler = GatewayHandler::new(Arc::clone(&data), bot_events());

    let mut client = match Client::builder(&data.config.discord_token, intents)
        .event_handler(handler)
        .await
    {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Error creating client: {}", e);
            alerts.notify(&e, Some("client setup")).await;
            std::process::exit(1);
        }
    };

    {
        let mut type_map = client.data.write().await;
        type_map.insert::<ShardManagerContainer>(Arc::clone(&client.shard_manager));
    }

    tracing::info!("Starting bot...");
    if let Err(e) = client.start().await {
        tracing::error!("Client error: {}", e);
        alerts.notify(&e, Some("gateway session")).await;
        std::process::exit(1);
    }
}
