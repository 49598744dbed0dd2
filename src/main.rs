use chiphouse_bot::commands::wordle::words::WordClient;
use chiphouse_bot::handler::Handler;
use chiphouse_bot::{database, sweep, AppState};
use dotenv::dotenv;
use serenity::prelude::*;
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let token = env::var("DISCORD_TOKEN").expect("DISCORD_TOKEN must be set");
    let wordnik_key = env::var("WORDNIK_API_KEY").expect("WORDNIK_API_KEY must be set");
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://user_data.db".to_string());
    let prefix = env::var("COMMAND_PREFIX").unwrap_or_else(|_| ".".to_string());

    let pool = database::init::connect(&database_url)
        .await
        .expect("failed to open database");
    database::init::run_migrations(&pool)
        .await
        .expect("failed to run migrations");
    tracing::info!(target: "main", %database_url, "database ready");

    sweep::spawn(pool.clone());

    let app = Arc::new(AppState::new(pool, WordClient::new(wordnik_key), prefix));

    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(&token, intents)
        .event_handler(Handler)
        .await
        .expect("failed to create client");
    client.data.write().await.insert::<AppState>(app);

    if let Err(e) = client.start().await {
        tracing::error!(target: "main", error = ?e, "client exited with error");
    }
}
