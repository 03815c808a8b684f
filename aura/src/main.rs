use anyhow::{Context, Result};
use aura::{AuraConfig, AuraRuntime, Command, UserStats, WellbeingEntry};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AuraConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    match config.command() {
        Command::Serve => serve(&config).await,
        Command::Ask { query } => ask(&config, &query).await,
        Command::Chat { session } => chat(&config, &session).await,
        Command::Stats => stats(&config).await,
        Command::Checkin {
            mood,
            stress,
            sleep,
            date,
        } => checkin(&config, mood, stress, sleep, date).await,
    }
}

async fn serve(config: &AuraConfig) -> Result<()> {
    let runtime = AuraRuntime::new(config)?;
    let state = runtime
        .app_state(config)
        .await
        .context("failed to build knowledge index")?;

    info!(
        bind = %config.bind,
        knowledge_items = state.knowledge_items(),
        top_k = config.top_k,
        "starting aura api"
    );
    aserver::serve(&config.bind, state, &config.cors_origin).await?;
    Ok(())
}

async fn ask(config: &AuraConfig, query: &str) -> Result<()> {
    let runtime = AuraRuntime::new(config)?;
    let retrieval = runtime.retrieval_service(config).await?;
    let answer = retrieval.answer(query, config.top_k).await?;
    debug!(sources = answer.sources.len(), "answered from knowledge base");

    println!("{}", answer.answer);
    Ok(())
}

async fn chat(config: &AuraConfig, session_id: &str) -> Result<()> {
    let runtime = AuraRuntime::new(config)?;
    let service = runtime.chat_service();
    let session = config.chat_session(session_id);
    info!(session = session_id, model = %session.model, "chat session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        stdout.write_all(b"you> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        match input {
            "" => continue,
            "exit" | "quit" => break,
            "/reset" => {
                service.reset(&session).await?;
                println!("(conversation cleared)");
                continue;
            }
            _ => {}
        }

        let reply = service.respond(&session, input).await;
        println!("aura> {}", reply.text());
    }

    Ok(())
}

async fn stats(config: &AuraConfig) -> Result<()> {
    let store = aura::wellbeing_store(config)?;
    let (stats, source) = store.stats_with_source(&config.user_id).await?;

    println!("user: {} (source: {})", config.user_id, source.as_str());
    print_stats(&stats);
    Ok(())
}

fn print_stats(stats: &UserStats) {
    println!(
        "latest  mood {}/10  stress {}/10  sleep {}/10",
        stats.latest.mood, stats.latest.stress, stats.latest.sleep
    );
    if stats.series.is_empty() {
        println!("no check-ins yet");
        return;
    }

    println!("{:<10} {:>6} {:>6} {:>6}", "week", "mood", "stress", "sleep");
    for week in &stats.series {
        println!(
            "{:<10} {:>6.2} {:>6.2} {:>6.2}",
            week.week, week.mood, week.stress, week.sleep
        );
    }
}

async fn checkin(
    config: &AuraConfig,
    mood: u8,
    stress: u8,
    sleep: u8,
    date: Option<NaiveDate>,
) -> Result<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let entry = WellbeingEntry::new(config.user_id.clone(), date, mood, stress, sleep)?;
    let store = aura::wellbeing_store(config)?;
    let source = store.record_with_source(entry).await?;

    println!("saved check-in for {date} ({})", source.as_str());
    Ok(())
}
