//! Command line and environment configuration.
//!
//! Every option has a flag and an environment variable. Only presence is
//! checked here; the OpenAI key is required once a generation call is made.
//!
//! ```rust
//! use aura::{AuraConfig, Command};
//! use clap::Parser;
//!
//! let config = AuraConfig::parse_from(["aura", "--bind", "0.0.0.0:9000", "ask", "I can't sleep"]);
//! assert_eq!(config.bind, "0.0.0.0:9000");
//! assert!(matches!(config.command(), Command::Ask { .. }));
//! ```

use std::path::PathBuf;
use std::time::Duration;

use achat::ChatSession;
use aprovider::adapters::openai::DEFAULT_OPENAI_BASE_URL;
use arag::DEFAULT_TOP_K;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

pub const DEFAULT_EMBEDDING_BASE_URL: &str = "http://127.0.0.1:8080/v1";
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
pub const DEFAULT_DATASET: &str = "data/psychology-10k.jsonl";
pub const DEFAULT_DATA_FILE: &str = "data/user_stats.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_USER_ID: &str = "student_123";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 90;

#[derive(Debug, Clone, Parser)]
#[command(name = "aura", version, about = "Mental health support assistant for students")]
pub struct AuraConfig {
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "AURA_OPENAI_BASE_URL", default_value = DEFAULT_OPENAI_BASE_URL)]
    pub openai_base_url: String,

    /// OpenAI-compatible embeddings server.
    #[arg(long, env = "AURA_EMBEDDING_BASE_URL", default_value = DEFAULT_EMBEDDING_BASE_URL)]
    pub embedding_base_url: String,

    #[arg(long, env = "AURA_EMBEDDING_MODEL", default_value = DEFAULT_EMBEDDING_MODEL)]
    pub embedding_model: String,

    #[arg(long, env = "AURA_EMBEDDING_API_KEY", hide_env_values = true)]
    pub embedding_api_key: Option<String>,

    /// Q&A dataset, JSON array or JSON lines of `{question, answer}`.
    #[arg(long, env = "AURA_DATASET", default_value = DEFAULT_DATASET)]
    pub dataset: PathBuf,

    /// Local wellbeing file, served by the API and used as the CLI fallback.
    #[arg(long, env = "AURA_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    #[arg(long, env = "AURA_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    #[arg(long, env = "AURA_CORS_ORIGIN", default_value = aserver::DEFAULT_CORS_ORIGIN)]
    pub cors_origin: String,

    /// Wellbeing API used by `stats` and `checkin`.
    #[arg(long, env = "AURA_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[arg(long, env = "AURA_USER_ID", default_value = DEFAULT_USER_ID)]
    pub user_id: String,

    #[arg(long, env = "AURA_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,

    /// Knowledge items retrieved per question, for `serve` and `ask`.
    #[arg(long, global = true, env = "AURA_TOP_K", default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Overrides the conversational model for `serve` sessions and `chat`.
    #[arg(long, env = "AURA_CHAT_MODEL")]
    pub chat_model: Option<String>,

    /// Filter directive used when `RUST_LOG` is unset.
    #[arg(long, env = "AURA_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run the HTTP API (default).
    Serve,
    /// Answer one question from the knowledge base.
    Ask { query: String },
    /// Talk to Aura on stdin; `/reset` clears the conversation, `exit` quits.
    Chat {
        #[arg(long, default_value = "cli")]
        session: String,
    },
    /// Print the user's latest metrics and weekly averages.
    Stats,
    /// Record today's check-in (or `--date`).
    Checkin {
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        mood: u8,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        stress: u8,
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
        sleep: u8,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

impl AuraConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }

    /// Aura persona session, on `--chat-model` when given.
    pub fn chat_session(&self, id: &str) -> ChatSession {
        let session = ChatSession::aura(id);
        match &self.chat_model {
            Some(model) => session.with_model(model.clone()),
            None => session,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let config = AuraConfig::parse_from(["aura"]);
        assert_eq!(config.command(), Command::Serve);
    }

    #[test]
    fn flags_override_defaults() {
        let config = AuraConfig::parse_from([
            "aura",
            "--embedding-model",
            "bge-small",
            "--request-timeout-secs",
            "5",
            "--data-file",
            "/tmp/stats.json",
            "stats",
        ]);

        assert_eq!(config.embedding_model, "bge-small");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.data_file, PathBuf::from("/tmp/stats.json"));
        assert_eq!(config.command(), Command::Stats);
    }

    #[test]
    fn ask_takes_query_and_top_k() {
        let config = AuraConfig::parse_from(["aura", "ask", "How do I focus?", "--top-k", "5"]);
        assert_eq!(
            config.command(),
            Command::Ask {
                query: "How do I focus?".to_string(),
            }
        );
        assert_eq!(config.top_k, 5);
        assert_eq!(AuraConfig::parse_from(["aura"]).top_k, DEFAULT_TOP_K);
    }

    #[test]
    fn chat_model_reads_flag_or_defaults_to_persona_model() {
        assert_eq!(AuraConfig::parse_from(["aura"]).chat_model, None);

        let config = AuraConfig::parse_from(["aura", "--chat-model", "gpt-4o", "chat"]);
        assert_eq!(config.chat_model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.chat_session("cli").model, "gpt-4o");
    }

    #[test]
    fn checkin_rejects_out_of_range_metrics() {
        let error = AuraConfig::try_parse_from([
            "aura", "checkin", "--mood", "11", "--stress", "3", "--sleep", "7",
        ])
        .expect_err("mood above 10");
        assert_eq!(error.kind(), clap::error::ErrorKind::ValueValidation);

        let config = AuraConfig::parse_from([
            "aura", "checkin", "--mood", "6", "--stress", "3", "--sleep", "7", "--date",
            "2024-05-01",
        ]);
        assert_eq!(
            config.command(),
            Command::Checkin {
                mood: 6,
                stress: 3,
                sleep: 7,
                date: NaiveDate::from_ymd_opt(2024, 5, 1),
            }
        );
    }
}
