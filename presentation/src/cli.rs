use application::{FortuneResolver, FortuneTeller, ResolverSettings};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use domain::{FortuneMode, SessionState};
use infrastructure::config::Config;
use infrastructure::gemini_client::GeminiClient;
use infrastructure::state_store::SqliteStateStore;
use shared::confirmation::{ask_confirmation, confirm_unless_assumed};
use shared::types::Result;
use tracing::debug;

use crate::pacing::TerminalPacer;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Motion {
    Reduced,
    Full,
}

/// Ask the Magic 8-Ball a question.
#[derive(Parser, Debug)]
#[command(name = "fortune_teller")]
#[command(
    about = "Magic 8-Ball fortune teller with optional Gemini-powered answers",
    long_about = None
)]
pub struct Cli {
    /// Keep asking questions until you quit
    #[arg(long)]
    pub play: bool,

    /// Show past fortunes
    #[arg(long)]
    pub history: bool,

    /// Show at most N history entries
    #[arg(long, value_name = "N", requires = "history")]
    pub limit: Option<usize>,

    /// Delete all past fortunes
    #[arg(long)]
    pub clear_history: bool,

    /// Do not ask for confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Switch fortune mode (classic or ai); remembered between runs
    #[arg(long, value_name = "MODE")]
    pub mode: Option<FortuneMode>,

    /// Shorter shake animation
    #[arg(long, value_enum)]
    pub motion: Option<Motion>,

    /// Skip the shake animation entirely
    #[arg(long)]
    pub instant: bool,

    /// The question to ask (prompted for when empty)
    #[arg(trailing_var_arg = true)]
    pub question: Vec<String>,
}

pub struct CliApp {
    teller: FortuneTeller<GeminiClient, SqliteStateStore>,
}

impl CliApp {
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = SqliteStateStore::open(&config.store_path)?;
        let provider = GeminiClient::from_config(config)?;
        let settings = ResolverSettings::default().with_timeout(config.request_timeout);
        let resolver = FortuneResolver::new(provider, settings);
        Ok(Self {
            teller: FortuneTeller::new(resolver, store),
        })
    }

    pub async fn run(&mut self, cli: Cli) -> Result<()> {
        let question = cli.question.join(" ");
        let mut settings_only = false;

        if let Some(mode) = cli.mode {
            self.teller.set_mode(mode)?;
            println!("Mode: {}", mode.label());
            settings_only = true;
        }
        if let Some(motion) = cli.motion {
            self.teller.set_reduced_motion(motion == Motion::Reduced)?;
            let label = if motion == Motion::Reduced { "on" } else { "off" };
            println!("Reduced motion: {label}");
            settings_only = true;
        }

        let pacer = TerminalPacer::new(!cli.instant);
        debug!(mode = %self.teller.mode(), ai_ready = self.teller.has_provider(), "starting");
        if cli.clear_history {
            self.handle_clear_history(cli.yes)
        } else if cli.history {
            self.handle_history(cli.limit);
            Ok(())
        } else if cli.play {
            self.handle_play(&pacer).await
        } else if settings_only && question.trim().is_empty() {
            Ok(())
        } else {
            self.handle_ask(&question, &pacer).await
        }
    }

    async fn handle_ask(&mut self, question: &str, pacer: &TerminalPacer) -> Result<()> {
        let question = if question.trim().is_empty() {
            prompt_question()?
        } else {
            question.to_string()
        };
        if question.trim().is_empty() {
            println!("{}", "Type a question first.".yellow());
            return Ok(());
        }
        self.ask_once(&question, pacer).await;
        self.teller.reset();
        Ok(())
    }

    async fn handle_play(&mut self, pacer: &TerminalPacer) -> Result<()> {
        println!(
            "{} Type 'exit' to quit.",
            format!("Mode: {}.", self.teller.mode().label()).dimmed()
        );
        loop {
            let question = prompt_question()?;
            let trimmed = question.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
                break;
            }
            self.ask_once(trimmed, pacer).await;
            let again = ask_confirmation(SessionState::Answered.action_label(), true)?;
            self.teller.ask_another();
            if !again {
                break;
            }
        }
        Ok(())
    }

    async fn ask_once(&mut self, question: &str, pacer: &TerminalPacer) {
        if let Some(outcome) = self.teller.shake(question, pacer).await {
            render::print_answer(&outcome.record.answer);
            if let Some(issue) = outcome.issue {
                render::print_issue(issue);
            }
        }
    }

    fn handle_history(&self, limit: Option<usize>) {
        println!("{}", render::format_history(self.teller.history(), limit));
    }

    fn handle_clear_history(&mut self, assume_yes: bool) -> Result<()> {
        let count = self.teller.history().len();
        if count == 0 {
            println!("History is already empty.");
            return Ok(());
        }
        if !confirm_unless_assumed(assume_yes, &format!("Delete {count} saved fortunes?"))? {
            println!("{}", "Kept your history.".yellow());
            return Ok(());
        }
        self.teller.clear_history()?;
        println!("{}", "History cleared.".green());
        Ok(())
    }
}

fn prompt_question() -> Result<String> {
    let question: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Ask the Magic 8-Ball")
        .allow_empty(true)
        .interact_text()?;
    Ok(question)
}
