//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for sequence results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every decision with its debate, votes and winner
    Full,
    /// Only the final composite prompt
    Prompt,
    /// JSON output
    Json,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => council_domain::OutputFormat::Full,
            OutputFormat::Prompt => council_domain::OutputFormat::Prompt,
            OutputFormat::Json => council_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for story-council
#[derive(Parser, Debug)]
#[command(name = "story-council")]
#[command(author, version, about = "Story Council - Biased LLM evaluators debate and vote on story cards")]
#[command(long_about = r#"
Story Council builds story prompts one card at a time. For every card slot,
four biased evaluators (PLACER, ROTATOR, CRITIC, SYNTHESIZER) debate a
random draw of candidates, then vote. Ties go to a neutral SUPERVISOR.
Each winner briefs the following rounds.

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/story-council/config.toml   Global config

Example:
  story-council --recipe story_seed
  story-council -r circle_of_fate --rounds 3 --parallel
  story-council --deck-batch deck_of_worlds -o json
  story-council --list-recipes
"#)]
pub struct Cli {
    /// Recipe to run (can be specified multiple times)
    #[arg(short, long, value_name = "NAME")]
    pub recipe: Vec<String>,

    /// Run every built-in recipe of a deck (story_engine, deck_of_worlds)
    #[arg(long, value_name = "DECK")]
    pub deck_batch: Option<String>,

    /// List available recipes and exit
    #[arg(long)]
    pub list_recipes: bool,

    /// Model for every evaluator and the arbitrator
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Opinion rounds before voting
    #[arg(long, value_name = "N")]
    pub rounds: Option<usize>,

    /// Candidates drawn per decision
    #[arg(long, value_name = "N")]
    pub candidates: Option<usize>,

    /// Per-call timeout in seconds (0 disables)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Query evaluators concurrently within each stage
    #[arg(long)]
    pub parallel: bool,

    /// Fail a tie when the arbitrator names no tied candidate
    #[arg(long)]
    pub strict_arbitration: bool,

    /// Seed for reproducible draws
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Do not write the JSON archive
    #[arg(long)]
    pub no_archive: bool,

    /// Write every decision event to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub conversation_log: Option<PathBuf>,

    /// Also write diagnostic logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Recipes to run, in order; `story_seed` when nothing was asked for.
    pub fn requested_recipes(&self) -> Vec<String> {
        if self.recipe.is_empty() && self.deck_batch.is_none() {
            vec!["story_seed".to_string()]
        } else {
            self.recipe.clone()
        }
    }
}
