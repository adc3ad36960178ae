//! Console output formatter for sequence results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_application::SequenceOutcome;
use council_domain::{DecisionRecord, DecisionSequence, DeckKind, RecipeCatalog};

/// Formats sequence results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for all console output.
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format every decision of the run and the composite
    pub fn format(outcome: &SequenceOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&format!("Story Council: {}", outcome.title)));
        output.push('\n');

        for record in &outcome.trace {
            output.push_str(&Self::format_record(record));
        }

        output.push_str(&Self::section_header("Final Prompt"));
        output.push_str(&format!("\n{}\n", outcome.composite.trim().bold()));
        output.push_str(&Self::footer());

        output
    }

    /// One decision: candidates, each debate round, votes, and the winner.
    pub fn format_record(record: &DecisionRecord) -> String {
        let mut output = Self::section_header(&record.decision().label());
        output.push_str(&format!("{}\n", record.candidates().numbered()));

        for round in record.debates() {
            output.push_str(&format!(
                "\n{}\n",
                format!("── Round {} ──", round.round).yellow().bold()
            ));
            for opinion in &round.opinions {
                output.push_str(&format!("{} {}\n", format!("{}:", opinion.evaluator).cyan(), opinion.text));
            }
        }

        output.push_str(&format!("\n{}\n", "Votes:".cyan().bold()));
        for vote in record.votes() {
            output.push_str(&format!("  {} -> {}\n", vote.evaluator, vote.voted_card));
        }

        let tie_note = match record.tied_candidates() {
            Some(tied) => format!(
                " (tie between {} broken by the supervisor)",
                tied.iter().map(|c| c.label()).collect::<Vec<_>>().join(", ")
            ),
            None => String::new(),
        };
        output.push_str(&format!(
            "{} {} ({} votes){}\n",
            ">>> Winner:".green().bold(),
            record.winner().label().bold(),
            record.winner_votes(),
            tie_note
        ));

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &SequenceOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the composite only (concise output)
    pub fn format_prompt_only(outcome: &SequenceOutcome) -> String {
        format!(
            "{}\n{}\n",
            format!("=== {} ===", outcome.title).cyan().bold(),
            outcome.composite.trim()
        )
    }

    /// Recipes grouped by deck, for `--list-recipes`.
    pub fn format_recipe_list(catalog: &RecipeCatalog) -> String {
        let mut output = String::new();
        for deck in DeckKind::all() {
            let recipes = catalog.for_deck(*deck);
            if recipes.is_empty() {
                continue;
            }
            output.push_str(&format!("{}\n", deck.as_str().cyan().bold()));
            for recipe in recipes {
                output.push_str(&Self::recipe_line(recipe.as_ref()));
            }
            output.push('\n');
        }
        output
    }

    fn recipe_line(recipe: &dyn DecisionSequence) -> String {
        format!(
            "  {:<22} {} ({} decisions)\n",
            recipe.name().bold(),
            recipe.description(),
            recipe.decisions().len()
        )
    }

    /// A recipe that failed inside a batch.
    pub fn format_failure(recipe: &str, error: &str) -> String {
        format!("{} {}: {}\n", "x".red().bold(), recipe.bold(), error)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, outcome: &SequenceOutcome) -> String {
        Self::format(outcome)
    }

    fn format_json(&self, outcome: &SequenceOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_prompt_only(&self, outcome: &SequenceOutcome) -> String {
        Self::format_prompt_only(outcome)
    }
}
