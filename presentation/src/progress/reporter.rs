//! Progress reporting for sequence runs

use colored::Colorize;
use council_application::ports::progress::ProgressNotifier;
use council_domain::{CandidateSet, DecisionRecord, DecisionType, Opinion, RoundStage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during a sequence run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    sequence_bar: Mutex<Option<ProgressBar>>,
    stage_spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            sequence_bar: Mutex::new(None),
            stage_spinner: Mutex::new(None),
        }
    }

    fn sequence_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("  {spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn println(&self, line: impl AsRef<str>) {
        let _ = self.multi.println(line);
    }

    fn finish_spinner(&self) {
        if let Ok(mut spinner) = self.stage_spinner.lock()
            && let Some(pb) = spinner.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// One-line description of the stage a round is in.
pub fn stage_message(decision: &DecisionType, stage: &RoundStage) -> String {
    match stage {
        RoundStage::Opining { round } => format!("[{}] debating (round {})", decision.label(), round),
        RoundStage::Voting => format!("[{}] voting", decision.label()),
        RoundStage::Arbitrating => format!("[{}] breaking a tie", decision.label()),
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_sequence_start(&self, recipe: &str, total_decisions: usize) {
        let pb = self.multi.add(ProgressBar::new(total_decisions as u64));
        pb.set_style(Self::sequence_style());
        pb.set_prefix(recipe.to_string());
        pb.set_message("Drawing...");

        if let Ok(mut bar) = self.sequence_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_decision_start(
        &self,
        decision: &DecisionType,
        candidates: &CandidateSet,
        _position: usize,
        _total: usize,
    ) {
        if let Ok(bar) = self.sequence_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.set_message(decision.label());
        }

        let spinner = self.multi.add(ProgressBar::new_spinner());
        spinner.set_style(Self::spinner_style());
        spinner.set_prefix(decision.label());
        spinner.set_message(candidates.joined());
        spinner.enable_steady_tick(Duration::from_millis(120));
        if let Ok(mut slot) = self.stage_spinner.lock() {
            *slot = Some(spinner);
        }
    }

    fn on_stage_start(&self, decision: &DecisionType, stage: &RoundStage) {
        if let Ok(spinner) = self.stage_spinner.lock()
            && let Some(pb) = spinner.as_ref()
        {
            pb.set_message(stage_message(decision, stage));
        }
    }

    fn on_opinion(&self, _decision: &DecisionType, _round: usize, opinion: &Opinion) {
        if let Ok(spinner) = self.stage_spinner.lock()
            && let Some(pb) = spinner.as_ref()
        {
            pb.set_message(format!("{} has spoken", opinion.evaluator));
        }
    }

    fn on_decision_complete(&self, record: &DecisionRecord) {
        self.finish_spinner();
        for line in record.summary_lines() {
            self.println(line);
        }
        if let Ok(bar) = self.sequence_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            pb.inc(1);
        }
    }

    fn on_sequence_complete(&self, _recipe: &str, _composite: &str) {
        self.finish_spinner();
        if let Ok(mut bar) = self.sequence_bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!("{}", "complete!".green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_sequence_start(&self, recipe: &str, total_decisions: usize) {
        println!(
            "{} {} ({} decisions)",
            "->".cyan(),
            recipe.bold(),
            total_decisions
        );
    }

    fn on_decision_start(
        &self,
        decision: &DecisionType,
        candidates: &CandidateSet,
        position: usize,
        total: usize,
    ) {
        println!(
            "\n{} {}",
            format!("[{position}/{total}]").dimmed(),
            decision.label().bold()
        );
        println!("{}", candidates.numbered());
    }

    fn on_opinion(&self, _decision: &DecisionType, round: usize, opinion: &Opinion) {
        println!(
            "  {} {}: {}",
            format!("r{round}").dimmed(),
            opinion.evaluator.yellow(),
            opinion.text
        );
    }

    fn on_decision_complete(&self, record: &DecisionRecord) {
        for line in record.summary_lines() {
            println!("{}", line);
        }
    }
}
