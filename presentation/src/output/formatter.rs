//! Output formatter trait

use council_application::SequenceOutcome;

/// Trait for formatting sequence results
pub trait OutputFormatter {
    /// Format every decision of the run and the composite
    fn format(&self, outcome: &SequenceOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &SequenceOutcome) -> String;

    /// Format the composite only (concise output)
    fn format_prompt_only(&self, outcome: &SequenceOutcome) -> String;
}
