//! Choice parsing for debate responses.
//!
//! Evaluators are free-text generators, so every parser here is lenient:
//! it scans for the first single digit character that names a valid
//! option (1-based) and falls back to a documented default otherwise.
//! No I/O, just text scanning.
//!
//! | Function | Use Case | Fallback |
//! |----------|----------|----------|
//! | [`parse_vote_index`] | Final vote | index 0 |
//! | [`parse_preferred_index`] | Opinion stance | `None` |
//! | [`parse_tiebreak_index`] | Arbitration | smallest tied index |

/// First digit character in `response` that maps to a 0-based index accepted by `accept`.
fn first_digit_where(response: &str, accept: impl Fn(usize) -> bool) -> Option<usize> {
    response
        .chars()
        .filter_map(|c| c.to_digit(10))
        .filter(|&d| d >= 1)
        .map(|d| d as usize - 1)
        .find(|&index| accept(index))
}

/// Parse the candidate an opinion argues for, if any.
///
/// Same scanning rule as [`parse_vote_index`] but without a default.
pub fn parse_preferred_index(response: &str, candidate_count: usize) -> Option<usize> {
    first_digit_where(response, |index| index < candidate_count)
}

/// Parse a vote response into a 0-based candidate index.
///
/// Takes the first digit character in `1..=candidate_count` and maps it to
/// `digit - 1`; digits outside the range are skipped. Returns 0 (the first
/// candidate) when no such digit exists, so voting never fails a round.
///
/// # Examples
///
/// ```
/// use council_domain::debate::parsing::parse_vote_index;
///
/// assert_eq!(parse_vote_index("I think the answer is option 3 because...", 4), 2);
/// assert_eq!(parse_vote_index("9 is too many, I pick 2", 4), 1);
/// assert_eq!(parse_vote_index("No preference", 4), 0);
/// ```
pub fn parse_vote_index(response: &str, candidate_count: usize) -> usize {
    parse_preferred_index(response, candidate_count).unwrap_or(0)
}

/// Parse an arbitration response strictly: `None` when no digit names a tied option.
pub fn parse_tiebreak_choice(response: &str, tied: &[usize]) -> Option<usize> {
    first_digit_where(response, |index| tied.contains(&index))
}

/// Parse an arbitration response into one of the tied indices.
///
/// Takes the first digit whose `digit - 1` is a member of `tied`. Falls back
/// to the smallest tied index (first tied candidate in original order).
///
/// # Examples
///
/// ```
/// use council_domain::debate::parsing::parse_tiebreak_index;
///
/// assert_eq!(parse_tiebreak_index("I choose option 2", &[0, 1]), 1);
/// assert_eq!(parse_tiebreak_index("Option 3, then 1", &[0, 1]), 0);
/// assert_eq!(parse_tiebreak_index("Both are strong", &[1, 3]), 1);
/// ```
pub fn parse_tiebreak_index(response: &str, tied: &[usize]) -> usize {
    parse_tiebreak_choice(response, tied)
        .or_else(|| tied.iter().copied().min())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse_vote_index Tests ====================

    #[test]
    fn test_single_digit_any_surrounding_text() {
        for n in 1..=4usize {
            for text in [
                format!("{n}"),
                format!("My vote: {n}."),
                format!("After much thought, card #{n} wins"),
                format!("**{n}**"),
            ] {
                assert_eq!(parse_vote_index(&text, 4), n - 1, "text: {text}");
            }
        }
    }

    #[test]
    fn test_first_in_range_digit_wins() {
        assert_eq!(parse_vote_index("2 or maybe 4", 4), 1);
        assert_eq!(parse_vote_index("0, 7, then 3", 4), 2);
    }

    #[test]
    fn test_default_to_first_candidate() {
        assert_eq!(parse_vote_index("", 4), 0);
        assert_eq!(parse_vote_index("the detective, obviously", 4), 0);
        assert_eq!(parse_vote_index("5 6 7 8 9 0", 4), 0);
    }

    #[test]
    fn test_small_candidate_sets() {
        assert_eq!(parse_vote_index("2", 1), 0);
        assert_eq!(parse_vote_index("2", 2), 1);
    }

    #[test]
    fn test_preferred_index_has_no_default() {
        assert_eq!(parse_preferred_index("I back card 3.", 4), Some(2));
        assert_eq!(parse_preferred_index("None of these work.", 4), None);
    }

    // ==================== parse_tiebreak_index Tests ====================

    #[test]
    fn test_tiebreak_picks_tied_member() {
        assert_eq!(parse_tiebreak_index("I choose option 2", &[0, 1]), 1);
        assert_eq!(parse_tiebreak_index("4", &[1, 3]), 3);
    }

    #[test]
    fn test_tiebreak_skips_untied_digits() {
        assert_eq!(parse_tiebreak_index("Not 1, not 2: option 4", &[2, 3]), 3);
    }

    #[test]
    fn test_tiebreak_fallback_is_min() {
        assert_eq!(parse_tiebreak_index("Both are strong", &[0, 1]), 0);
        assert_eq!(parse_tiebreak_index("pick 1", &[3, 2]), 2);
        assert_eq!(parse_tiebreak_choice("pick 1", &[3, 2]), None);
    }
}
