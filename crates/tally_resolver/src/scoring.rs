//! Similarity scoring between a query and a candidate label.
//!
//! Scores live in `[0, 100]`. The default [`FuzzyScorer`] takes the best of
//! several strategies so that typos, partial names and reordered tokens all
//! score well:
//!
//! - whole-string Damerau-Levenshtein similarity
//! - the same after sorting tokens (order-independent, capped at 95)
//! - best aligned substring when one side is much shorter (capped at 90)
//! - mean best per-token Jaro-Winkler similarity (capped at 85)

/// A narrow similarity capability.
///
/// Implementations must be deterministic and return a value in `[0, 100]`.
pub trait Scorer: Send + Sync {
    /// Scores how well `query` matches `label`.
    fn score(&self, query: &str, label: &str) -> f64;
}

/// Lower-cases, trims and collapses internal whitespace runs.
///
/// Punctuation is kept; names may legitimately contain it.
///
/// # Examples
///
/// ```
/// use tally_resolver::scoring::normalize;
///
/// assert_eq!(normalize("  John   O'Neil "), "john o'neil");
/// ```
pub fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

const TOKEN_SORT_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.9;
const PARTIAL_SCALE_LONG: f64 = 0.6;
const TOKEN_SCALE: f64 = 0.85;
// Below this length ratio partial alignment adds nothing over the full ratio
const PARTIAL_MIN_RATIO: f64 = 1.5;
const PARTIAL_LONG_RATIO: f64 = 8.0;

/// Default scorer built on `strsim`.
///
/// # Examples
///
/// ```
/// use tally_resolver::{FuzzyScorer, Scorer};
///
/// let scorer = FuzzyScorer;
/// assert_eq!(scorer.score("JOHN smith", "John Smith"), 100.0);
/// assert!(scorer.score("smith john", "John Smith") >= 90.0);
/// assert!(scorer.score("roomates", "Roommates") >= 70.0);
/// assert_eq!(scorer.score("", "John Smith"), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyScorer;

impl Scorer for FuzzyScorer {
    fn score(&self, query: &str, label: &str) -> f64 {
        let query = normalize(query);
        let label = normalize(label);
        if query.is_empty() || label.is_empty() {
            return 0.0;
        }
        if query == label {
            return 100.0;
        }

        let best = ratio(&query, &label)
            .max(token_sort_ratio(&query, &label) * TOKEN_SORT_SCALE)
            .max(partial_ratio(&query, &label))
            .max(token_ratio(&query, &label) * TOKEN_SCALE);

        // Two decimals keep results stable for display and comparison
        (best.clamp(0.0, 100.0) * 100.0).round() / 100.0
    }
}

fn ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_damerau_levenshtein(a, b) * 100.0
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split(' ').collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn partial_ratio(a: &str, b: &str) -> f64 {
    let (a_len, b_len) = (a.chars().count(), b.chars().count());
    let (shorter, longer, short_len, long_len) = if a_len <= b_len {
        (a, b, a_len, b_len)
    } else {
        (b, a, b_len, a_len)
    };

    let len_ratio = long_len as f64 / short_len as f64;
    if len_ratio < PARTIAL_MIN_RATIO {
        return 0.0;
    }
    let scale = if len_ratio >= PARTIAL_LONG_RATIO {
        PARTIAL_SCALE_LONG
    } else {
        PARTIAL_SCALE
    };

    if longer.contains(shorter) {
        return 100.0 * scale;
    }

    let chars: Vec<char> = longer.chars().collect();
    let best = chars
        .windows(short_len)
        .map(|window| {
            let window: String = window.iter().collect();
            strsim::normalized_damerau_levenshtein(shorter, &window)
        })
        .fold(0.0, f64::max);
    best * 100.0 * scale
}

fn token_ratio(query: &str, label: &str) -> f64 {
    let label_tokens: Vec<&str> = label.split(' ').collect();
    let query_tokens: Vec<&str> = query.split(' ').collect();

    let total: f64 = query_tokens
        .iter()
        .map(|q| {
            label_tokens
                .iter()
                .map(|l| strsim::jaro_winkler(q, l))
                .fold(0.0, f64::max)
        })
        .sum();
    total / query_tokens.len() as f64 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(q: &str, l: &str) -> f64 {
        FuzzyScorer.score(q, l)
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("\tTrip  to\nParis "), "trip to paris");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("Food & Drink"), "food & drink");
    }

    #[test]
    fn test_exact_and_case_only_matches() {
        assert_eq!(score("John Smith", "John Smith"), 100.0);
        assert!(score("john smith", "JOHN SMITH") >= 99.0);
        assert!(score(" john   smith ", "John Smith") >= 99.0);
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(score("", "John"), 0.0);
        assert_eq!(score("   ", "John"), 0.0);
        assert_eq!(score("John", ""), 0.0);
        assert_eq!(score("", ""), 0.0);
    }

    #[test]
    fn test_punctuation_is_significant() {
        assert!(score("o'neil", "O'Neil") >= 99.0);
        assert!(score("oneil", "O'Neil") < 100.0);
    }

    #[test]
    fn test_token_order_independent() {
        let reordered = score("Smith John", "John Smith");
        assert!(reordered >= 90.0, "got {reordered}");
        assert!(reordered < 100.0);
    }

    #[test]
    fn test_substring_high_but_below_exact() {
        let partial = score("jon", "Jonathan Lee");
        assert!(partial >= 80.0, "got {partial}");
        assert!(partial < 100.0);
    }

    #[test]
    fn test_prefix_of_token() {
        assert!(score("jon", "John Smith") >= 70.0);
    }

    #[test]
    fn test_degrades_with_edit_distance() {
        let exact = score("roommates", "Roommates");
        let one_typo = score("roomates", "Roommates");
        let two_typos = score("rmmates", "Roommates");
        let unrelated = score("zzz", "Roommates");

        assert!(exact > one_typo);
        assert!(one_typo > two_typos);
        assert!(two_typos > unrelated);
        assert!(one_typo >= 70.0);
        assert!(unrelated < 30.0);
    }

    #[test]
    fn test_short_query_against_long_label_is_damped() {
        // A single letter should not look like a strong match for a long label
        assert!(score("a", "Alexandra Richardson-Whitfield") < 70.0);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let pairs = [
            ("x", "y"),
            ("groceries", "Food and drink - Groceries"),
            ("utilities", "Home - Electricity"),
            ("a b c d e", "e"),
        ];
        for (q, l) in pairs {
            let s = score(q, l);
            assert!((0.0..=100.0).contains(&s), "{q} vs {l} = {s}");
        }
    }

    #[test]
    fn test_deterministic() {
        for _ in 0..10 {
            assert_eq!(score("jon", "John Smith"), score("jon", "John Smith"));
        }
    }
}
