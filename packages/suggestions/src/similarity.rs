//! Normalized text similarity for suggestion deduplication.
//!
//! Scores live in `[0.0, 1.0]`: `1.0` means the two texts normalize to the
//! same thing, `0.0` means nothing in common. The scorer is token-order
//! insensitive, so "restart the service" and "the service restart" compare
//! as equal, and a restatement that merely drops filler words scores at the
//! top of the range.

use std::collections::BTreeSet;

/// Canonical form used for every comparison: surrounding whitespace removed,
/// case folded.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Levenshtein edit distance between two strings, counted in characters.
///
/// Classic two-row dynamic program: `distance[i][j]` is the minimum number of
/// single-character insertions, deletions, and substitutions that turn the
/// first `i` characters of `a` into the first `j` characters of `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            let deletion = previous[j + 1] + 1;
            let insertion = current[j] + 1;
            current[j + 1] = substitution.min(deletion).min(insertion);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Edit similarity: `1 - distance / max_len`, so equal strings score `1.0`
/// and strings sharing no characters score `0.0`. Two empty strings are
/// treated as identical.
pub fn edit_ratio(a: &str, b: &str) -> f32 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f32 / max_len as f32
}

/// Token-set similarity between two normalized texts.
///
/// Splits both sides into whitespace tokens and compares the shared-token
/// core against each side's full token set, taking the best edit ratio of
/// the three pairings. A text whose tokens are a subset of the other's
/// scores `1.0`, which is what makes dropped-filler restatements land at the
/// top of the range.
pub fn token_set_ratio(a: &str, b: &str) -> f32 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return edit_ratio(a, b);
    }

    let shared: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    let base = shared.join(" ");
    let combined_a = join_nonempty(&base, &only_a.join(" "));
    let combined_b = join_nonempty(&base, &only_b.join(" "));

    edit_ratio(&base, &combined_a)
        .max(edit_ratio(&base, &combined_b))
        .max(edit_ratio(&combined_a, &combined_b))
}

fn join_nonempty(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        _ => format!("{left} {right}"),
    }
}

/// Scores `needle` against every candidate and returns the index and score
/// of the closest one. `None` when `candidates` is empty.
pub fn best_match(needle: &str, candidates: &[String]) -> Option<(usize, f32)> {
    candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| (idx, token_set_ratio(needle, candidate)))
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
}


#[cfg(test)]
mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_scores_stay_in_unit_range(a in ".{0,40}", b in ".{0,40}") {
            let score = token_set_ratio(&normalize(&a), &normalize(&b));
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn test_scoring_is_symmetric(a in ".{0,40}", b in ".{0,40}") {
            let a = normalize(&a);
            let b = normalize(&b);
            prop_assert_eq!(token_set_ratio(&a, &b), token_set_ratio(&b, &a));
        }

        #[test]
        fn test_text_matches_itself(a in ".{0,40}") {
            let a = normalize(&a);
            prop_assert_eq!(token_set_ratio(&a, &a), 1.0);
        }
    }
}
