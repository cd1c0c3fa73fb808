//! Fuzzy text similarity for search.

use std::collections::BTreeSet;

/// Scores how well a query matches a text, from 0 to 100.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, text: &str, query: &str) -> f64;
}

/// Token-set ratio: compares the shared and differing word sets of both
/// strings, so word order and repeated words do not matter.
///
/// Case-sensitive; tokens are split on whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSetRatio;

impl SimilarityScorer for TokenSetRatio {
    fn score(&self, text: &str, query: &str) -> f64 {
        token_set_ratio(text, query)
    }
}

/// Indel distance: insertions plus deletions turning `a` into `b`.
pub fn indel_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    a_chars.len() + b_chars.len() - 2 * lcs_len(&a_chars, &b_chars)
}

/// Longest common subsequence length, two rows at a time.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let n = b.len();
    let mut prev = vec![0usize; n + 1];
    let mut curr = vec![0usize; n + 1];

    for ca in a {
        for j in 1..=n {
            curr[j] = if *ca == b[j - 1] {
                prev[j - 1] + 1
            } else {
                prev[j].max(curr[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

fn normalized(distance: usize, lensum: usize) -> f64 {
    if lensum == 0 {
        return 100.0;
    }
    100.0 - 100.0 * distance as f64 / lensum as f64
}

/// Similarity of two strings on a 0-100 scale, `100` meaning identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    let lensum = a.chars().count() + b.chars().count();
    normalized(indel_distance(a, b), lensum)
}

pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let common: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    // one set contains the other
    if !common.is_empty() && (only_a.is_empty() || only_b.is_empty()) {
        return 100.0;
    }

    let diff_a = only_a.join(" ");
    let diff_b = only_b.join(" ");
    let common_len = common.join(" ").chars().count();
    let diff_a_len = diff_a.chars().count();
    let diff_b_len = diff_b.chars().count();

    // the joined strings are "common diff", separated by one space
    let sep = usize::from(common_len != 0);
    let with_a = common_len + sep + diff_a_len;
    let with_b = common_len + sep + diff_b_len;

    let result = normalized(indel_distance(&diff_a, &diff_b), with_a + with_b);
    if common_len == 0 {
        return result;
    }

    let common_vs_a = normalized(sep + diff_a_len, common_len + with_a);
    let common_vs_b = normalized(sep + diff_b_len, common_len + with_b);
    result.max(common_vs_a).max(common_vs_b)
}
