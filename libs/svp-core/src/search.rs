//! Two-stage search over clean definitions: exact substring first, fuzzy
//! fallback when the exact stage finds little.

use crate::matching::SimilarityScorer;
use crate::table::StandardTable;
use crate::types::{StandardRecord, NONE_PLACEHOLDER};
use serde::Serialize;
use std::collections::HashSet;

pub const MIN_QUERY_CHARS: usize = 3;
pub const EXACT_LIMIT: usize = 50;
pub const FUZZY_LIMIT: usize = 30;
/// Fuzzy hits must score strictly above this.
pub const FUZZY_THRESHOLD: f64 = 50.0;
/// The fuzzy stage runs only when the exact stage finds fewer rows.
pub const FUZZY_BELOW: usize = 5;

pub const SHORT_QUERY: &str = "Hľadaný text musí mať aspoň 3 znaky";
pub const LEAVE_SEARCH_HINT: &str = "Pre návrat na ŠVP zmažte text vo vyhľadávaní.";
pub const FUZZY_HEADING: &str = "Výsledky vyhľadávania na základe podobnosti";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub definicia: String,
    pub classification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// One search stage: how many rows matched and the ones shown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStage {
    /// Shown above the hits; only the fuzzy stage has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub total: usize,
    pub hits: Vec<SearchHit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl SearchStage {
    fn new(hits: Vec<SearchHit>, limit: usize) -> Self {
        let total = hits.len();
        let notice = (total > limit).then(|| truncation_notice(limit));
        Self {
            heading: None,
            total,
            hits: hits.into_iter().take(limit).collect(),
            notice,
        }
    }

    fn with_heading(mut self, heading: &str) -> Self {
        self.heading = Some(heading.to_string());
        self
    }

    pub fn truncated(&self) -> bool {
        self.notice.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub hint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact: Option<SearchStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy: Option<SearchStage>,
}

pub fn truncation_notice(limit: usize) -> String {
    format!("Výsledky vyhľadávania boli skrátené na {} záznamov.", limit)
}

/// Where a row sits in the curriculum, one line.
pub fn classification(record: &StandardRecord) -> String {
    let cycle = record.cyklus.map(|c| c.to_string()).unwrap_or_default();
    let line = format!(
        "{} | {}. cyklus | {} | {} | {} | {} | {}",
        record.predmet,
        cycle,
        record.typ,
        record.komponent.as_deref().unwrap_or(""),
        record.tema.as_deref().unwrap_or(""),
        record.typ_standardu.as_deref().unwrap_or(""),
        record.id
    );
    line.replace(NONE_PLACEHOLDER, "")
        .replace("|  |  |", "|")
        .replace("|  |", "|")
}

fn hit(record: &StandardRecord, score: Option<f64>) -> SearchHit {
    SearchHit {
        id: record.id.clone(),
        definicia: record.definicia_clean.trim().to_string(),
        classification: classification(record),
        score,
    }
}

/// Search clean definitions for `query`.
///
/// The exact stage is a case-sensitive substring match. When it finds fewer
/// than [`FUZZY_BELOW`] rows, every other row is scored with `scorer` and
/// those above [`FUZZY_THRESHOLD`] are listed best first.
pub fn search(table: &StandardTable, query: &str, scorer: &dyn SimilarityScorer) -> SearchOutcome {
    let mut outcome = SearchOutcome {
        query: query.to_string(),
        hint: LEAVE_SEARCH_HINT.to_string(),
        warning: None,
        summary: None,
        exact: None,
        fuzzy: None,
    };

    if query.chars().count() < MIN_QUERY_CHARS {
        outcome.warning = Some(SHORT_QUERY.to_string());
        return outcome;
    }

    let exact: Vec<&StandardRecord> = table.iter().filter(|r| r.definicia_clean.contains(query)).collect();
    let exact_count = exact.len();
    outcome.summary = Some(format!("Našlo sa {} podobných záznamov", exact_count));
    tracing::debug!(query, exact_count, "exact search");

    if exact_count < FUZZY_BELOW {
        let seen: HashSet<&str> = exact.iter().map(|r| r.id.as_str()).collect();
        let mut scored: Vec<(f64, &StandardRecord)> = table
            .iter()
            .filter(|r| !seen.contains(r.id.as_str()))
            .map(|r| (scorer.score(&r.definicia_clean, query), r))
            .filter(|(score, _)| *score > FUZZY_THRESHOLD)
            .collect();
        // sort_by is stable; ties keep table order
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        tracing::debug!(query, fuzzy_count = scored.len(), "fuzzy search");

        if !scored.is_empty() {
            let hits = scored.into_iter().map(|(s, r)| hit(r, Some(s))).collect();
            outcome.fuzzy = Some(SearchStage::new(hits, FUZZY_LIMIT).with_heading(FUZZY_HEADING));
        }
    }

    let hits = exact.into_iter().map(|r| hit(r, None)).collect();
    outcome.exact = Some(SearchStage::new(hits, EXACT_LIMIT));
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::TokenSetRatio;
    use crate::table::test_support::record;
    use pretty_assertions::assert_eq;

    /// Rows whose clean definition is exactly the given text.
    fn table(definitions: &[(&str, &str)]) -> StandardTable {
        definitions
            .iter()
            .map(|(id, d)| {
                let mut r = record(id, d);
                r.definicia_clean = d.to_string();
                r
            })
            .collect()
    }

    fn ids(stage: &SearchStage) -> Vec<&str> {
        stage.hits.iter().map(|h| h.id.as_str()).collect()
    }

    #[test]
    fn short_query_warns_without_searching() {
        let outcome = search(&table(&[("a", "ab")]), "ab", &TokenSetRatio);
        assert_eq!(outcome.warning.as_deref(), Some(SHORT_QUERY));
        assert!(outcome.exact.is_none());
        assert!(outcome.fuzzy.is_none());
    }

    #[test]
    fn query_length_counts_characters_not_bytes() {
        // two chars, four bytes
        let outcome = search(&table(&[("a", "čš")]), "čš", &TokenSetRatio);
        assert!(outcome.warning.is_some());
    }

    #[test]
    fn exact_hits_in_table_order() {
        let t = table(&[
            ("mt1-o-1", "Sčítanie zlomkov."),
            ("mt1-o-2", "Násobenie čísel."),
            ("mt1-o-3", "Odčítanie zlomkov."),
            ("mt1-o-4", "Krátenie zlomkov."),
        ]);
        let outcome = search(&t, "zlomkov", &TokenSetRatio);
        let exact = outcome.exact.unwrap();
        assert_eq!(exact.total, 3);
        assert_eq!(ids(&exact), vec!["mt1-o-1", "mt1-o-3", "mt1-o-4"]);
        assert_eq!(outcome.summary.as_deref(), Some("Našlo sa 3 podobných záznamov"));
        assert!(exact.hits.iter().all(|h| h.score.is_none()));
    }

    #[test]
    fn exact_match_is_case_sensitive() {
        let t = table(&[("a", "Zlomky a čísla."), ("b", "zlomky")]);
        let exact = search(&t, "Zlomky", &TokenSetRatio).exact.unwrap();
        assert_eq!(ids(&exact), vec!["a"]);
    }

    #[test]
    fn fuzzy_stage_excludes_exact_hits_and_sorts_by_score() {
        let t = table(&[
            ("a", "Žiak rozlišuje zlomky."),
            ("b", "Žiak rozlišuje zlomky a čísla."),
            ("c", "Úplne iný text o geometrii."),
            ("e", "zlomky čísla"),
            ("d", "zlomky"),
        ]);
        let outcome = search(&t, "rozlišuje zlomky", &TokenSetRatio);
        let exact = outcome.exact.unwrap();
        assert_eq!(ids(&exact), vec!["a", "b"]);
        assert_eq!(exact.heading, None);

        let fuzzy = outcome.fuzzy.unwrap();
        assert_eq!(fuzzy.heading.as_deref(), Some(FUZZY_HEADING));
        assert!(!ids(&fuzzy).contains(&"a"));
        assert!(!ids(&fuzzy).contains(&"b"));
        assert!(!ids(&fuzzy).contains(&"c"));
        assert_eq!(ids(&fuzzy), vec!["d", "e"]);
        assert_eq!(fuzzy.hits[0].score, Some(100.0));
        assert!(fuzzy.hits[1].score.unwrap() > FUZZY_THRESHOLD);
    }

    #[test]
    fn fuzzy_stage_skipped_with_five_exact_hits() {
        let rows: Vec<(String, String)> = (0..5)
            .map(|i| (format!("mt1-o-{i}"), format!("Počítanie {i}.")))
            .collect();
        let borrowed: Vec<(&str, &str)> = rows.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        let mut t = table(&borrowed);
        t.insert(table(&[("mt1-o-x", "Počítanie")]).records()[0].clone());
        let outcome = search(&t, "Počítanie ", &TokenSetRatio);
        assert_eq!(outcome.exact.unwrap().total, 5);
        assert!(outcome.fuzzy.is_none());
    }

    #[test]
    fn exact_stage_truncates_at_fifty() {
        let rows: Vec<(String, String)> = (0..60).map(|i| (format!("id-{i}"), "spoločný text".to_string())).collect();
        let borrowed: Vec<(&str, &str)> = rows.iter().map(|(a, b)| (a.as_str(), b.as_str())).collect();
        let exact = search(&table(&borrowed), "spoločný", &TokenSetRatio).exact.unwrap();
        assert_eq!(exact.total, 60);
        assert_eq!(exact.hits.len(), EXACT_LIMIT);
        assert!(exact.truncated());
        assert_eq!(
            exact.notice.as_deref(),
            Some("Výsledky vyhľadávania boli skrátené na 50 záznamov.")
        );
    }

    #[test]
    fn classification_line_drops_none_and_empty_fields() {
        let mut r = record("vv3-o-033", "x");
        r.predmet = "Výtvarná výchova".to_string();
        r.cyklus = Some(3);
        r.typ = "Obsahový štandard".to_string();
        r.komponent = Some("Osobnosť".to_string());
        r.tema = Some("none".to_string());
        assert_eq!(
            classification(&r),
            "Výtvarná výchova | 3. cyklus | Obsahový štandard | Osobnosť | vv3-o-033"
        );
    }

    #[test]
    fn hit_trims_clean_definition() {
        let mut r = record("a", "x");
        r.definicia_clean = "  Text.  ".to_string();
        assert_eq!(hit(&r, None).definicia, "Text.");
    }
}
