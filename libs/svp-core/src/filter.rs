//! Pure filters over a standards table. Each returns a new table.

use crate::table::StandardTable;
use crate::types::{Discipline, LiteracyFilter, StandardKind, StandardRecord, INTRO};

/// Rows whose id contains `{code}{cycle}` anywhere.
///
/// The compound is matched, never the code alone, so `cj` does not pull in
/// rows of another subject whose code merely contains it.
pub fn by_identifier_prefix(table: &StandardTable, code: &str, cycle: u8) -> StandardTable {
    let needle = format!("{}{}", code, cycle);
    table.filter(|r| r.id.contains(&needle))
}

/// Rows developing any literacy covered by `filter`. `All` keeps every row.
pub fn by_literacy(table: &StandardTable, filter: LiteracyFilter) -> StandardTable {
    if filter == LiteracyFilter::All {
        return table.clone();
    }
    let members = filter.members();
    table.filter(|r| members.iter().any(|l| r.has_literacy(*l)))
}

/// Rows belonging to `variant`: rows tagged with another variant's name are
/// dropped, untagged rows apply to every variant.
pub fn by_subject_variant(table: &StandardTable, variant: &str, all_variants: &[String]) -> StandardTable {
    let others: Vec<&str> = all_variants
        .iter()
        .map(String::as_str)
        .filter(|v| *v != variant)
        .collect();
    table.filter(|r| match r.typ_standardu.as_deref() {
        Some(tag) => !others.contains(&tag),
        None => true,
    })
}

/// Natural-science rows tagged with a selected discipline, plus every
/// performance standard. Adjacent markers joined by `, ` are merged into one
/// superscript so the connector renders raised too.
pub fn by_science_discipline(table: &StandardTable, disciplines: &[Discipline]) -> StandardTable {
    let markers: Vec<String> = disciplines.iter().map(|d| d.marker()).collect();
    table
        .filter(|r| r.is_kind(StandardKind::Performance) || markers.iter().any(|m| r.definicia.contains(m.as_str())))
        .map(|mut r| {
            r.definicia = r.definicia.replace("</sup>, <sup>", ", ");
            r
        })
}

/// Rows of one standard kind.
pub fn of_kind(table: &StandardTable, kind: StandardKind) -> StandardTable {
    table.filter(|r| r.is_kind(kind))
}

/// Rows of one component.
pub fn by_component(table: &StandardTable, komponent: &str) -> StandardTable {
    table.filter(|r| r.komponent.as_deref() == Some(komponent))
}

/// Rows of one theme.
pub fn by_theme(table: &StandardTable, tema: &str) -> StandardTable {
    table.filter(|r| r.tema.as_deref() == Some(tema))
}

/// Drops intro rows and the main goal, which are not exported.
pub fn without_intro(table: &StandardTable) -> StandardTable {
    table.filter(|r| !is_housekeeping(r))
}

fn is_housekeeping(record: &StandardRecord) -> bool {
    record.typ_standardu.as_deref() == Some(INTRO)
        || record.tema.as_deref() == Some(INTRO)
        || record.is_kind(StandardKind::MainGoal)
}
