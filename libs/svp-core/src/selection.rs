//! A user's subject, variant, cycle, literacy and discipline choice, and
//! the table operations it drives.

use crate::catalog::{ResolvedSubject, SubjectCatalog};
use crate::error::{GradeError, SelectionError};
use crate::export::download_name;
use crate::filter::{by_identifier_prefix, by_science_discipline, by_subject_variant};
use crate::grades::GradeAssignment;
use crate::present::{self, Document};
use crate::table::StandardTable;
use crate::types::{Discipline, LiteracyFilter};
use serde::{Deserialize, Serialize};

/// Unresolved choice, as it arrives from a client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    pub subject: String,
    #[serde(default)]
    pub variant: Option<String>,
    pub cycle: u8,
    #[serde(default)]
    pub literacy: LiteracyFilter,
    #[serde(default)]
    pub disciplines: Option<Vec<Discipline>>,
}

impl Selection {
    pub fn new(subject: impl Into<String>, cycle: u8) -> Self {
        Self {
            subject: subject.into(),
            cycle,
            ..Self::default()
        }
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    pub fn with_literacy(mut self, literacy: LiteracyFilter) -> Self {
        self.literacy = literacy;
        self
    }

    pub fn with_disciplines(mut self, disciplines: Vec<Discipline>) -> Self {
        self.disciplines = Some(disciplines);
        self
    }

    /// Check the choice against the catalogue.
    pub fn resolve<'a>(&self, catalog: &'a SubjectCatalog) -> Result<ResolvedSelection<'a>, SelectionError> {
        let subject = catalog.resolve(&self.subject, self.variant.as_deref())?;
        if subject.subject.cycle_label(self.cycle).is_none() {
            return Err(SelectionError::UnknownCycle {
                subject: subject.subject.name.clone(),
                cycle: self.cycle,
            });
        }
        Ok(ResolvedSelection {
            subject,
            cycle: self.cycle,
            literacy: self.literacy,
            disciplines: self.disciplines.clone(),
        })
    }
}

/// Parse a literacy filter from its label or machine name; empty means all.
pub fn parse_literacy(value: &str) -> Result<LiteracyFilter, SelectionError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(LiteracyFilter::All);
    }
    LiteracyFilter::from_label(value).ok_or_else(|| SelectionError::UnknownLiteracy(value.to_string()))
}

/// Parse a comma-separated list of discipline labels or codes.
pub fn parse_disciplines(value: &str) -> Result<Vec<Discipline>, SelectionError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Discipline::from_label(s).ok_or_else(|| SelectionError::UnknownDiscipline(s.to_string())))
        .collect()
}

#[derive(Debug, Clone)]
pub struct ResolvedSelection<'a> {
    pub subject: ResolvedSubject<'a>,
    pub cycle: u8,
    pub literacy: LiteracyFilter,
    pub disciplines: Option<Vec<Discipline>>,
}

impl ResolvedSelection<'_> {
    /// Rows of the subject and cycle, limited to the chosen variant.
    pub fn narrow(&self, table: &StandardTable) -> StandardTable {
        let subject = self.subject.subject;
        let rows = by_identifier_prefix(table, &subject.code, self.cycle);
        match self.subject.variant {
            Some(variant) => by_subject_variant(&rows, variant, &subject.shared_variants),
            None => rows,
        }
    }

    pub fn browse(&self, table: &StandardTable) -> Document {
        present::browse(
            &self.subject,
            self.cycle,
            self.literacy,
            self.disciplines.as_deref(),
            &self.narrow(table),
        )
    }

    /// Rows offered for download: the narrowed table, further limited by
    /// discipline where the subject splits by it.
    pub fn export_table(&self, table: &StandardTable) -> StandardTable {
        let rows = self.narrow(table);
        if self.subject.subject.discipline_cycle == Some(self.cycle) {
            let chosen = self.disciplines.clone().unwrap_or_else(|| Discipline::ALL.to_vec());
            return by_science_discipline(&rows, &chosen);
        }
        rows
    }

    /// Grade grid over the downloadable rows.
    pub fn assignment(&self, table: &StandardTable) -> Result<GradeAssignment, GradeError> {
        GradeAssignment::new(&self.export_table(table), self.cycle)
    }

    pub fn download_name(&self) -> String {
        download_name(&self.subject.subject.name, self.cycle)
    }
}
