//! Assignment of content standards to grade-years within a cycle.

use crate::error::GradeError;
use crate::filter::of_kind;
use crate::table::StandardTable;
use crate::types::{StandardKind, StandardRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Grade-years covered by a cycle. Cycle 4 is the second foreign language,
/// taught in the same years as cycle 3.
pub fn grade_years(cycle: u8) -> Result<&'static [u8], GradeError> {
    match cycle {
        1 => Ok(&[1, 2, 3]),
        2 => Ok(&[4, 5]),
        3 | 4 => Ok(&[6, 7, 8, 9]),
        other => Err(GradeError::UnsupportedCycle(other)),
    }
}

/// Sheet label for a grade-year.
pub fn year_label(year: u8) -> String {
    format!("{}. ročník", year)
}

/// One editable row. The definition is read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentRow {
    pub id: String,
    pub typ: String,
    pub komponent: Option<String>,
    pub tema: Option<String>,
    pub typ_standardu: Option<String>,
    pub definicia: String,
    /// One flag per year, parallel to [`GradeAssignment::years`].
    pub assigned: Vec<bool>,
}

impl AssignmentRow {
    fn new(record: &StandardRecord, years: usize) -> Self {
        Self {
            id: record.id.clone(),
            typ: record.typ.clone(),
            komponent: record.komponent.clone(),
            tema: record.tema.clone(),
            typ_standardu: record.typ_standardu.clone(),
            definicia: record.definicia_clean.clone(),
            assigned: vec![true; years],
        }
    }
}

/// A single cell change.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GradeEdit {
    pub id: String,
    pub year: u8,
    pub assigned: bool,
}

/// Rows sharing a theme and subtype, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentGroup {
    pub tema: Option<String>,
    pub typ_standardu: Option<String>,
    pub ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeAssignment {
    cycle: u8,
    years: Vec<u8>,
    rows: Vec<AssignmentRow>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl GradeAssignment {
    /// Grid over the content standards of `table`, intro rows excluded,
    /// with every cell assigned.
    pub fn new(table: &StandardTable, cycle: u8) -> Result<Self, GradeError> {
        let years = grade_years(cycle)?.to_vec();
        let rows: Vec<AssignmentRow> = of_kind(table, StandardKind::Content)
            .iter()
            .filter(|r| !r.is_intro())
            .map(|r| AssignmentRow::new(r, years.len()))
            .collect();
        let index = rows.iter().enumerate().map(|(i, r)| (r.id.clone(), i)).collect();
        Ok(Self {
            cycle,
            years,
            rows,
            index,
        })
    }

    pub fn cycle(&self) -> u8 {
        self.cycle
    }

    pub fn years(&self) -> &[u8] {
        &self.years
    }

    pub fn rows(&self) -> &[AssignmentRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn year_slot(&self, year: u8) -> Result<usize, GradeError> {
        self.years
            .iter()
            .position(|y| *y == year)
            .ok_or(GradeError::UnknownYear {
                year,
                cycle: self.cycle,
            })
    }

    fn row_slot(&self, id: &str) -> Result<usize, GradeError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| GradeError::UnknownStandard(id.to_string()))
    }

    pub fn is_assigned(&self, id: &str, year: u8) -> Result<bool, GradeError> {
        let row = self.row_slot(id)?;
        let slot = self.year_slot(year)?;
        Ok(self.rows[row].assigned[slot])
    }

    pub fn set(&mut self, id: &str, year: u8, assigned: bool) -> Result<(), GradeError> {
        let row = self.row_slot(id)?;
        let slot = self.year_slot(year)?;
        self.rows[row].assigned[slot] = assigned;
        Ok(())
    }

    /// Apply edits in order; later edits of the same cell win. Nothing is
    /// changed when any edit is invalid.
    pub fn apply(&mut self, edits: &[GradeEdit]) -> Result<(), GradeError> {
        let slots = edits
            .iter()
            .map(|e| Ok((self.row_slot(&e.id)?, self.year_slot(e.year)?, e.assigned)))
            .collect::<Result<Vec<_>, GradeError>>()?;
        for (row, slot, assigned) in slots {
            self.rows[row].assigned[slot] = assigned;
        }
        Ok(())
    }

    /// Assign or clear a whole year.
    pub fn set_year(&mut self, year: u8, assigned: bool) -> Result<(), GradeError> {
        let slot = self.year_slot(year)?;
        for row in &mut self.rows {
            row.assigned[slot] = assigned;
        }
        Ok(())
    }

    pub fn rows_for_year(&self, year: u8) -> Result<Vec<&AssignmentRow>, GradeError> {
        let slot = self.year_slot(year)?;
        Ok(self.rows.iter().filter(|r| r.assigned[slot]).collect())
    }

    /// Rows grouped by theme, then subtype.
    pub fn groups(&self) -> Vec<AssignmentGroup> {
        let mut groups: Vec<AssignmentGroup> = Vec::new();
        for row in &self.rows {
            let existing = groups
                .iter_mut()
                .find(|g| g.tema == row.tema && g.typ_standardu == row.typ_standardu);
            match existing {
                Some(group) => group.ids.push(row.id.clone()),
                None => groups.push(AssignmentGroup {
                    tema: row.tema.clone(),
                    typ_standardu: row.typ_standardu.clone(),
                    ids: vec![row.id.clone()],
                }),
            }
        }
        // stable: themes keep first-seen order, subtypes within a theme too
        let theme_order: Vec<Option<String>> = groups.iter().fold(Vec::new(), |mut seen, g| {
            if !seen.contains(&g.tema) {
                seen.push(g.tema.clone());
            }
            seen
        });
        groups.sort_by_key(|g| theme_order.iter().position(|t| *t == g.tema));
        groups
    }
}
