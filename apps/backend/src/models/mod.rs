//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use svp_core::{
    parse_disciplines, parse_literacy, AssignmentGroup, AssignmentRow, Discipline, EducationalArea,
    LiteracyFilter, Selection, SelectionError, Subject, SubjectGroup,
};

use crate::services::catalog::SourceInfo;
use crate::services::sessions::AssignmentSession;

// === Catalog ===

#[derive(Debug, Serialize)]
pub struct LiteracyOption {
    pub key: &'static str,
    pub label: &'static str,
    pub icons: String,
}

impl From<LiteracyFilter> for LiteracyOption {
    fn from(filter: LiteracyFilter) -> Self {
        Self {
            key: filter.as_str(),
            label: filter.label(),
            icons: filter.icons(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DisciplineOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// GET /api/catalog response
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub areas: Vec<EducationalArea>,
    pub groups: Vec<SubjectGroup>,
    pub subjects: Vec<Subject>,
    pub literacies: Vec<LiteracyOption>,
    /// Legend lines, e.g. `Finančná gramotnosť 📈`.
    pub legend: Vec<String>,
    pub disciplines: Vec<DisciplineOption>,
    pub source: Option<SourceInfo>,
}

/// POST /api/catalog/reload response
#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub source: SourceInfo,
}

// === Browse / export ===

/// Query string of browse and export requests.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectionQuery {
    pub subject: String,
    pub variant: Option<String>,
    pub cycle: u8,
    pub literacy: Option<String>,
    /// Comma-separated labels or codes.
    pub disciplines: Option<String>,
}

impl SelectionQuery {
    pub fn into_selection(self) -> Result<Selection, SelectionError> {
        let mut selection = Selection::new(self.subject, self.cycle);
        selection.variant = self.variant.filter(|v| !v.is_empty());
        if let Some(literacy) = self.literacy {
            selection.literacy = parse_literacy(&literacy)?;
        }
        if let Some(disciplines) = self.disciplines {
            selection.disciplines = Some(parse_disciplines(&disciplines)?);
        }
        Ok(selection)
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

// === Assignments ===

/// POST /api/assignments request
#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub subject: String,
    pub variant: Option<String>,
    pub cycle: u8,
    #[serde(default)]
    pub disciplines: Option<Vec<Discipline>>,
}

impl CreateAssignmentRequest {
    pub fn into_selection(self) -> Selection {
        Selection {
            subject: self.subject,
            variant: self.variant.filter(|v| !v.is_empty()),
            cycle: self.cycle,
            literacy: LiteracyFilter::All,
            disciplines: self.disciplines,
        }
    }
}

/// PATCH /api/assignments/:id request
#[derive(Debug, Deserialize)]
pub struct UpdateAssignmentRequest {
    pub edits: Vec<svp_core::GradeEdit>,
}

/// Assignment grid as returned by every assignment endpoint
#[derive(Debug, Serialize)]
pub struct AssignmentResponse {
    pub id: Uuid,
    pub subject: String,
    pub variant: Option<String>,
    pub cycle: u8,
    pub created_at: DateTime<Utc>,
    pub years: Vec<u8>,
    pub year_labels: Vec<String>,
    pub groups: Vec<AssignmentGroup>,
    pub rows: Vec<AssignmentRow>,
}

impl AssignmentResponse {
    pub fn new(id: Uuid, session: &AssignmentSession) -> Self {
        let grid = &session.grid;
        Self {
            id,
            subject: session.selection.subject.clone(),
            variant: session.selection.variant.clone(),
            cycle: grid.cycle(),
            created_at: session.created_at,
            years: grid.years().to_vec(),
            year_labels: grid.years().iter().map(|y| svp_core::year_label(*y)).collect(),
            groups: grid.groups(),
            rows: grid.rows().to_vec(),
        }
    }
}
