//! Core library for browsing and exporting the national curriculum (ŠVP)
//! standards.
//!
//! Provides:
//! - Loader for the tab/comma separated standards table, with definition
//!   normalization and literacy annotation
//! - Subject catalogue and selection filters
//! - Presenter producing a nested browse document
//! - Exact and fuzzy search
//! - Grade-year assignment and XLSX export

pub mod cache;
pub mod catalog;
pub mod error;
pub mod export;
pub mod filter;
pub mod grades;
pub mod matching;
pub mod normalize;
pub mod parser;
pub mod present;
pub mod search;
pub mod selection;
pub mod table;
pub mod types;

pub use cache::{CatalogCache, DataSource};
pub use catalog::{CycleTab, EducationalArea, ResolvedSubject, Subject, SubjectCatalog, SubjectGroup};
pub use error::{ExportError, GradeError, LoadError, Result, SelectionError};
pub use export::{download_name, export_assignment, export_standards, Sheet};
pub use grades::{grade_years, year_label, AssignmentGroup, AssignmentRow, GradeAssignment, GradeEdit};
pub use matching::{SimilarityScorer, TokenSetRatio};
pub use normalize::normalize;
pub use parser::{load, parse};
pub use present::{render_items, Block, Document, RenderedItems};
pub use search::{search, SearchHit, SearchOutcome, SearchStage};
pub use selection::{parse_disciplines, parse_literacy, ResolvedSelection, Selection};
pub use table::StandardTable;
pub use types::{Discipline, Literacy, LiteracyFilter, StandardKind, StandardRecord};
