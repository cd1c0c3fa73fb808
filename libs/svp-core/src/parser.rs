//! Parser for the flat standards table.
//!
//! # Format
//! ```text
//! predmet<TAB>cyklus<TAB>typ<TAB>komponent<TAB>tema<TAB>typ_standardu<TAB>id<TAB>definicia<TAB>Vizuálna gramotnosť ...
//! Matematika<TAB>3<TAB>Obsahový štandard<TAB>Čísla<TAB><TAB><TAB>mt3-o-001<TAB>prirodzené čísla<TAB>x ...
//! ```
//!
//! Tab-separated is the published form; the remote spreadsheet export is
//! comma-separated. Fields may be double-quoted (`""` escapes a quote).
//! Columns are looked up by header name, so their order is free.

use crate::error::{LoadError, Result};
use crate::normalize::normalize;
use crate::table::StandardTable;
use crate::types::{Literacy, StandardKind, StandardRecord};
use std::collections::{HashMap, HashSet};
use std::iter::Peekable;
use std::str::Chars;

/// Cell values read as null, following the usual dataframe NA spellings.
const NA_VALUES: [&str; 11] = [
    "", "NaN", "nan", "NA", "N/A", "n/a", "NULL", "null", "#N/A", "<NA>", "None",
];

/// Field separator of the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    Tab,
    Comma,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Self::Tab => '\t',
            Self::Comma => ',',
        }
    }

    /// Tab when the header line contains one, otherwise comma.
    pub fn detect(content: &str) -> Self {
        let header = content.lines().next().unwrap_or_default();
        if header.contains('\t') {
            Self::Tab
        } else {
            Self::Comma
        }
    }
}

/// Load the table: parse, then annotate literacy icons.
pub fn load(content: &str) -> Result<StandardTable> {
    let table = parse(content)?;
    Ok(annotate_literacies(&table))
}

/// Parse content, detecting the delimiter from the header line.
pub fn parse(content: &str) -> Result<StandardTable> {
    parse_with(content, Delimiter::detect(content))
}

/// Parse content with an explicit delimiter.
pub fn parse_with(content: &str, delimiter: Delimiter) -> Result<StandardTable> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = RecordReader::new(content, delimiter.as_char());

    let (_, header) = loop {
        match reader.next_record()? {
            Some((_, fields)) if is_blank(&fields) => continue,
            Some(record) => break record,
            None => return Err(LoadError::EmptyInput),
        }
    };
    let columns = Columns::from_header(&header)?;

    let mut table = StandardTable::new();
    let mut main_goals = HashSet::new();

    while let Some((line, fields)) = reader.next_record()? {
        if is_blank(&fields) {
            continue;
        }
        let record = columns.build(&fields, line)?;

        if record.is_kind(StandardKind::MainGoal)
            && !main_goals.insert((record.predmet.clone(), record.cyklus))
        {
            tracing::warn!(
                id = %record.id,
                predmet = %record.predmet,
                "more than one main goal for subject and cycle"
            );
        }

        let id = record.id.clone();
        if !table.insert(record) {
            return Err(LoadError::DuplicateId { id, line });
        }
    }

    tracing::debug!(rows = table.len(), ?delimiter, "parsed standards table");
    Ok(table)
}

/// Append an icon marker for every literacy a content or performance
/// standard develops. Goals are never annotated.
pub fn annotate_literacies(table: &StandardTable) -> StandardTable {
    table.map(|mut record| {
        let annotated = record.is_kind(StandardKind::Content) || record.is_kind(StandardKind::Performance);
        if annotated {
            for literacy in &record.literacies {
                record.definicia.push_str(&literacy.marker());
            }
        }
        record
    })
}

fn is_blank(fields: &[String]) -> bool {
    fields.iter().all(|f| f.trim().is_empty())
}

fn non_null(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !NA_VALUES.contains(&v.trim()))
        .map(str::to_string)
}

fn parse_cycle(value: Option<&str>, line: usize) -> Result<Option<u8>> {
    let Some(raw) = value.map(str::trim).filter(|v| !NA_VALUES.contains(v)) else {
        return Ok(None);
    };
    let invalid = || LoadError::InvalidCycle {
        line,
        value: raw.to_string(),
    };
    if let Ok(cycle) = raw.parse::<u8>() {
        return Ok(Some(cycle));
    }
    // numeric columns with gaps come out of spreadsheets as floats
    let float = raw.parse::<f64>().map_err(|_| invalid())?;
    if float.fract() == 0.0 && (0.0..=255.0).contains(&float) {
        Ok(Some(float as u8))
    } else {
        Err(invalid())
    }
}

/// Header positions of the known columns.
struct Columns {
    id: usize,
    predmet: Option<usize>,
    cyklus: Option<usize>,
    typ: Option<usize>,
    komponent: Option<usize>,
    tema: Option<usize>,
    typ_standardu: Option<usize>,
    definicia: Option<usize>,
    literacies: Vec<(Literacy, usize)>,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self> {
        let positions: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim(), i))
            .collect();
        let find = |name: &str| positions.get(name).copied();

        Ok(Self {
            id: find("id").ok_or_else(|| LoadError::MissingColumn("id".to_string()))?,
            predmet: find("predmet"),
            cyklus: find("cyklus"),
            typ: find("typ"),
            komponent: find("komponent"),
            tema: find("tema"),
            typ_standardu: find("typ_standardu"),
            definicia: find("definicia"),
            literacies: Literacy::ALL
                .into_iter()
                .filter_map(|l| find(l.column_name()).map(|i| (l, i)))
                .collect(),
        })
    }

    fn build(&self, fields: &[String], line: usize) -> Result<StandardRecord> {
        let cell = |idx: Option<usize>| idx.and_then(|i| fields.get(i)).map(String::as_str);

        let id = cell(Some(self.id)).map(str::trim).unwrap_or_default();
        if id.is_empty() {
            return Err(LoadError::MissingId { line });
        }

        let definicia = non_null(cell(self.definicia)).unwrap_or_default();
        let literacies = self
            .literacies
            .iter()
            .filter(|(_, i)| non_null(cell(Some(*i))).is_some())
            .map(|(l, _)| *l)
            .collect();

        Ok(StandardRecord {
            id: id.to_string(),
            predmet: non_null(cell(self.predmet)).unwrap_or_default(),
            cyklus: parse_cycle(cell(self.cyklus), line)?,
            typ: non_null(cell(self.typ)).unwrap_or_default(),
            komponent: non_null(cell(self.komponent)),
            tema: non_null(cell(self.tema)),
            typ_standardu: non_null(cell(self.typ_standardu)),
            definicia_clean: normalize(&definicia),
            definicia,
            literacies,
        })
    }
}

/// Splits delimited text into records, honouring quoted fields.
struct RecordReader<'a> {
    chars: Peekable<Chars<'a>>,
    delimiter: char,
    line: usize,
}

impl<'a> RecordReader<'a> {
    fn new(content: &'a str, delimiter: char) -> Self {
        Self {
            chars: content.chars().peekable(),
            delimiter,
            line: 1,
        }
    }

    /// Next record with the line it starts on, or None at end of input.
    fn next_record(&mut self) -> Result<Option<(usize, Vec<String>)>> {
        let start_line = self.line;
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut consumed = false;

        loop {
            let Some(c) = self.chars.next() else {
                if in_quotes {
                    return Err(LoadError::UnterminatedQuote { line: start_line });
                }
                if !consumed {
                    return Ok(None);
                }
                fields.push(field);
                return Ok(Some((start_line, fields)));
            };
            consumed = true;

            if in_quotes {
                match c {
                    '"' if self.chars.peek() == Some(&'"') => {
                        self.chars.next();
                        field.push('"');
                    }
                    '"' => in_quotes = false,
                    '\n' => {
                        self.line += 1;
                        field.push(c);
                    }
                    _ => field.push(c),
                }
                continue;
            }

            match c {
                '"' if field.is_empty() => in_quotes = true,
                '\r' if self.chars.peek() == Some(&'\n') => {}
                '\n' => {
                    self.line += 1;
                    fields.push(field);
                    return Ok(Some((start_line, fields)));
                }
                c if c == self.delimiter => fields.push(std::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }
}
