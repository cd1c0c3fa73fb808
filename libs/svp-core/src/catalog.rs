//! Subject catalogue: educational areas, subjects, id codes, variants and
//! cycle tabs of the national curriculum.
//!
//! The catalogue is immutable configuration. Build it once at startup with
//! [`SubjectCatalog::standard`] and pass it to whatever needs it.

use crate::error::SelectionError;
use serde::Serialize;

/// Selectable cycle with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleTab {
    pub label: String,
    pub cycle: u8,
}

impl CycleTab {
    fn new(label: &str, cycle: u8) -> Self {
        Self {
            label: label.to_string(),
            cycle,
        }
    }
}

/// A subject with its own identifier range.
#[derive(Debug, Clone, Serialize)]
pub struct Subject {
    pub name: String,
    /// Two-letter id code, e.g. `mt` for Matematika.
    pub code: String,
    /// Variants sharing this subject's id range, told apart by
    /// `typ_standardu` (foreign-language choice).
    pub shared_variants: Vec<String>,
    pub cycles: Vec<CycleTab>,
    /// Performance standards are listed under the goals instead of under
    /// each component.
    pub performance_under_goals: bool,
    /// Content standards get their own heading inside a component.
    pub split_content_standards: bool,
    /// The content-standard intro is shown above the themes.
    pub content_intro: bool,
    /// Cycle in which content standards are split by science discipline.
    pub discipline_cycle: Option<u8>,
    /// Cycle rendered as one combined performance-and-content block.
    pub combined_cycle: Option<u8>,
}

impl Subject {
    fn new(name: &str, code: &str) -> Self {
        Self {
            name: name.to_string(),
            code: code.to_string(),
            shared_variants: Vec::new(),
            cycles: default_cycles(),
            performance_under_goals: false,
            split_content_standards: true,
            content_intro: false,
            discipline_cycle: None,
            combined_cycle: None,
        }
    }

    pub fn cycle_label(&self, cycle: u8) -> Option<&str> {
        self.cycles
            .iter()
            .find(|t| t.cycle == cycle)
            .map(|t| t.label.as_str())
    }

    /// Id fragment selecting this subject in a cycle, e.g. `mt3`.
    pub fn id_prefix(&self, cycle: u8) -> String {
        format!("{}{}", self.code, cycle)
    }
}

/// A selectable entry whose choices are separate subjects (minority
/// languages, denominations).
#[derive(Debug, Clone, Serialize)]
pub struct SubjectGroup {
    pub name: String,
    pub members: Vec<String>,
}

/// Educational area with the entries offered under it.
#[derive(Debug, Clone, Serialize)]
pub struct EducationalArea {
    pub name: String,
    /// Subject or group names.
    pub entries: Vec<String>,
}

/// A subject choice resolved against the catalogue.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSubject<'a> {
    pub subject: &'a Subject,
    /// Chosen shared-range variant, when the subject has them.
    pub variant: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubjectCatalog {
    pub areas: Vec<EducationalArea>,
    pub groups: Vec<SubjectGroup>,
    pub subjects: Vec<Subject>,
}

impl SubjectCatalog {
    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    pub fn group(&self, name: &str) -> Option<&SubjectGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Resolve a selector entry and optional variant to a subject.
    ///
    /// Groups take precedence over a subject of the same name, because the
    /// selector shows the group first and the member second.
    pub fn resolve<'a>(
        &'a self,
        entry: &str,
        variant: Option<&str>,
    ) -> Result<ResolvedSubject<'a>, SelectionError> {
        if let Some(group) = self.group(entry) {
            let choice = variant.ok_or_else(|| SelectionError::MissingVariant {
                subject: entry.to_string(),
            })?;
            if !group.members.iter().any(|m| m == choice) {
                return Err(SelectionError::UnknownVariant {
                    subject: entry.to_string(),
                    variant: choice.to_string(),
                });
            }
            let subject = self
                .subject(choice)
                .ok_or_else(|| SelectionError::UnknownSubject(choice.to_string()))?;
            return Ok(ResolvedSubject {
                subject,
                variant: None,
            });
        }

        let subject = self
            .subject(entry)
            .ok_or_else(|| SelectionError::UnknownSubject(entry.to_string()))?;

        if subject.shared_variants.is_empty() {
            return Ok(ResolvedSubject {
                subject,
                variant: None,
            });
        }

        let choice = variant.ok_or_else(|| SelectionError::MissingVariant {
            subject: entry.to_string(),
        })?;
        let variant = subject
            .shared_variants
            .iter()
            .find(|v| *v == choice)
            .ok_or_else(|| SelectionError::UnknownVariant {
                subject: entry.to_string(),
                variant: choice.to_string(),
            })?;
        Ok(ResolvedSubject {
            subject,
            variant: Some(variant.as_str()),
        })
    }

    /// The national curriculum for primary education (ŠVP 2023).
    pub fn standard() -> Self {
        let areas = vec![
            area(
                "Jazyk a komunikácia",
                &[
                    "Slovenský jazyk a literatúra",
                    "Jazyky národnostných menšín",
                    "Slovenský jazyk ako druhý jazyk",
                    "Cudzí jazyk",
                ],
            ),
            area("Matematika a informatika", &["Matematika", "Informatika"]),
            area("Človek a príroda", &["Človek a príroda"]),
            area("Človek a spoločnosť", &["Človek a spoločnosť", "Náboženstvo"]),
            area("Človek a svet práce", &["Človek a svet práce"]),
            area("Umenie a kultúra", &["Hudobná výchova", "Výtvarná výchova"]),
            area("Zdravie a pohyb", &["Zdravie a pohyb"]),
        ];

        let groups = vec![
            group("Jazyky národnostných menšín", MINORITY_LANGUAGES.iter().map(|(n, _)| *n)),
            group(
                "Slovenský jazyk ako druhý jazyk",
                ["Slovenský jazyk ako druhý jazyk", "Slovenský jazyk a slovenská literatúra"],
            ),
            group("Náboženstvo", DENOMINATIONS.iter().map(|(n, _)| *n)),
        ];

        let mut subjects = vec![Subject::new("Slovenský jazyk a literatúra", "sk")];
        subjects.extend(MINORITY_LANGUAGES.iter().map(|(n, c)| Subject::new(n, c)));
        subjects.push(Subject::new("Slovenský jazyk a slovenská literatúra", "sj"));
        subjects.push(Subject {
            cycles: vec![
                CycleTab::new("Komunikačná úroveň 1 (základná)", 1),
                CycleTab::new("Komunikačná úroveň 2 (rozširujúca)", 2),
            ],
            ..Subject::new("Slovenský jazyk ako druhý jazyk", "dj")
        });
        subjects.push(Subject {
            shared_variants: FOREIGN_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            cycles: vec![
                CycleTab::new("1. cyklus (r.1-3)", 1),
                CycleTab::new("2. cyklus (r.4-5)", 2),
                CycleTab::new("3. cyklus - prvý jazyk (r.6-9)", 3),
                CycleTab::new("3. cyklus - druhý jazyk (r.6-9)", 4),
            ],
            combined_cycle: Some(4),
            ..Subject::new("Cudzí jazyk", "cj")
        });
        subjects.push(Subject {
            performance_under_goals: true,
            ..Subject::new("Matematika", "mt")
        });
        subjects.push(Subject {
            performance_under_goals: true,
            ..Subject::new("Informatika", "if")
        });
        subjects.push(Subject {
            performance_under_goals: true,
            ..Subject::new("Človek a spoločnosť", "cs")
        });
        subjects.push(Subject {
            performance_under_goals: true,
            content_intro: true,
            discipline_cycle: Some(3),
            ..Subject::new("Človek a príroda", "cp")
        });
        subjects.push(Subject::new("Človek a svet práce", "sp"));
        for (name, code) in [("Hudobná výchova", "hv"), ("Výtvarná výchova", "vv"), ("Zdravie a pohyb", "zp")] {
            subjects.push(Subject {
                split_content_standards: false,
                ..Subject::new(name, code)
            });
        }
        subjects.extend(DENOMINATIONS.iter().map(|(n, c)| Subject {
            split_content_standards: false,
            ..Subject::new(n, c)
        }));

        Self {
            areas,
            groups,
            subjects,
        }
    }
}

const MINORITY_LANGUAGES: [(&str, &str); 6] = [
    ("Maďarský jazyk a literatúra", "hu"),
    ("Nemecký jazyk a literatúra", "de"),
    ("Rómsky jazyk a literatúra", "ry"),
    ("Rusínsky jazyk a literatúra", "ri"),
    ("Ruský jazyk a literatúra", "ru"),
    ("Ukrajinský jazyk a literatúra", "uk"),
];

const FOREIGN_LANGUAGES: [&str; 6] = [
    "Anglický jazyk",
    "Francúzsky jazyk",
    "Nemecký jazyk",
    "Ruský jazyk",
    "Španielsky jazyk",
    "Taliansky jazyk",
];

const DENOMINATIONS: [(&str, &str); 6] = [
    ("Náboženstvo Cirkvi bratskej", "br"),
    ("Náboženstvo Gréckokatolíckej cirkvi", "gr"),
    ("Náboženstvo Pravoslávnej cirkvi", "pr"),
    ("Náboženstvo Reformovanej kresťanskej cirkvi", "rf"),
    ("Náboženstvo Rímskokatolíckej cirkvi", "rk"),
    ("Náboženstvo Evanjelickej cirkvi a. v.", "ev"),
];

fn default_cycles() -> Vec<CycleTab> {
    vec![
        CycleTab::new("1. cyklus (r. 1-3)", 1),
        CycleTab::new("2. cyklus (r. 4-5)", 2),
        CycleTab::new("3. cyklus (r. 6-9)", 3),
    ]
}

fn area(name: &str, entries: &[&str]) -> EducationalArea {
    EducationalArea {
        name: name.to_string(),
        entries: entries.iter().map(|s| s.to_string()).collect(),
    }
}

fn group<'a>(name: &str, members: impl IntoIterator<Item = &'a str>) -> SubjectGroup {
    SubjectGroup {
        name: name.to_string(),
        members: members.into_iter().map(str::to_string).collect(),
    }
}
