//! Presentation of a filtered table as a nested document.
//!
//! The presenter never renders pixels; it produces a [`Document`] of
//! headings, sections, tabs and item lists that a UI lays out. Nothing here
//! mutates the table it is given.

use crate::catalog::ResolvedSubject;
use crate::filter::{by_component, by_literacy, by_science_discipline, by_theme, of_kind};
use crate::table::StandardTable;
use crate::types::{Discipline, LiteracyFilter, StandardKind, INTRO, NONE_PLACEHOLDER};
use serde::Serialize;

/// Label shown above performance standards.
pub const STUDENT_CAN: &str = "Žiak vie/dokáže:";

/// Notice shown when a selection has no components.
pub const NO_COMPONENTS: &str = "Pre výber sa nenašli komponenty.";

/// Notice shown when a literacy filter matches nothing.
pub const NO_LITERACY_STANDARDS: &str = "Pre výber sa nenašli žiadne obsahové štandardy.";

/// Tab title of the combined second-foreign-language block.
pub const COMBINED_TAB: &str = "Komunikačné jazykové činnosti (recepcia, produkcia, interakcia)";

/// `typ` of the combined second-foreign-language standard.
pub const COMBINED_TYPE: &str = "Výkonový a obsahový štandard";

/// Layout chosen for a list of definitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "layout", content = "text", rename_all = "snake_case")]
pub enum RenderedItems {
    /// Goals: each item on its own line, already numbered.
    Numbered(String),
    /// Bullet items joined into one sentence.
    Clause(String),
    /// Standalone sentences.
    Paragraphs(Vec<String>),
}

impl RenderedItems {
    fn to_markdown(&self) -> String {
        match self {
            Self::Numbered(text) => format!("{}\n", text),
            Self::Clause(text) => format!("{}\n\n", text),
            Self::Paragraphs(parts) => parts.iter().map(|p| format!("{}\n\n", p)).collect(),
        }
    }
}

/// Pick the layout from the first character of the first item.
pub fn render_items<S: AsRef<str>>(items: &[S]) -> RenderedItems {
    let first = items.first().and_then(|s| s.as_ref().chars().next());
    match first {
        Some(c) if c.is_ascii_digit() => {
            RenderedItems::Numbered(items.iter().map(|s| format!("{}\n", s.as_ref())).collect())
        }
        Some('-') => {
            let stripped: Vec<&str> = items
                .iter()
                .map(|s| {
                    let s = s.as_ref();
                    s.strip_prefix("- ").or_else(|| s.strip_prefix('-')).unwrap_or(s)
                })
                .collect();
            RenderedItems::Clause(format!("{}.", stripped.join(",\n")))
        }
        _ => RenderedItems::Paragraphs(items.iter().map(|s| s.as_ref().to_string()).collect()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// Tab of a tab strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub title: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading { level: u8, text: String },
    /// Standard-subtype heading.
    Subtype { text: String },
    Label { text: String },
    /// Highlighted box.
    Info { text: String },
    Notice { level: NoticeLevel, text: String },
    Paragraph {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        text: String,
    },
    Items { ids: Vec<String>, items: RenderedItems },
    /// Collapsible section.
    Section { title: String, blocks: Vec<Block> },
    Tabs { tabs: Vec<Tab> },
}

impl Block {
    fn heading(level: u8, text: &str) -> Self {
        Self::Heading {
            level,
            text: text.to_string(),
        }
    }

    fn section(title: &str, blocks: Vec<Block>) -> Self {
        Self::Section {
            title: title.to_string(),
            blocks,
        }
    }

    fn to_markdown(&self, out: &mut String) {
        match self {
            Self::Heading { level, text } => {
                out.push_str(&format!("{} {}\n\n", "#".repeat(*level as usize), text))
            }
            Self::Subtype { text } | Self::Label { text } => out.push_str(&format!("**{}**\n\n", text)),
            Self::Info { text } => out.push_str(&format!("> {}\n\n", text)),
            Self::Notice { text, .. } => out.push_str(&format!("> **{}**\n\n", text)),
            Self::Paragraph { text, .. } => out.push_str(&format!("{}\n\n", text)),
            Self::Items { items, .. } => out.push_str(&items.to_markdown()),
            Self::Section { title, blocks } => {
                out.push_str(&format!("##### {}\n\n", title));
                blocks.iter().for_each(|b| b.to_markdown(out));
            }
            Self::Tabs { tabs } => {
                for tab in tabs {
                    out.push_str(&format!("#### {}\n\n", tab.title));
                    tab.blocks.iter().for_each(|b| b.to_markdown(out));
                }
            }
        }
    }
}

/// A rendered view of one subject and cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    /// Discipline choice in effect, when the view offers one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disciplines: Option<Vec<Discipline>>,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn to_markdown(&self) -> String {
        let mut out = format!("### {}\n\n", self.title);
        for block in &self.blocks {
            block.to_markdown(&mut out);
        }
        out
    }
}

/// Definitions of `table` as one item list, ids kept for tooltips.
pub fn items_block(table: &StandardTable) -> Block {
    let texts: Vec<&str> = table.iter().map(|r| r.definicia.as_str()).collect();
    Block::Items {
        ids: table.ids().map(str::to_string).collect(),
        items: render_items(&texts),
    }
}

/// Split rows by standard subtype in first-seen order.
///
/// `Úvod` and `none` groups are shown without a heading. When no row has a
/// subtype, everything is one group without a heading. `student_can` adds
/// the "student can" label used for performance standards.
pub fn group_by_subtype(table: &StandardTable, student_can: bool) -> Vec<Block> {
    let mut blocks = Vec::new();
    let subtypes = table.distinct(|r| r.typ_standardu.as_deref());

    if subtypes.is_empty() {
        if student_can {
            blocks.push(Block::Label {
                text: STUDENT_CAN.to_string(),
            });
        }
        blocks.push(items_block(table));
        return blocks;
    }

    for subtype in &subtypes {
        if subtype != INTRO && subtype != NONE_PLACEHOLDER {
            blocks.push(Block::Subtype { text: subtype.clone() });
            if student_can {
                blocks.push(Block::Label {
                    text: STUDENT_CAN.to_string(),
                });
            }
        }
        let rows = table.filter(|r| r.typ_standardu.as_deref() == Some(subtype.as_str()));
        blocks.push(items_block(&rows));
    }
    blocks
}

/// Build the browse document for a subject and cycle.
///
/// `table` must already be narrowed to the subject, cycle and variant (see
/// [`crate::selection`]). `disciplines` applies only where the subject splits
/// content by science discipline; `None` there means all disciplines.
pub fn browse(
    resolved: &ResolvedSubject<'_>,
    cycle: u8,
    literacy: LiteracyFilter,
    disciplines: Option<&[Discipline]>,
    table: &StandardTable,
) -> Document {
    let subject = resolved.subject;
    let cycle_label = subject.cycle_label(cycle).unwrap_or_default();
    let mut document = Document {
        title: format!("{} - {}", subject.name, cycle_label),
        disciplines: None,
        blocks: Vec::new(),
    };

    if literacy == LiteracyFilter::All {
        browse_all(resolved, cycle, disciplines, table, &mut document);
    } else {
        document.blocks = browse_literacy(literacy, table);
    }
    document
}

fn browse_all(
    resolved: &ResolvedSubject<'_>,
    cycle: u8,
    disciplines: Option<&[Discipline]>,
    table: &StandardTable,
    document: &mut Document,
) {
    let subject = resolved.subject;
    let under_goals = subject.performance_under_goals;
    let blocks = &mut document.blocks;

    blocks.push(Block::heading(
        4,
        if under_goals { "Ciele a výkonové štandardy" } else { "Ciele" },
    ));

    // at most one main goal; extra ones are reported at load time
    if let Some(main_goal) = of_kind(table, StandardKind::MainGoal).records().first() {
        blocks.push(Block::Info {
            text: main_goal.definicia.clone(),
        });
    }

    let goals = of_kind(table, StandardKind::Goal);
    blocks.push(Block::section("Ciele vzdelávania", vec![items_block(&goals)]));

    if under_goals {
        let performance = of_kind(table, StandardKind::Performance);
        blocks.push(Block::section("Výkonové štandardy", group_by_subtype(&performance, true)));
        blocks.push(Block::heading(4, "Obsahové štandardy pre komponenty"));

        if subject.content_intro {
            let intro = table.filter(|r| r.is_kind(StandardKind::Content) && r.typ_standardu.as_deref() == Some(INTRO));
            if let Some(first) = intro.records().first() {
                blocks.push(Block::Paragraph {
                    id: Some(first.id.clone()),
                    text: first.definicia.clone(),
                });
            }
        }
    } else {
        blocks.push(Block::heading(4, "Vzdelávacie štandardy pre komponenty"));
    }

    let narrowed;
    let table = if subject.discipline_cycle == Some(cycle) {
        let chosen = disciplines.map(<[Discipline]>::to_vec).unwrap_or_else(|| Discipline::ALL.to_vec());
        narrowed = by_science_discipline(table, &chosen);
        document.disciplines = Some(chosen);
        &narrowed
    } else {
        table
    };

    if subject.combined_cycle == Some(cycle) {
        let combined = table.filter(|r| r.typ == COMBINED_TYPE);
        let tab_blocks = match combined.records().first() {
            Some(record) => vec![Block::Info {
                text: record.definicia.clone(),
            }],
            None => vec![Block::Notice {
                level: NoticeLevel::Warning,
                text: NO_COMPONENTS.to_string(),
            }],
        };
        blocks.push(Block::Tabs {
            tabs: vec![Tab {
                title: COMBINED_TAB.to_string(),
                blocks: tab_blocks,
            }],
        });
        return;
    }

    let content = of_kind(table, StandardKind::Content);
    let components = content.distinct(|r| r.komponent.as_deref());
    if components.is_empty() {
        blocks.push(Block::Notice {
            level: NoticeLevel::Error,
            text: NO_COMPONENTS.to_string(),
        });
        return;
    }

    let performance = of_kind(table, StandardKind::Performance);
    let tabs = components
        .iter()
        .map(|component| Tab {
            title: component.clone(),
            blocks: component_blocks(resolved, component, &content, &performance),
        })
        .collect();
    blocks.push(Block::Tabs { tabs });
}

fn component_blocks(
    resolved: &ResolvedSubject<'_>,
    component: &str,
    content: &StandardTable,
    performance: &StandardTable,
) -> Vec<Block> {
    let subject = resolved.subject;
    let mut blocks = Vec::new();

    if !subject.performance_under_goals {
        let mut own = by_component(performance, component);
        if own.is_empty() {
            // performance standards shared by all components
            own = performance.clone();
        }
        blocks.push(Block::section("Výkonové štandardy", group_by_subtype(&own, true)));
        if subject.split_content_standards {
            blocks.push(Block::heading(5, "Obsahové štandardy"));
        }
    }

    let rows = by_component(content, component);
    let themes = rows.distinct(|r| r.tema.as_deref());
    if !themes.is_empty() {
        for theme in &themes {
            blocks.push(Block::section(theme, group_by_subtype(&by_theme(&rows, theme), false)));
        }
    } else if !subject.performance_under_goals {
        blocks.push(Block::section("Obsahový štandard", group_by_subtype(&rows, false)));
    } else {
        blocks.extend(group_by_subtype(&rows, false));
    }
    blocks
}

/// Content standards developing a literacy, nested component → theme →
/// subtype.
fn browse_literacy(literacy: LiteracyFilter, table: &StandardTable) -> Vec<Block> {
    let mut blocks = vec![Block::Info {
        text: format!(
            "{} {} sa môže rozvíjať v týchto obsahových štandardoch.",
            literacy.label(),
            literacy.icons()
        ),
    }];

    let rows = of_kind(&by_literacy(table, literacy), StandardKind::Content);
    if rows.is_empty() {
        blocks.push(Block::Notice {
            level: NoticeLevel::Warning,
            text: NO_LITERACY_STANDARDS.to_string(),
        });
        return blocks;
    }

    let value = |v: &Option<String>| v.clone().unwrap_or_default();
    let shown = |v: &str| !v.is_empty() && v != NONE_PLACEHOLDER;

    for component in distinct_filled(&rows, |r| value(&r.komponent)) {
        if !component.is_empty() {
            blocks.push(Block::heading(3, &component));
        }
        let in_component = rows.filter(|r| value(&r.komponent) == component);
        for theme in distinct_filled(&in_component, |r| value(&r.tema)) {
            if shown(theme.as_str()) {
                blocks.push(Block::heading(4, &theme));
            }
            let in_theme = in_component.filter(|r| value(&r.tema) == theme);
            for subtype in distinct_filled(&in_theme, |r| value(&r.typ_standardu)) {
                if shown(subtype.as_str()) {
                    blocks.push(Block::heading(5, &subtype));
                }
                for record in in_theme.iter().filter(|r| value(&r.typ_standardu) == subtype) {
                    blocks.push(Block::Paragraph {
                        id: Some(record.id.clone()),
                        text: record.definicia.clone(),
                    });
                }
            }
        }
    }
    blocks
}

/// Distinct values with nulls read as empty strings, first-seen order.
fn distinct_filled<F>(table: &StandardTable, value: F) -> Vec<String>
where
    F: Fn(&crate::types::StandardRecord) -> String,
{
    let mut seen: Vec<String> = Vec::new();
    for record in table.iter() {
        let v = value(record);
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}
