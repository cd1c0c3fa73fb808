//! Core types for the curriculum standards catalogue.

use serde::{Deserialize, Serialize};

/// Subtype/theme value marking an introductory row.
pub const INTRO: &str = "Úvod";

/// Literal placeholder used in the source table for "no value".
pub const NONE_PLACEHOLDER: &str = "none";

/// Cross-cutting literacy a standard can develop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literacy {
    Visual,
    Reading,
    Digital,
    Financial,
    Civic,
    Media,
    Intercultural,
    Environmental,
    SocialEmotional,
}

impl Literacy {
    /// All literacies in column order.
    pub const ALL: [Literacy; 9] = [
        Self::Visual,
        Self::Reading,
        Self::Digital,
        Self::Financial,
        Self::Civic,
        Self::Media,
        Self::Intercultural,
        Self::Environmental,
        Self::SocialEmotional,
    ];

    /// Column header in the source table.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Visual => "Vizuálna gramotnosť",
            Self::Reading => "Čitateľská gramotnosť",
            Self::Digital => "Digitálna gramotnosť",
            Self::Financial => "Finančná gramotnosť",
            Self::Civic => "Občianska gramotnosť",
            Self::Media => "Mediálna gramotnosť",
            Self::Intercultural => "Interkultúrna gramotnosť",
            Self::Environmental => "Environmentálna gramotnosť",
            Self::SocialEmotional => "Sociálna a emocionálna gramotnosť",
        }
    }

    /// Icon appended to definitions developing this literacy.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Visual => "👁️",
            Self::Reading => "📖",
            Self::Digital => "💻",
            Self::Financial => "📈",
            Self::Civic => "🙋‍♀️",
            Self::Media => "📱",
            Self::Intercultural => "🌍",
            Self::Environmental => "🌱",
            Self::SocialEmotional => "🫂",
        }
    }

    /// Inline marker appended to an annotated definition.
    pub fn marker(self) -> String {
        format!(" <span title='{}'>{}</span>", self.column_name(), self.icon())
    }
}

/// Literacy choice offered to the user.
///
/// Two entries are compound aliases: civic covers civic, media and
/// intercultural; reading-visual covers reading and visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteracyFilter {
    All,
    ReadingVisual,
    Digital,
    Financial,
    Civic,
    Environmental,
    SocialEmotional,
}

impl Default for LiteracyFilter {
    fn default() -> Self {
        Self::All
    }
}

impl LiteracyFilter {
    /// Selectable filters in legend order, `All` first.
    pub const ALL: [LiteracyFilter; 7] = [
        Self::All,
        Self::ReadingVisual,
        Self::Digital,
        Self::Financial,
        Self::Civic,
        Self::Environmental,
        Self::SocialEmotional,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Všetky",
            Self::ReadingVisual => "Čitateľská a vizuálna gramotnosť",
            Self::Digital => "Digitálna gramotnosť",
            Self::Financial => "Finančná gramotnosť",
            Self::Civic => "Občianska gramotnosť",
            Self::Environmental => "Environmentálna gramotnosť",
            Self::SocialEmotional => "Sociálna a emocionálna gramotnosť",
        }
    }

    /// Machine name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::ReadingVisual => "reading_visual",
            Self::Digital => "digital",
            Self::Financial => "financial",
            Self::Civic => "civic",
            Self::Environmental => "environmental",
            Self::SocialEmotional => "social_emotional",
        }
    }

    /// Parse from a display label or the machine name.
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == s || f.as_str() == s)
    }

    /// Underlying literacy columns; empty for `All`.
    pub fn members(self) -> &'static [Literacy] {
        match self {
            Self::All => &[],
            Self::ReadingVisual => &[Literacy::Reading, Literacy::Visual],
            Self::Digital => &[Literacy::Digital],
            Self::Financial => &[Literacy::Financial],
            Self::Civic => &[Literacy::Civic, Literacy::Media, Literacy::Intercultural],
            Self::Environmental => &[Literacy::Environmental],
            Self::SocialEmotional => &[Literacy::SocialEmotional],
        }
    }

    /// Legend icons, in display order.
    pub fn icons(self) -> String {
        match self {
            // reading icon comes first in the legend
            Self::ReadingVisual => format!("{}{}", Literacy::Reading.icon(), Literacy::Visual.icon()),
            _ => self.members().iter().map(|l| l.icon()).collect(),
        }
    }
}

/// Kind of a standard, encoded as a token inside its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardKind {
    MainGoal,
    Goal,
    Performance,
    Content,
}

impl StandardKind {
    pub fn token(self) -> &'static str {
        match self {
            Self::MainGoal => "-hc-",
            Self::Goal => "-c-",
            Self::Performance => "-v-",
            Self::Content => "-o-",
        }
    }

    /// Substring test on the id. Tokens can coincidentally occur in
    /// unrelated ids; that is inherited from the id encoding.
    pub fn matches(self, id: &str) -> bool {
        id.contains(self.token())
    }
}

/// Natural-science discipline taught within Človek a príroda in cycle 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    Physics,
    Chemistry,
    Biology,
}

impl Discipline {
    pub const ALL: [Discipline; 3] = [Self::Physics, Self::Chemistry, Self::Biology];

    pub fn label(self) -> &'static str {
        match self {
            Self::Physics => "Fyzika",
            Self::Chemistry => "Chémia",
            Self::Biology => "Biológia",
        }
    }

    /// Short code used in the superscript marker.
    pub fn code(self) -> &'static str {
        match self {
            Self::Physics => "F",
            Self::Chemistry => "CH",
            Self::Biology => "B",
        }
    }

    /// Inline marker tagging a definition with this discipline.
    pub fn marker(self) -> String {
        format!("<sup>{}</sup>", self.code())
    }

    /// Machine name, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Physics => "physics",
            Self::Chemistry => "chemistry",
            Self::Biology => "biology",
        }
    }

    /// Parse from a display label, marker code or machine name.
    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.label() == s || d.code() == s || d.as_str() == s)
    }
}

/// One row of the standards catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardRecord {
    pub id: String,
    pub predmet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cyklus: Option<u8>,
    pub typ: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub komponent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typ_standardu: Option<String>,
    pub definicia: String,
    pub definicia_clean: String,
    /// Literacies with a non-null cell, in column order.
    pub literacies: Vec<Literacy>,
}

impl StandardRecord {
    pub fn is_kind(&self, kind: StandardKind) -> bool {
        kind.matches(&self.id)
    }

    pub fn has_literacy(&self, literacy: Literacy) -> bool {
        self.literacies.contains(&literacy)
    }

    /// True for rows whose subtype or theme is the intro placeholder.
    pub fn is_intro(&self) -> bool {
        self.typ_standardu.as_deref() == Some(INTRO) || self.tema.as_deref() == Some(INTRO)
    }
}
