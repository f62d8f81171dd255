use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QueryError;

/// How far a query is dispatched: this node, a peer group, or the whole network.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SearchScope {
    Local,
    GroupDht,
    GroupAll,
    GlobalDht,
    GlobalAll,
}

impl SearchScope {
    /// Numeric code used on the wire.
    pub fn code(self) -> u8 {
        match self {
            SearchScope::Local => 0,
            SearchScope::GroupDht => 1,
            SearchScope::GroupAll => 2,
            SearchScope::GlobalDht => 3,
            SearchScope::GlobalAll => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SearchScope::Local),
            1 => Some(SearchScope::GroupDht),
            2 => Some(SearchScope::GroupAll),
            3 => Some(SearchScope::GlobalDht),
            4 => Some(SearchScope::GlobalAll),
            _ => None,
        }
    }

    /// Whether the group name and target cap apply.
    pub fn is_group(self) -> bool {
        matches!(self, SearchScope::GroupDht | SearchScope::GroupAll)
    }

    pub fn is_global(self) -> bool {
        matches!(self, SearchScope::GlobalDht | SearchScope::GlobalAll)
    }
}

/// Media type a query targets.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ContentDomain {
    #[default]
    Text,
    Image,
    Audio,
    Video,
    App,
}

impl ContentDomain {
    /// Map a request label onto a domain. Unknown labels fall back to `Text`.
    pub fn classify(label: &str) -> Self {
        match label {
            "text" => ContentDomain::Text,
            "image" => ContentDomain::Image,
            "audio" => ContentDomain::Audio,
            "video" => ContentDomain::Video,
            "app" => ContentDomain::App,
            _ => ContentDomain::Text,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentDomain::Text => "text",
            ContentDomain::Image => "image",
            ContentDomain::Audio => "audio",
            ContentDomain::Video => "video",
            ContentDomain::App => "app",
        }
    }

    pub fn code(self) -> u8 {
        match self {
            ContentDomain::Text => 0,
            ContentDomain::Image => 1,
            ContentDomain::Audio => 2,
            ContentDomain::Video => 3,
            ContentDomain::App => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ContentDomain::Text),
            1 => Some(ContentDomain::Image),
            2 => Some(ContentDomain::Audio),
            3 => Some(ContentDomain::Video),
            4 => Some(ContentDomain::App),
            _ => None,
        }
    }
}

/// Number of document attribute positions a constraint covers.
pub const CONSTRAINT_WIDTH: usize = 4;

/// Requirement on a single document attribute.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ConstraintFlag {
    Present,
    Absent,
    Any,
}

impl ConstraintFlag {
    fn admits(self, set: bool) -> bool {
        match self {
            ConstraintFlag::Present => set,
            ConstraintFlag::Absent => !set,
            ConstraintFlag::Any => true,
        }
    }

    fn symbol(self) -> char {
        match self {
            ConstraintFlag::Present => '1',
            ConstraintFlag::Absent => '0',
            ConstraintFlag::Any => '_',
        }
    }
}

/// Positional attribute filter applied to result documents.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Constraint {
    flags: [ConstraintFlag; CONSTRAINT_WIDTH],
}

impl Constraint {
    /// Every attribute must be absent.
    pub const EMPTY: Constraint = Constraint {
        flags: [ConstraintFlag::Absent; CONSTRAINT_WIDTH],
    };

    /// No attribute filtering.
    pub const CATCH_ALL: Constraint = Constraint {
        flags: [ConstraintFlag::Any; CONSTRAINT_WIDTH],
    };

    pub fn new(flags: [ConstraintFlag; CONSTRAINT_WIDTH]) -> Self {
        Self { flags }
    }

    /// Flag at `position`, `None` past the last position.
    pub fn flag(&self, position: usize) -> Option<ConstraintFlag> {
        self.flags.get(position).copied()
    }

    /// Copy of this constraint with one position replaced.
    /// Positions past the last are ignored.
    pub fn with_flag(mut self, position: usize, flag: ConstraintFlag) -> Self {
        if let Some(slot) = self.flags.get_mut(position) {
            *slot = flag;
        }
        self
    }

    pub fn flags(&self) -> &[ConstraintFlag; CONSTRAINT_WIDTH] {
        &self.flags
    }

    pub fn is_catch_all(&self) -> bool {
        self.flags.iter().all(|f| *f == ConstraintFlag::Any)
    }

    /// Check a document's attribute bits against every position.
    pub fn admits(&self, attributes: &[bool; CONSTRAINT_WIDTH]) -> bool {
        self.flags
            .iter()
            .zip(attributes.iter())
            .all(|(flag, set)| flag.admits(*set))
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Constraint::CATCH_ALL
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flag in &self.flags {
            write!(f, "{}", flag.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Constraint {
    type Err = QueryError;

    /// Parse `1` (present), `0` (absent) and `_` (any), one char per position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != CONSTRAINT_WIDTH {
            return Err(QueryError::InvalidConstraint(s.to_string()));
        }
        let mut flags = [ConstraintFlag::Any; CONSTRAINT_WIDTH];
        for (slot, c) in flags.iter_mut().zip(chars) {
            *slot = match c {
                '1' => ConstraintFlag::Present,
                '0' => ConstraintFlag::Absent,
                '_' => ConstraintFlag::Any,
                _ => return Err(QueryError::InvalidConstraint(s.to_string())),
            };
        }
        Ok(Self { flags })
    }
}
