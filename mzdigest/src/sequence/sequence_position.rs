use serde::{Deserialize, Serialize};

/// A position on a peptide
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
pub enum SequencePosition {
    /// N-terminal
    NTerm,
    /// An amino acid at the given index
    Index(usize),
    /// C-terminal
    CTerm,
}

impl Default for SequencePosition {
    fn default() -> Self {
        Self::Index(0)
    }
}

impl std::fmt::Display for SequencePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NTerm => write!(f, "N-terminal"),
            Self::Index(index) => write!(f, "{index}"),
            Self::CTerm => write!(f, "C-terminal"),
        }
    }
}

impl SequencePosition {
    /// Shift an index by the given offset, used to translate a position on a peptide to a
    /// position on the protein it came from. Terminal positions are left untouched.
    #[must_use]
    pub const fn offset(self, offset: usize) -> Self {
        match self {
            Self::Index(i) => Self::Index(i + offset),
            n => n,
        }
    }
}
