use std::sync::{Arc, LazyLock};

use context_error::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{DigestionError, DigestionErrorKind},
    sequence::AminoAcid,
    system::{Mass, da},
};

/// A modification that is placed on every site that matches its placement rule
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedModification {
    /// The name, used to refer to this modification in settings
    pub name: String,
    /// The monoisotopic mass difference this modification causes
    pub mass: Mass,
    /// Where this modification can be placed
    pub rule: PlacementRule,
}

/// Where a modification can be placed
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PlacementRule {
    /// On any of the listed amino acids, at the given position
    AminoAcid(Vec<AminoAcid>, Position),
    /// On the given terminus regardless of the amino acid
    Terminal(Position),
}

/// A position where a modification can be placed
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// At any location
    Anywhere,
    /// At the N terminus of any peptide
    AnyNTerm,
    /// At the C terminus of any peptide
    AnyCTerm,
    /// At the N terminus of the protein
    ProteinNTerm,
    /// At the C terminus of the protein
    ProteinCTerm,
}

impl Position {
    /// Check if this is an N terminal position
    pub const fn is_n_terminal(self) -> bool {
        matches!(self, Self::AnyNTerm | Self::ProteinNTerm)
    }

    /// Check if this is a C terminal position
    pub const fn is_c_terminal(self) -> bool {
        matches!(self, Self::AnyCTerm | Self::ProteinCTerm)
    }
}

impl PlacementRule {
    /// The position this rule allows
    pub const fn position(&self) -> Position {
        match self {
            Self::AminoAcid(_, position) | Self::Terminal(position) => *position,
        }
    }

    fn allows(&self, aminoacid: AminoAcid) -> bool {
        match self {
            Self::AminoAcid(aminoacids, _) => aminoacids.contains(&aminoacid),
            Self::Terminal(_) => true,
        }
    }
}

impl std::fmt::Display for FixedModification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FixedModification {
    /// Create a new fixed modification
    pub fn new(name: impl Into<String>, mass: Mass, rule: PlacementRule) -> Self {
        Self {
            name: name.into(),
            mass,
            rule,
        }
    }

    /// Look up a commonly used modification by name (case insensitive), see [`known_modifications`].
    /// # Errors
    /// If there is no known modification with this name.
    pub fn by_name(name: &str) -> Result<Self, DigestionError> {
        known_modifications::ALL
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name.trim()))
            .map(|m| (**m).clone())
            .ok_or_else(|| {
                BoxedError::new(
                    DigestionErrorKind::UnknownModification,
                    "Unknown modification",
                    format!(
                        "There is no known modification with this name, the known modifications are: {}",
                        known_modifications::ALL
                            .iter()
                            .map(|m| m.name.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                    Context::show(name.to_string()),
                )
            })
    }

    /// Check if this modifies the side chain of the given amino acid anywhere in a sequence
    pub fn is_residue_match(&self, aminoacid: AminoAcid) -> bool {
        self.rule.position() == Position::Anywhere && self.rule.allows(aminoacid)
    }

    /// Check if this modifies the N terminus of a peptide starting with the given amino acid
    pub fn is_n_term_match(&self, aminoacid: AminoAcid, protein_n_term: bool) -> bool {
        match self.rule.position() {
            Position::AnyNTerm => self.rule.allows(aminoacid),
            Position::ProteinNTerm => protein_n_term && self.rule.allows(aminoacid),
            _ => false,
        }
    }

    /// Check if this modifies the C terminus of a peptide ending with the given amino acid
    pub fn is_c_term_match(&self, aminoacid: AminoAcid, protein_c_term: bool) -> bool {
        match self.rule.position() {
            Position::AnyCTerm => self.rule.allows(aminoacid),
            Position::ProteinCTerm => protein_c_term && self.rule.allows(aminoacid),
            _ => false,
        }
    }

    /// Check if this is placed on a terminus
    pub fn is_terminal(&self) -> bool {
        let position = self.rule.position();
        position.is_n_terminal() || position.is_c_terminal()
    }
}

/// Some commonly used fixed modifications
pub mod known_modifications {
    use super::*;

    /// `Carbamidomethylation of C` the standard alkylation of cysteines
    pub static CARBAMIDOMETHYL_C: LazyLock<Arc<FixedModification>> = LazyLock::new(|| {
        Arc::new(FixedModification::new(
            "Carbamidomethylation of C",
            da(57.021_464),
            PlacementRule::AminoAcid(vec![AminoAcid::Cysteine], Position::Anywhere),
        ))
    });

    /// `Oxidation of M`
    pub static OXIDATION_M: LazyLock<Arc<FixedModification>> = LazyLock::new(|| {
        Arc::new(FixedModification::new(
            "Oxidation of M",
            da(15.994_915),
            PlacementRule::AminoAcid(vec![AminoAcid::Methionine], Position::Anywhere),
        ))
    });

    /// `Acetylation of protein N-term`
    pub static ACETYLATION_PROTEIN_N_TERM: LazyLock<Arc<FixedModification>> =
        LazyLock::new(|| {
            Arc::new(FixedModification::new(
                "Acetylation of protein N-term",
                da(42.010_565),
                PlacementRule::Terminal(Position::ProteinNTerm),
            ))
        });

    /// `Pyrolidone from Q` a loss of ammonia on an N terminal glutamine
    pub static PYROLIDONE_FROM_Q: LazyLock<Arc<FixedModification>> = LazyLock::new(|| {
        Arc::new(FixedModification::new(
            "Pyrolidone from Q",
            da(-17.026_549),
            PlacementRule::AminoAcid(vec![AminoAcid::Glutamine], Position::AnyNTerm),
        ))
    });

    /// `Amidation of peptide C-term`
    pub static AMIDATION_PEPTIDE_C_TERM: LazyLock<Arc<FixedModification>> =
        LazyLock::new(|| {
            Arc::new(FixedModification::new(
                "Amidation of peptide C-term",
                da(-0.984_016),
                PlacementRule::Terminal(Position::AnyCTerm),
            ))
        });

    /// `TMT 10-plex of K`
    pub static TMT_10_PLEX_K: LazyLock<Arc<FixedModification>> = LazyLock::new(|| {
        Arc::new(FixedModification::new(
            "TMT 10-plex of K",
            da(229.162_932),
            PlacementRule::AminoAcid(vec![AminoAcid::Lysine], Position::Anywhere),
        ))
    });

    /// `TMT 10-plex of peptide N-term`
    pub static TMT_10_PLEX_PEPTIDE_N_TERM: LazyLock<Arc<FixedModification>> =
        LazyLock::new(|| {
            Arc::new(FixedModification::new(
                "TMT 10-plex of peptide N-term",
                da(229.162_932),
                PlacementRule::Terminal(Position::AnyNTerm),
            ))
        });

    /// All known modifications, in the order they are searched by name
    pub static ALL: LazyLock<Vec<Arc<FixedModification>>> = LazyLock::new(|| {
        vec![
            CARBAMIDOMETHYL_C.clone(),
            OXIDATION_M.clone(),
            ACETYLATION_PROTEIN_N_TERM.clone(),
            PYROLIDONE_FROM_Q.clone(),
            AMIDATION_PEPTIDE_C_TERM.clone(),
            TMT_10_PLEX_K.clone(),
            TMT_10_PLEX_PEPTIDE_N_TERM.clone(),
        ]
    });
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        let modification = FixedModification::by_name("carbamidomethylation of c").unwrap();
        assert_eq!(modification, **known_modifications::CARBAMIDOMETHYL_C);
        let error = FixedModification::by_name("Phosphorylation of Y").unwrap_err();
        assert!(matches!(
            error.get_kind(),
            DigestionErrorKind::UnknownModification
        ));
    }

    #[test]
    fn placement() {
        let cam = &known_modifications::CARBAMIDOMETHYL_C;
        assert!(cam.is_residue_match(AminoAcid::Cysteine));
        assert!(!cam.is_residue_match(AminoAcid::Serine));
        assert!(!cam.is_n_term_match(AminoAcid::Cysteine, true));
        assert!(!cam.is_terminal());

        let acetyl = &known_modifications::ACETYLATION_PROTEIN_N_TERM;
        assert!(acetyl.is_n_term_match(AminoAcid::Methionine, true));
        assert!(!acetyl.is_n_term_match(AminoAcid::Methionine, false));
        assert!(!acetyl.is_c_term_match(AminoAcid::Methionine, true));
        assert!(!acetyl.is_residue_match(AminoAcid::Methionine));
        assert!(acetyl.is_terminal());

        let pyro = &known_modifications::PYROLIDONE_FROM_Q;
        assert!(pyro.is_n_term_match(AminoAcid::Glutamine, false));
        assert!(!pyro.is_n_term_match(AminoAcid::GlutamicAcid, false));

        let amidation = &known_modifications::AMIDATION_PEPTIDE_C_TERM;
        assert!(amidation.is_c_term_match(AminoAcid::Glycine, false));
    }
}
