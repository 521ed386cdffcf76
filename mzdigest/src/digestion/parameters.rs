use std::collections::BTreeMap;

use context_error::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{DigestionError, DigestionErrorKind},
    sequence::{Protease, known_proteases},
    system::Mass,
};

/// How a protein is cut into peptides
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum CleavageMode {
    /// The protein is not cut, it is used as a whole
    WholeProtein,
    /// The protein can be cut between any two amino acids
    Unspecific,
    /// The protein is only cut at the sites defined by the enzyme
    #[default]
    Enzyme,
}

impl std::fmt::Display for CleavageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::WholeProtein => "whole protein",
                Self::Unspecific => "unspecific",
                Self::Enzyme => "enzyme",
            }
        )
    }
}

/// The settings for an in-silico digestion: the cleavage mode, and for enzymatic digestion the
/// enzymes with the maximal number of missed cleavages for each of them.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DigestionParameters {
    cleavage_mode: CleavageMode,
    enzymes: Vec<Protease>,
    missed_cleavages: BTreeMap<String, usize>,
}

impl Default for DigestionParameters {
    /// Trypsin with at most two missed cleavages
    fn default() -> Self {
        Self::enzyme(known_proteases::TRYPSIN.clone(), 2)
    }
}

impl DigestionParameters {
    /// Do not digest, every protein is taken as is
    pub const fn whole_protein() -> Self {
        Self {
            cleavage_mode: CleavageMode::WholeProtein,
            enzymes: Vec::new(),
            missed_cleavages: BTreeMap::new(),
        }
    }

    /// Cut anywhere
    pub const fn unspecific() -> Self {
        Self {
            cleavage_mode: CleavageMode::Unspecific,
            enzymes: Vec::new(),
            missed_cleavages: BTreeMap::new(),
        }
    }

    /// Cut with the given enzyme allowing the given number of missed cleavages
    pub fn enzyme(protease: Protease, missed_cleavages: usize) -> Self {
        let mut parameters = Self {
            cleavage_mode: CleavageMode::Enzyme,
            enzymes: Vec::new(),
            missed_cleavages: BTreeMap::new(),
        };
        parameters.add_enzyme(protease, missed_cleavages);
        parameters
    }

    /// Add an enzyme with its number of missed cleavages, if an enzyme with the same name is
    /// already present only the missed cleavages are updated. Note that only a single enzyme can
    /// be iterated by the [`crate::digestion::IteratorFactory`].
    pub fn add_enzyme(&mut self, protease: Protease, missed_cleavages: usize) {
        self.missed_cleavages
            .insert(protease.name.clone(), missed_cleavages);
        if !self.enzymes.iter().any(|e| e.name == protease.name) {
            self.enzymes.push(protease);
        }
    }

    /// The cleavage mode
    pub const fn cleavage_mode(&self) -> CleavageMode {
        self.cleavage_mode
    }

    /// The enzymes, in the order they were added
    pub fn enzymes(&self) -> &[Protease] {
        &self.enzymes
    }

    /// The number of missed cleavages for the enzyme with the given name, zero if this enzyme is unknown
    pub fn missed_cleavages(&self, enzyme: &str) -> usize {
        self.missed_cleavages.get(enzyme).copied().unwrap_or_default()
    }

    /// Read digestion parameters from JSON
    /// # Errors
    /// If the text is not valid JSON or does not describe digestion parameters.
    pub fn from_json(text: &str) -> Result<Self, DigestionError> {
        serde_json::from_str(text).map_err(|err| {
            BoxedError::new(
                DigestionErrorKind::InvalidParameters,
                "Invalid digestion parameters",
                err.to_string(),
                Context::show(
                    text.lines()
                        .nth(err.line().saturating_sub(1))
                        .unwrap_or_default()
                        .to_string(),
                ),
            )
        })
    }

    /// Write these digestion parameters as JSON
    /// # Errors
    /// Only if serialisation fails, which would indicate a corrupted state.
    pub fn to_json(&self) -> Result<String, DigestionError> {
        serde_json::to_string_pretty(self).map_err(|err| {
            BoxedError::new(
                DigestionErrorKind::InvalidParameters,
                "Could not store digestion parameters",
                err.to_string(),
                Context::none(),
            )
        })
    }
}

/// The range of masses a peptide has to fall within to be admissible. The bounds are inclusive, a
/// missing bound is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MassWindow {
    /// The minimal mass
    pub min: Option<Mass>,
    /// The maximal mass
    pub max: Option<Mass>,
}

impl MassWindow {
    /// A window without bounds
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    /// Create a new window
    pub const fn new(min: Option<Mass>, max: Option<Mass>) -> Self {
        Self { min, max }
    }

    /// Check if the given mass lies within this window
    pub fn contains(&self, mass: Mass) -> bool {
        self.min.is_none_or(|min| mass >= min) && !self.exceeds_max(mass)
    }

    /// Check if the given mass is bigger than the maximum
    pub fn exceeds_max(&self, mass: Mass) -> bool {
        self.max.is_some_and(|max| mass > max)
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::system::da;

    #[test]
    fn window() {
        let window = MassWindow::new(Some(da(500.0)), Some(da(1000.0)));
        assert!(window.contains(da(500.0)));
        assert!(window.contains(da(1000.0)));
        assert!(!window.contains(da(499.9)));
        assert!(!window.contains(da(1000.1)));
        assert!(window.exceeds_max(da(1000.1)));
        assert!(!window.exceeds_max(da(10.0)));
        assert!(MassWindow::unbounded().contains(da(1e9)));
        assert!(MassWindow::new(Some(da(10.0)), None).contains(da(1e9)));
        assert!(!MassWindow::new(Some(da(10.0)), None).exceeds_max(da(1e9)));
    }

    #[test]
    fn missed_cleavages() {
        let mut parameters = DigestionParameters::default();
        assert_eq!(parameters.cleavage_mode(), CleavageMode::Enzyme);
        assert_eq!(parameters.enzymes().len(), 1);
        assert_eq!(parameters.missed_cleavages("Trypsin"), 2);
        assert_eq!(parameters.missed_cleavages("Lys-C"), 0);
        parameters.add_enzyme(known_proteases::TRYPSIN.clone(), 1);
        assert_eq!(parameters.enzymes().len(), 1);
        assert_eq!(parameters.missed_cleavages("Trypsin"), 1);
        parameters.add_enzyme(known_proteases::LYSC.clone(), 3);
        assert_eq!(parameters.enzymes().len(), 2);
        assert_eq!(parameters.missed_cleavages("Lys-C"), 3);
        assert!(DigestionParameters::unspecific().enzymes().is_empty());
    }

    #[test]
    fn json() {
        let parameters = DigestionParameters::enzyme(known_proteases::GLUC.clone(), 4);
        let json = parameters.to_json().unwrap();
        assert_eq!(DigestionParameters::from_json(&json).unwrap(), parameters);
        let whole = DigestionParameters::from_json(
            r#"{"cleavage_mode": "WholeProtein", "enzymes": [], "missed_cleavages": {}}"#,
        )
        .unwrap();
        assert_eq!(whole, DigestionParameters::whole_protein());
        let error = DigestionParameters::from_json(r#"{"cleavage_mode": "Sometimes"}"#)
            .unwrap_err();
        assert!(matches!(
            error.get_kind(),
            DigestionErrorKind::InvalidParameters
        ));
    }
}
