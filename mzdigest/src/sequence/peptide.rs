use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thin_vec::ThinVec;

use crate::{
    sequence::{AminoAcid, FixedModification, SequencePosition},
    system::Mass,
};

/// A peptide with only concrete amino acids, its fixed modifications placed and the resulting
/// monoisotopic mass calculated. A peptide is immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Peptide {
    sequence: Vec<AminoAcid>,
    modifications: ThinVec<(SequencePosition, Arc<FixedModification>)>,
    mass: Mass,
}

impl Peptide {
    pub(crate) const fn new(
        sequence: Vec<AminoAcid>,
        modifications: ThinVec<(SequencePosition, Arc<FixedModification>)>,
        mass: Mass,
    ) -> Self {
        Self {
            sequence,
            modifications,
            mass,
        }
    }

    /// The amino acids of this peptide
    pub fn sequence(&self) -> &[AminoAcid] {
        &self.sequence
    }

    /// The fixed modifications placed on this peptide, with the positions relative to the peptide
    pub fn modifications(&self) -> &[(SequencePosition, Arc<FixedModification>)] {
        &self.modifications
    }

    /// The monoisotopic mass of the full peptide including all modifications
    pub const fn mass(&self) -> Mass {
        self.mass
    }

    /// The number of amino acids
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Check if there are no amino acids in this peptide
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

impl std::fmt::Display for Peptide {
    /// Shows the sequence as one letter codes, modifications are shown in square brackets after the
    /// site they are placed on, terminal modifications are separated by a dash.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let at = |position: SequencePosition| {
            self.modifications
                .iter()
                .filter(move |(p, _)| *p == position)
                .map(|(_, m)| m)
        };
        for modification in at(SequencePosition::NTerm) {
            write!(f, "[{modification}]-")?;
        }
        for (index, aminoacid) in self.sequence.iter().enumerate() {
            write!(f, "{aminoacid}")?;
            for modification in at(SequencePosition::Index(index)) {
                write!(f, "[{modification}]")?;
            }
        }
        for modification in at(SequencePosition::CTerm) {
            write!(f, "-[{modification}]")?;
        }
        Ok(())
    }
}

/// A peptide together with the 0-based index of its first amino acid in the protein it was taken from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeptideWithPosition {
    /// The peptide
    pub peptide: Peptide,
    /// The index of the first amino acid on the protein
    pub start: usize,
}

impl PeptideWithPosition {
    /// The index one past the last amino acid of this peptide on the protein
    pub fn end(&self) -> usize {
        self.start + self.peptide.len()
    }

    /// The fixed modifications with their positions translated to positions on the protein
    pub fn protein_modifications(
        &self,
    ) -> impl Iterator<Item = (SequencePosition, &FixedModification)> + '_ {
        self.peptide
            .modifications()
            .iter()
            .map(|(position, modification)| (position.offset(self.start), &**modification))
    }
}
