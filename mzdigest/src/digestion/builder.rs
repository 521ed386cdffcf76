use std::sync::Arc;

use thin_vec::ThinVec;

use crate::{
    digestion::MassWindow,
    sequence::{AminoAcid, FixedModification, Peptide, SequencePosition},
    system::{Mass, da, min_mass, water},
};

/// Builds peptides from windows on a protein sequence. It places the fixed modifications, checks
/// the number of ambiguous amino acids, and calculates the mass. The configuration is fixed on
/// creation, so a single builder can be shared by reference between any number of iterators.
#[derive(Clone, Debug)]
pub struct PeptideBuilder {
    fixed_modifications: Vec<Arc<FixedModification>>,
    max_ambiguous: Option<usize>,
    /// The index in the fixed modifications for the side chain modification of each amino acid
    residue_modifications: [Option<usize>; AminoAcid::TOTAL_NUMBER],
    /// The mass of each amino acid including its side chain modification, none for B/Z/X
    residue_masses: [Option<Mass>; AminoAcid::TOTAL_NUMBER],
    /// The lowest mass each code can contribute to a peptide, for B/J/Z/X the lowest of the options
    residue_lower_bounds: [Mass; AminoAcid::TOTAL_NUMBER],
    /// The lowest mass the termini can contribute to a peptide
    terminal_lower_bound: Mass,
}

impl Default for PeptideBuilder {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}

impl PeptideBuilder {
    /// Create a builder with the given fixed modifications (if multiple modifications fit on the
    /// same site the first one is used) and the maximal number of ambiguous amino acids (B/J/Z/X)
    /// allowed in a single peptide (`None` is unbounded).
    pub fn new(
        fixed_modifications: Vec<Arc<FixedModification>>,
        max_ambiguous: Option<usize>,
    ) -> Self {
        let all = AminoAcid::ALL_AMINO_ACIDS
            .iter()
            .copied()
            .chain(std::iter::once(AminoAcid::Unknown));

        let mut residue_modifications = [None; AminoAcid::TOTAL_NUMBER];
        let mut residue_masses = [None; AminoAcid::TOTAL_NUMBER];
        for aa in all.clone() {
            let modification = fixed_modifications
                .iter()
                .position(|m| m.is_residue_match(aa));
            residue_modifications[aa as usize] = modification;
            residue_masses[aa as usize] = aa.monoisotopic_mass().map(|mass| {
                modification.map_or(mass, |index| mass + fixed_modifications[index].mass)
            });
        }

        let mut residue_lower_bounds = [da(0.0); AminoAcid::TOTAL_NUMBER];
        for aa in all {
            residue_lower_bounds[aa as usize] = aa
                .options()
                .iter()
                .filter_map(|option| residue_masses[*option as usize])
                .reduce(min_mass)
                .unwrap_or(da(0.0));
        }

        let lowest_terminal = |terminal: fn(&FixedModification) -> bool| {
            fixed_modifications
                .iter()
                .filter(|m| terminal(m))
                .map(|m| m.mass)
                .fold(da(0.0), min_mass)
        };
        let terminal_lower_bound = water()
            + lowest_terminal(|m| m.rule.position().is_n_terminal())
            + lowest_terminal(|m| m.rule.position().is_c_terminal());

        Self {
            fixed_modifications,
            max_ambiguous,
            residue_modifications,
            residue_masses,
            residue_lower_bounds,
            terminal_lower_bound,
        }
    }

    /// The fixed modifications in order of precedence
    pub fn fixed_modifications(&self) -> &[Arc<FixedModification>] {
        &self.fixed_modifications
    }

    /// The maximal number of ambiguous amino acids in a single peptide
    pub const fn max_ambiguous(&self) -> Option<usize> {
        self.max_ambiguous
    }

    /// Check if the number of ambiguous amino acids in this window is within the limit
    pub fn allows_ambiguity(&self, window: &[AminoAcid]) -> bool {
        self.max_ambiguous
            .is_none_or(|max| AminoAcid::count_ambiguous(window) <= max)
    }

    /// The lowest mass this code can contribute to a peptide
    pub(crate) const fn residue_lower_bound(&self, aminoacid: AminoAcid) -> Mass {
        self.residue_lower_bounds[aminoacid as usize]
    }

    /// The lowest mass the termini can contribute to a peptide
    pub(crate) const fn terminal_lower_bound(&self) -> Mass {
        self.terminal_lower_bound
    }

    /// Build the peptide for `residues`, which starts at index `start` on `protein`. Returns
    /// `None` if the window is empty, contains too many ambiguous amino acids, contains an amino
    /// acid without a defined mass (B/Z/X, these have to be expanded first), or if the mass of the
    /// peptide falls outside of the window.
    pub fn build(
        &self,
        residues: &[AminoAcid],
        protein: &[AminoAcid],
        start: usize,
        mass_window: &MassWindow,
    ) -> Option<Peptide> {
        let (first, last) = (*residues.first()?, *residues.last()?);
        if !self.allows_ambiguity(residues) {
            return None;
        }
        let protein_n_term = start == 0;
        let protein_c_term = start + residues.len() >= protein.len();

        let mut modifications = ThinVec::new();
        let mut mass = water();
        if let Some(modification) = self
            .fixed_modifications
            .iter()
            .find(|m| m.is_n_term_match(first, protein_n_term))
        {
            mass += modification.mass;
            modifications.push((SequencePosition::NTerm, modification.clone()));
        }
        for (index, aa) in residues.iter().enumerate() {
            mass += self.residue_masses[*aa as usize]?;
            if let Some(modification) = self.residue_modifications[*aa as usize] {
                modifications.push((
                    SequencePosition::Index(index),
                    self.fixed_modifications[modification].clone(),
                ));
            }
        }
        if let Some(modification) = self
            .fixed_modifications
            .iter()
            .find(|m| m.is_c_term_match(last, protein_c_term))
        {
            mass += modification.mass;
            modifications.push((SequencePosition::CTerm, modification.clone()));
        }

        mass_window
            .contains(mass)
            .then(|| Peptide::new(residues.to_vec(), modifications, mass))
    }
}
