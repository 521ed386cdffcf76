use std::{iter::FusedIterator, ops::Range};

use itertools::{Itertools, structs::MultiProduct};

use crate::{
    digestion::walk::{Walk, WalkContext},
    sequence::{AminoAcid, PeptideWithPosition},
};

/// The enumeration strategy picked by the [`crate::digestion::IteratorFactory`]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum IteratorStrategy {
    /// The full sequence as a single peptide
    NoDigestion,
    /// The full sequence as a single window, expanding the ambiguous amino acids
    NoDigestionCombination,
    /// All subsequences
    Unspecific,
    /// All subsequences, expanding the ambiguous amino acids
    UnspecificCombination,
    /// The fragments between the cleavage sites of one enzyme
    SingleEnzyme,
    /// The fragments between the cleavage sites of one enzyme, expanding the ambiguous amino acids
    SingleEnzymeCombination,
}

impl std::fmt::Display for IteratorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::NoDigestion => "no digestion",
                Self::NoDigestionCombination => "no digestion combination",
                Self::Unspecific => "unspecific",
                Self::UnspecificCombination => "unspecific combination",
                Self::SingleEnzyme => "single enzyme",
                Self::SingleEnzymeCombination => "single enzyme combination",
            }
        )
    }
}

/// Iterates over the peptides of a single protein, one peptide at a time. Created by
/// [`crate::digestion::IteratorFactory::sequence_iterator`]. This is a single pass cursor, once it
/// returns `None` it will always return `None`.
#[derive(Clone, Debug)]
pub struct SequenceIterator<'a> {
    context: WalkContext<'a>,
    candidates: Candidates,
    strategy: IteratorStrategy,
}

/// The windows from a walk, either used as is or expanded into all concrete sequences
#[derive(Clone, Debug)]
pub(crate) enum Candidates {
    Plain(Walk),
    Combination(Combination),
}

/// Decorates a walk, every window is expanded into all combinations of concrete amino acids
#[derive(Clone, Debug)]
pub(crate) struct Combination {
    walk: Walk,
    pending: Option<Expansion>,
    /// A copy of the protein to place concrete windows in, only used for enzymatic digestion
    scratch: Vec<AminoAcid>,
}

impl Combination {
    pub(crate) fn new(walk: Walk, protein: &[AminoAcid]) -> Self {
        let scratch = if matches!(walk, Walk::SingleEnzyme(_)) {
            protein.to_vec()
        } else {
            Vec::new()
        };
        Self {
            walk,
            pending: None,
            scratch,
        }
    }

    /// Check if the concrete residues, placed on the protein at `start`, still form a peptide for
    /// the walk. Only enzymatic digestion depends on the residues, its cleavage sites can appear or
    /// disappear when an ambiguous amino acid is made concrete.
    fn accepts(&mut self, protein: &[AminoAcid], start: usize, residues: &[AminoAcid]) -> bool {
        let Walk::SingleEnzyme(walk) = &self.walk else {
            return true;
        };
        let window = start..start + residues.len();
        self.scratch[window.clone()].copy_from_slice(residues);
        let accepted = walk.accepts(&self.scratch, window.clone());
        self.scratch[window.clone()].copy_from_slice(&protein[window]);
        accepted
    }
}

/// All concrete sequences for a single window, the first position varies slowest
#[derive(Clone)]
struct Expansion {
    start: usize,
    product: MultiProduct<std::iter::Copied<std::slice::Iter<'static, AminoAcid>>>,
}

impl std::fmt::Debug for Expansion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Expansion")
            .field("start", &self.start)
            .finish_non_exhaustive()
    }
}

impl Expansion {
    fn new(protein: &[AminoAcid], window: Range<usize>) -> Self {
        Self {
            start: window.start,
            product: protein[window]
                .iter()
                .map(|aa| aa.options().iter().copied())
                .multi_cartesian_product(),
        }
    }
}

impl<'a> SequenceIterator<'a> {
    pub(crate) const fn new(
        context: WalkContext<'a>,
        candidates: Candidates,
        strategy: IteratorStrategy,
    ) -> Self {
        Self {
            context,
            candidates,
            strategy,
        }
    }

    /// The enumeration strategy used by this iterator
    pub const fn strategy(&self) -> IteratorStrategy {
        self.strategy
    }

    /// Get the next peptide, or `None` if all peptides have been given
    pub fn next_peptide(&mut self) -> Option<PeptideWithPosition> {
        let context = &self.context;
        match &mut self.candidates {
            Candidates::Plain(walk) => loop {
                let window = walk.next_window(context)?;
                if let Some(peptide) = context.builder.build(
                    &context.protein[window.clone()],
                    context.protein,
                    window.start,
                    &context.mass_window,
                ) {
                    return Some(PeptideWithPosition {
                        peptide,
                        start: window.start,
                    });
                }
            },
            Candidates::Combination(combination) => loop {
                if let Some(expansion) = &mut combination.pending {
                    if let Some(residues) = expansion.product.next() {
                        let start = expansion.start;
                        if !combination.accepts(context.protein, start, &residues) {
                            continue;
                        }
                        if let Some(peptide) = context.builder.build(
                            &residues,
                            context.protein,
                            start,
                            &context.mass_window,
                        ) {
                            return Some(PeptideWithPosition { peptide, start });
                        }
                        continue;
                    }
                    combination.pending = None;
                }
                let window = combination.walk.next_window(context)?;
                if context
                    .builder
                    .allows_ambiguity(&context.protein[window.clone()])
                {
                    combination.pending = Some(Expansion::new(context.protein, window));
                } else {
                    // Longer windows from this start only add ambiguous amino acids
                    combination.walk.next_start();
                }
            },
        }
    }
}

impl Iterator for SequenceIterator<'_> {
    type Item = PeptideWithPosition;
    fn next(&mut self) -> Option<Self::Item> {
        self.next_peptide()
    }
}

impl FusedIterator for SequenceIterator<'_> {}
