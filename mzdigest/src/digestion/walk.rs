//! The windows on a protein that are candidate peptides for each cleavage mode

use std::ops::Range;

use crate::{
    digestion::{MassWindow, PeptideBuilder},
    sequence::{AminoAcid, Protease},
    system::{Mass, da},
};

/// The shared read only state for walking over a single protein
#[derive(Clone, Copy, Debug)]
pub(crate) struct WalkContext<'a> {
    pub(crate) protein: &'a [AminoAcid],
    pub(crate) builder: &'a PeptideBuilder,
    pub(crate) mass_window: MassWindow,
}

impl WalkContext<'_> {
    /// The lowest mass any peptide made from the given residues could have
    fn lower_bound(&self, residues: &[AminoAcid]) -> Mass {
        residues
            .iter()
            .fold(da(0.0), |mass, aa| mass + self.builder.residue_lower_bound(*aa))
    }

    /// Check if a peptide with residues of the given lower bound mass can never fit the mass window
    fn too_heavy(&self, residues_lower_bound: Mass) -> bool {
        self.mass_window
            .exceeds_max(residues_lower_bound + self.builder.terminal_lower_bound())
    }
}

/// The walk over a protein, one variant per cleavage mode. Each variant keeps its own cursor and
/// hands out windows in a fixed order, once it returns `None` it keeps returning `None`.
#[derive(Clone, Debug)]
pub(crate) enum Walk {
    NoDigestion(NoDigestion),
    Unspecific(Unspecific),
    SingleEnzyme(SingleEnzyme),
}

impl Walk {
    pub(crate) fn next_window(&mut self, context: &WalkContext<'_>) -> Option<Range<usize>> {
        match self {
            Self::NoDigestion(walk) => walk.next_window(context),
            Self::Unspecific(walk) => walk.next_window(context),
            Self::SingleEnzyme(walk) => walk.next_window(context),
        }
    }

    /// Stop extending the windows that share the start of the last window. Every longer window
    /// holds the last window, so this is only valid if that would reject all of them.
    pub(crate) fn next_start(&mut self) {
        match self {
            Self::NoDigestion(_) => (),
            Self::Unspecific(walk) => walk.next_start(),
            Self::SingleEnzyme(walk) => walk.next_start(),
        }
    }
}

/// The full protein as a single window
#[derive(Clone, Debug, Default)]
pub(crate) struct NoDigestion {
    done: bool,
}

impl NoDigestion {
    fn next_window(&mut self, context: &WalkContext<'_>) -> Option<Range<usize>> {
        if self.done {
            return None;
        }
        self.done = true;
        (!context.protein.is_empty()).then_some(0..context.protein.len())
    }
}

/// Every start with every end. For a fixed start the mass only grows with the end, so as soon as
/// the lower bound passes the maximal mass the walk moves on to the next start.
#[derive(Clone, Debug)]
pub(crate) struct Unspecific {
    start: usize,
    end: usize,
    mass: Mass,
}

impl Default for Unspecific {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            mass: da(0.0),
        }
    }
}

impl Unspecific {
    fn next_window(&mut self, context: &WalkContext<'_>) -> Option<Range<usize>> {
        let length = context.protein.len();
        while self.start < length {
            if self.end < length {
                self.mass += context
                    .builder
                    .residue_lower_bound(context.protein[self.end]);
                self.end += 1;
                if !context.too_heavy(self.mass) {
                    return Some(self.start..self.end);
                }
            }
            self.next_start();
        }
        None
    }

    fn next_start(&mut self) {
        self.start += 1;
        self.end = self.start;
        self.mass = da(0.0);
    }
}

/// Consecutive fragments between the cleavage sites of a single enzyme. Starting at every
/// fragment it spans one or more fragments, as long as the number of missed cleavages stays within
/// the limit and the lower bound does not pass the maximal mass.
///
/// On sequences with ambiguous amino acids the fragments are cut at every possible site, but only
/// the sites that are cut for every option count as missed cleavages. The concrete sequences from
/// these windows are checked again with [`SingleEnzyme::accepts`].
#[derive(Clone, Debug)]
pub(crate) struct SingleEnzyme {
    protease: Protease,
    /// The start of the protein, all possible cleavage sites, and the end of the protein
    boundaries: Vec<usize>,
    /// For each boundary if it is always a cleavage site
    definite: Vec<bool>,
    missed_cleavages: usize,
    start_fragment: usize,
    span: usize,
    missed: usize,
    mass: Mass,
}

impl SingleEnzyme {
    pub(crate) fn new(protein: &[AminoAcid], protease: &Protease, missed_cleavages: usize) -> Self {
        let boundaries = if protein.is_empty() {
            Vec::new()
        } else {
            let mut boundaries = vec![0];
            boundaries.extend(protease.cleavage_sites(protein));
            boundaries.push(protein.len());
            boundaries
        };
        let definite = boundaries
            .iter()
            .map(|site| {
                *site == 0 || *site == protein.len() || protease.always_cleaves_at(protein, *site)
            })
            .collect();
        Self {
            protease: protease.clone(),
            boundaries,
            definite,
            missed_cleavages,
            start_fragment: 0,
            span: 0,
            missed: 0,
            mass: da(0.0),
        }
    }

    /// The number of possible cleavage sites inside the protein
    pub(crate) fn cleavage_sites(&self) -> usize {
        self.boundaries.len().saturating_sub(2)
    }

    /// Check if a window of concrete amino acids, placed in `protein`, is a peptide of this enzyme:
    /// both ends are cut (or are the protein ends) and at most the allowed number of cleavage sites
    /// is missed inside. Only the possible sites can be cut so only these are checked.
    pub(crate) fn accepts(&self, protein: &[AminoAcid], window: Range<usize>) -> bool {
        let cut = |site: usize| {
            site == 0 || site == protein.len() || self.protease.cleaves_at(protein, site)
        };
        let first = self.boundaries.partition_point(|site| *site <= window.start);
        let last = self.boundaries.partition_point(|site| *site < window.end);
        cut(window.start)
            && cut(window.end)
            && self.boundaries[first..last.max(first)]
                .iter()
                .filter(|site| cut(**site))
                .count()
                <= self.missed_cleavages
    }

    fn next_window(&mut self, context: &WalkContext<'_>) -> Option<Range<usize>> {
        let fragments = self.boundaries.len().saturating_sub(1);
        while self.start_fragment < fragments {
            let last = self.start_fragment + self.span;
            let missed = self.missed + usize::from(self.span > 0 && self.definite[last]);
            if last < fragments && missed <= self.missed_cleavages {
                let (from, to) = (self.boundaries[last], self.boundaries[last + 1]);
                self.mass += context.lower_bound(&context.protein[from..to]);
                self.span += 1;
                self.missed = missed;
                if !context.too_heavy(self.mass) {
                    return Some(self.boundaries[self.start_fragment]..to);
                }
            }
            self.next_start();
        }
        None
    }

    fn next_start(&mut self) {
        self.start_fragment += 1;
        self.span = 0;
        self.missed = 0;
        self.mass = da(0.0);
    }
}
