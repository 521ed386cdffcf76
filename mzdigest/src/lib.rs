#![doc = include_str!("../README.md")]

/// Enumerate the peptides of proteins, see [`digestion::IteratorFactory`] for the entry point.
pub mod digestion;
pub mod error;
/// Contains all things related to sequences, amongst others amino acids, proteases, and peptides.
pub mod sequence;
pub mod system;

/// A subset of the types that are envisioned to be used the most, importing this is a good starting point for working with the crate
pub mod prelude {
    pub use crate::digestion::{
        CleavageMode, DigestionParameters, IteratorFactory, IteratorStrategy, MassWindow,
        PeptideBuilder, SequenceIterator,
    };
    pub use crate::error::{DigestionError, DigestionErrorKind};
    pub use crate::sequence::{
        AminoAcid, FixedModification, Peptide, PeptideWithPosition, Protease, SequencePosition,
        known_modifications, known_proteases,
    };
    pub use crate::system::{Mass, da, dalton};
}
