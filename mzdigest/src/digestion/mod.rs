//! Lazily enumerate the peptides of a protein under in-silico digestion

mod builder;
mod factory;
mod iterator;
mod parameters;
mod walk;

pub use builder::*;
pub use factory::*;
pub use iterator::{IteratorStrategy, SequenceIterator};
pub use parameters::*;
