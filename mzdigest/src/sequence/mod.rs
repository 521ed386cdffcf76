mod aminoacid;
mod modification;
mod peptide;
mod protease;
mod sequence_position;

pub use aminoacid::*;
pub use modification::*;
pub use peptide::*;
pub use protease::*;
pub use sequence_position::*;
