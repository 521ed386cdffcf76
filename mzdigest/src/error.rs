//! The [`DigestionErrorKind`] which makes it easy for downstream users of the error type to match on the exact error.

use context_error::{BoxedError, ErrorKind};

/// The kind of error that can occur when setting up a digestion
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DigestionErrorKind {
    /// The digestion parameters describe a cleavage setup that cannot be iterated (for example
    /// an enzymatic digestion with zero or multiple enzymes)
    #[default]
    UnsupportedConfiguration,
    /// A fixed modification was requested by a name that is not known
    UnknownModification,
    /// A protease was requested by a name that is not known
    UnknownProtease,
    /// A sequence contained a character that is not an amino acid code
    InvalidSequence,
    /// Serialised digestion parameters could not be read
    InvalidParameters,
}

impl ErrorKind for DigestionErrorKind {
    type Settings = ();
    fn descriptor(&self) -> &'static str {
        "error"
    }
    fn ignored(&self, _settings: Self::Settings) -> bool {
        false
    }
    fn is_error(&self, _settings: Self::Settings) -> bool {
        true
    }
}

/// The error type used by all fallible operations in this crate
pub type DigestionError = BoxedError<'static, DigestionErrorKind>;
