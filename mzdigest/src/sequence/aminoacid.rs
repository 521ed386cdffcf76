//! The amino acid alphabet, including the ambiguous codes that stand for multiple concrete residues

use context_error::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{DigestionError, DigestionErrorKind},
    system::{Mass, da},
};

/// An amino acid, alongside the standard ones some [ambiguous (B/J/Z/X) and non-standard (U/O)](https://www.insdc.org/submitting-standards/feature-table/#7.4.3) are included.
#[derive(
    Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize,
)]
pub enum AminoAcid {
    /// Ala, A
    #[default]
    Alanine = 0,
    /// Arg, R
    Arginine,
    /// Asn, N
    Asparagine,
    /// Asp, D
    AsparticAcid,
    /// Cys, C
    Cysteine,
    /// Gln, Q
    Glutamine,
    /// Glu, E
    GlutamicAcid,
    /// Gly, G
    Glycine,
    /// His, H
    Histidine,
    /// Ile, I
    Isoleucine,
    /// Leu, L
    Leucine,
    /// Lys, K
    Lysine,
    /// Met, M
    Methionine,
    /// Phe, F
    Phenylalanine,
    /// Pro, P
    Proline,
    /// Ser, S
    Serine,
    /// Thr, T
    Threonine,
    /// Trp, W
    Tryptophan,
    /// Tyr, Y
    Tyrosine,
    /// Val, V
    Valine,
    /// Asx, B
    AmbiguousAsparagine,
    /// Xle, J
    AmbiguousLeucine,
    /// Glx, Z
    AmbiguousGlutamine,
    /// Sec, U
    Selenocysteine,
    /// Pyl, O
    Pyrrolysine,
    /// Xxx, X
    Unknown,
}

impl std::str::FromStr for AminoAcid {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl TryFrom<&str> for AminoAcid {
    type Error = ();
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.as_bytes() {
            [byte] => Self::try_from(byte),
            _ => Err(()),
        }
    }
}

impl TryFrom<char> for AminoAcid {
    type Error = ();
    fn try_from(value: char) -> Result<Self, Self::Error> {
        if value.is_ascii() {
            let num = value as u8;
            num.try_into()
        } else {
            Err(())
        }
    }
}

impl TryFrom<&u8> for AminoAcid {
    type Error = ();
    fn try_from(value: &u8) -> Result<Self, Self::Error> {
        match value {
            b'A' | b'a' => Ok(Self::Alanine),
            b'B' | b'b' => Ok(Self::AmbiguousAsparagine),
            b'C' | b'c' => Ok(Self::Cysteine),
            b'D' | b'd' => Ok(Self::AsparticAcid),
            b'E' | b'e' => Ok(Self::GlutamicAcid),
            b'F' | b'f' => Ok(Self::Phenylalanine),
            b'G' | b'g' => Ok(Self::Glycine),
            b'H' | b'h' => Ok(Self::Histidine),
            b'I' | b'i' => Ok(Self::Isoleucine),
            b'J' | b'j' => Ok(Self::AmbiguousLeucine),
            b'K' | b'k' => Ok(Self::Lysine),
            b'L' | b'l' => Ok(Self::Leucine),
            b'M' | b'm' => Ok(Self::Methionine),
            b'N' | b'n' => Ok(Self::Asparagine),
            b'O' | b'o' => Ok(Self::Pyrrolysine),
            b'P' | b'p' => Ok(Self::Proline),
            b'Q' | b'q' => Ok(Self::Glutamine),
            b'R' | b'r' => Ok(Self::Arginine),
            b'S' | b's' => Ok(Self::Serine),
            b'T' | b't' => Ok(Self::Threonine),
            b'U' | b'u' => Ok(Self::Selenocysteine),
            b'V' | b'v' => Ok(Self::Valine),
            b'W' | b'w' => Ok(Self::Tryptophan),
            b'X' | b'x' => Ok(Self::Unknown),
            b'Y' | b'y' => Ok(Self::Tyrosine),
            b'Z' | b'z' => Ok(Self::AmbiguousGlutamine),
            _ => Err(()),
        }
    }
}

impl TryFrom<u8> for AminoAcid {
    type Error = ();
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(&value)
    }
}

impl std::fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.one_letter_code())
    }
}

impl AminoAcid {
    /// The total number of amino acids
    pub const TOTAL_NUMBER: usize = Self::Unknown as usize + 1;

    /// All 20 canonical amino acids
    pub const CANONICAL_AMINO_ACIDS: &'static [Self] = &[
        Self::Glycine,
        Self::Alanine,
        Self::Arginine,
        Self::Asparagine,
        Self::AsparticAcid,
        Self::Cysteine,
        Self::Glutamine,
        Self::GlutamicAcid,
        Self::Histidine,
        Self::Leucine,
        Self::Isoleucine,
        Self::Lysine,
        Self::Methionine,
        Self::Phenylalanine,
        Self::Proline,
        Self::Serine,
        Self::Threonine,
        Self::Tryptophan,
        Self::Tyrosine,
        Self::Valine,
    ];

    /// All amino acids (including I/L/J/B/Z but excluding X)
    pub const ALL_AMINO_ACIDS: &'static [Self] = &[
        Self::Alanine,
        Self::AmbiguousAsparagine,
        Self::AmbiguousGlutamine,
        Self::AmbiguousLeucine,
        Self::Arginine,
        Self::Asparagine,
        Self::AsparticAcid,
        Self::Cysteine,
        Self::GlutamicAcid,
        Self::Glutamine,
        Self::Glycine,
        Self::Histidine,
        Self::Isoleucine,
        Self::Leucine,
        Self::Lysine,
        Self::Methionine,
        Self::Phenylalanine,
        Self::Proline,
        Self::Pyrrolysine,
        Self::Selenocysteine,
        Self::Serine,
        Self::Threonine,
        Self::Tryptophan,
        Self::Tyrosine,
        Self::Valine,
    ];

    /// Parse a sequence of one letter codes. Whitespace is not allowed.
    /// # Errors
    /// If any character is not a valid amino acid code.
    pub fn sequence_from_str(sequence: &str) -> Result<Vec<Self>, DigestionError> {
        sequence
            .char_indices()
            .map(|(index, c)| {
                Self::try_from(c).map_err(|()| {
                    BoxedError::new(
                        DigestionErrorKind::InvalidSequence,
                        "Invalid amino acid",
                        format!("'{c}' is not a valid one letter amino acid code"),
                        Context::show(format!("{sequence} (position {})", index + 1)),
                    )
                })
            })
            .collect()
    }

    /// Get the single letter representation of the amino acid
    pub const fn one_letter_code(self) -> char {
        match self {
            Self::Alanine => 'A',
            Self::AmbiguousAsparagine => 'B',
            Self::Cysteine => 'C',
            Self::AsparticAcid => 'D',
            Self::GlutamicAcid => 'E',
            Self::Phenylalanine => 'F',
            Self::Glycine => 'G',
            Self::Histidine => 'H',
            Self::Isoleucine => 'I',
            Self::AmbiguousLeucine => 'J',
            Self::Lysine => 'K',
            Self::Leucine => 'L',
            Self::Methionine => 'M',
            Self::Asparagine => 'N',
            Self::Pyrrolysine => 'O',
            Self::Proline => 'P',
            Self::Glutamine => 'Q',
            Self::Arginine => 'R',
            Self::Serine => 'S',
            Self::Threonine => 'T',
            Self::Selenocysteine => 'U',
            Self::Valine => 'V',
            Self::Tryptophan => 'W',
            Self::Unknown => 'X',
            Self::Tyrosine => 'Y',
            Self::AmbiguousGlutamine => 'Z',
        }
    }

    /// The concrete amino acids this code stands for. For concrete amino acids this is only the
    /// amino acid itself, for B/J/Z these are the two options and for X this is all 20 canonical
    /// amino acids.
    pub const fn options(self) -> &'static [Self] {
        match self {
            Self::AmbiguousAsparagine => &[Self::Asparagine, Self::AsparticAcid],
            Self::AmbiguousLeucine => &[Self::Isoleucine, Self::Leucine],
            Self::AmbiguousGlutamine => &[Self::Glutamine, Self::GlutamicAcid],
            Self::Unknown => Self::CANONICAL_AMINO_ACIDS,
            Self::Alanine => &[Self::Alanine],
            Self::Arginine => &[Self::Arginine],
            Self::Asparagine => &[Self::Asparagine],
            Self::AsparticAcid => &[Self::AsparticAcid],
            Self::Cysteine => &[Self::Cysteine],
            Self::Glutamine => &[Self::Glutamine],
            Self::GlutamicAcid => &[Self::GlutamicAcid],
            Self::Glycine => &[Self::Glycine],
            Self::Histidine => &[Self::Histidine],
            Self::Isoleucine => &[Self::Isoleucine],
            Self::Leucine => &[Self::Leucine],
            Self::Lysine => &[Self::Lysine],
            Self::Methionine => &[Self::Methionine],
            Self::Phenylalanine => &[Self::Phenylalanine],
            Self::Proline => &[Self::Proline],
            Self::Serine => &[Self::Serine],
            Self::Threonine => &[Self::Threonine],
            Self::Tryptophan => &[Self::Tryptophan],
            Self::Tyrosine => &[Self::Tyrosine],
            Self::Valine => &[Self::Valine],
            Self::Selenocysteine => &[Self::Selenocysteine],
            Self::Pyrrolysine => &[Self::Pyrrolysine],
        }
    }

    /// Check if this code stands for more than one concrete amino acid
    pub const fn is_ambiguous(self) -> bool {
        matches!(
            self,
            Self::AmbiguousAsparagine
                | Self::AmbiguousLeucine
                | Self::AmbiguousGlutamine
                | Self::Unknown
        )
    }

    /// Check if the given sequence contains any ambiguous amino acid code
    pub fn has_ambiguous(sequence: &[Self]) -> bool {
        sequence.iter().any(|aa| aa.is_ambiguous())
    }

    /// Count the number of ambiguous amino acid codes in the given sequence
    pub fn count_ambiguous(sequence: &[Self]) -> usize {
        sequence.iter().filter(|aa| aa.is_ambiguous()).count()
    }

    /// Check if two codes could denote the same amino acid, B matches N and D, X matches any
    /// canonical amino acid, and so on.
    pub fn canonical_identical(self, rhs: Self) -> bool {
        self == rhs || {
            let options = rhs.options();
            self.options().iter().any(|aa| options.contains(aa))
        }
    }

    /// The monoisotopic mass of this amino acid as a residue (so without the water of a free amino acid).
    /// Returns `None` for B, Z and X as these do not have a single mass. J is defined because I and L
    /// are isobaric.
    pub fn monoisotopic_mass(self) -> Option<Mass> {
        let mass = match self {
            Self::Glycine => 57.021_463_720_1,
            Self::Alanine => 71.037_113_784_1,
            Self::Serine => 87.032_028_404_1,
            Self::Proline => 97.052_763_848_1,
            Self::Valine => 99.068_413_912_1,
            Self::Threonine => 101.047_678_468_1,
            Self::Cysteine => 103.009_184_478_1,
            Self::Isoleucine | Self::Leucine | Self::AmbiguousLeucine => 113.084_064_040_1,
            Self::Asparagine => 114.042_927_446_1,
            Self::AsparticAcid => 115.026_943_031_1,
            Self::Glutamine => 128.058_577_510_1,
            Self::Lysine => 128.094_963_016_1,
            Self::GlutamicAcid => 129.042_593_095_1,
            Self::Methionine => 131.040_484_606_1,
            Self::Histidine => 137.058_911_858_1,
            Self::Phenylalanine => 147.068_413_912_1,
            Self::Selenocysteine => 150.953_633_405_1,
            Self::Arginine => 156.101_111_024_1,
            Self::Tyrosine => 163.063_328_532_1,
            Self::Tryptophan => 186.079_312_951_1,
            Self::Pyrrolysine => 237.147_726_918_1,
            Self::AmbiguousAsparagine | Self::AmbiguousGlutamine | Self::Unknown => return None,
        };
        Some(da(mass))
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::system::dalton;

    #[test]
    fn parse_sequence() {
        let sequence = AminoAcid::sequence_from_str("PEPTIDEK").unwrap();
        assert_eq!(sequence.len(), 8);
        assert_eq!(sequence[0], AminoAcid::Proline);
        assert_eq!(sequence[7], AminoAcid::Lysine);
        assert_eq!(
            sequence.iter().map(|aa| aa.one_letter_code()).collect::<String>(),
            "PEPTIDEK"
        );
        assert!(AminoAcid::sequence_from_str("pepjb").is_ok());
    }

    #[test]
    fn parse_invalid_sequence() {
        let error = AminoAcid::sequence_from_str("PEP1IDE").unwrap_err();
        assert!(matches!(
            error.get_kind(),
            DigestionErrorKind::InvalidSequence
        ));
        assert!(AminoAcid::sequence_from_str("PEP TIDE").is_err());
        assert!(AminoAcid::try_from("AA").is_err());
    }

    #[test]
    fn ambiguity() {
        assert!(AminoAcid::AmbiguousLeucine.is_ambiguous());
        assert!(AminoAcid::Unknown.is_ambiguous());
        assert!(!AminoAcid::Selenocysteine.is_ambiguous());
        assert_eq!(
            AminoAcid::AmbiguousAsparagine.options(),
            &[AminoAcid::Asparagine, AminoAcid::AsparticAcid]
        );
        assert_eq!(AminoAcid::Unknown.options().len(), 20);
        assert_eq!(AminoAcid::Lysine.options(), &[AminoAcid::Lysine]);
        let sequence = AminoAcid::sequence_from_str("AXBKZ").unwrap();
        assert!(AminoAcid::has_ambiguous(&sequence));
        assert_eq!(AminoAcid::count_ambiguous(&sequence), 3);
        assert!(!AminoAcid::has_ambiguous(
            &AminoAcid::sequence_from_str("PEPTIDE").unwrap()
        ));
    }

    #[test]
    fn canonical_identical() {
        assert!(AminoAcid::AmbiguousAsparagine.canonical_identical(AminoAcid::AsparticAcid));
        assert!(AminoAcid::Lysine.canonical_identical(AminoAcid::Unknown));
        assert!(AminoAcid::Leucine.canonical_identical(AminoAcid::AmbiguousLeucine));
        assert!(!AminoAcid::Leucine.canonical_identical(AminoAcid::Isoleucine));
        assert!(!AminoAcid::AmbiguousGlutamine.canonical_identical(AminoAcid::Asparagine));
    }

    #[test]
    fn masses() {
        for aa in AminoAcid::CANONICAL_AMINO_ACIDS {
            assert!(aa.monoisotopic_mass().unwrap().get::<dalton>() > 50.0);
        }
        assert!(AminoAcid::Unknown.monoisotopic_mass().is_none());
        assert!(AminoAcid::AmbiguousGlutamine.monoisotopic_mass().is_none());
        assert_eq!(
            AminoAcid::AmbiguousLeucine.monoisotopic_mass(),
            AminoAcid::Isoleucine.monoisotopic_mass()
        );
    }
}
