use std::sync::LazyLock;

use context_error::*;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    error::{DigestionError, DigestionErrorKind},
    sequence::AminoAcid,
};

/// A protease defined by it ability to cut at any site identified by the right amino acids at the n and c terminal.
/// Each position is identified by an option, a none means that there is no specificity at this position. If there is
/// a specificity at a certain position any amino acid that is contained in the set is allowed (see
/// [`AminoAcid::canonical_identical`]), so an ambiguous amino acid allows a cut if any of its options would.
///
/// A standard set of proteases can be found here [`known_proteases`].
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Protease {
    /// The name, used to refer to this protease in settings (for example to store the number of missed cleavages)
    pub name: String,
    /// The amino acids n terminal of the cut site.
    pub before: Vec<Option<Vec<AminoAcid>>>,
    /// The amino acids c terminal of the cut site.
    pub after: Vec<Option<Vec<AminoAcid>>>,
}

impl std::fmt::Display for Protease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Protease {
    /// Define a protease that cuts between any of the options before the site and any of the options after the site.
    pub fn between_options(
        name: impl Into<String>,
        before: Vec<AminoAcid>,
        after: Vec<AminoAcid>,
    ) -> Self {
        Self {
            name: name.into(),
            before: vec![Some(before)],
            after: vec![Some(after)],
        }
    }

    /// Define a protease that cuts on the c terminal side of the provided amino acids.
    pub fn c_terminal_of(name: impl Into<String>, residues: Vec<AminoAcid>) -> Self {
        Self {
            name: name.into(),
            before: vec![Some(residues)],
            after: Vec::new(),
        }
    }

    /// Define a protease that cuts on the n terminal side of the provided amino acids.
    pub fn n_terminal_of(name: impl Into<String>, residues: Vec<AminoAcid>) -> Self {
        Self {
            name: name.into(),
            before: Vec::new(),
            after: vec![Some(residues)],
        }
    }

    /// Helper function to get a list of all amino acids except the ones given
    pub fn get_exclusive(exclude: &[AminoAcid]) -> Vec<AminoAcid> {
        AminoAcid::ALL_AMINO_ACIDS
            .iter()
            .copied()
            .filter(|aa| !exclude.contains(aa))
            .collect_vec()
    }

    /// Look up a well known protease by name (case insensitive), see [`known_proteases`].
    /// # Errors
    /// If there is no known protease with this name.
    pub fn by_name(name: &str) -> Result<Self, DigestionError> {
        known_proteases::ALL
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .cloned()
            .ok_or_else(|| {
                BoxedError::new(
                    DigestionErrorKind::UnknownProtease,
                    "Unknown protease",
                    format!(
                        "There is no known protease with this name, the known proteases are: {}",
                        known_proteases::ALL.iter().map(|p| p.name.as_str()).join(", ")
                    ),
                    Context::show(name.to_string()),
                )
            })
    }

    /// Check if this protease cuts between `sequence[index - 1]` and `sequence[index]`. The start
    /// and end of the sequence are never cleavage sites, and a pattern that would need amino acids
    /// from beyond the sequence never matches. An ambiguous amino acid allows the cut if any of
    /// its options would.
    pub fn cleaves_at(&self, sequence: &[AminoAcid], index: usize) -> bool {
        self.in_bounds(sequence, index)
            && self.matches_at(
                &sequence[index - self.before.len()..index + self.after.len()],
                Match::Any,
            )
    }

    /// Check if this protease cuts between `sequence[index - 1]` and `sequence[index]` whichever
    /// option is picked for every ambiguous amino acid around the site. For sequences without
    /// ambiguous amino acids this is the same as [`Self::cleaves_at`].
    pub fn always_cleaves_at(&self, sequence: &[AminoAcid], index: usize) -> bool {
        self.in_bounds(sequence, index)
            && self.matches_at(
                &sequence[index - self.before.len()..index + self.after.len()],
                Match::All,
            )
    }

    /// All locations in the given sequence where this protease could cut, in ascending order.
    /// Only cleavage sites strictly inside the sequence are reported.
    pub fn cleavage_sites(&self, sequence: &[AminoAcid]) -> Vec<usize> {
        let upper = sequence
            .len()
            .saturating_sub(self.after.len())
            .min(sequence.len().saturating_sub(1));
        (self.before.len().max(1)..=upper)
            .filter(|i| {
                self.matches_at(
                    &sequence[i - self.before.len()..i + self.after.len()],
                    Match::Any,
                )
            })
            .collect_vec()
    }

    fn in_bounds(&self, sequence: &[AminoAcid], index: usize) -> bool {
        index > 0
            && index < sequence.len()
            && index >= self.before.len()
            && index + self.after.len() <= sequence.len()
    }

    fn matches_at(&self, slice: &[AminoAcid], mode: Match) -> bool {
        debug_assert!(slice.len() == self.before.len() + self.after.len());
        slice
            .iter()
            .zip(self.before.iter().chain(self.after.iter()))
            .all(|(actual, pattern)| {
                pattern.as_ref().is_none_or(|pattern| {
                    let allowed = |option: &AminoAcid| {
                        pattern.iter().any(|aa| aa.canonical_identical(*option))
                    };
                    match mode {
                        Match::Any => actual.options().iter().any(allowed),
                        Match::All => actual.options().iter().all(allowed),
                    }
                })
            })
    }
}

/// How the options of an ambiguous amino acid have to match a cleavage pattern
#[derive(Clone, Copy)]
enum Match {
    Any,
    All,
}

/// Some well known and widely used proteases
pub mod known_proteases {
    use super::*;

    /// `Trypsin` cuts after Lysine (K) or Arginine (R), unless followed by Proline (P)
    pub static TRYPSIN: LazyLock<Protease> = LazyLock::new(|| {
        Protease::between_options(
            "Trypsin",
            vec![AminoAcid::Lysine, AminoAcid::Arginine],
            Protease::get_exclusive(&[AminoAcid::Proline]),
        )
    });

    /// `Trypsin (no P rule)` cuts after Lysine (K) or Arginine (R)
    pub static TRYPSIN_NO_P_RULE: LazyLock<Protease> = LazyLock::new(|| {
        Protease::c_terminal_of(
            "Trypsin (no P rule)",
            vec![AminoAcid::Lysine, AminoAcid::Arginine],
        )
    });

    /// `Chymotrypsin` cuts after Phenylalanine (F), Tryptophan (W), Tyrosine (Y), unless followed by Proline (P)
    pub static CHYMOTRYPSIN: LazyLock<Protease> = LazyLock::new(|| {
        Protease::between_options(
            "Chymotrypsin",
            vec![
                AminoAcid::Phenylalanine,
                AminoAcid::Tryptophan,
                AminoAcid::Tyrosine,
            ],
            Protease::get_exclusive(&[AminoAcid::Proline]),
        )
    });

    /// `Pepsin` (pH > 2) cuts after Phenylalanine (F), Tryptophan (W), Tyrosine (Y), Leucine (L)
    pub static PEPSIN: LazyLock<Protease> = LazyLock::new(|| {
        Protease::c_terminal_of(
            "Pepsin",
            vec![
                AminoAcid::Phenylalanine,
                AminoAcid::Tryptophan,
                AminoAcid::Tyrosine,
                AminoAcid::Leucine,
            ],
        )
    });

    /// `AspN` cuts before Aspartic acid (D)
    pub static ASPN: LazyLock<Protease> =
        LazyLock::new(|| Protease::n_terminal_of("Asp-N", vec![AminoAcid::AsparticAcid]));

    /// `GluC` cuts after Glutamic acid (E)
    pub static GLUC: LazyLock<Protease> =
        LazyLock::new(|| Protease::c_terminal_of("Glu-C", vec![AminoAcid::GlutamicAcid]));

    /// `LysC` cuts after Lysine (K)
    pub static LYSC: LazyLock<Protease> =
        LazyLock::new(|| Protease::c_terminal_of("Lys-C", vec![AminoAcid::Lysine]));

    /// `ArgC` cuts after Arginine (R)
    pub static ARGC: LazyLock<Protease> =
        LazyLock::new(|| Protease::c_terminal_of("Arg-C", vec![AminoAcid::Arginine]));

    /// All known proteases, in the order they are searched by name
    pub static ALL: LazyLock<Vec<Protease>> = LazyLock::new(|| {
        vec![
            TRYPSIN.clone(),
            TRYPSIN_NO_P_RULE.clone(),
            CHYMOTRYPSIN.clone(),
            PEPSIN.clone(),
            ASPN.clone(),
            GLUC.clone(),
            LYSC.clone(),
            ARGC.clone(),
        ]
    });
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    struct ProteaseTestCase {
        sequence: &'static str,
        expected_cut_sites: Vec<usize>,
    }

    /// Generic test function for all proteases
    fn test_protease(protease: &Protease, test_cases: &[ProteaseTestCase]) {
        for test_case in test_cases {
            let sequence = AminoAcid::sequence_from_str(test_case.sequence).unwrap();
            let cut_sites = protease.cleavage_sites(&sequence);

            assert_eq!(
                cut_sites, test_case.expected_cut_sites,
                "Incorrect cut sites for {protease} on {}: found '{cut_sites:?}' expected '{:?}'",
                test_case.sequence, test_case.expected_cut_sites
            );
            for index in 0..=sequence.len() {
                assert_eq!(
                    protease.cleaves_at(&sequence, index),
                    cut_sites.contains(&index),
                    "Site check and site list disagree for {protease} on {} at {index}",
                    test_case.sequence
                );
            }
        }
    }

    #[test]
    fn trypsin() {
        test_protease(
            &known_proteases::TRYPSIN,
            &[
                ProteaseTestCase {
                    sequence: "AKRPGKR",
                    expected_cut_sites: vec![2, 6],
                },
                ProteaseTestCase {
                    sequence: "ARAKGCVLRPKDGR",
                    expected_cut_sites: vec![2, 4, 11],
                },
                ProteaseTestCase {
                    sequence: "PEPTIDEK",
                    expected_cut_sites: vec![],
                },
                ProteaseTestCase {
                    sequence: "",
                    expected_cut_sites: vec![],
                },
            ],
        );
    }

    #[test]
    fn trypsin_no_p_rule() {
        test_protease(
            &known_proteases::TRYPSIN_NO_P_RULE,
            &[ProteaseTestCase {
                sequence: "AKRPGKR",
                expected_cut_sites: vec![2, 3, 6],
            }],
        );
    }

    #[test]
    fn chymotrypsin() {
        test_protease(
            &known_proteases::CHYMOTRYPSIN,
            &[
                ProteaseTestCase {
                    sequence: "AFWYPLGF",
                    expected_cut_sites: vec![2, 3],
                },
                ProteaseTestCase {
                    sequence: "AVFUDGWTYPMSR",
                    expected_cut_sites: vec![3, 7],
                },
            ],
        );
    }

    #[test]
    fn pepsin() {
        test_protease(
            &known_proteases::PEPSIN,
            &[
                ProteaseTestCase {
                    sequence: "AACVFLPAKLURF",
                    expected_cut_sites: vec![5, 6, 10],
                },
                ProteaseTestCase {
                    sequence: "GFLPKDLVMSRG",
                    expected_cut_sites: vec![2, 3, 7],
                },
            ],
        );
    }

    #[test]
    fn aspn() {
        test_protease(
            &known_proteases::ASPN,
            &[
                ProteaseTestCase {
                    sequence: "FARDKPGLFD",
                    expected_cut_sites: vec![3, 9],
                },
                ProteaseTestCase {
                    sequence: "DLTMSR",
                    expected_cut_sites: vec![],
                },
            ],
        );
    }

    #[test]
    fn gluc_lysc_argc() {
        test_protease(
            &known_proteases::GLUC,
            &[ProteaseTestCase {
                sequence: "FAREDKPGLF",
                expected_cut_sites: vec![4],
            }],
        );
        test_protease(
            &known_proteases::LYSC,
            &[ProteaseTestCase {
                sequence: "PFKDLTKMSR",
                expected_cut_sites: vec![3, 7],
            }],
        );
        test_protease(
            &known_proteases::ARGC,
            &[ProteaseTestCase {
                sequence: "PFKDLRTMSR",
                expected_cut_sites: vec![6],
            }],
        );
    }

    #[test]
    fn ambiguous_sites() {
        // X could be K, B could be N or D
        test_protease(
            &known_proteases::TRYPSIN,
            &[ProteaseTestCase {
                sequence: "AXGKPG",
                expected_cut_sites: vec![2],
            }],
        );
        test_protease(
            &known_proteases::ASPN,
            &[ProteaseTestCase {
                sequence: "AABAA",
                expected_cut_sites: vec![2],
            }],
        );
    }

    #[test]
    fn definite_sites() {
        let trypsin = &known_proteases::TRYPSIN;
        // X could be P, so the cut after K is possible but not certain
        let sequence = AminoAcid::sequence_from_str("GKXAKBRP").unwrap();
        assert!(trypsin.cleaves_at(&sequence, 2));
        assert!(!trypsin.always_cleaves_at(&sequence, 2));
        assert!(trypsin.cleaves_at(&sequence, 3));
        assert!(!trypsin.always_cleaves_at(&sequence, 3));
        // B is N or D, neither blocks trypsin
        assert!(trypsin.always_cleaves_at(&sequence, 5));
        assert!(!trypsin.cleaves_at(&sequence, 7));
        assert!(!trypsin.always_cleaves_at(&sequence, 0));
        assert!(!trypsin.always_cleaves_at(&sequence, sequence.len()));

        let concrete = AminoAcid::sequence_from_str("ARAKGCVLRPKDGR").unwrap();
        for index in 0..=concrete.len() {
            assert_eq!(
                trypsin.cleaves_at(&concrete, index),
                trypsin.always_cleaves_at(&concrete, index)
            );
        }
    }

    #[test]
    fn lookup() {
        assert_eq!(Protease::by_name("trypsin").unwrap(), *known_proteases::TRYPSIN);
        assert_eq!(Protease::by_name(" Lys-C ").unwrap(), *known_proteases::LYSC);
        assert!(matches!(
            Protease::by_name("Elastase").unwrap_err().get_kind(),
            DigestionErrorKind::UnknownProtease
        ));
    }
}
