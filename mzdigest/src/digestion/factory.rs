use std::sync::Arc;

use context_error::*;

use crate::{
    digestion::{
        CleavageMode, DigestionParameters, IteratorStrategy, MassWindow, PeptideBuilder,
        SequenceIterator,
        iterator::{Candidates, Combination},
        walk::{NoDigestion, SingleEnzyme, Unspecific, Walk, WalkContext},
    },
    error::{DigestionError, DigestionErrorKind},
    sequence::{AminoAcid, FixedModification},
};

/// Creates the peptide iterators for protein sequences. It holds the [`PeptideBuilder`] that all
/// iterators it creates share, the rest of the settings are given per sequence.
/// ```rust
/// # use mzdigest::prelude::*;
/// let factory = IteratorFactory::default();
/// let protein = AminoAcid::sequence_from_str("MKWVTFISLLR").unwrap();
/// let peptides: Vec<_> = factory
///     .sequence_iterator(&protein, &DigestionParameters::default(), MassWindow::unbounded())
///     .unwrap()
///     .collect();
/// assert_eq!(peptides.len(), 3);
/// assert_eq!(peptides[1].peptide.to_string(), "MKWVTFISLLR");
/// assert_eq!(peptides[2].start, 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct IteratorFactory {
    builder: PeptideBuilder,
}

impl IteratorFactory {
    /// Create a factory with the given fixed modifications and maximal number of ambiguous amino
    /// acids in a single peptide, see [`PeptideBuilder::new`].
    pub fn new(fixed_modifications: Vec<FixedModification>, max_ambiguous: Option<usize>) -> Self {
        Self {
            builder: PeptideBuilder::new(
                fixed_modifications.into_iter().map(Arc::new).collect(),
                max_ambiguous,
            ),
        }
    }

    /// Create a factory with fixed modifications looked up by name, see [`FixedModification::by_name`].
    /// # Errors
    /// If any of the names is not a known modification.
    pub fn from_names<S: AsRef<str>>(
        fixed_modifications: &[S],
        max_ambiguous: Option<usize>,
    ) -> Result<Self, DigestionError> {
        Ok(Self::new(
            fixed_modifications
                .iter()
                .map(|name| FixedModification::by_name(name.as_ref()))
                .collect::<Result<Vec<_>, _>>()?,
            max_ambiguous,
        ))
    }

    /// The builder shared by all iterators from this factory
    pub const fn builder(&self) -> &PeptideBuilder {
        &self.builder
    }

    /// Create the iterator over all peptides for the given sequence. The strategy is picked based
    /// on the cleavage mode and on whether the sequence contains any ambiguous amino acids
    /// (B/J/Z/X), these are expanded into all possible concrete sequences.
    /// # Errors
    /// If the cleavage mode is [`CleavageMode::Enzyme`] but not exactly one enzyme is given.
    pub fn sequence_iterator<'a>(
        &'a self,
        sequence: &'a [AminoAcid],
        parameters: &DigestionParameters,
        mass_window: MassWindow,
    ) -> Result<SequenceIterator<'a>, DigestionError> {
        let ambiguous = AminoAcid::has_ambiguous(sequence);
        let (walk, strategy) = match parameters.cleavage_mode() {
            CleavageMode::WholeProtein => (
                Walk::NoDigestion(NoDigestion::default()),
                if ambiguous {
                    IteratorStrategy::NoDigestionCombination
                } else {
                    IteratorStrategy::NoDigestion
                },
            ),
            CleavageMode::Unspecific => (
                Walk::Unspecific(Unspecific::default()),
                if ambiguous {
                    IteratorStrategy::UnspecificCombination
                } else {
                    IteratorStrategy::Unspecific
                },
            ),
            CleavageMode::Enzyme => {
                let [protease] = parameters.enzymes() else {
                    return Err(BoxedError::new(
                        DigestionErrorKind::UnsupportedConfiguration,
                        "Unsupported digestion configuration",
                        format!(
                            "Enzymatic digestion needs exactly one enzyme, but {} were given",
                            parameters.enzymes().len()
                        ),
                        Context::show(
                            parameters
                                .enzymes()
                                .iter()
                                .map(|e| e.name.as_str())
                                .collect::<Vec<_>>()
                                .join(", "),
                        ),
                    ));
                };
                let missed_cleavages = parameters.missed_cleavages(&protease.name);
                let walk = SingleEnzyme::new(sequence, protease, missed_cleavages);
                log::debug!(
                    "{} cleaves the sequence at {} sites, allowing {missed_cleavages} missed cleavages",
                    protease.name,
                    walk.cleavage_sites()
                );
                (
                    Walk::SingleEnzyme(walk),
                    if ambiguous {
                        IteratorStrategy::SingleEnzymeCombination
                    } else {
                        IteratorStrategy::SingleEnzyme
                    },
                )
            }
        };
        log::debug!(
            "Selected {strategy} iteration for a sequence of length {}",
            sequence.len()
        );

        let candidates = if ambiguous {
            Candidates::Combination(Combination::new(walk, sequence))
        } else {
            Candidates::Plain(walk)
        };
        Ok(SequenceIterator::new(
            WalkContext {
                protein: sequence,
                builder: &self.builder,
                mass_window,
            },
            candidates,
            strategy,
        ))
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use crate::{
        sequence::{PeptideWithPosition, known_modifications, known_proteases},
        system::da,
    };

    fn sequence(text: &str) -> Vec<AminoAcid> {
        AminoAcid::sequence_from_str(text).unwrap()
    }

    fn peptides(iterator: SequenceIterator<'_>) -> Vec<(usize, String)> {
        iterator
            .map(|p: PeptideWithPosition| (p.start, p.peptide.to_string()))
            .collect()
    }

    #[test]
    fn strategy_selection() {
        let factory = IteratorFactory::default();
        let plain = sequence("PEPTIDEK");
        let ambiguous = sequence("PEPTJDEK");
        let window = MassWindow::unbounded();
        let cases = [
            (
                DigestionParameters::whole_protein(),
                IteratorStrategy::NoDigestion,
                IteratorStrategy::NoDigestionCombination,
            ),
            (
                DigestionParameters::unspecific(),
                IteratorStrategy::Unspecific,
                IteratorStrategy::UnspecificCombination,
            ),
            (
                DigestionParameters::default(),
                IteratorStrategy::SingleEnzyme,
                IteratorStrategy::SingleEnzymeCombination,
            ),
        ];
        for (parameters, expected_plain, expected_ambiguous) in cases {
            let iterator = factory
                .sequence_iterator(&plain, &parameters, window)
                .unwrap();
            assert_eq!(iterator.strategy(), expected_plain);
            let iterator = factory
                .sequence_iterator(&ambiguous, &parameters, window)
                .unwrap();
            assert_eq!(iterator.strategy(), expected_ambiguous);
        }
    }

    #[test]
    fn enzyme_count() {
        let factory = IteratorFactory::default();
        let protein = sequence("PEPTIDEK");
        let mut parameters = DigestionParameters::default();
        parameters.add_enzyme(known_proteases::LYSC.clone(), 1);
        let error = factory
            .sequence_iterator(&protein, &parameters, MassWindow::unbounded())
            .unwrap_err();
        assert!(matches!(
            error.get_kind(),
            DigestionErrorKind::UnsupportedConfiguration
        ));
        let empty: DigestionParameters = DigestionParameters::from_json(
            r#"{"cleavage_mode": "Enzyme", "enzymes": [], "missed_cleavages": {}}"#,
        )
        .unwrap();
        let error = factory
            .sequence_iterator(&protein, &empty, MassWindow::unbounded())
            .unwrap_err();
        assert!(matches!(
            error.get_kind(),
            DigestionErrorKind::UnsupportedConfiguration
        ));
    }

    #[test]
    fn combination_order() {
        let factory = IteratorFactory::default();
        let protein = sequence("ABJ");
        let found = peptides(
            factory
                .sequence_iterator(
                    &protein,
                    &DigestionParameters::whole_protein(),
                    MassWindow::unbounded(),
                )
                .unwrap(),
        );
        assert_eq!(
            found,
            vec![
                (0, "ANI".to_string()),
                (0, "ANL".to_string()),
                (0, "ADI".to_string()),
                (0, "ADL".to_string()),
            ]
        );
    }

    #[test]
    fn ambiguity_budget() {
        let protein = sequence("GBGZG");
        let parameters = DigestionParameters::unspecific();
        let window = MassWindow::unbounded();

        let none = IteratorFactory::new(Vec::new(), Some(0));
        let found = peptides(none.sequence_iterator(&protein, &parameters, window).unwrap());
        assert_eq!(
            found,
            vec![(0, "G".to_string()), (2, "G".to_string()), (4, "G".to_string())]
        );

        let one = IteratorFactory::new(Vec::new(), Some(1));
        let mut found = one.sequence_iterator(&protein, &parameters, window).unwrap();
        assert!(found.all(|p| AminoAcid::count_ambiguous(&protein[p.start..p.end()]) <= 1));

        let unbounded = IteratorFactory::default();
        let count = unbounded
            .sequence_iterator(&protein, &parameters, window)
            .unwrap()
            .filter(|p| p.start == 0 && p.end() == 5)
            .count();
        assert_eq!(count, 4);
    }

    #[test]
    fn fixed_modifications_by_name() {
        let factory =
            IteratorFactory::from_names(&["Carbamidomethylation of C"], None).unwrap();
        assert_eq!(
            *factory.builder().fixed_modifications()[0],
            **known_modifications::CARBAMIDOMETHYL_C
        );
        let protein = sequence("ACKCR");
        let found = peptides(
            factory
                .sequence_iterator(
                    &protein,
                    &DigestionParameters::enzyme(known_proteases::TRYPSIN.clone(), 0),
                    MassWindow::unbounded(),
                )
                .unwrap(),
        );
        assert_eq!(
            found,
            vec![
                (0, "AC[Carbamidomethylation of C]K".to_string()),
                (3, "C[Carbamidomethylation of C]R".to_string()),
            ]
        );
        let error = IteratorFactory::from_names(&["Unobtainium"], None).unwrap_err();
        assert!(matches!(
            error.get_kind(),
            DigestionErrorKind::UnknownModification
        ));
    }

    #[test]
    fn exhausted() {
        let factory = IteratorFactory::default();
        let protein = sequence("GJG");
        let mut iterator = factory
            .sequence_iterator(
                &protein,
                &DigestionParameters::unspecific(),
                MassWindow::new(Some(da(100.0)), None),
            )
            .unwrap();
        while iterator.next_peptide().is_some() {}
        for _ in 0..3 {
            assert!(iterator.next_peptide().is_none());
            assert!(iterator.next().is_none());
        }
    }
}
