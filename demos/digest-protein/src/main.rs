//! Digest a single protein sequence and print all resulting peptides
use clap::{Parser, ValueEnum};
use context_error::*;
use env_logger::Env;
use mzdigest::prelude::*;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// The protein sequence, as one letter amino acid codes
    #[arg(short, long)]
    sequence: String,
    /// How to cut the protein
    #[arg(short, long, value_enum, default_value_t = Mode::Enzyme)]
    mode: Mode,
    /// The enzyme to use for enzymatic digestion
    #[arg(short, long, default_value = "Trypsin")]
    enzyme: String,
    /// The maximal number of missed cleavages for enzymatic digestion
    #[arg(long, default_value_t = 2)]
    missed_cleavages: usize,
    /// The minimal mass of a peptide (Da)
    #[arg(long)]
    min_mass: Option<f64>,
    /// The maximal mass of a peptide (Da)
    #[arg(long)]
    max_mass: Option<f64>,
    /// A fixed modification by name, can be given multiple times
    #[arg(short, long)]
    fixed_modification: Vec<String>,
    /// The maximal number of ambiguous amino acids (B/J/Z/X) in a single peptide
    #[arg(long)]
    max_ambiguous: Option<usize>,
    /// Read the digestion parameters from this JSON file, overrides mode, enzyme, and missed cleavages
    #[arg(short, long)]
    parameters: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Whole,
    Unspecific,
    Enzyme,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    if let Err(err) = run(&Cli::parse()) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> Result<(), DigestionError> {
    let protein = AminoAcid::sequence_from_str(&args.sequence)?;
    let parameters = if let Some(path) = &args.parameters {
        let text = std::fs::read_to_string(path).map_err(|err| {
            BoxedError::new(
                DigestionErrorKind::InvalidParameters,
                "Could not read digestion parameters",
                err.to_string(),
                Context::show(path.clone()),
            )
        })?;
        DigestionParameters::from_json(&text)?
    } else {
        match args.mode {
            Mode::Whole => DigestionParameters::whole_protein(),
            Mode::Unspecific => DigestionParameters::unspecific(),
            Mode::Enzyme => {
                DigestionParameters::enzyme(Protease::by_name(&args.enzyme)?, args.missed_cleavages)
            }
        }
    };
    let factory = IteratorFactory::from_names(args.fixed_modification.as_slice(), args.max_ambiguous)?;
    let window = MassWindow::new(args.min_mass.map(da), args.max_mass.map(da));

    let iterator = factory.sequence_iterator(&protein, &parameters, window)?;
    log::info!(
        "Digesting {} amino acids with {} iteration",
        protein.len(),
        iterator.strategy()
    );
    let mut count = 0;
    for peptide in iterator {
        println!(
            "{}\t{}\t{:.6}",
            peptide.start,
            peptide.peptide,
            peptide.peptide.mass().get::<dalton>()
        );
        count += 1;
    }
    log::info!("Found {count} peptides");
    Ok(())
}
