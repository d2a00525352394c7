use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use pathmorph::{InputDocument, Matching, MorphOptions, MorphSetting, OneToMany, compute_morph};

#[derive(Parser, Debug)]
#[command(name = "pathmorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the correspondence plan for a set of documents.
    Pairs(PairsArgs),
}

#[derive(Parser, Debug)]
struct PairsArgs {
    /// Input JSON: an array of documents.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON plan path.
    #[arg(long)]
    out: PathBuf,

    /// Matching heuristic.
    #[arg(long, value_enum, default_value_t = MatchingChoice::Default)]
    matching: MatchingChoice,

    /// Padding policy when documents have unequal shape counts.
    #[arg(long, value_enum, default_value_t = OneToManyChoice::Duplicate)]
    one_to_many: OneToManyChoice,

    /// Sampling/segment density (max segment length = width / (quality * 10)).
    #[arg(long, default_value_t = 10)]
    quality: u32,

    /// Arc-length step for geometric sampling, in document units.
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Seed for the random matching heuristic.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MatchingChoice {
    Default,
    Random,
    ClosestArea,
    FurthestArea,
    ClosestDistance,
    FurthestDistance,
}

impl From<MatchingChoice> for Matching {
    fn from(choice: MatchingChoice) -> Self {
        match choice {
            MatchingChoice::Default => Self::Default,
            MatchingChoice::Random => Self::Random,
            MatchingChoice::ClosestArea => Self::ClosestArea,
            MatchingChoice::FurthestArea => Self::FurthestArea,
            MatchingChoice::ClosestDistance => Self::ClosestDistance,
            MatchingChoice::FurthestDistance => Self::FurthestDistance,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OneToManyChoice {
    Duplicate,
    Appear,
}

impl From<OneToManyChoice> for OneToMany {
    fn from(choice: OneToManyChoice) -> Self {
        match choice {
            OneToManyChoice::Duplicate => Self::Duplicate,
            OneToManyChoice::Appear => Self::Appear,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Pairs(args) => run_pairs(args),
    }
}

fn run_pairs(args: PairsArgs) -> anyhow::Result<()> {
    let file = File::open(&args.in_path)
        .with_context(|| format!("opening {}", args.in_path.display()))?;
    let documents: Vec<InputDocument> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", args.in_path.display()))?;

    let options = MorphOptions {
        setting: MorphSetting {
            one_to_many: args.one_to_many.into(),
            matching: args.matching.into(),
        },
        quality: args.quality,
        sample_step: args.step,
        seed: args.seed,
    };
    let plan = compute_morph(&documents, &options)?;

    let out = File::create(&args.out).with_context(|| format!("creating {}", args.out.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(out), &plan)
        .with_context(|| format!("writing {}", args.out.display()))?;

    eprintln!(
        "wrote {} slots x {} documents to {}",
        plan.slots.len(),
        documents.len(),
        args.out.display()
    );
    Ok(())
}
