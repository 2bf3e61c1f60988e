#![deny(unused_variables)]
#![deny(dead_code)]
#![deny(unused_imports)]

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process;

use cytoscore::dataset::ReferenceDataset;
use cytoscore::evaluate::Evaluator;
use cytoscore::explain::{ContributionEntry, rank_contributions};
use cytoscore::features::{FEATURE_NAMES, FeatureVector, SAMPLE_BENIGN, SAMPLE_MALIGNANT};
use cytoscore::model::{ClassificationResult, score};
use cytoscore::params::ModelParameters;

#[derive(Parser)]
#[clap(
    name = "cytoscore",
    version,
    about = "A scoring and evaluation engine for cell-nucleus malignancy prediction."
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score one feature vector and report the calibrated malignancy risk
    Score(ScoreArgs),
    /// Evaluate the classifier against a labeled reference dataset
    Evaluate(EvaluateArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum SampleKind {
    Benign,
    Malignant,
}

#[derive(Args)]
struct ScoreArgs {
    /// Use one of the embedded demonstration samples as input
    #[arg(long, value_enum, conflicts_with = "input")]
    sample: Option<SampleKind>,

    /// Path to a file with 30 comma- or whitespace-separated feature values
    #[arg(long)]
    input: Option<PathBuf>,

    /// Also report the strongest per-feature contributions
    #[arg(long)]
    explain: bool,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct EvaluateArgs {
    /// Path to the reference dataset CSV (id, M/B diagnosis, 30 features per row)
    #[arg(long, value_name = "PATH")]
    dataset: PathBuf,

    /// Emit machine-readable JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ScoreReport {
    result: ClassificationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    contributions: Option<Vec<ContributionEntry>>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Score(args) => run_score(args),
        Command::Evaluate(args) => run_evaluate(args),
    };
    if let Err(err) = outcome {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run_score(args: ScoreArgs) -> Result<(), Box<dyn Error>> {
    let vector = resolve_input(&args)?;
    let params = ModelParameters::embedded();
    let result = score(&vector, params)?;

    let contributions = if args.explain {
        Some(rank_contributions(&vector, params, &FEATURE_NAMES)?)
    } else {
        None
    };

    if args.json {
        let report = ScoreReport {
            result,
            contributions,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("label:                {}", result.label);
    println!("benign probability:   {:.6}", result.benign_probability);
    println!("malignant risk:       {:.2}%", result.malignant_percentage);
    if let Some(entries) = contributions {
        println!();
        println!("strongest feature contributions (positive pushes toward malignant):");
        for entry in entries {
            println!("  {:<20} {:+.4}", entry.label, entry.value);
        }
    }
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<(), Box<dyn Error>> {
    let dataset = ReferenceDataset::from_csv_path(&args.dataset)?;
    let evaluator = Evaluator::new(ModelParameters::embedded().clone(), dataset);
    let bundle = evaluator.metrics();

    if args.json {
        println!("{}", serde_json::to_string_pretty(bundle)?);
        return Ok(());
    }

    println!("samples:    {}", bundle.confusion.total());
    println!("accuracy:   {:.4}", bundle.accuracy);
    println!("precision:  {:.4}", bundle.precision);
    println!("recall:     {:.4}", bundle.recall);
    println!("f1:         {:.4}", bundle.f1);
    println!("auc:        {:.4}", bundle.auc);
    println!();
    println!("confusion matrix (malignant positive):");
    println!(
        "  predicted malignant: {:>4} true, {:>4} false",
        bundle.confusion.true_positives, bundle.confusion.false_positives
    );
    println!(
        "  predicted benign:    {:>4} true, {:>4} false",
        bundle.confusion.true_negatives, bundle.confusion.false_negatives
    );
    Ok(())
}

/// Resolves the score input: an embedded demonstration sample or a values
/// file supplied by the caller.
fn resolve_input(args: &ScoreArgs) -> Result<FeatureVector, Box<dyn Error>> {
    match (&args.sample, &args.input) {
        (Some(SampleKind::Benign), _) => Ok(FeatureVector::new(SAMPLE_BENIGN)),
        (Some(SampleKind::Malignant), _) => Ok(FeatureVector::new(SAMPLE_MALIGNANT)),
        (None, Some(path)) => {
            let text = fs::read_to_string(path)?;
            let values = text
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|field| !field.is_empty())
                .map(str::parse::<f64>)
                .collect::<Result<Vec<f64>, _>>()?;
            Ok(FeatureVector::from_slice(&values)?)
        }
        (None, None) => Err("either --sample or --input is required".into()),
    }
}
