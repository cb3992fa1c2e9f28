//! Command-line front-end: reads a post (or a batch of posts), runs the
//! classifier, prints the verdict.

use std::{collections::HashMap, path::PathBuf, time::Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::{ArtifactPaths, Classifier, Prediction};

#[derive(Parser)]
#[command(name = "vibe-check")]
#[command(about = "Classify the sentiment of social media posts", long_about = None)]
pub struct Cli {
    /// Text to classify (if not provided, reads from stdin)
    #[arg(value_name = "TEXT")]
    text: Option<String>,

    /// Read text from file
    #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Batch process texts (one per line)
    #[arg(short, long, value_name = "PATH", conflicts_with_all = ["text", "file"])]
    batch: Option<PathBuf>,

    /// Batch process from JSON array
    #[arg(long, value_name = "PATH", conflicts_with_all = ["text", "file", "batch"])]
    batch_json: Option<PathBuf>,

    /// Directory holding the model and vectorizer artifacts
    /// (defaults to $VIBE_CHECK_MODEL_DIR, then model_artifacts/)
    #[arg(short, long, value_name = "DIR")]
    model_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "label")]
    format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode (debug logging and timings)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy)]
enum OutputFormat {
    /// Just the predicted label
    Label,
    /// Every class with its probability
    Scores,
    /// JSON object per input
    Json,
    /// Human-readable label plus confidence
    Human,
}

enum InputSource {
    Single(String),
    Batch(Vec<String>),
}

pub fn run(cli: &Cli) -> Result<()> {
    init_logging(cli);

    let paths = cli
        .model_dir
        .as_ref()
        .map_or_else(ArtifactPaths::from_env, ArtifactPaths::from_dir);
    let classifier = Classifier::load(&paths)?;

    match determine_input_source(cli)? {
        InputSource::Single(text) => {
            if text.trim().is_empty() {
                bail!("no text to classify - input was empty");
            }
            let start = cli.verbose.then(Instant::now);
            let prediction = classifier.predict(&text)?;
            if let Some(start_time) = start {
                eprintln!("Inference time: {:?}", start_time.elapsed());
            }
            output_prediction(&prediction, cli.format)?;
        }
        InputSource::Batch(texts) => {
            let texts: Vec<String> = texts
                .into_iter()
                .filter(|line| !line.trim().is_empty())
                .collect();
            if texts.is_empty() {
                bail!("no text to classify - batch input was empty");
            }
            let start = cli.verbose.then(Instant::now);
            let predictions = classifier.predict_batch(&texts)?;
            if let Some(start_time) = start {
                eprintln!(
                    "Inference time for {} texts: {:?}",
                    texts.len(),
                    start_time.elapsed()
                );
            }
            output_batch(&predictions, cli.format)?;
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Input precedence: text arg > file > batch > batch_json > stdin.
fn determine_input_source(cli: &Cli) -> Result<InputSource> {
    use std::io::Read;

    if let Some(text) = &cli.text {
        return Ok(InputSource::Single(text.clone()));
    }

    if let Some(path) = &cli.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        return Ok(InputSource::Single(text));
    }

    if let Some(path) = &cli.batch {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read batch file: {}", path.display()))?;
        let texts: Vec<String> = contents.lines().map(String::from).collect();
        return Ok(InputSource::Batch(texts));
    }

    if let Some(path) = &cli.batch_json {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read JSON batch file: {}", path.display()))?;
        let texts: Vec<String> =
            serde_json::from_str(&contents).with_context(|| "Failed to parse JSON array")?;
        return Ok(InputSource::Batch(texts));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(InputSource::Single(buffer))
}

fn prediction_json(prediction: &Prediction) -> serde_json::Value {
    serde_json::json!({
        "label": prediction.label(),
        "probabilities": prediction.scores().collect::<HashMap<_, _>>(),
    })
}

fn output_prediction(prediction: &Prediction, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Label => {
            println!("{}", prediction.label());
        }
        OutputFormat::Scores => {
            let scores = prediction
                .scores()
                .map(|(label, prob)| format!("{label}={prob:.4}"))
                .collect::<Vec<_>>()
                .join(" ");
            println!("{scores}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&prediction_json(prediction))?);
        }
        OutputFormat::Human => {
            println!("Sentiment: {}", prediction.label());
            println!("Confidence: {:.1}%", prediction.confidence() * 100.0);
        }
    }
    Ok(())
}

fn output_batch(predictions: &[Prediction], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let array: Vec<_> = predictions.iter().map(prediction_json).collect();
            println!("{}", serde_json::to_string(&array)?);
        }
        _ => {
            for prediction in predictions {
                output_prediction(prediction, format)?;
            }
        }
    }
    Ok(())
}
