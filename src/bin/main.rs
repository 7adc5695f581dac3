use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use framburdur::config::{DEFAULT_MASS_LIMIT, DEFAULT_VARIANT_LIMIT, ICE_ALPHABET};
use framburdur::{LexiconModel, PhonemeMap, Transcriber, TranslatorOptions, WordNormalizer};

/// Batched grapheme-to-phoneme transcription with ranked pronunciation
/// variants.
#[derive(Parser)]
#[command(name = "g2p_batch", version, about)]
struct Cli {
    /// Pronunciation model file (TSV: word, phoneme sequence, log-likelihood)
    #[arg(long, env = "G2P_MODEL")]
    model: Option<PathBuf>,

    /// Maximum number of pronunciation variants per word
    #[arg(long, default_value_t = DEFAULT_VARIANT_LIMIT)]
    variants: usize,

    /// Cumulative posterior mass retained per word
    #[arg(long, default_value_t = DEFAULT_MASS_LIMIT)]
    mass: f64,

    /// Grapheme alphabet used for word normalization
    #[arg(long, default_value = ICE_ALPHABET)]
    alphabet: String,

    /// Phoneme remapping table (TSV: old symbol, new symbol)
    #[arg(long)]
    map: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print ranked pronunciation variants for words
    Words {
        words: Vec<String>,
        /// Emit full prediction records as JSON, one per line
        #[arg(long)]
        json: bool,
    },
    /// Transcribe a file of utterances, one per line
    File {
        src: PathBuf,
        out: PathBuf,
        /// Worker threads
        #[arg(long, default_value_t = 16)]
        jobs: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut options = TranslatorOptions::default();
    if let Some(model) = &cli.model {
        options.model_path = model.clone();
    }
    options.variant_limit = cli.variants;
    options.mass_limit = cli.mass;

    let model = LexiconModel::load(&options)
        .with_context(|| format!("loading model from {}", options.model_path.display()))?;
    let normalizer = WordNormalizer::new(&cli.alphabet)?;
    let mut transcriber = Transcriber::new(model, options, normalizer)?;
    if let Some(map_path) = &cli.map {
        let map = PhonemeMap::load(map_path)
            .with_context(|| format!("loading phoneme map from {}", map_path.display()))?;
        transcriber = transcriber.with_phoneme_map(map);
    }

    match cli.command {
        Command::Words { words, json } => {
            for word in &words {
                let prediction = transcriber.predict_word(word);
                if json {
                    println!("{}", serde_json::to_string(&prediction)?);
                } else if prediction.hypotheses.is_empty() {
                    eprintln!("{}: no pronunciation", word);
                } else {
                    for hypothesis in &prediction.hypotheses {
                        println!(
                            "{}\t{:.4}\t{}",
                            prediction.word, hypothesis.posterior, hypothesis.pronunciation
                        );
                    }
                }
            }
        }
        Command::File { src, out, jobs } => {
            let report = transcriber.transcribe_file(&src, &out, jobs)?;
            if report.failed_words > 0 {
                eprintln!("{} word(s) had no pronunciation", report.failed_words);
            }
            println!("wrote {} line(s) to {}", report.lines, out.display());
        }
    }

    Ok(())
}
