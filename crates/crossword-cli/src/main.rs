mod output;
mod source;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossword_core::{
    GenerationOutcome, Generator, GeneratorConfig, HiddenWordConfig, PuzzleKind, PuzzleRng,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Puzzle layout to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// Horizontal anchor with two vertical spokes
    A,
    /// Vertical anchor with a long crossbar
    B,
    /// Horizontal anchor with a lead-in and two hanging words
    C,
    /// Hidden word down the middle column
    Hidden,
}

impl From<KindArg> for PuzzleKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::A => PuzzleKind::CenterHorizontal,
            KindArg::B => PuzzleKind::CenterVertical,
            KindArg::C => PuzzleKind::Mixed,
            KindArg::Hidden => PuzzleKind::HiddenWord,
        }
    }
}

/// Crossword puzzle generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Word list: JSON array of entries, or `solution;clue;pattern;words` lines
    #[arg(short, long)]
    corpus: PathBuf,

    /// Layout to generate
    #[arg(short, long, value_enum, default_value_t = KindArg::A)]
    kind: KindArg,

    /// Side of the working grid
    #[arg(
        short,
        long,
        default_value_t = 15,
        value_parser = clap::value_parser!(u16).range(5..=30)
    )]
    grid_size: u16,

    /// Attempts before giving up
    #[arg(
        short = 'a',
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u8).range(1..=10)
    )]
    max_attempts: u8,

    /// Seed for a reproducible puzzle
    #[arg(short, long)]
    seed: Option<u64>,

    /// Shortest hidden word (hidden layout)
    #[arg(long, default_value_t = 5)]
    hidden_min_length: usize,

    /// Longest hidden word (hidden layout)
    #[arg(long, default_value_t = 8)]
    hidden_max_length: usize,

    /// Intersecting words required (hidden layout)
    #[arg(long, default_value_t = 3)]
    min_words: usize,

    /// Rows to try crossing (hidden layout)
    #[arg(long, default_value_t = 15)]
    max_words: usize,

    /// Directory receiving `<timestamp>-<seed>/crossword.{txt,json}`
    #[arg(short, long, default_value = "output")]
    output_dir: PathBuf,

    /// Print the puzzle without writing files
    #[arg(long)]
    no_files: bool,

    /// Log every placement
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            kind: self.kind.into(),
            grid_size: usize::from(self.grid_size),
            max_attempts: usize::from(self.max_attempts),
            hidden: HiddenWordConfig {
                min_length: self.hidden_min_length,
                max_length: self.hidden_max_length,
                min_words: self.min_words,
                max_words: self.max_words,
            },
        }
    }
}

/// Log to stderr; `RUST_LOG` overrides the default level
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match try_main(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether a puzzle was produced
fn try_main(cli: &Cli) -> Result<bool> {
    let words = source::load_word_list(&cli.corpus)?;
    if words.is_empty() {
        anyhow::bail!("corpus {} has no usable entries", cli.corpus.display());
    }

    let config = cli.generator_config();
    let rng = match cli.seed {
        Some(seed) => PuzzleRng::with_seed(seed),
        None => PuzzleRng::from_entropy_seed(),
    };
    let mut generator = Generator::with_rng(config, rng)
        .context("invalid configuration")?;
    let seed = generator.seed();
    tracing::info!(seed, kind = %generator.config().kind, "generating crossword");

    let puzzle = match generator.generate(&words) {
        GenerationOutcome::Generated(puzzle) => puzzle,
        GenerationOutcome::Exhausted { attempts } => {
            eprintln!(
                "Unable to generate a crossword after {attempts} attempts (seed {seed})"
            );
            return Ok(false);
        }
    };

    println!("{puzzle}");
    for (i, word) in puzzle.words().iter().enumerate() {
        println!("{}. {word}", i + 1);
    }
    if let Some(hidden) = puzzle.hidden_word() {
        println!("Hidden word: {} (column {})", hidden.text, hidden.col + 1);
    }

    if !cli.no_files {
        let metadata = output::Metadata::new(&puzzle, seed);
        let dir = output::write_outputs(&cli.output_dir, &puzzle, &metadata)?;
        eprintln!("Saved to {}", dir.display());
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_map_to_default_config() {
        let cli = Cli::try_parse_from(["crossword", "--corpus", "words.txt"]).unwrap();
        assert_eq!(cli.generator_config(), GeneratorConfig::default());
        assert_eq!(cli.output_dir, PathBuf::from("output"));
        assert!(!cli.no_files);
    }

    #[test]
    fn test_kind_and_hidden_flags() {
        let cli = Cli::try_parse_from([
            "crossword",
            "--corpus",
            "words.json",
            "--kind",
            "hidden",
            "--hidden-min-length",
            "6",
            "--min-words",
            "4",
            "--seed",
            "9",
        ])
        .unwrap();
        let config = cli.generator_config();
        assert_eq!(config.kind, PuzzleKind::HiddenWord);
        assert_eq!(config.hidden.min_length, 6);
        assert_eq!(config.hidden.min_words, 4);
        assert_eq!(cli.seed, Some(9));
    }

    fn parse(extra: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(["crossword", "-c", "w.txt"].iter().chain(extra).copied())
    }

    #[test]
    fn test_range_checks() {
        assert!(parse(&["--grid-size", "4"]).is_err());
        assert!(parse(&["--grid-size", "31"]).is_err());
        assert!(parse(&["--max-attempts", "0"]).is_err());
        assert!(parse(&["--max-attempts", "10"]).is_ok());
        assert!(parse(&["--kind", "d"]).is_err());
    }
}
