//! Basic example of using the crossword engine

use crossword_core::{
    GenerationOutcome, Generator, GeneratorConfig, HiddenWordConfig, PuzzleKind, WordList,
};

const WORDS: &str = "\
astronomy;star science;(9);1
conversation;a talk between people;(12);1
telescope;sees far;(9);1
orchestra;plays symphonies;(9);1
steady;firm and stable;(6);1
planet;orbits a star;(6);1
scrimp;save every penny;(6);1
dreamy;lost in thought;(6);1
orange;citrus fruit;(6);1
yellow;colour of a lemon;(6);1
garden;where flowers grow;(6);1
silver;second place metal;(6);1
cable;thick wire;(5);1
tiger;striped cat;(5);1
novel;long story;(5);1
drama;stage play;(5);1
stone;small rock;(5);1
sofa;couch;(4);1
tea;hot drink;(3);1
the;definite article;(3);1
oat;porridge grain;(3);1
net;goal mesh;(3);1
sea;salt water;(3);1
ten;a decade;(3);1
";

fn main() {
    let words = WordList::parse_lines(WORDS);
    println!("Loaded {} words\n", words.len());

    for &kind in PuzzleKind::all() {
        let mut config = GeneratorConfig::new(kind);
        config.max_attempts = 10;
        if kind == PuzzleKind::HiddenWord {
            config.hidden = HiddenWordConfig {
                min_length: 5,
                max_length: 6,
                ..HiddenWordConfig::default()
            };
        }

        let mut generator = match Generator::with_seed(config, 7) {
            Ok(generator) => generator,
            Err(e) => {
                println!("{kind}: {e}");
                continue;
            }
        };

        println!("=== {kind} ===");
        match generator.generate(&words) {
            GenerationOutcome::Generated(puzzle) => {
                println!("{puzzle}");
                for (i, word) in puzzle.words().iter().enumerate() {
                    println!("{}. {word}", i + 1);
                }
                if let Some(hidden) = puzzle.hidden_word() {
                    println!("Hidden word: {}", hidden.text);
                }
                println!("Solved on attempt {}\n", puzzle.attempts());
            }
            GenerationOutcome::Exhausted { attempts } => {
                println!("No puzzle after {attempts} attempts\n");
            }
        }
    }
}
