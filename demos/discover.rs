use motive_search::{
    BreakKind, GeneratorConfig, MotiveGenerator, Scope, SequenceType, StreamBuilder, Token,
    VariantOptions,
};
use std::env;
use std::fs;

/// Discovers motives in a plain-text file of voices.
///
/// Each non-empty line is one voice of the piece: whitespace-separated
/// intervals, with `r` marking a rest.
///
/// Usage: cargo run --example discover <filename>
fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <filename>", args[0]);
        std::process::exit(1);
    }

    let filename = &args[1];
    let text = fs::read_to_string(filename).unwrap_or_else(|_| {
        eprintln!("File \"{}\" not found.", filename);
        std::process::exit(1);
    });

    let config = GeneratorConfig {
        min_frequency: 2,
        max_gap: 1,
        max_length: 6,
        min_num_sequences: 3,
        max_num_sequences: 5,
        variants: VariantOptions::ALL,
    };
    let generator = MotiveGenerator::new(config).unwrap_or_else(|err| {
        eprintln!("Invalid configuration: {}", err);
        std::process::exit(1);
    });
    let builder = StreamBuilder::from_config(&config);

    let streams: Vec<_> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(voice, line)| {
            let tokens: Vec<Token> = line
                .split_whitespace()
                .map(|word| match word {
                    "r" => Token::Break(BreakKind::RestBefore),
                    _ => word.parse().map(Token::Interval).unwrap_or_else(|_| {
                        eprintln!("Invalid token \"{}\" in voice {}.", word, voice);
                        std::process::exit(1);
                    }),
                })
                .collect();
            builder.build_from_tokens(Scope::new(filename.as_str(), "P1", voice.to_string()), tokens)
        })
        .collect();

    let mut motives = generator.discover_scopes(&streams);
    motives.remove_overlapping_positions();

    println!("=== {} motives in {} voices ===", motives.len(), streams.len());
    for motive in motives.iter() {
        println!(
            "[{}] found {} times ({} original, {} inverted, {} mirrored)",
            motive.names(SequenceType::Original).join(", "),
            motive.frequency(None),
            motive.frequency(Some(SequenceType::Original)),
            motive.frequency(Some(SequenceType::Inverted)),
            motive.frequency(Some(SequenceType::Mirrored))
                + motive.frequency(Some(SequenceType::MirroredInverted)),
        );
    }
}
