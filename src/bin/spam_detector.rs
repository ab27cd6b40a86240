use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use chain_hash::scan::classify;
use chain_hash::scan::parse_score_list;
use chain_hash::scan::score_text;
use clap::Parser;

/// Scores a message against a phrase score list and prints SPAM or
/// NOT_SPAM.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the score list, one "phrase,score" pair per line.
    score_list: PathBuf,
    /// Path to the message text to classify.
    message: PathBuf,
    /// Spam threshold; a message scoring at least this much is SPAM.
    /// Must be a positive integer.
    threshold: String,
}

/// The threshold is validated here rather than by clap so that a bad value
/// reports through the same input-error class as unreadable files and
/// malformed score lines.
fn parse_threshold(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|t| *t > 0)
}

fn read_lines_joined(path: &PathBuf) -> std::io::Result<String> {
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join(" "))
}

fn run(args: &Args) -> Result<chain_hash::scan::Verdict, Box<dyn std::error::Error>> {
    let threshold = parse_threshold(&args.threshold)
        .ok_or_else(|| format!("threshold must be a positive integer, got {:?}", args.threshold))?;
    let scores = parse_score_list(BufReader::new(File::open(&args.score_list)?))?;
    let message = read_lines_joined(&args.message)?;
    Ok(classify(score_text(&message, &scores), threshold))
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(verdict) => {
            println!("{verdict}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Invalid input: {err}");
            ExitCode::FAILURE
        }
    }
}
