//! Placeholder readability report for draft copy.

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "readability_check")]
#[command(about = "Report a readability score for the given text")]
struct CliArgs {
    /// Text to analyze.
    text: Option<String>,
}

// TODO: replace the placeholder with a real Flesch-Kincaid calculation.
fn check_readability(_text: &str) -> String {
    println!("Analyzing readability...");
    "Score: N/A (Placeholder)".to_string()
}

fn main() {
    let args = CliArgs::parse();
    match args.text.as_deref() {
        Some(text) => println!("{}", check_readability(text)),
        None => println!("No text provided."),
    }
}
