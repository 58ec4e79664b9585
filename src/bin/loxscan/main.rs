use clap::{Parser, Subcommand};
use diagnostics::Diagnostics;
use lexer::{ScanOptions, Scanner};
use std::{
    error::Error,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    process,
};

mod diagnostics;
mod error;
mod lexer;
mod token;

const EXIT_LEXICAL_ERROR: i32 = 65;

#[derive(Parser, Debug)]
#[command(name = "loxscan", version, about = "Tokenizer for Lox source files")]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tokens of a source file, one per line
    Tokenize {
        filename: PathBuf,

        /// Scan identifiers and reserved words instead of rejecting letters
        #[arg(long)]
        identifiers: bool,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(args.debug);

    let had_error = match args.command {
        Command::Tokenize {
            filename,
            identifiers,
        } => tokenize(&filename, ScanOptions { identifiers })?,
    };

    if had_error {
        process::exit(EXIT_LEXICAL_ERROR);
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_module("loxscan", log::LevelFilter::Debug);
    }
    builder.init();
}

/// Writes every token of `filename` to stdout. Returns whether any lexical
/// error was reported along the way.
fn tokenize(filename: &Path, options: ScanOptions) -> Result<bool, Box<dyn Error>> {
    log::info!("tokenizing {}", filename.display());
    let source = String::from_utf8(fs::read(filename)?)?;

    let scanner = if options.identifiers {
        Scanner::with_options(&source, options)
    } else {
        Scanner::new(&source)
    };

    let mut diagnostics = Diagnostics::new(io::stderr());
    let tokens = scanner.scan_tokens(&mut diagnostics);
    let had_error = diagnostics.had_error();
    if let Err(err) = diagnostics.finish() {
        log::error!("could not write diagnostics: {}", err);
    }

    let mut stdout = io::stdout().lock();
    for token in &tokens {
        writeln!(stdout, "{}", token)?;
    }
    stdout.flush()?;

    Ok(had_error)
}
