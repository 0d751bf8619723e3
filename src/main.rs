use std::{fs, io, process};

use clap::Parser;
use gjuha::{
    error::{EXIT_IO, EXIT_SYNTAX},
    interpreter::lexer::Scanner,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// gjuha runs scripts written in a small scripting language with Albanian
/// keywords.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells gjuha to read the script from the file named by CONTENTS instead
    /// of running CONTENTS itself.
    #[arg(short, long)]
    file: bool,

    /// Only parse the script and report syntax errors, without running it.
    #[arg(short, long)]
    check: bool,

    /// Print the token stream instead of running the script.
    #[arg(long)]
    tokens: bool,

    contents: String,
}

fn main() {
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr))
                                  .with(EnvFilter::from_default_env())
                                  .init();

    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|e| {
                                              eprintln!("Failed to read the input file '{}': {e}",
                                                        &args.contents);
                                              process::exit(EXIT_IO);
                                          })
    } else {
        args.contents
    };

    if args.tokens {
        for token in Scanner::new(&script) {
            println!("{:>4} {:?} '{}'", token.line, token.kind, token.lexeme);
        }
        return;
    }

    if args.check {
        if let Err(e) = gjuha::parse(&script) {
            eprintln!("{e}");
            process::exit(EXIT_SYNTAX);
        }
        return;
    }

    let stdout = io::stdout();
    if let Err(e) = gjuha::run(&script, stdout.lock()) {
        eprintln!("{e}");
        process::exit(e.exit_code());
    }
}
