use std::{fs, io, path::PathBuf, process};

use clap::Parser;
use comet::{debug::AstPrinter, interpreter::evaluator::core::Evaluator, parse_source, repl};

/// comet is a small, dynamically typed scripting language with C-family
/// syntax and a tree-walking interpreter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a comet source file to evaluate. Starts the REPL when
    /// omitted.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the parsed syntax tree before evaluating.
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    let Some(path) = args.file else {
        println!("comet {}", env!("CARGO_PKG_VERSION"));
        if let Err(error) = repl::start(&mut io::stdin().lock(), &mut io::stdout()) {
            eprintln!("{error}");
            process::exit(1);
        }
        return;
    };

    let source = fs::read_to_string(&path).unwrap_or_else(|_| {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  path.display());
        process::exit(1);
    });

    let program = match parse_source(&source) {
        Ok(program) => program,
        Err(errors) => {
            eprint!("{errors}");
            process::exit(1);
        },
    };

    if args.debug {
        let mut printer = AstPrinter::default();
        printer.print_program(&program);
        println!("{printer}");
    }

    let mut evaluator = Evaluator::new();
    if let Err(error) = evaluator.eval(&program) {
        eprintln!("{error}");
        process::exit(1);
    }
}
