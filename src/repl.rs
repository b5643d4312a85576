//! The interactive read-eval-print loop.
//!
//! One evaluator lives for the whole session, so declarations, functions
//! and struct types accumulate across lines. Lines starting with `/` are
//! meta-commands: `/exit` terminates the session and `/scope` dumps every
//! binding in the scope chain along with the registered type names.

use std::io::{BufRead, Write};

use crate::interpreter::{evaluator::core::Evaluator, parser::core::Parser};

/// Runs the loop until `/exit` or the input stream ends.
///
/// Each line is parsed on its own; when the parse reports errors they are
/// printed and the line is not evaluated. Evaluation results and runtime
/// errors are printed through their display forms.
///
/// # Errors
/// Returns any I/O error raised while reading input or writing output.
pub fn start(input: &mut dyn BufRead, output: &mut dyn Write) -> std::io::Result<()> {
    let mut evaluator = Evaluator::new();

    loop {
        write!(output, ">> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output, "Goodbye!")?;
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if line == "/exit" {
            break;
        }
        if line == "/scope" {
            print_scope(output, &evaluator)?;
            continue;
        }

        let mut parser = Parser::new(line);
        let program = parser.parse();
        if parser.errors.has_any() {
            write!(output, "{}", parser.errors)?;
            continue;
        }

        match evaluator.eval(&program) {
            Ok(value) => writeln!(output, "{value}")?,
            Err(error) => writeln!(output, "{error}")?,
        }
    }

    Ok(())
}

/// Dumps the evaluator's bindings, innermost frame first, then the
/// registered struct type names.
fn print_scope(output: &mut dyn Write, evaluator: &Evaluator) -> std::io::Result<()> {
    writeln!(output, "==== Variables ====")?;
    for scope in evaluator.scope_stack.iter().rev() {
        for (name, value) in scope {
            writeln!(output, "{name} = {}", value.type_name())?;
        }
    }
    writeln!(output, "==== Types ====")?;
    for name in evaluator.types.keys() {
        writeln!(output, "{name}")?;
    }
    Ok(())
}
