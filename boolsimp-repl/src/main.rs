mod error;

use boolsimp_engine::{Derivation, Expr, Simplifier};
use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{io::{self, BufRead, IsTerminal}, process::ExitCode};

/// Parses and simplifies the given input string.
fn parse_simplify(input: &str, simplifier: &Simplifier) -> Result<Derivation, Error> {
    let expr = input.parse::<Expr>()?;
    Ok(simplifier.simplify(&expr))
}

/// Simplifies the input and prints the derivation, or reports the error. Returns true on success.
fn read_eval(input: &str, simplifier: &Simplifier, quiet: bool) -> bool {
    match parse_simplify(input, simplifier) {
        Ok(derivation) => {
            if quiet {
                println!("{}", derivation.result());
            } else {
                print!("{}", derivation);
                if derivation.truncated {
                    println!("(search stopped after {} trees)", derivation.nodes_explored);
                }
            }
            true
        },
        Err(err) => {
            err.report_to_stderr(input);
            false
        },
    }
}

/// Runs the interactive mode until end of input.
fn repl(simplifier: &Simplifier, quiet: bool) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor, simplifier: &Simplifier, quiet: bool) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        read_eval(&input, simplifier, quiet);
        Ok(())
    }

    loop {
        match process_line(&mut rl, simplifier, quiet) {
            Ok(()) => (),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut quiet = false;
    let mut words = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-q" | "--quiet" => quiet = true,
            _ => words.push(arg),
        }
    }

    let simplifier = match Simplifier::new() {
        Ok(simplifier) => simplifier,
        Err(err) => {
            Error::from(err).report_to_stderr("");
            return ExitCode::FAILURE;
        },
    };

    if !words.is_empty() {
        // simplify the arguments as one expression
        let input = words.join(" ");
        if read_eval(&input, &simplifier, quiet) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    } else if !io::stdin().is_terminal() {
        // one expression per line
        let mut ok = true;
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    eprintln!("{}", err);
                    return ExitCode::FAILURE;
                },
            };
            if line.trim().is_empty() {
                continue;
            }
            ok &= read_eval(&line, &simplifier, quiet);
        }

        if ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    } else {
        // run the repl / interactive mode
        match repl(&simplifier, quiet) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{}", err);
                ExitCode::FAILURE
            },
        }
    }
}
