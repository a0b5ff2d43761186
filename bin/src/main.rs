use std::{
    io::{stdin, stdout, BufRead, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use errors::{Diagnostic, Phase};
use interpreter::Value;
use itertools::Itertools;

#[derive(clap::Parser)]
#[command(about = "Evaluate Lox expressions from a file or an interactive prompt")]
struct Args {
    /// File holding a single expression. Starts a prompt when omitted.
    file: Option<PathBuf>,

    /// Print the scanned tokens before parsing
    #[arg(long)]
    print_tokens: bool,

    /// Print the parsed expression tree before evaluating it
    #[arg(long)]
    print_ast: bool,
}

// Exit codes from sysexits.h
const EX_DATAERR: u8 = 65;
const EX_SOFTWARE: u8 = 70;
const EX_IOERR: u8 = 74;

struct Shell {
    print_tokens: bool,
    print_ast: bool,
}

impl Shell {
    fn run(&self, source: &str, out: &mut impl Write) -> anyhow::Result<Result<Value, Diagnostic>> {
        let tokens = match scanner::lex(source) {
            Ok(tokens) => tokens,
            Err(e) => return Ok(Err(e.into())),
        };
        if self.print_tokens {
            writeln!(out, "{}", tokens.iter().join("\n"))?;
        }

        let expr = match parser::parse(tokens) {
            Ok(expr) => expr,
            Err(e) => return Ok(Err(e.into())),
        };
        if self.print_ast {
            writeln!(out, "{}", expr)?;
        }

        Ok(interpreter::evaluate(&expr).map_err(Diagnostic::from))
    }

    fn run_file(&self, path: PathBuf, out: &mut impl Write) -> anyhow::Result<ExitCode> {
        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("Could not read {}: {}", path.display(), e);
                return Ok(ExitCode::from(EX_IOERR));
            }
        };

        match self.run(&source, out)? {
            Ok(value) => {
                writeln!(out, "{}", value)?;
                Ok(ExitCode::SUCCESS)
            }
            Err(diagnostic) => {
                eprintln!("{}", diagnostic);
                Ok(ExitCode::from(match diagnostic.phase {
                    Phase::Compilation => EX_DATAERR,
                    Phase::Runtime => EX_SOFTWARE,
                }))
            }
        }
    }

    /// Evaluates one line at a time. A faulting line is reported and
    /// doesn't end the session.
    fn run_prompt(&self, input: impl BufRead, out: &mut impl Write) -> anyhow::Result<ExitCode> {
        let mut lines = input.lines();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                return Ok(ExitCode::SUCCESS);
            };
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match self.run(&line, out)? {
                Ok(value) => writeln!(out, "{}", value)?,
                Err(diagnostic) => {
                    log::debug!("Line failed: {:?}", diagnostic);
                    eprintln!("{}", diagnostic)
                }
            }
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let shell = Shell { print_tokens: args.print_tokens, print_ast: args.print_ast };

    match args.file {
        Some(file) => shell.run_file(file, &mut stdout()),
        None => shell.run_prompt(stdin().lock(), &mut stdout()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn output(shell: &Shell, source: &str) -> (String, Result<Value, Diagnostic>) {
        let mut out = Vec::new();
        let result = shell.run(source, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), result)
    }

    #[test]
    fn print_tokens_and_ast() {
        let shell = Shell { print_tokens: true, print_ast: true };
        let (out, result) = output(&shell, "-1 + 2");
        assert_eq!(result, Ok(Value::Number(1.0)));
        assert_eq!(
            out,
            "MINUS - null\nNUMBER 1 1.0\nPLUS + null\nNUMBER 2 2.0\nEOF  null\n(+ (- 1) 2)\n"
        );
    }

    #[test]
    fn nothing_printed_after_a_fault() {
        let shell = Shell { print_tokens: false, print_ast: true };
        let (out, result) = output(&shell, "(1");
        assert_eq!(out, "");
        assert_eq!(result.unwrap_err().phase, Phase::Compilation);
    }

    #[test]
    fn prompt_keeps_going_after_faults() {
        let shell = Shell { print_tokens: false, print_ast: false };
        let input = "1 + 2\n\n-\"a\"\n\"a\" + \"b\"\n";
        let mut out = Vec::new();

        shell.run_prompt(input.as_bytes(), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "> 3\n> > > ab\n> \n");
    }
}
