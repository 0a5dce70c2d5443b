// minipas: syntax checker and AST dumper for a small Pascal-like language

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser as _, ValueEnum};
use crossterm::style::{style, Color, Stylize};
use tracing_subscriber::EnvFilter;

use minipas::parser::ast::SourceLocation;
use minipas::parser::lexer::Lexer;
use minipas::parser::{ParseError, Parser};

/// Parse a minipas program and print its syntax tree
#[derive(Debug, clap::Parser)]
#[command(name = "minipas", author, version)]
struct Args {
    /// Source file to parse; standard input when omitted or `-`
    file: Option<PathBuf>,

    /// What to print when parsing succeeds
    #[arg(short, long, value_enum, default_value_t = Emit::Ast)]
    emit: Emit,

    /// Log more (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Debug rendering of the syntax tree
    Ast,
    /// The syntax tree as pretty-printed JSON
    Json,
    /// One line per token, without parsing
    Tokens,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let source_name = match &args.file {
        Some(path) if path.as_os_str() != "-" => path.display().to_string(),
        _ => "<stdin>".to_string(),
    };

    match run(&args, &source_name) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ParseError>() {
                Some(parse_err) => report_parse_error(&source_name, parse_err),
                None => eprintln!("{} {:#}", label("error:", Color::Red), err),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(args: &Args, source_name: &str) -> Result<()> {
    let source = read_source(args.file.as_ref())
        .with_context(|| format!("failed to read {}", source_name))?;

    let mut stdout = io::stdout().lock();

    if args.emit == Emit::Tokens {
        let tokens = Lexer::new(&source).tokenize().map_err(ParseError::from)?;
        for token in tokens {
            writeln!(stdout, "{:>8}  {}", token.location.to_string(), token)?;
        }
        return Ok(());
    }

    tracing::info!("parsing {}", source_name);
    let program = Parser::from_source(&source)?.parse_program()?;
    tracing::info!(
        program = %program.name,
        vals = program.block.val_decls.len(),
        vars = program.block.var_decls.len(),
        funs = program.block.fun_decls.len(),
        "parsed successfully"
    );

    match args.emit {
        Emit::Json => writeln!(stdout, "{}", serde_json::to_string_pretty(&program)?)?,
        _ => writeln!(stdout, "{:#?}", program)?,
    }

    Ok(())
}

fn read_source(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path),
        _ => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

/// Print `error: <message>` and, for tokens that came from source text,
/// the `--> file:line:column` of the offending token.
fn report_parse_error(source_name: &str, err: &ParseError) {
    eprintln!("{} {}", label("error:", Color::Red), err);

    let location = err.location();
    if location != SourceLocation::default() {
        eprintln!("  {} {}:{}", label("-->", Color::Blue), source_name, location);
    }
}

fn label(text: &str, color: Color) -> String {
    if io::stderr().is_terminal() {
        style(text).with(color).bold().to_string()
    } else {
        text.to_string()
    }
}
