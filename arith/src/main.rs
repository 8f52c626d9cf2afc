use std::io::{self, BufRead, IsTerminal, Write};
use std::ops::ControlFlow;

use arith::repl::{DotCommand, parse_command, run_line};
use arith::{CompatibilityMode, Error as ArithError};
use tracing_subscriber::EnvFilter;

const MODE_ENV: &str = "ARITH_COMPAT";

#[allow(clippy::print_stdout)]
fn print_banner(mode: CompatibilityMode) {
    // Use Cargo package metadata baked into the binary at compile time
    const NAME: &str = env!("CARGO_PKG_NAME");
    const VER: &str = env!("CARGO_PKG_VERSION");
    println!("{} version {}", NAME, VER);
    println!("Enter \".help\" for usage hints.");
    println!("Compatibility mode: {}", mode);
}

#[allow(clippy::print_stdout)]
fn print_help() {
    println!(".help           Show this message");
    println!(".mode [MODE]    Show or set the compatibility mode (legacy|standard)");
    println!(".exit/.quit     Exit the REPL");
    println!("Any other line is evaluated as TYPE 'literal' - TYPE 'literal'");
    println!();
    println!("Environment:");
    println!("  {MODE_ENV}          Initial compatibility mode (default: standard)");
    println!("  RUST_LOG              Log filter (default: warn)");
}

struct Session {
    mode: CompatibilityMode,
}

impl Session {
    fn from_env() -> Result<Self, ArithError> {
        let mode = match std::env::var(MODE_ENV) {
            Ok(value) => value.parse()?,
            Err(_) => CompatibilityMode::default(),
        };
        Ok(Self { mode })
    }

    #[allow(clippy::print_stdout, clippy::print_stderr)]
    fn execute(&self, line: &str) {
        match run_line(line, self.mode) {
            Ok(outcome) => println!("{outcome}"),
            Err(e) => eprintln!("Evaluation failed: {}", e),
        }
    }

    #[allow(clippy::print_stdout)]
    fn set_mode(&mut self, arg: Option<&str>) {
        match arg {
            None => println!("{}", self.mode),
            Some(value) => match value.parse() {
                Ok(mode) => {
                    self.mode = mode;
                    println!("Compatibility mode: {}", mode);
                }
                Err(e) => println!("{}", e),
            },
        }
    }
}

/// Run one non-empty input line; `Break` once the user asks to leave.
#[allow(clippy::print_stdout)]
fn handle_line(session: &mut Session, input: &str) -> ControlFlow<()> {
    match parse_command(input) {
        Some(DotCommand::Help) => print_help(),
        Some(DotCommand::Mode(arg)) => session.set_mode(arg),
        Some(DotCommand::Exit) => return ControlFlow::Break(()),
        Some(DotCommand::Unknown(cmd)) => println!("Unknown command: {}", cmd),
        None => session.execute(input),
    }
    ControlFlow::Continue(())
}

#[allow(clippy::print_stdout)]
fn repl(session: &mut Session) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        line.clear();
        print!("arith> ");
        stdout.flush()?;
        if stdin.read_line(&mut line)? == 0 {
            // EOF
            println!();
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if handle_line(session, input).is_break() {
            break;
        }
    }

    Ok(())
}

fn process_stream<R: BufRead>(session: &mut Session, reader: R) -> io::Result<()> {
    for line in reader.lines() {
        let line = line?;
        let input = line.trim();
        if input.is_empty() || input.starts_with('#') {
            continue;
        }
        if handle_line(session, input).is_break() {
            break;
        }
    }
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

#[allow(clippy::print_stderr)]
fn main() {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_banner(CompatibilityMode::default());
                print_help();
                return;
            }
            other => {
                eprintln!("Unrecognized argument: {}", other);
                print_help();
                std::process::exit(1);
            }
        }
    }

    init_logging();

    let mut session = match Session::from_env() {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to read {MODE_ENV}: {}", e);
            std::process::exit(1);
        }
    };

    print_banner(session.mode);

    if !io::stdin().is_terminal() {
        if let Err(e) = process_stream(&mut session, io::stdin().lock()) {
            eprintln!("Error processing stdin: {}", e);
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = repl(&mut session) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
