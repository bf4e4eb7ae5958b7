mod alloc;
mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod gc;
mod interpreter;
mod io;
mod printer;
mod reader;
mod value;

use clap::Parser;
use interpreter::Interpreter;
use io::Stream;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use std::path::PathBuf;

/// A small embeddable Lisp interpreter with a mark-and-sweep garbage collector.
#[derive(Parser, Debug)]
#[command(name = "liblisp")]
#[command(version = config::VERSION)]
#[command(about = "A small Lisp interpreter with mark-and-sweep garbage collection")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts a REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let mut interp = Interpreter::init();

    let status = if let Some(path) = args.script {
        run_script(&mut interp, &path)?
    } else {
        run_repl(&mut interp)?
    };

    interp.end();
    std::process::exit(status);
}

/// Runs every top-level form in `path` to completion, sweeping after each
/// one. Scripts evaluate for effect; results are not printed.
fn run_script(interp: &mut Interpreter, path: &PathBuf) -> Result<i32, Box<dyn std::error::Error>> {
    let contents = std::fs::read(path)
        .map_err(|e| format!("cannot read script file {}: {}", path.display(), e))?;
    interp.set_input(Stream::string_in(contents));
    loop {
        if interp.should_halt.get() {
            break;
        }
        match interp.read() {
            Some(expr) => {
                interp.eval_cell(expr);
                interp.clean();
            }
            None => break,
        }
    }
    Ok(0)
}

/// Interactive REPL backed by rustyline for line editing and history.
/// Each line is parsed and evaluated independently, matching the teacher's
/// one-expression-per-line style rather than buffering across lines.
fn run_repl(interp: &mut Interpreter) -> Result<i32, Box<dyn std::error::Error>> {
    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), rustyline::history::DefaultHistory> =
        Editor::with_config(rl_config).map_err(|e| format!("failed to initialize REPL: {}", e))?;
    let _ = rl.load_history(config::HISTORY_FILE);

    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_SUBTITLE);

    loop {
        let readline = rl.readline("lisp> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "(quit)" || trimmed == "(exit)" {
                    println!("Goodbye!");
                    break;
                }
                interp.set_input(Stream::string_in(line.into_bytes()));
                while let Some(expr) = interp.read() {
                    let result = interp.eval_cell(expr);
                    print!("=> ");
                    interp.print_cell(&result);
                    println!();
                }
                interp.clean();
                if interp.should_halt.get() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("readline error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(config::HISTORY_FILE);
    Ok(0)
}
