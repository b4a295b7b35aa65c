// ABOUTME: Command-line entry point: REPL, script execution, one-shot eval

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};
use schemelet::config::{HISTORY_FILE, PROMPT, VERSION, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use schemelet::highlighter::SchemeHelper;
use schemelet::Interpreter;
use std::path::PathBuf;

/// An embeddable Scheme-flavored Lisp interpreter
#[derive(Parser, Debug)]
#[command(name = "schemelet")]
#[command(version = VERSION)]
#[command(about = "An embeddable Scheme-flavored Lisp with a mark-and-sweep heap")]
struct CliArgs {
    /// Script file to execute (optional - if not provided, starts REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Evaluate one expression, print its result, and exit
    #[arg(
        short = 'e',
        long = "eval",
        value_name = "EXPR",
        conflicts_with = "script"
    )]
    expr: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let mut interp = Interpreter::new();

    if let Some(expr) = args.expr {
        println!("{}", interp.run(&expr)?);
        return Ok(());
    }

    if let Some(path) = args.script {
        let source = std::fs::read_to_string(&path)?;
        for result in interp.run_all(&source)? {
            println!("{result}");
        }
        return Ok(());
    }

    repl(&mut interp)
}

fn repl(interp: &mut Interpreter) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(SchemeHelper::new()));

    // Keep history from previous sessions if there is any
    let _ = rl.load_history(HISTORY_FILE);

    println!("{WELCOME_MESSAGE}");
    println!("{WELCOME_SUBTITLE}");

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if matches!(line.trim(), "(quit)" | "(exit)") {
                    println!("Goodbye!");
                    break;
                }
                match interp.run(&line) {
                    Ok(result) => {
                        println!("=> {}", SchemeHelper::highlight_output(&result));
                    }
                    Err(e) => {
                        eprintln!("Error: {e}");
                    }
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
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);
    Ok(())
}
