use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use nfatrace::{SimulationInput, export, simulate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nfatrace", about = "Trace an epsilon-NFA over an input string", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate an automaton and print its trace
    Run {
        /// JSON automaton definition
        #[arg(long, conflicts_with = "example", required_unless_present = "example")]
        config: Option<PathBuf>,
        /// Use the built-in testing example
        #[arg(long)]
        example: bool,
        /// Override the input string of the definition
        #[arg(long)]
        input: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print the built-in testing example as JSON
    Example,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum Format {
    Text,
    Json,
    Dot,
}

fn main() {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(err) = execute(cli.command) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn execute(command: Command) -> nfatrace::Result<()> {
    match command {
        Command::Run {
            config,
            example: _,
            input,
            format,
        } => {
            let mut definition = match config {
                Some(path) => SimulationInput::from_path(path)?,
                None => SimulationInput::example(),
            };
            if let Some(input) = input {
                definition = definition.with_input(input);
            }
            let report = simulate(&definition)?;
            let output = match format {
                Format::Text => export::to_text(&report),
                Format::Json => export::to_json(&report, true)? + "\n",
                Format::Dot => export::to_dot(&report),
            };
            print!("{output}");
        }
        Command::Example => {
            println!("{}", serde_json::to_string_pretty(&SimulationInput::example())?);
        }
    }
    Ok(())
}
