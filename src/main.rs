mod app;
mod commands;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use daybook_core::FileError;
use daybook_core::config::DaybookConfig;
use tracing_subscriber::EnvFilter;

use app::App;
use commands::FieldArgs;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Keep a simple calendar of events in a flat text file")]
struct Cli {
    /// Calendar file to show (defaults to the one in the config file)
    path: Option<PathBuf>,

    /// Print the calendar without colors
    #[arg(long)]
    plain: bool,

    /// Calendar file to use
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every event in the calendar
    Show {
        /// Print the calendar without colors
        #[arg(long)]
        plain: bool,
    },
    /// Add a new event, prompting for any field not given
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Change the first event with the given name
    Edit {
        /// Name of the event to change
        target: String,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete the first event with the given name
    Delete {
        /// Name of the event to delete
        target: String,

        /// Don't ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List events whose name contains some text
    Search {
        /// Text to look for, ignoring case
        text: String,
    },
    /// Write the calendar to another file
    SaveAs {
        /// Where to write the calendar
        dest: PathBuf,
    },
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<FileError>().map_or(1, FileError::code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = DaybookConfig::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "Could not load config, using defaults");
        DaybookConfig::default()
    });

    let mut app = App::new(cli.file.or(cli.path), &config);

    match cli.command {
        None => commands::show::run(&mut app, cli.plain),
        Some(Commands::Show { plain }) => commands::show::run(&mut app, plain || cli.plain),
        Some(Commands::Add { fields }) => commands::add::run(&mut app, fields),
        Some(Commands::Edit { target, fields }) => commands::edit::run(&mut app, &target, fields),
        Some(Commands::Delete { target, yes }) => commands::delete::run(&mut app, &target, yes),
        Some(Commands::Search { text }) => commands::search::run(&mut app, &text),
        Some(Commands::SaveAs { dest }) => commands::save_as::run(&mut app, &dest),
    }
}

/// Log to stderr. `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_path_shows_calendar() {
        let cli = Cli::try_parse_from(["daybook", "calendar.txt"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.path, Some(PathBuf::from("calendar.txt")));
    }

    #[test]
    fn test_edit_takes_fields() {
        let cli =
            Cli::try_parse_from(["daybook", "-f", "cal.txt", "edit", "Lunch", "-t", "13:00"])
                .unwrap();

        match cli.command {
            Some(Commands::Edit { target, fields }) => {
                assert_eq!(target, "Lunch");
                assert_eq!(fields.time.as_deref(), Some("13:00"));
                assert!(fields.name.is_none());
            }
            _ => panic!("expected edit"),
        }
        assert_eq!(cli.file, Some(PathBuf::from("cal.txt")));
    }
}
