pub mod add;
pub mod delete;
pub mod edit;
pub mod save_as;
pub mod search;
pub mod show;

use std::io::ErrorKind;

use anyhow::{Context, Result};
use clap::Args;
use daybook_core::{EventFields, FileError};
use dialoguer::Input;

use crate::app::App;

/// Event fields that can be given on the command line instead of prompted for.
#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
    /// Event name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Event location (pass "" for none)
    #[arg(short, long)]
    pub location: Option<String>,

    /// Date, YYYY-MM-DD
    #[arg(short, long)]
    pub date: Option<String>,

    /// Start time, HH:MM (24 hour)
    #[arg(short, long)]
    pub time: Option<String>,

    /// Duration in minutes
    #[arg(short = 'm', long, allow_negative_numbers = true)]
    pub duration: Option<i64>,
}

impl FieldArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.date.is_none()
            && self.time.is_none()
            && self.duration.is_none()
    }

    /// True when every field is given, so [`prompt_fields`] asks nothing.
    pub fn is_complete(&self) -> bool {
        self.name.is_some()
            && self.location.is_some()
            && self.date.is_some()
            && self.time.is_some()
            && self.duration.is_some()
    }

    /// Fill in fields not given on the command line from `current`.
    pub fn merge(self, current: &EventFields) -> EventFields {
        EventFields {
            name: self.name.unwrap_or_else(|| current.name.clone()),
            location: match self.location {
                Some(location) => Some(location).filter(|l| !l.is_empty()),
                None => current.location.clone(),
            },
            date: self.date.unwrap_or_else(|| current.date.clone()),
            time: self.time.unwrap_or_else(|| current.time.clone()),
            duration: self.duration.unwrap_or(current.duration),
        }
    }
}

/// Ask for every field not already given, in the order name, location,
/// date, time, duration. Values from `current` are offered as defaults.
pub fn prompt_fields(args: FieldArgs, current: Option<&EventFields>) -> Result<EventFields> {
    let name = match args.name {
        Some(name) => name,
        None => prompt_text("  Event name", current.map(|c| c.name.as_str()), false)?,
    };

    let location = match args.location {
        Some(location) => location,
        None => prompt_text(
            "  Location (skip)",
            current.and_then(|c| c.location.as_deref()),
            true,
        )?,
    };

    let date = match args.date {
        Some(date) => date,
        None => prompt_text("  Date (YYYY-MM-DD)", current.map(|c| c.date.as_str()), false)?,
    };

    let time = match args.time {
        Some(time) => time,
        None => prompt_text("  Time (HH:MM)", current.map(|c| c.time.as_str()), false)?,
    };

    let duration = match args.duration {
        Some(duration) => duration,
        None => {
            let mut input = Input::<i64>::new().with_prompt("  Duration (minutes)");
            if let Some(current) = current {
                input = input.default(current.duration);
            }
            input.interact_text()?
        }
    };

    Ok(EventFields {
        date,
        time,
        duration,
        name,
        location: Some(location).filter(|l| !l.is_empty()),
    })
}

fn prompt_text(prompt: &str, default: Option<&str>, allow_empty: bool) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(allow_empty);

    if let Some(default) = default {
        input = input.default(default.to_string());
    }

    Ok(input.interact_text()?)
}

/// Load the calendar before changing it.
///
/// A missing file starts a new calendar. Any other load error stops the
/// command, so a file that could not be read is never overwritten.
pub fn load_for_update(app: &mut App) -> Result<()> {
    match app.load() {
        Ok(_) => Ok(()),
        Err(FileError::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => {
            let path = app
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            Err(err).with_context(|| format!("Could not load calendar '{path}'"))
        }
    }
}
