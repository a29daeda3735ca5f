use std::fs::File;

use anyhow::{Context, Result, bail};
use daybook_core::FileError;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::load_for_update;
use crate::app::App;

/// Delete the first event named `target`.
pub fn run(app: &mut App, target: &str, yes: bool) -> Result<()> {
    load_for_update(app)?;

    let Some(id) = app.find(target) else {
        bail!("No event named '{}'", target);
    };

    if !yes {
        let prompt = match app.list.get(id) {
            Some(event) => format!("Delete this event?\n{}\n", event.display_string()),
            None => format!("Delete '{}'?", target),
        };
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            return Ok(());
        }
    }

    if !app.list.delete(id) {
        bail!("No event named '{}'", target);
    }

    match app.save() {
        Ok(_) => {}
        // Saving refuses an empty list, so clear the file directly.
        Err(FileError::EmptyList) => {
            if let Some(path) = app.path() {
                File::create(path)
                    .with_context(|| format!("Could not clear '{}'", path.display()))?;
            }
        }
        Err(err) => return Err(err.into()),
    }

    println!("{}", format!("  Deleted: {}", target).red());
    Ok(())
}
