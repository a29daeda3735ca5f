use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::pluralize;

/// Load the calendar and write it out to `dest`.
pub fn run(app: &mut App, dest: &Path) -> Result<()> {
    app.load().context("Could not load calendar")?;

    let written = app
        .save_to(dest)
        .with_context(|| format!("Could not save to '{}'", dest.display()))?;

    println!(
        "{}",
        format!(
            "  Saved {} {} to {}",
            written,
            pluralize("event", written),
            dest.display()
        )
        .green()
    );

    Ok(())
}
