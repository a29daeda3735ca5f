use anyhow::Result;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::{Render, by_start};

/// Print events whose name contains `text`, ignoring case, earliest first.
pub fn run(app: &mut App, text: &str) -> Result<()> {
    app.load()?;

    let matches = by_start(app.list.find_all(text).into_iter().map(|(_, event)| event));
    if matches.is_empty() {
        println!("{}", format!("No events matching '{}'", text).dimmed());
        return Ok(());
    }

    println!("{}", matches.render());

    Ok(())
}
