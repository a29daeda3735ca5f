use anyhow::Result;
use daybook_core::event_list_string;
use owo_colors::OwoColorize;

use crate::app::App;
use crate::render::{Render, by_start, pluralize};

/// Load the calendar and print it, earliest event first. `plain` prints the
/// display strings in file order.
///
/// A calendar that fails to load is shown as empty, with the reason.
pub fn run(app: &mut App, plain: bool) -> Result<()> {
    if let Err(err) = app.load() {
        app.notify(format!(
            "There was an error loading the calendar file, starting with an empty calendar.\n{err}"
        ));
    }

    if let Some(notice) = app.take_notice() {
        eprintln!("{}", notice.yellow());
    }

    if plain {
        println!("{}", event_list_string(&app.list));
        return Ok(());
    }

    let count = app.list.len();
    if let Some(path) = app.path() {
        println!(
            "{}",
            format!("📅 {} ({} {})", path.display(), count, pluralize("event", count)).dimmed()
        );
        println!();
    }
    let events = by_start(app.list.iter().map(|(_, event)| event));
    println!("{}", events.render());

    Ok(())
}
