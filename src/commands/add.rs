use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use super::{FieldArgs, load_for_update, prompt_fields};
use crate::app::App;

pub fn run(app: &mut App, args: FieldArgs) -> Result<()> {
    load_for_update(app)?;

    let interactive = !args.is_complete();

    let fields = prompt_fields(args, None)?;
    let id = app
        .add(&fields)
        .context("Error creating event, invalid fields?")?;
    app.save()?;

    if interactive {
        println!();
    }
    if let Some(event) = app.list.get(id) {
        println!("{}", format!("  Added: {}", event.name()).green());
    }

    Ok(())
}
