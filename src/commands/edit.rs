use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;

use super::{FieldArgs, load_for_update, prompt_fields};
use crate::app::App;

/// Edit the first event named `target`.
///
/// Fields given on the command line replace the current values and the rest
/// are kept. With no fields given, every field is prompted for with the
/// current value as the default.
pub fn run(app: &mut App, target: &str, args: FieldArgs) -> Result<()> {
    load_for_update(app)?;

    let Some(id) = app.find(target) else {
        bail!("No event named '{}'", target);
    };
    let Some(event) = app.list.get_mut(id) else {
        bail!("No event named '{}'", target);
    };

    let current = event.fields();
    let fields = if args.is_empty() {
        prompt_fields(args, Some(&current))?
    } else {
        args.merge(&current)
    };

    event
        .edit(
            &fields.date,
            &fields.time,
            fields.duration,
            &fields.name,
            fields.location.as_deref(),
        )
        .context("Event not changed")?;
    let name = event.name().to_string();

    app.save()?;
    println!("{}", format!("  Updated: {}", name).yellow());

    Ok(())
}
