//! Terminal rendering for daybook types.
//!
//! Adds colored output on top of the plain display strings from
//! daybook-core using owo_colors.

use daybook_core::Event;
use daybook_core::event_list::RECORD_SEPARATOR;
use owo_colors::OwoColorize;

/// Extension trait for colored terminal rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    /// Same two lines as the display string, with the name highlighted and
    /// the date line dimmed.
    fn render(&self) -> String {
        let (summary, when) = self
            .display_string()
            .split_once('\n')
            .unwrap_or((self.display_string(), ""));

        let summary = match summary.strip_prefix(self.name()) {
            Some(rest) => format!("{}{}", self.name().bold(), rest),
            None => summary.to_string(),
        };

        format!("{}\n{}", summary, when.dimmed())
    }
}

impl Render for [&Event] {
    fn render(&self) -> String {
        if self.is_empty() {
            return "No events".dimmed().to_string();
        }

        self.iter()
            .map(|event| event.render())
            .collect::<Vec<_>>()
            .join(RECORD_SEPARATOR)
    }
}

/// Sort events by start date and time. Events starting at the same moment
/// keep their order.
pub fn by_start<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<&'a Event> {
    let mut events: Vec<_> = events.into_iter().collect();
    events.sort_by_key(|event| (event.date(), event.time()));
    events
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_keeps_text() {
        let event = Event::new("2010-10-10", "18:05", 75, "Blah", Some("Office")).unwrap();
        let rendered = event.render();

        assert!(rendered.contains("Blah"));
        assert!(rendered.contains("@ Office (1 hour, 15 minutes)"));
        assert!(rendered.contains("10 October 2010, 6:05pm"));
    }

    #[test]
    fn test_render_empty_list() {
        let events: Vec<&Event> = Vec::new();
        assert!(events.render().contains("No events"));
    }

    #[test]
    fn test_by_start_orders_chronologically() {
        let events = [
            Event::new("2010-10-11", "09:00", 30, "Tuesday", None).unwrap(),
            Event::new("2010-10-10", "24:00", 30, "Midnight", None).unwrap(),
            Event::new("2010-10-10", "18:05", 30, "Evening", None).unwrap(),
            Event::new("2010-10-10", "18:05", 30, "Evening again", None).unwrap(),
            Event::new("2009-12-31", "23:59", 30, "Last year", None).unwrap(),
        ];

        let names: Vec<_> = by_start(&events).into_iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            ["Last year", "Evening", "Evening again", "Midnight", "Tuesday"]
        );
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 0), "events");
        assert_eq!(pluralize("event", 3), "events");
    }
}
