//! Calendar events.
//!
//! An [`Event`] only exists in a fully validated state. Construction and
//! editing go through the same validation, and an edit that fails leaves the
//! event exactly as it was.

use std::fmt;

use crate::date_time::{self, Date, Time};
use crate::error::EventError;

/// Maximum name length in characters.
pub const MAX_NAME_LENGTH: usize = 1024;

/// Maximum location length in characters.
pub const MAX_LOCATION_LENGTH: usize = 1024;

/// A single calendar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    date: Date,
    time: Time,
    duration: u32,
    name: String,
    location: Option<String>,
    display_string: String,
}

/// Event fields in their textual, on-disk form.
///
/// This is what a user types into an add or edit form, and what
/// [`Event::fields`] hands back to pre-fill one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFields {
    pub date: String,
    pub time: String,
    pub duration: i64,
    pub name: String,
    pub location: Option<String>,
}

impl Event {
    /// Create an event, validating date, time, duration, name and location
    /// in that order. The first invalid field is reported.
    ///
    /// Name and location must each fit on one line of a calendar file, and
    /// the name may not start with whitespace. An empty `location` is treated
    /// the same as no location.
    pub fn new(
        date: &str,
        time: &str,
        duration: i64,
        name: &str,
        location: Option<&str>,
    ) -> Result<Self, EventError> {
        let date = date_time::parse_date(date).map_err(EventError::Date)?;
        let time = date_time::parse_time(time).map_err(EventError::Time)?;
        let duration = u32::try_from(duration).map_err(|_| EventError::Duration)?;

        let name_length = name.chars().count();
        if name_length == 0
            || name_length > MAX_NAME_LENGTH
            || has_line_break(name)
            || name.starts_with(char::is_whitespace)
        {
            return Err(EventError::Name);
        }

        let location = location.filter(|l| !l.is_empty());
        if location.is_some_and(|l| l.chars().count() > MAX_LOCATION_LENGTH || has_line_break(l))
        {
            return Err(EventError::Location);
        }

        let mut event = Event {
            date,
            time,
            duration,
            name: name.to_string(),
            location: location.map(str::to_string),
            display_string: String::new(),
        };
        event.display_string = event.build_display_string();

        Ok(event)
    }

    /// Create an event from its textual fields.
    pub fn from_fields(fields: &EventFields) -> Result<Self, EventError> {
        Event::new(
            &fields.date,
            &fields.time,
            fields.duration,
            &fields.name,
            fields.location.as_deref(),
        )
    }

    /// Replace every field of this event.
    ///
    /// The new values are validated exactly as [`Event::new`] does. Nothing
    /// changes unless all of them are valid.
    pub fn edit(
        &mut self,
        date: &str,
        time: &str,
        duration: i64,
        name: &str,
        location: Option<&str>,
    ) -> Result<(), EventError> {
        *self = Event::new(date, time, duration, name, location)?;
        Ok(())
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn time(&self) -> Time {
        self.time
    }

    /// Duration in minutes.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Two-line rendering: `name [@ location] (duration)` then `date, time`.
    pub fn display_string(&self) -> &str {
        &self.display_string
    }

    /// The fields of this event in the form [`Event::new`] accepts.
    pub fn fields(&self) -> EventFields {
        EventFields {
            date: self.date.to_string(),
            time: self.time.to_string(),
            duration: i64::from(self.duration),
            name: self.name.clone(),
            location: self.location.clone(),
        }
    }

    fn build_display_string(&self) -> String {
        let mut out = String::with_capacity(self.name.len() + 64);

        out.push_str(&self.name);
        out.push(' ');
        if let Some(location) = &self.location {
            out.push_str("@ ");
            out.push_str(location);
            out.push(' ');
        }
        out.push_str(&date_time::format_duration(self.duration));
        out.push('\n');
        out.push_str(&date_time::format_date(&self.date));
        out.push_str(", ");
        out.push_str(&date_time::format_time(&self.time));

        out
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string)
    }
}
