//! Core of the daybook calendar.
//!
//! - `date_time`: parsing and formatting of dates, times and durations
//! - `event`: a single validated calendar entry
//! - `event_list`: the ordered list that owns loaded events
//! - `calendar_file`: the flat text file format, loading and saving
//! - `config`: user configuration

pub mod calendar_file;
pub mod config;
pub mod date_time;
pub mod error;
pub mod event;
pub mod event_list;

pub use calendar_file::{load_calendar, save_calendar};
pub use error::{DateTimeError, EventError, FileError};
pub use event::{Event, EventFields};
pub use event_list::{EventId, EventList, event_list_string};
