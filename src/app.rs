//! Application state shared by the commands.
//!
//! Holds the loaded event list, the file it came from and a pending notice
//! for the user. Commands receive it explicitly; the core crate never sees
//! it.

use std::path::{Path, PathBuf};

use daybook_core::calendar_file::{load_calendar_with, save_calendar};
use daybook_core::config::DaybookConfig;
use daybook_core::{Event, EventFields, EventId, EventList, FileError};

pub struct App {
    pub list: EventList,
    path: Option<PathBuf>,
    read_buffer_size: usize,
    notice: Option<String>,
}

impl App {
    /// `path` wins over the calendar file named in the config.
    pub fn new(path: Option<PathBuf>, config: &DaybookConfig) -> Self {
        App {
            list: EventList::new(),
            path: path.or_else(|| config.calendar_file()),
            read_buffer_size: config.read_buffer_size,
            notice: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Replace the list with the contents of the calendar file.
    ///
    /// On failure the partly loaded list is thrown away and the app is left
    /// with an empty calendar.
    pub fn load(&mut self) -> Result<usize, FileError> {
        let mut list = EventList::new();
        let result = load_calendar_with(&mut list, self.path(), self.read_buffer_size);

        self.list = match result {
            Ok(_) => list,
            Err(_) => EventList::new(),
        };

        result
    }

    pub fn save(&mut self) -> Result<usize, FileError> {
        save_calendar(&mut self.list, self.path.as_deref())
    }

    /// Save to `dest` without changing the app's own path.
    pub fn save_to(&mut self, dest: &Path) -> Result<usize, FileError> {
        save_calendar(&mut self.list, Some(dest))
    }

    /// Validate and append a new event.
    pub fn add(&mut self, fields: &EventFields) -> anyhow::Result<EventId> {
        let event = Event::from_fields(fields)?;
        self.list
            .push(event)
            .ok_or_else(|| anyhow::anyhow!("Error trying to add event to list."))
    }

    /// Find an event by its exact name.
    pub fn find(&mut self, name: &str) -> Option<EventId> {
        self.list.find(name).map(|(id, _)| id)
    }

    /// Queue a message to show the user.
    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    /// Take the pending message, clearing it.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> EventFields {
        EventFields {
            date: "2010-10-10".into(),
            time: "18:05".into(),
            duration: 30,
            name: name.into(),
            location: None,
        }
    }

    fn app_at(path: &Path) -> App {
        App::new(Some(path.to_path_buf()), &DaybookConfig::default())
    }

    #[test]
    fn test_failed_load_leaves_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.txt");
        std::fs::write(&path, "2010-10-10 18:05 30 Good one\n\n2010-13-10 18:05 30 Bad one\n\n")
            .unwrap();

        let mut app = app_at(&path);
        app.add(&fields("Already here")).unwrap();

        assert!(matches!(app.load(), Err(FileError::InvalidFormat { .. })));
        assert!(app.list.is_empty());
    }

    #[test]
    fn test_add_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calendar.txt");

        let mut app = app_at(&path);
        app.add(&fields("First")).unwrap();
        app.add(&fields("Second")).unwrap();
        assert_eq!(app.save().unwrap(), 2);

        let mut reloaded = app_at(&path);
        assert_eq!(reloaded.load().unwrap(), 2);
        assert!(reloaded.find("Second").is_some());
    }

    #[test]
    fn test_add_rejects_invalid_fields() {
        let mut app = App::new(None, &DaybookConfig::default());
        let mut bad = fields("Bad");
        bad.time = "25:00".into();

        let err = app.add(&bad).unwrap_err();
        assert_eq!(err.to_string(), "Time hour is invalid");
        assert!(app.list.is_empty());
    }

    #[test]
    fn test_path_falls_back_to_config() {
        let config = DaybookConfig {
            calendar_file: Some(PathBuf::from("/tmp/from-config.txt")),
            ..DaybookConfig::default()
        };

        let app = App::new(None, &config);
        assert_eq!(app.path(), Some(Path::new("/tmp/from-config.txt")));

        let app = App::new(Some(PathBuf::from("given.txt")), &config);
        assert_eq!(app.path(), Some(Path::new("given.txt")));
    }

    #[test]
    fn test_no_path_is_no_filename() {
        let mut app = App::new(None, &DaybookConfig::default());
        assert!(matches!(app.load(), Err(FileError::NoFilename)));
    }

    #[test]
    fn test_notice_is_taken_once() {
        let mut app = App::new(None, &DaybookConfig::default());
        app.notify("hello");

        assert_eq!(app.take_notice().as_deref(), Some("hello"));
        assert_eq!(app.take_notice(), None);
    }
}
