//! Reading and writing calendar files.
//!
//! A calendar file is a sequence of records:
//!
//! ```text
//! 2010-10-10 18:05 75 Meeting with the team
//! Office
//!
//! 2010-10-11 12:00 60 Lunch
//!
//! ```
//!
//! The first line holds the date, time and duration (minutes) followed by the
//! name. The optional second line is the location. Each record ends with a
//! blank line.
//!
//! Whitespace after the duration is skipped across line breaks, so a name on
//! its own line after the three leading fields is read the same way. Names
//! and locations have no length limit at this layer; they are read through a
//! buffer that doubles whenever a line does not fit.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, trace, warn};

use crate::error::{FileError, FileResult};
use crate::event::{Event, EventFields};
use crate::event_list::EventList;

/// Initial size of the line buffer used for names and locations.
pub const BUFFER_CHUNK: usize = 512;

/// Names shorter than this make a file invalid, even though [`Event::new`]
/// accepts any non-empty name.
pub const MIN_FILE_NAME_LENGTH: usize = 3;

/// Leading tokens (date, time, duration) longer than this are rejected
/// before they are handed to the validators.
const MAX_TOKEN_LENGTH: usize = 32;

/// Load the calendar file at `path`, appending its events to `list`.
///
/// Returns the number of events loaded. On error, events read before the
/// failing record stay in `list`; whether to keep them is up to the caller.
pub fn load_calendar(list: &mut EventList, path: Option<&Path>) -> FileResult<usize> {
    load_calendar_with(list, path, BUFFER_CHUNK)
}

/// [`load_calendar`] with an explicit initial line buffer size.
pub fn load_calendar_with(
    list: &mut EventList,
    path: Option<&Path>,
    buffer_size: usize,
) -> FileResult<usize> {
    let path = path.ok_or(FileError::NoFilename)?;
    debug!(path = %path.display(), "Loading calendar");

    let file = File::open(path)?;
    let mut reader = CalendarReader::with_buffer_size(BufReader::new(file), buffer_size)?;

    let loaded = reader.read_into(list).inspect_err(|err| {
        warn!(path = %path.display(), error = %err, "Calendar load stopped");
    })?;

    debug!(loaded, buffer = reader.buffer_capacity(), "Calendar loaded");
    Ok(loaded)
}

/// Save every event in `list` to `path`, replacing the file.
///
/// An empty list is refused before the file is opened, so an existing file
/// is never truncated by it. A write error part way through leaves a
/// partially written file behind.
pub fn save_calendar(list: &mut EventList, path: Option<&Path>) -> FileResult<usize> {
    if list.is_empty() {
        return Err(FileError::EmptyList);
    }
    let path = path.ok_or(FileError::NoFilename)?;
    debug!(path = %path.display(), events = list.len(), "Saving calendar");

    let mut out = BufWriter::new(File::create(path)?);
    let written = write_calendar(list, &mut out)?;
    out.flush()?;

    Ok(written)
}

/// Write every event in `list` in calendar file format.
///
/// Walks the list with its cursor, which is left at the end.
pub fn write_calendar<W: Write>(list: &mut EventList, mut out: W) -> FileResult<usize> {
    let mut written = 0;

    list.reset_position();
    while let Some((_, event)) = list.next() {
        write_event(&mut out, event)?;
        written += 1;
    }

    Ok(written)
}

fn write_event<W: Write>(out: &mut W, event: &Event) -> io::Result<()> {
    writeln!(
        out,
        "{} {} {} {}",
        event.date(),
        event.time(),
        event.duration(),
        event.name()
    )?;

    if let Some(location) = event.location() {
        writeln!(out, "{location}")?;
    }

    writeln!(out)
}

/// A line read by [`CalendarReader::read_line`].
#[derive(Debug, PartialEq, Eq)]
enum Line {
    /// Ended by a newline, which has been stripped.
    Complete(String),
    /// Ended by the end of the input.
    Partial(String),
}

impl Line {
    fn into_text(self) -> String {
        match self {
            Line::Complete(text) | Line::Partial(text) => text,
        }
    }
}

/// Streaming calendar parser over any buffered reader.
pub struct CalendarReader<R> {
    reader: R,
    buffer: Vec<u8>,
    capacity: usize,
    records: usize,
}

impl<R: BufRead> CalendarReader<R> {
    pub fn new(reader: R) -> FileResult<Self> {
        Self::with_buffer_size(reader, BUFFER_CHUNK)
    }

    /// Start with a line buffer of `size` bytes (at least one).
    pub fn with_buffer_size(reader: R, size: usize) -> FileResult<Self> {
        let capacity = size.max(1);
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| FileError::Internal)?;

        Ok(CalendarReader {
            reader,
            buffer,
            capacity,
            records: 0,
        })
    }

    /// Current size of the line buffer. Starts at the initial size and
    /// doubles each time a line does not fit.
    pub fn buffer_capacity(&self) -> usize {
        self.capacity
    }

    /// Read every remaining record, appending the events to `list`.
    pub fn read_into(&mut self, list: &mut EventList) -> FileResult<usize> {
        let mut loaded = 0;

        while let Some(event) = self.read_event()? {
            if list.insert_last(Some(event)).is_none() {
                return Err(FileError::Internal);
            }
            loaded += 1;
        }

        Ok(loaded)
    }

    /// Read and validate the next record.
    ///
    /// Returns `Ok(None)` when the input ends cleanly between records.
    pub fn read_event(&mut self) -> FileResult<Option<Event>> {
        let Some(fields) = self.read_fields()? else {
            return Ok(None);
        };

        let record = self.records;
        Event::from_fields(&fields).map(Some).map_err(|field| {
            warn!(record, error = %field, "Rejected calendar record");
            FileError::InvalidFormat {
                record,
                field: Some(field),
            }
        })
    }

    fn read_fields(&mut self) -> FileResult<Option<EventFields>> {
        if !self.skip_whitespace()? {
            trace!(records = self.records, "End of calendar");
            return Ok(None);
        }

        self.records += 1;
        let record = self.records;

        let date = self.read_token()?;
        let time = self.next_token()?;
        let duration = self.next_token()?;
        let duration = duration
            .parse::<i64>()
            .map_err(|_| FileError::invalid_format(record))?;

        // No name at all: the file ends straight after the leading fields.
        if !self.skip_whitespace()? {
            return Err(FileError::invalid_format(record));
        }

        let line = self.read_line()?;
        let name_at_eof = matches!(line, Line::Partial(_));
        let name = line.into_text();
        if name.chars().count() < MIN_FILE_NAME_LENGTH {
            return Err(FileError::invalid_format(record));
        }

        let location = if name_at_eof {
            None
        } else {
            Some(self.read_line()?.into_text()).filter(|l| !l.is_empty())
        };

        trace!(record, %date, %time, duration, "Read calendar record");

        Ok(Some(EventFields {
            date,
            time,
            duration,
            name,
            location,
        }))
    }

    /// Skip whitespace, including line breaks. Returns false if the input
    /// ran out first.
    fn skip_whitespace(&mut self) -> io::Result<bool> {
        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(false);
            }

            let skipped = available
                .iter()
                .take_while(|b| b.is_ascii_whitespace())
                .count();
            let found = skipped < available.len();
            self.reader.consume(skipped);

            if found {
                return Ok(true);
            }
        }
    }

    /// Skip whitespace then read a token. Running out of input here means
    /// the leading line was cut short.
    fn next_token(&mut self) -> FileResult<String> {
        if !self.skip_whitespace()? {
            return Err(FileError::invalid_format(self.records));
        }
        self.read_token()
    }

    /// Read a run of non-whitespace bytes.
    fn read_token(&mut self) -> FileResult<String> {
        let mut token = Vec::new();

        loop {
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                break;
            }

            let len = available
                .iter()
                .take_while(|b| !b.is_ascii_whitespace())
                .count();
            token.extend_from_slice(&available[..len]);
            let ended = len < available.len();
            self.reader.consume(len);

            if token.len() > MAX_TOKEN_LENGTH {
                return Err(FileError::invalid_format(self.records));
            }
            if ended {
                break;
            }
        }

        String::from_utf8(token).map_err(|_| FileError::invalid_format(self.records))
    }

    /// Read up to the next newline into the line buffer, growing it as
    /// needed.
    fn read_line(&mut self) -> FileResult<Line> {
        self.buffer.clear();

        loop {
            let room = self.capacity - self.buffer.len();
            let available = self.reader.fill_buf()?;
            if available.is_empty() {
                return Ok(Line::Partial(self.buffer_text()?));
            }

            let window = &available[..available.len().min(room)];
            match window.iter().position(|&b| b == b'\n') {
                Some(end) => {
                    self.buffer.extend_from_slice(&window[..end]);
                    self.reader.consume(end + 1);
                    return Ok(Line::Complete(self.buffer_text()?));
                }
                None => {
                    let len = window.len();
                    self.buffer.extend_from_slice(window);
                    self.reader.consume(len);

                    if self.buffer.len() == self.capacity {
                        self.grow()?;
                    }
                }
            }
        }
    }

    fn grow(&mut self) -> FileResult<()> {
        let capacity = self
            .capacity
            .checked_mul(2)
            .ok_or(FileError::Internal)?;
        self.buffer
            .try_reserve_exact(capacity - self.buffer.len())
            .map_err(|_| FileError::Internal)?;

        trace!(from = self.capacity, to = capacity, "Grew line buffer");
        self.capacity = capacity;
        Ok(())
    }

    fn buffer_text(&self) -> FileResult<String> {
        let bytes = self.buffer.strip_suffix(b"\r").unwrap_or(&self.buffer[..]);
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| FileError::invalid_format(self.records))
    }
}
