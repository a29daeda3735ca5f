//! Error types for daybook.

use thiserror::Error;

/// Prefix shared by every calendar file error description.
const FILE_ERROR_PREFIX: &str = "Calendar File: ";

/// Errors from parsing date and time strings.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeError {
    #[error("too short")]
    TooShort,

    #[error("too long")]
    TooLong,

    #[error("year is invalid")]
    YearInvalid,

    #[error("month is invalid")]
    MonthInvalid,

    #[error("day is invalid")]
    DayInvalid,

    #[error("hour is invalid")]
    HourInvalid,

    #[error("minutes are invalid")]
    MinutesInvalid,

    #[error("not in the expected format")]
    Invalid,
}

/// The field that stopped an event from being created.
///
/// Validation stops at the first bad field, so there is only ever one.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventError {
    #[error("Date {0}")]
    Date(DateTimeError),

    #[error("Time {0}")]
    Time(DateTimeError),

    #[error("Duration must be a non-negative number of minutes")]
    Duration,

    #[error("Name must be one line of 1 to {max} characters, not starting with whitespace", max = crate::event::MAX_NAME_LENGTH)]
    Name,

    #[error("Location must be one line of at most {max} characters", max = crate::event::MAX_LOCATION_LENGTH)]
    Location,
}

/// Errors from loading or saving a calendar file.
///
/// The `Display` text of each variant is the message shown to the user, the
/// same text [`describe_code`] gives for its code.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("{}", describe_code(FileError::IO))]
    Io(#[from] std::io::Error),

    #[error("{}", describe_code(FileError::INVALID_FORMAT))]
    InvalidFormat {
        /// 1-based index of the record being read.
        record: usize,
        /// The field error, when the record parsed but did not validate.
        #[source]
        field: Option<EventError>,
    },

    #[error("{}", describe_code(FileError::NO_FILENAME))]
    NoFilename,

    #[error("{}", describe_code(FileError::EMPTY_LIST))]
    EmptyList,

    #[error("{}", describe_code(FileError::INTERNAL))]
    Internal,
}

/// Description used for codes that do not belong to any variant.
const UNKNOWN_FILE_ERROR: &str = "This is really bad, you've invented an error I don't know!";

impl FileError {
    pub const IO: i32 = 2;
    pub const INVALID_FORMAT: i32 = 3;
    pub const NO_FILENAME: i32 = 4;
    pub const INTERNAL: i32 = 5;
    pub const EMPTY_LIST: i32 = 6;

    pub(crate) fn invalid_format(record: usize) -> Self {
        FileError::InvalidFormat {
            record,
            field: None,
        }
    }

    /// Stable numeric code for this error. `0` is reserved for success.
    pub fn code(&self) -> i32 {
        match self {
            FileError::Io(_) => Self::IO,
            FileError::InvalidFormat { .. } => Self::INVALID_FORMAT,
            FileError::NoFilename => Self::NO_FILENAME,
            FileError::Internal => Self::INTERNAL,
            FileError::EmptyList => Self::EMPTY_LIST,
        }
    }
}

/// Describe a code returned by [`FileError::code`].
pub fn describe_code(code: i32) -> String {
    let text = match code {
        0 => "No error.",
        1 => "EOF reached.",
        FileError::IO => "Unable to read/write file.",
        FileError::INVALID_FORMAT => "File has invalid format.",
        FileError::NO_FILENAME => "Blank filename provided.",
        FileError::INTERNAL => "Internal error, trying to recover.",
        FileError::EMPTY_LIST => "Attempted to save empty list.",
        _ => UNKNOWN_FILE_ERROR,
    };

    format!("{FILE_ERROR_PREFIX}{text}")
}

/// Errors from reading the user configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type alias for calendar file operations.
pub type FileResult<T> = Result<T, FileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_describe_their_variant() {
        let errors = [
            FileError::Io(std::io::Error::other("boom")),
            FileError::invalid_format(1),
            FileError::NoFilename,
            FileError::Internal,
            FileError::EmptyList,
        ];

        for error in errors {
            assert_eq!(describe_code(error.code()), error.to_string());
        }

        assert_eq!(
            FileError::EmptyList.to_string(),
            "Calendar File: Attempted to save empty list."
        );
        assert_eq!(FileError::NoFilename.code(), 4);
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(
            describe_code(42),
            "Calendar File: This is really bad, you've invented an error I don't know!"
        );
        assert_eq!(describe_code(0), "Calendar File: No error.");
    }

    #[test]
    fn test_event_error_names_the_field() {
        let err = EventError::Time(DateTimeError::MinutesInvalid);
        assert_eq!(err.to_string(), "Time minutes are invalid");
        assert_eq!(
            EventError::Name.to_string(),
            "Name must be one line of 1 to 1024 characters, not starting with whitespace"
        );
    }
}
