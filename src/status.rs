use std::fmt;

use serde::Serialize;

/// Outcome of the most recent operation on a [`Database`](crate::Database).
///
/// Codes are stable so they can be stored or compared by callers:
/// ```rust
/// use sql_facade::prelude::*;
///
/// assert_eq!(Status::Success.code(), 1);
/// assert_eq!(Status::from_code(2), Some(Status::NoResults));
/// assert_eq!(Status::EmptyQuery.to_string(), "No query provided.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Status {
    #[default]
    NotConnected,
    Success,
    NoResults,
    EmptyQuery,
    QueryFailed,
    ConnectionFailed,
    DatabaseNotSelected,
    DriverUnavailable,
    InvalidStatement,
}

impl Status {
    const ALL: [Status; 9] = [
        Status::NotConnected,
        Status::Success,
        Status::NoResults,
        Status::EmptyQuery,
        Status::QueryFailed,
        Status::ConnectionFailed,
        Status::DatabaseNotSelected,
        Status::DriverUnavailable,
        Status::InvalidStatement,
    ];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Status::NotConnected => 0,
            Status::Success => 1,
            Status::NoResults => 2,
            Status::EmptyQuery => 3,
            Status::QueryFailed => 4,
            Status::ConnectionFailed => 5,
            Status::DatabaseNotSelected => 6,
            Status::DriverUnavailable => 7,
            Status::InvalidStatement => 8,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Status::NotConnected => "Not connected to a database server.",
            Status::Success => "The operation completed successfully.",
            Status::NoResults => "No results were returned.",
            Status::EmptyQuery => "No query provided.",
            Status::QueryFailed => "An error occurred while executing the query.",
            Status::ConnectionFailed => "Could not connect to server.",
            Status::DatabaseNotSelected => "Could not select database.",
            Status::DriverUnavailable => {
                "Server does not support this method or driver is not installed."
            }
            Status::InvalidStatement => {
                "The statement could not be built from the supplied arguments."
            }
        }
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Status> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_code() {
        for status in Status::ALL {
            assert_eq!(Status::from_code(status.code()), Some(status));
        }
        assert_eq!(Status::from_code(42), None);
    }

    #[test]
    fn default_is_not_connected() {
        assert_eq!(Status::default(), Status::NotConnected);
        assert_eq!(Status::default().code(), 0);
    }
}
