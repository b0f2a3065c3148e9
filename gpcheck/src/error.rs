use core::fmt::{self, Display};
use std::io;

/// Central error type.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Json(serde_json::Error),
    Lower(gprule::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<gprule::Error> for Error {
    fn from(err: gprule::Error) -> Self {
        Self::Lower(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {}", e),
            Self::Json(e) => write!(f, "malformed rule declarations: {}", e),
            Self::Lower(e) => e.fmt(f),
        }
    }
}
