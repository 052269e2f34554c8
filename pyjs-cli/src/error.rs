//! Application errors
use std::{fmt, string::FromUtf8Error};

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub kind: ErrorKind,
}

impl std::error::Error for CliError {}

#[derive(Debug)]
pub enum ErrorKind {
    Transpile(pyjs::TranspileError),
    Io(std::io::Error),
    Utf8(FromUtf8Error),
    Yaml(serde_yaml::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "application error: {}", self.kind)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transpile(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Utf8(err) => write!(f, "source is not valid UTF-8: {err}"),
            Self::Yaml(err) => write!(f, "{err}"),
        }
    }
}

impl From<pyjs::TranspileError> for CliError {
    fn from(err: pyjs::TranspileError) -> Self {
        Self {
            kind: ErrorKind::Transpile(err),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Io(err),
        }
    }
}

impl From<FromUtf8Error> for CliError {
    fn from(err: FromUtf8Error) -> Self {
        Self {
            kind: ErrorKind::Utf8(err),
        }
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        Self {
            kind: ErrorKind::Yaml(err),
        }
    }
}
