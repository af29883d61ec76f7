use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    ReplayLogError(replay_log::Error),
    JsonError(serde_json::Error),
    Interrupted,
}

impl Error {
    /// Process exit status for this failure. An interrupt gets the conventional SIGINT status so
    /// it can be told apart from a crash.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Interrupted => 130,
            _ => 1,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ReplayLogError(e) => Some(e),
            Error::JsonError(e) => Some(e),
            Error::Interrupted => None,
        }
    }
}

impl From<replay_log::Error> for Error {
    fn from(e: replay_log::Error) -> Self {
        Error::ReplayLogError(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::JsonError(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ReplayLogError(e) => write!(f, "{}", e),
            Error::JsonError(e) => write!(f, "{}", e),
            Error::Interrupted => write!(f, "Interrupted"),
        }
    }
}
