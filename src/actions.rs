//! Closed set of exec actions. Each variant carries its fixed argument
//! vector; adding an action is a visible code change here, never a config or
//! request-time decision.

use crate::errors::AppError;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Status,
    Version,
}

impl Action {
    /// The hardcoded command line for this action. User input selects a
    /// variant; it never contributes a token to the vector.
    pub fn argv(self) -> &'static [&'static str] {
        match self {
            Action::Status => &["uptime"],
            Action::Version => &["uname", "-a"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Status => "status",
            Action::Version => "version",
        }
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "status" => Ok(Action::Status),
            "version" => Ok(Action::Version),
            _ => Err(AppError::UnknownAction),
        }
    }
}
