// Session and display preferences held in local storage
use serde::{Deserialize, Serialize};

pub const LOGGED_IN_KEY: &str = "adminLoggedIn";
pub const USERNAME_KEY: &str = "adminUsername";
pub const THEME_KEY: &str = "theme";

const DEFAULT_USERNAME: &str = "admin";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub logged_in: bool,
    pub username: Option<String>,
}

impl Session {
    pub fn logged_out() -> Self {
        Self {
            logged_in: false,
            username: None,
        }
    }

    /// Only the literal flag value `"true"` counts as logged in
    pub fn from_stored(flag: Option<&str>, username: Option<String>) -> Self {
        if flag == Some("true") {
            Self {
                logged_in: true,
                username: Some(username.unwrap_or_else(|| DEFAULT_USERNAME.to_string())),
            }
        } else {
            Self::logged_out()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }
}
