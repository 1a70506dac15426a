use core::str::FromStr;

use thiserror::Error;

/// Named top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Dashboard,
    Create,
    Clients,
    Items,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Dashboard => "dashboard",
            View::Create => "create",
            View::Clients => "clients",
            View::Items => "items",
        }
    }
}

impl core::fmt::Display for View {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown view: {0:?} (expected dashboard, create, clients or items)")]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Ok(View::Dashboard),
            "create" => Ok(View::Create),
            "clients" => Ok(View::Clients),
            "items" => Ok(View::Items),
            other => Err(UnknownView(other.to_string())),
        }
    }
}

/// Create-flow state.
///
/// `Saving` lasts from a successful validation until the API call resolves;
/// the save trigger is disabled for that whole span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateState {
    #[default]
    Editing,
    Saving,
}
