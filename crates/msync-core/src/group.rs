//! Asset groups of the manifest data list

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A watched folder category. Each group owns the `<group>/` path prefix of
/// the manifest's data list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Group {
    Views,
    Wizard,
    Controllers,
    Data,
    Security,
}

impl Group {
    pub const ALL: [Group; 5] = [
        Group::Views,
        Group::Wizard,
        Group::Controllers,
        Group::Data,
        Group::Security,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Wizard => "wizard",
            Self::Controllers => "controllers",
            Self::Data => "data",
            Self::Security => "security",
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Group {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Group::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| crate::Error::InvalidConfig {
                message: format!("unknown group '{s}'"),
            })
    }
}
