use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FootflowError, Result};

/// Local authorities with prepared demand data, in display order.
///
/// Each name is also the directory holding that authority's datasets.
pub static AUTHORITIES: [&str; 11] = [
    "Barking and Dagenham",
    "Bolton",
    "Buckinghamshire (North & Central)",
    "Buckinghamshire (South, East & West)",
    "Charnwood",
    "Cheshire West and Chester",
    "City of London",
    "Ealing",
    "Eastleigh",
    "Hackney",
    "York",
];

/// A local authority from the fixed list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Authority(&'static str);

impl Authority {
    /// Look up an authority by name (surrounding whitespace and case are ignored)
    pub fn new(name: &str) -> Result<Self> {
        let wanted = name.trim();
        AUTHORITIES
            .iter()
            .find(|candidate| candidate.eq_ignore_ascii_case(wanted))
            .map(|candidate| Authority(*candidate))
            .ok_or_else(|| FootflowError::UnknownAuthority {
                name: name.to_string(),
            })
    }

    /// All authorities in display order
    pub fn all() -> impl Iterator<Item = Authority> {
        AUTHORITIES.iter().map(|name| Authority(*name))
    }

    pub fn name(&self) -> &'static str {
        self.0
    }

    /// Directory name under the data root
    pub fn dir_name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<Authority> for String {
    fn from(authority: Authority) -> Self {
        authority.0.to_string()
    }
}

impl TryFrom<String> for Authority {
    type Error = FootflowError;

    fn try_from(value: String) -> Result<Self> {
        Authority::new(&value)
    }
}
