//! Registry of the wikis this service mirrors.
//!
//! The set is fixed at compile time. Each [`WikiKey`] resolves to a
//! [`WikiDescriptor`] carrying the display name and the two URLs needed to
//! talk to the wiki and to link back to its pages.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Short identifier for a configured wiki.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
pub enum WikiKey {
    #[serde(rename = "sbor")]
    Sbor,
    #[serde(rename = "bloxfruits")]
    BloxFruits,
}

impl WikiKey {
    /// Every configured wiki, in the order ingestion and search visit them.
    pub const ALL: [WikiKey; 2] = [WikiKey::Sbor, WikiKey::BloxFruits];

    pub fn as_str(&self) -> &'static str {
        match self {
            WikiKey::Sbor => "sbor",
            WikiKey::BloxFruits => "bloxfruits",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WikiKey::Sbor => "Soul Blade Online Rebirth",
            WikiKey::BloxFruits => "Blox Fruits",
        }
    }

    fn base_url(&self) -> &'static str {
        match self {
            WikiKey::Sbor => "https://soul-blade-online-rebirth.fandom.com",
            WikiKey::BloxFruits => "https://blox-fruits.fandom.com",
        }
    }

    /// Static descriptor for this wiki.
    pub fn descriptor(&self) -> WikiDescriptor {
        let base_url = self.base_url();
        WikiDescriptor {
            key: *self,
            display_name: self.display_name().to_string(),
            base_url: base_url.to_string(),
            api_url: format!("{base_url}/api.php"),
        }
    }
}

impl fmt::Display for WikiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WikiKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        WikiKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| Error::UnknownWiki(needle.to_string()))
    }
}

/// Connection details for one wiki.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiDescriptor {
    pub key: WikiKey,
    pub display_name: String,
    /// Site root, without a trailing slash.
    pub base_url: String,
    /// MediaWiki `api.php` endpoint.
    pub api_url: String,
}

impl WikiDescriptor {
    /// Canonical article URL for a page title.
    ///
    /// Spaces become underscores; nothing else is rewritten.
    pub fn page_url(&self, title: &str) -> String {
        format!("{}/wiki/{}", self.base_url.trim_end_matches('/'), title.replace(' ', "_"))
    }
}
