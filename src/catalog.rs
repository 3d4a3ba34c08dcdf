use crate::version::Version;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use thiserror::Error;

const BUNDLED_CATALOG: &str = include_str!("../data/versions.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read version catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("The version catalog did not contain valid json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Product {
    #[default]
    Unknown,
    VisualStudio2017,
    VisualStudio2019,
    VisualStudio2022,
}

impl Product {
    /// The newest product line the bundled catalog knows about.
    pub const LATEST: Product = Product::VisualStudio2022;

    pub fn from_year(year: i32) -> Self {
        match year {
            2017 => Product::VisualStudio2017,
            2019 => Product::VisualStudio2019,
            2022 => Product::VisualStudio2022,
            _ => Product::Unknown,
        }
    }

    pub fn year(&self) -> Option<i32> {
        match self {
            Product::Unknown => None,
            Product::VisualStudio2017 => Some(2017),
            Product::VisualStudio2019 => Some(2019),
            Product::VisualStudio2022 => Some(2022),
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year() {
            Some(year) => write!(f, "Visual Studio {year}"),
            None => f.write_str("Unknown"),
        }
    }
}

/// One known release: the marketing version users type and the build version
/// written into solution files.
///
/// Two records are the same release when their build versions match. Product,
/// channel and preview flag do not take part in `PartialEq` or `Hash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseRecord {
    pub product: Product,
    pub version: Version,
    pub build_version: Version,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub is_preview: bool,
}

impl ReleaseRecord {
    pub fn new(product: Product, version: Version, build_version: Version) -> Self {
        ReleaseRecord {
            product,
            version,
            build_version,
            channel: String::new(),
            is_preview: false,
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>, is_preview: bool) -> Self {
        self.channel = channel.into();
        self.is_preview = is_preview;
        self
    }
}

impl PartialEq for ReleaseRecord {
    fn eq(&self, other: &Self) -> bool {
        self.build_version == other.build_version
    }
}

impl Eq for ReleaseRecord {}

impl Hash for ReleaseRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.build_version.hash(state);
    }
}

impl fmt::Display for ReleaseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_preview {
            write!(f, "{} {}", self.product, self.version)?;
            if !self.channel.trim().is_empty() {
                write!(f, " {}", self.channel)?;
            }
            Ok(())
        } else {
            write!(f, "{} {}.{}", self.product, self.version.major, self.version.minor)
        }
    }
}

/// Immutable list of known releases.
#[derive(Debug, Clone, Default)]
pub struct ReleaseCatalog {
    records: Vec<ReleaseRecord>,
}

impl ReleaseCatalog {
    pub fn new(records: Vec<ReleaseRecord>) -> Self {
        ReleaseCatalog { records }
    }

    /// The catalog compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<ReleaseRecord> = serde_json::from_str(json)?;
        debug!("Loaded {} release records", records.len());
        Ok(ReleaseCatalog { records })
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!("Loading version catalog from '{}'", path.display());
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    pub fn records(&self) -> &[ReleaseRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReleaseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
