use crate::catalog::{CatalogError, Product, ReleaseCatalog, ReleaseRecord};
use crate::version::Version;
use log::debug;

/// Parses a marketing version (`major.minor` or `major.minor.build`).
///
/// Anything else, including full build versions, yields `None`.
pub fn parse_marketing_version(input: &str) -> Option<Version> {
    if input.trim().is_empty() {
        return None;
    }

    input
        .parse::<Version>()
        .ok()
        .filter(|version| version.is_two_part() || version.is_three_part())
}

fn parse_product_year(input: &str) -> Option<Product> {
    let year = input.parse::<i32>().ok()?;
    match Product::from_year(year) {
        Product::Unknown => None,
        product => Some(product),
    }
}

/// Resolves user supplied version tokens against a release catalog.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    catalog: ReleaseCatalog,
}

impl VersionResolver {
    pub fn new(catalog: ReleaseCatalog) -> Self {
        VersionResolver { catalog }
    }

    /// A resolver over the catalog compiled into the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Ok(Self::new(ReleaseCatalog::bundled()?))
    }

    pub fn catalog(&self) -> &ReleaseCatalog {
        &self.catalog
    }

    /// Resolves a product year (`2022`), a `major.minor` version (`17.0`) or
    /// an exact `major.minor.build` version (`17.0.1`) to a release.
    ///
    /// Years and 2-part versions pick the release with the highest build
    /// version. 3-part versions must match a marketing version exactly.
    pub fn resolve<'t>(&self, token: impl Into<Option<&'t str>>) -> Option<&ReleaseRecord> {
        let token = token.into()?;

        let resolved = if let Some(version) = parse_marketing_version(token) {
            self.latest_matching_version(&version)
        } else if let Some(product) = parse_product_year(token) {
            self.latest_of_product(product)
        } else {
            None
        };

        match resolved {
            Some(record) => debug!("Resolved '{}' to {} ({})", token, record, record.build_version),
            None => debug!("Could not resolve '{}'", token),
        }
        resolved
    }

    pub fn latest_of_product(&self, product: Product) -> Option<&ReleaseRecord> {
        latest(self.catalog.iter().filter(|record| record.product == product))
    }

    fn latest_matching_version(&self, version: &Version) -> Option<&ReleaseRecord> {
        if version.is_three_part() {
            return self.catalog.iter().find(|record| record.version == *version);
        }

        latest(self.catalog.iter().filter(|record| record.version.has_same_major_minor(version)))
    }
}

/// The record with the highest build version. On a tie the one listed first
/// wins, the same as for exact 3-part matches.
fn latest<'c>(records: impl Iterator<Item = &'c ReleaseRecord>) -> Option<&'c ReleaseRecord> {
    records.reduce(|best, record| if record.build_version > best.build_version { record } else { best })
}
