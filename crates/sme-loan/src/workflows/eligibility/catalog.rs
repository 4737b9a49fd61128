use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{info, warn};

use super::domain::Product;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read product catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid product catalog data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered, read-only set of loan products. Built once at startup and shared
/// with the engine; there is no mutation path after construction.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_reader(reader)?;
        Ok(Self { products })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads the catalog, falling back to an empty one when the file is
    /// missing or malformed. The matcher then never recommends a product.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(catalog) => {
                info!(path = %path.display(), products = catalog.len(), "product catalog loaded");
                catalog
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "product catalog unavailable, continuing with no products");
                Self::empty()
            }
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
