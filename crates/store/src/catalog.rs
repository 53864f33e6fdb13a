//! The read-only product catalog.
//!
//! Loaded once at startup from a JSON file and treated as immutable for the
//! process lifetime. A load failure is non-fatal: callers fall back to
//! [`Catalog::empty`] and surface a warning.

use std::collections::HashMap;
use std::path::Path;

use greenbasket_core::Product;
use thiserror::Error;

/// Catalog loading and lookup errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backing file could not be read.
    #[error("IO error: {0}")]
    Io(String),
    /// The backing file is not a valid product list.
    #[error("parse error: {0}")]
    Parse(String),
    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(String),
    /// No product with the requested id.
    #[error("product not found: {0}")]
    NotFound(String),
}

/// The read-only set of purchasable products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Load the catalog from a JSON file holding an array of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file is unreachable,
    /// [`CatalogError::Parse`] if it is malformed, and
    /// [`CatalogError::DuplicateId`] if two products share an id.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let catalog = Self::from_products(products)?;
        tracing::info!(products = catalog.len(), path = %path.display(), "catalog loaded");
        Ok(catalog)
    }

    /// Build a catalog from an in-memory product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(products.len());
        for (index, product) in products.iter().enumerate() {
            if by_id.insert(product.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products, by_id })
    }

    /// An empty catalog, the fallback when loading fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a product by id.
    #[must_use]
    pub fn lookup(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).and_then(|&i| self.products.get(i))
    }

    /// Look up a product by id, failing with [`CatalogError::NotFound`] on
    /// a miss.
    pub fn get(&self, id: &str) -> Result<&Product, CatalogError> {
        self.lookup(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Case-insensitive name search.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Product> {
        let needle = query.to_lowercase();
        self.products
            .iter()
            .filter(move |p| p.name.to_lowercase().contains(&needle))
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price: Decimal::from(10),
            calories: 100,
            nutrients: greenbasket_core::Nutrients::default(),
            allergens: std::collections::BTreeSet::new(),
            ingredients: Vec::new(),
            image: String::new(),
        }
    }

    #[test]
    fn test_lookup_hit_and_miss() {
        let catalog =
            Catalog::from_products(vec![product("a-1", "Apple"), product("b-1", "Banana")])
                .unwrap();

        assert_eq!(catalog.lookup("a-1").map(|p| p.name.as_str()), Some("Apple"));
        assert!(catalog.lookup("missing").is_none());
        assert!(matches!(
            catalog.get("missing"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let result = Catalog::from_products(vec![product("a-1", "Apple"), product("a-1", "Alt")]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "a-1"));
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = Catalog::from_products(vec![
            product("a-1", "Shrimp Chips"),
            product("b-1", "Chocolate Milk"),
        ])
        .unwrap();

        let hits: Vec<_> = catalog.search("CHIP").map(|p| p.id.as_str()).collect();
        assert_eq!(hits, vec!["a-1"]);
    }

    #[test]
    fn test_load_missing_file_is_an_io_error() {
        let result = Catalog::load(Path::new("/nonexistent/catalog.json"));
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }

    #[test]
    fn test_load_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = Catalog::load(&path);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_empty_fallback() {
        let catalog = Catalog::empty();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
