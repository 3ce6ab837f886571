//! Catalog
//!
//! Read-only product snapshots the cart is filled from. The catalog owns stock figures for
//! display and quantity selection only; the cart never consults them.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use thiserror::Error;

use crate::cart::{CartItem, ProductId};

const MAX_NAME_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 1000;
const PLACEHOLDER_IMAGE: &str = "/placeholder.jpg";

/// Product categories offered by the storefront.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum Category {
    /// Apparel.
    Clothing,

    /// Devices and gadgets.
    Electronics,

    /// Bags, jewellery and the like.
    Accessories,

    /// Homeware.
    Home,

    /// Anything else.
    Other,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::Clothing => "Clothing",
            Self::Electronics => "Electronics",
            Self::Accessories => "Accessories",
            Self::Home => "Home",
            Self::Other => "Other",
        };

        f.write_str(name)
    }
}

impl Category {
    const ALL: [Self; 5] = [
        Self::Clothing,
        Self::Electronics,
        Self::Accessories,
        Self::Home,
        Self::Other,
    ];
}

/// A category name that matches no [`Category`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();

        Self::ALL
            .into_iter()
            .find(|category| category.to_string().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownCategory(name.to_string()))
    }
}

/// Product validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// Name was blank.
    #[error("product name is required")]
    MissingName,

    /// Name exceeded the maximum length.
    #[error("product name cannot exceed {MAX_NAME_LENGTH} characters")]
    NameTooLong,

    /// Description was blank.
    #[error("product description is required")]
    MissingDescription,

    /// Description exceeded the maximum length.
    #[error("description cannot exceed {MAX_DESCRIPTION_LENGTH} characters")]
    DescriptionTooLong,

    /// Price was below zero.
    #[error("price cannot be negative")]
    NegativePrice,
}

/// A catalog product.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Product {
    /// Product identity.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Long description.
    pub description: String,

    /// Unit price.
    pub price: Decimal,

    /// Image reference.
    #[serde(default = "placeholder_image")]
    pub image: String,

    /// Category.
    pub category: Category,

    /// Units currently available.
    #[serde(default)]
    pub stock: u32,
}

fn placeholder_image() -> String {
    PLACEHOLDER_IMAGE.to_string()
}

impl Product {
    /// Checks the product's fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`ProductError`] found.
    pub fn validate(&self) -> Result<(), ProductError> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err(ProductError::MissingName);
        }

        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(ProductError::NameTooLong);
        }

        if self.description.trim().is_empty() {
            return Err(ProductError::MissingDescription);
        }

        if self.description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ProductError::DescriptionTooLong);
        }

        if self.price < Decimal::ZERO {
            return Err(ProductError::NegativePrice);
        }

        Ok(())
    }

    /// Whether any units are available.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Bounds a requested quantity selection to `1..=stock`.
    ///
    /// Returns `None` when the product is out of stock.
    pub fn clamp_quantity(&self, requested: u32) -> Option<u32> {
        self.is_in_stock().then(|| requested.clamp(1, self.stock))
    }

    /// Snapshots the product as a cart line.
    pub fn cart_item(&self, quantity: u32) -> CartItem {
        CartItem {
            product_id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            quantity,
            image: self.image.clone(),
        }
    }
}

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file.
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse catalog YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateProduct(ProductId),

    /// A product failed validation.
    #[error("invalid product {id}: {source}")]
    InvalidProduct {
        /// Offending product.
        id: ProductId,

        /// Validation failure.
        #[source]
        source: ProductError,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<Product>,
}

/// Products indexed by id, iterated in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog from products, validating each one.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] for invalid or duplicate products.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for product in products {
            product
                .validate()
                .map_err(|source| CatalogError::InvalidProduct {
                    id: product.id.clone(),
                    source,
                })?;

            if catalog.index.contains_key(&product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }

            catalog
                .index
                .insert(product.id.clone(), catalog.products.len());
            catalog.products.push(product);
        }

        Ok(catalog)
    }

    /// Parses a catalog from YAML of the form `products: [...]`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the YAML is malformed or a product is invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_norway::from_str(yaml)?;

        Self::new(file.products)
    }

    /// Loads a catalog YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index
            .get(id)
            .and_then(|position| self.products.get(*position))
    }

    /// Iterates over products in file order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Iterates over the products of one category.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |product| product.category == category)
    }

    /// Get the number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
