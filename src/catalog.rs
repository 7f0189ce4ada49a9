//! Catalog

use std::{
    fmt::{self, Display, Formatter},
    fs,
    path::Path,
    sync::Arc,
};

use rust_decimal::Decimal;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::{self, AmountError, Reais};

const HOUSE_MENU: &str = include_str!("../fixtures/menu.yml");

/// Catalog loading errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading the catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A product does not price every size
    #[error("Product {product} has no price for size {size}")]
    MissingSize {
        /// Product id
        product: String,
        /// Size without a price
        size: SizeLabel,
    },

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(String),
}

/// Pizza size. Closed set, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeLabel {
    /// Small
    P,
    /// Medium
    M,
    /// Large
    G,
    /// Extra large
    GG,
    /// Family size
    #[serde(rename = "EX GG")]
    ExGG,
}

impl SizeLabel {
    /// Every size, smallest first.
    pub const ALL: [SizeLabel; 5] = [
        SizeLabel::P,
        SizeLabel::M,
        SizeLabel::G,
        SizeLabel::GG,
        SizeLabel::ExGG,
    ];

    /// Label as shown on the menu and in order messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SizeLabel::P => "P",
            SizeLabel::M => "M",
            SizeLabel::G => "G",
            SizeLabel::GG => "GG",
            SizeLabel::ExGG => "EX GG",
        }
    }

    /// Parses a menu label, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();

        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(label))
            .or_else(|| label.eq_ignore_ascii_case("EXGG").then_some(SizeLabel::ExGG))
    }
}

impl Display for SizeLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Price of a product in each size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizePrices {
    prices: [Reais; 5],
}

impl SizePrices {
    /// Creates a price table, smallest size first (`P`, `M`, `G`, `GG`, `EX GG`).
    #[must_use]
    pub const fn new(prices: [Reais; 5]) -> Self {
        Self { prices }
    }

    /// Price for the given size.
    #[must_use]
    pub fn get(&self, size: SizeLabel) -> Reais {
        match size {
            SizeLabel::P => self.prices[0],
            SizeLabel::M => self.prices[1],
            SizeLabel::G => self.prices[2],
            SizeLabel::GG => self.prices[3],
            SizeLabel::ExGG => self.prices[4],
        }
    }

    /// Iterate over `(size, price)` pairs, smallest first.
    pub fn iter(&self) -> impl Iterator<Item = (SizeLabel, Reais)> + '_ {
        SizeLabel::ALL.into_iter().zip(self.prices.iter().copied())
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Menu description
    pub description: String,

    /// Ingredients, as listed on the menu
    pub ingredients: Vec<String>,

    /// Price per size
    pub prices: SizePrices,
}

impl Product {
    /// Price of this product in the given size.
    #[must_use]
    pub fn price(&self, size: SizeLabel) -> Reais {
        self.prices.get(size)
    }
}

/// Fixed list of products on sale.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
}

impl Catalog {
    /// Creates a catalog from products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Result<Self, CatalogError> {
        let mut seen = FxHashSet::default();
        let mut catalog = Vec::new();

        for product in products {
            if !seen.insert(product.id.clone()) {
                return Err(CatalogError::DuplicateProduct(product.id.0));
            }

            catalog.push(Arc::new(product));
        }

        Ok(Self { products: catalog })
    }

    /// The menu that ships with the storefront.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded menu cannot be parsed.
    pub fn house_menu() -> Result<Self, CatalogError> {
        Self::from_yaml(HOUSE_MENU)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a product is incomplete.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Parse a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid or a product is incomplete.
    pub fn from_yaml(contents: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(contents)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(products)
    }

    /// Find a product by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<Product>> {
        self.products.iter().find(|product| product.id.as_str() == id)
    }

    /// Iterate over products in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.products.iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<ProductFixture>,
}

#[derive(Debug, Deserialize)]
struct ProductFixture {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    ingredients: Vec<String>,
    prices: FxHashMap<SizeLabel, String>,
}

impl TryFrom<ProductFixture> for Product {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let mut prices = [money::zero(); 5];

        for (slot, size) in prices.iter_mut().zip(SizeLabel::ALL) {
            let raw = fixture
                .prices
                .get(&size)
                .ok_or_else(|| CatalogError::MissingSize {
                    product: fixture.id.clone(),
                    size,
                })?;

            *slot = parse_price(raw)?;
        }

        Ok(Product {
            id: ProductId(fixture.id),
            name: fixture.name,
            description: fixture.description,
            ingredients: fixture.ingredients,
            prices: SizePrices::new(prices),
        })
    }
}

/// Parse price string (e.g., "38.00 BRL") into money.
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed, or if the currency is not BRL.
pub fn parse_price(s: &str) -> Result<Reais, CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    if *currency_code != "BRL" {
        return Err(CatalogError::UnknownCurrency((*currency_code).to_string()));
    }

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    money::from_decimal(amount)
        .map_err(|err: AmountError| CatalogError::InvalidPrice(err.to_string()))
}
