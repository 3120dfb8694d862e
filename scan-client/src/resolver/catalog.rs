use super::{ClearPolicy, ProductResolver};
use crate::{ClientError, ClientResult, HttpClient};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared::Product;
use tracing::{info, instrument};

/// In-memory product list built from the spreadsheet CSV export
///
/// Column order is fixed and there is no header row:
///
/// ```text
/// barcode,price-integer,price-fraction,brand,name,weight
/// ```
///
/// There is no quoting, so a comma inside a field shifts every later column
/// of that row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse the CSV export; blank rows are skipped
    pub fn parse(text: &str) -> Self {
        let products = text
            .split('\n')
            .map(|row| row.trim_end_matches('\r'))
            .filter(|row| !row.trim().is_empty())
            .map(parse_row)
            .collect();
        Self { products }
    }

    /// Download and parse the export
    #[instrument(skip(http))]
    pub async fn fetch(http: &HttpClient, url: &str) -> ClientResult<Self> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| ClientError::Config(format!("{}: {}", url, e)))?;
        let text = http.get_text(url).await?;
        let catalog = Self::parse(&text);
        info!(products = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// First product whose barcode equals the trimmed input
    pub fn lookup(&self, barcode: &str) -> Option<&Product> {
        let barcode = barcode.trim();
        self.products.iter().find(|p| p.barcode.trim() == barcode)
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

fn parse_row(row: &str) -> Product {
    let columns: Vec<&str> = row.split(',').map(str::trim).collect();
    let column = |i: usize| columns.get(i).copied().unwrap_or_default();

    let retail_price = match column(2) {
        "" => column(1).to_string(),
        fraction => format!("{},{}", column(1), fraction),
    };
    let brand = column(3);

    Product {
        barcode: column(0).to_string(),
        product_name: column(4).to_string(),
        brand_name: (!brand.is_empty()).then(|| brand.to_string()),
        product_weight: column(5).to_string(),
        retail_price,
        image_url: None,
    }
}

/// Resolver over a [`Catalog`] fetched once per session
pub struct CatalogResolver {
    http: HttpClient,
    url: String,
    catalog: RwLock<Catalog>,
}

impl CatalogResolver {
    pub fn new(http: HttpClient, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            catalog: RwLock::new(Catalog::default()),
        }
    }

    /// Resolver over an already loaded catalog; `load` refetches from `url`
    pub fn with_catalog(http: HttpClient, url: impl Into<String>, catalog: Catalog) -> Self {
        Self {
            http,
            url: url.into(),
            catalog: RwLock::new(catalog),
        }
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog.read().len()
    }
}

#[async_trait]
impl ProductResolver for CatalogResolver {
    async fn load(&self) -> ClientResult<()> {
        let catalog = Catalog::fetch(&self.http, &self.url).await?;
        *self.catalog.write() = catalog;
        Ok(())
    }

    async fn resolve(&self, barcode: &str) -> ClientResult<Product> {
        let barcode = shared::barcode::normalize(barcode).ok_or(ClientError::EmptyInput)?;
        self.catalog
            .read()
            .lookup(barcode)
            .cloned()
            .ok_or(ClientError::NotFound)
    }

    fn clear_policy(&self) -> ClearPolicy {
        ClearPolicy::CATALOG
    }
}
