//! Simulated supplier feed.
//!
//! A fetch waits for an artificial delay, synthesizes a batch of products
//! from fixed vocabularies, appends them to the collection in one write and
//! reports back on a channel. No network I/O happens.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde_json::Map;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};
use wardrobe_core::{Price, ProductId, Timestamp};

use super::auth::Session;
use crate::error::InventoryError;
use crate::models::Product;
use crate::store::{ProductStore, StoreError};

/// Base product names.
pub const PRODUCT_NAMES: [&str; 15] = [
    "Áo thun nam basic",
    "Áo sơ mi nữ công sở",
    "Quần jean nam slim fit",
    "Váy midi hoa nhí",
    "Áo khoác bomber",
    "Quần short thể thao",
    "Đầm maxi bohemian",
    "Áo polo nam",
    "Chân váy chữ A",
    "Áo hoodie unisex",
    "Quần tây nữ",
    "Áo croptop nữ",
    "Quần jogger nam",
    "Váy suông tay dài",
    "Áo blazer nữ",
];

/// Categories a generated product may start out with.
pub const CATEGORIES: [&str; 5] = ["Áo", "Quần", "Váy", "Phụ kiện", "Đồ thể thao"];

/// Colours appended to the name.
pub const COLORS: [&str; 8] = ["Đen", "Trắng", "Xanh", "Đỏ", "Vàng", "Hồng", "Xám", "Nâu"];

/// Brands appended to the name.
pub const BRANDS: [&str; 7] = [
    "Nike",
    "Adidas",
    "Zara",
    "H&M",
    "Uniqlo",
    "Local Brand",
    "Fashion House",
];

/// Description stems.
pub const DESCRIPTIONS: [&str; 8] = [
    "Chất liệu cotton cao cấp, thoáng mát",
    "Thiết kế hiện đại, phù hợp nhiều dáng người",
    "Form dáng chuẩn, dễ phối đồ",
    "Màu sắc trẻ trung, năng động",
    "Chất lượng tốt, giá cả hợp lý",
    "Xu hướng thời trang mới nhất",
    "Phong cách Hàn Quốc",
    "Thiết kế tối giản, thanh lịch",
];

/// Value of `source` on generated products.
pub const SOURCE: &str = "API_Generated";

/// Name keywords that force a category, checked in order.
const CATEGORY_RULES: [(&[&str], &str); 4] = [
    (&["áo"], "Áo"),
    (&["quần"], "Quần"),
    (&["váy", "đầm"], "Váy"),
    (&["short", "jogger"], "Đồ thể thao"),
];

/// What a completed fetch produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchReport {
    /// The appended records, in the order they were written.
    pub generated: Vec<Product>,
    /// Collection size after the write.
    pub total: usize,
}

/// Message delivered on the completion channel.
pub type FetchOutcome = Result<FetchReport, InventoryError>;

/// Category implied by a base product name, if any.
///
/// The first matching rule wins; matching ignores case.
#[must_use]
pub fn category_for(base_name: &str) -> Option<&'static str> {
    let lower = base_name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, category)| *category)
}

/// Synthesize `count` products attributed to `actor`.
pub fn generate<R: Rng>(count: usize, actor: &str, rng: &mut R) -> Vec<Product> {
    (0..count).map(|_| generate_one(actor, rng)).collect()
}

fn generate_one<R: Rng>(actor: &str, rng: &mut R) -> Product {
    let base = pick(&PRODUCT_NAMES, rng);
    let color = pick(&COLORS, rng);
    let brand = pick(&BRANDS, rng);
    let category = category_for(base).unwrap_or_else(|| pick(&CATEGORIES, rng));
    let price = Price::new(f64::from(rng.random_range(89_000..=899_000_u32))).unwrap_or_default();
    let quantity = rng.random_range(5..=50_u32);
    let description = format!("{}. Size: S, M, L, XL", pick(&DESCRIPTIONS, rng));
    let sku = format!("API-{}", rng.random_range(10_000..=99_999_u32));

    Product {
        id: ProductId::generate(),
        name: format!("{base} {color} - {brand}"),
        category: category.to_string(),
        price,
        quantity,
        description,
        created_at: Timestamp::now(),
        created_by: actor.to_string(),
        updated_at: None,
        updated_by: None,
        source: Some(SOURCE.to_string()),
        brand: Some(brand.to_string()),
        color: Some(color.to_string()),
        sku: Some(sku),
        extra: Map::new(),
    }
}

fn pick<R: Rng>(items: &[&'static str], rng: &mut R) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

/// Launches supplier fetches on the tokio runtime.
///
/// Results come back through the receiver returned by [`BulkFetcher::new`].
#[derive(Debug, Clone)]
pub struct BulkFetcher {
    products: Arc<ProductStore>,
    delay: Duration,
    sender: UnboundedSender<FetchOutcome>,
}

impl BulkFetcher {
    /// Create a fetcher and the receiving end of its completion channel.
    #[must_use]
    pub fn new(
        products: Arc<ProductStore>,
        delay: Duration,
    ) -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (sender, receiver) = unbounded_channel();
        (
            Self {
                products,
                delay,
                sender,
            },
            receiver,
        )
    }

    /// Start a fetch of `count` products in the background.
    ///
    /// Returns once the task is spawned. The outcome arrives on the
    /// completion channel; if nobody is listening by then it is logged and
    /// dropped, but the write still happens.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Permission` for non-admins. Nothing is
    /// spawned in that case.
    pub fn spawn(&self, session: &Session, count: usize) -> Result<JoinHandle<()>, InventoryError> {
        session.require_admin("generate products")?;

        let products = Arc::clone(&self.products);
        let delay = self.delay;
        let sender = self.sender.clone();
        let actor = session.username().to_string();

        info!(count, user = %actor, "Spawning supplier fetch");
        Ok(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let outcome = fetch(products, count, actor).await;
            match &outcome {
                Ok(report) => {
                    info!(
                        generated = report.generated.len(),
                        total = report.total,
                        "Supplier fetch stored"
                    );
                }
                Err(e) => error!(error = %e, "Supplier fetch failed"),
            }
            if sender.send(outcome).is_err() {
                warn!("Supplier fetch finished with no listener");
            }
        }))
    }
}

/// Generate and append on a blocking worker.
#[instrument(skip_all, fields(count = count))]
async fn fetch(products: Arc<ProductStore>, count: usize, actor: String) -> FetchOutcome {
    let worker = tokio::task::spawn_blocking(move || -> FetchOutcome {
        let generated = generate(count, &actor, &mut rand::rng());
        let total = products.insert_many(generated.clone())?;
        Ok(FetchReport { generated, total })
    });
    match worker.await {
        Ok(outcome) => outcome,
        Err(e) => Err(StoreError::Worker(e.to_string()).into()),
    }
}
