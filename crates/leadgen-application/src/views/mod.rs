//! Screen controllers.
//!
//! Each controller owns the state one screen renders and follows the same
//! pattern:
//!
//! - `load()` fetches the list and replaces it wholesale; the list loading
//!   flag is separate from the per-action busy flag
//! - actions validate input locally, clear the banners, call the API, and
//!   on success show a success banner and fetch the list again
//! - a 401 never produces a banner; the session store handles it
//! - after `unmount()` every late response is dropped

mod brands;
mod dashboard;
mod qa;
mod scope;
mod sellers;

pub use brands::{BrandsController, BrandsView};
pub use dashboard::{DashboardController, DashboardStats, DashboardView};
pub use qa::{QaController, QaView};
pub use scope::{Banners, ListState};
pub use sellers::{SellersController, SellersView};

/// User-visible messages.
pub mod messages {
    pub const FETCH_SELLERS_FAILED: &str = "Failed to fetch sellers";
    pub const INVALID_URL: &str = "Please enter a valid URL";
    pub const SELLER_SCRAPED: &str = "Seller scraped successfully!";
    pub const SCRAPE_FAILED: &str = "Failed to scrape seller";
    pub const SELLER_DELETED: &str = "Seller deleted successfully!";
    pub const DELETE_FAILED: &str = "Failed to delete seller";
    pub const MISSING_SELLER_CHANGES: &str = "Please enter at least one field to update";
    pub const SELLER_UPDATED: &str = "Seller updated successfully!";
    pub const UPDATE_FAILED: &str = "Failed to update seller";

    pub const FETCH_BRANDS_FAILED: &str = "Failed to fetch brands";
    pub const MISSING_BRAND_NAME: &str = "Please enter a brand name";
    pub const BRAND_RESEARCHED: &str = "Brand researched successfully!";
    pub const RESEARCH_FAILED: &str = "Failed to research brand";

    pub const MISSING_BRAND_SELECTION: &str = "Please select a brand";
    pub const ANALYZE_FAILED: &str = "Failed to analyze brand";

    pub const FETCH_STATS_FAILED: &str = "Failed to fetch stats";
}
