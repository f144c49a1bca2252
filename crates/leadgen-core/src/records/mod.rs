//! Records returned by the list and analysis endpoints.

mod analysis;
mod brand;
mod query;
mod seller;

pub use analysis::{AnalysisResult, AnalysisStatus, QaMetrics};
pub use brand::Brand;
pub use query::ListQuery;
pub use seller::{Seller, SellerUpdate};
