//! Library form of the review page: the state the browser page kept in
//! module-level globals lives in [`controller::PageController`], fed by an
//! injectable [`api::ReviewApi`] backend.

pub mod api;
pub mod cache;
pub mod chart;
pub mod controller;

pub use api::{ClientError, HttpReviewApi, ReviewApi};
pub use cache::ReviewCache;
pub use chart::{CandlePoint, LineSeries};
pub use controller::{PageController, SubmitOutcome};
