use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Review;

/// One candlestick: the `{x, y: [open, high, low, close]}` shape the charting
/// library consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlePoint {
    pub x: NaiveDate,
    pub y: [f64; 4],
}

impl From<&Review> for CandlePoint {
    fn from(review: &Review) -> Self {
        Self {
            x: review.date,
            y: [review.open, review.high, review.low, review.close],
        }
    }
}

/// Line-chart shape: one label axis plus four parallel price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub labels: Vec<NaiveDate>,
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
}

impl LineSeries {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        Self {
            labels: reviews.iter().map(|r| r.date).collect(),
            open: reviews.iter().map(|r| r.open).collect(),
            high: reviews.iter().map(|r| r.high).collect(),
            low: reviews.iter().map(|r| r.low).collect(),
            close: reviews.iter().map(|r| r.close).collect(),
        }
    }
}
