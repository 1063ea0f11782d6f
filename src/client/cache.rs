use uuid::Uuid;

use crate::client::chart::{CandlePoint, LineSeries};
use crate::models::Review;
use crate::services::trading_calendar::TradingCalendar;

/// In-memory mirror of the server's record set, plus the chart-ready shape of
/// the same rows. Weekend dates are dropped on ingest and the remainder kept
/// sorted ascending by date, which is the order the chart consumes.
#[derive(Debug, Default)]
pub struct ReviewCache {
    records: Vec<Review>,
    chart: Vec<CandlePoint>,
    selected: Option<Uuid>,
}

impl ReviewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Review] {
        &self.records
    }

    pub fn chart(&self) -> &[CandlePoint] {
        &self.chart
    }

    pub fn line_series(&self) -> LineSeries {
        LineSeries::from_reviews(&self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Wholesale rebuild from a fresh fetch. Clears any selection, since the
    /// selected row may no longer exist.
    pub fn rebuild(&mut self, rows: Vec<Review>, calendar: &TradingCalendar) {
        self.records = rows
            .into_iter()
            .filter(|r| !calendar.is_weekend(r.date))
            .collect();
        self.records.sort_by_key(|r| r.date);
        self.selected = None;
        self.rebuild_chart();
    }

    /// Incremental add after a successful create, keeping date order.
    pub fn append(&mut self, review: Review, calendar: &TradingCalendar) {
        if calendar.is_weekend(review.date) {
            return;
        }
        let position = self
            .records
            .partition_point(|r| r.date < review.date);
        self.records.insert(position, review);
        self.rebuild_chart();
    }

    pub fn select(&mut self, id: Uuid) -> Option<&Review> {
        let review = self.records.iter().find(|r| r.id == id)?;
        self.selected = Some(id);
        Some(review)
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn rebuild_chart(&mut self) {
        self.chart = self.records.iter().map(CandlePoint::from).collect();
    }
}
