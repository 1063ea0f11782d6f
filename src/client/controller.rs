use tracing::{info, warn};

use crate::client::api::{ClientError, ReviewApi};
use crate::client::cache::ReviewCache;
use crate::models::{Review, ReviewInput};
use crate::services::review_service::DEFAULT_LIMIT;
use crate::services::trading_calendar::TradingCalendar;

/// Result of a form submission.
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    Created(Review),
    /// Advisory client-side block; the server itself accepts weekend dates.
    WeekendRejected,
}

/// Owner of the page's state. Fetch, submit, and edit flows run sequentially
/// through `&mut self`, so at most one call is in flight at a time.
pub struct PageController<A: ReviewApi> {
    api: A,
    calendar: TradingCalendar,
    cache: ReviewCache,
}

impl<A: ReviewApi> PageController<A> {
    pub fn new(api: A, calendar: TradingCalendar) -> Self {
        Self {
            api,
            calendar,
            cache: ReviewCache::new(),
        }
    }

    pub fn cache(&self) -> &ReviewCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ReviewCache {
        &mut self.cache
    }

    /// Full refresh: walk every page of the list endpoint, then rebuild the
    /// cache wholesale.
    pub async fn load(&mut self) -> Result<(), ClientError> {
        let mut rows = Vec::new();
        let mut page = 1;
        loop {
            let batch = self.api.list_page(page, DEFAULT_LIMIT).await?;
            let total = batch.pagination.total;
            rows.extend(batch.data);
            if rows.len() as i64 >= total || batch.pagination.limit * page >= total {
                break;
            }
            page += 1;
        }
        info!("Loaded {} reviews from backend", rows.len());
        self.cache.rebuild(rows, &self.calendar);
        Ok(())
    }

    /// Create flow: weekend dates are blocked before any network call; a
    /// successful create is merged incrementally instead of refetching.
    pub async fn submit(&mut self, input: ReviewInput) -> Result<SubmitOutcome, ClientError> {
        if self.calendar.is_weekend(input.date) {
            warn!("Blocked submission for weekend date {}", input.date);
            return Ok(SubmitOutcome::WeekendRejected);
        }
        let created = self.api.create(&input).await?;
        self.cache.append(created.clone(), &self.calendar);
        Ok(SubmitOutcome::Created(created))
    }

    /// Replace the selected review, then refetch everything and drop the
    /// selection (no incremental patch for edits).
    pub async fn update_selected(&mut self, input: ReviewInput) -> Result<(), ClientError> {
        let id = self.cache.selected_id().ok_or(ClientError::NoSelection)?;
        self.api.update(id, &input).await?;
        self.load().await
    }

    /// Delete the selected review, then refetch everything.
    pub async fn delete_selected(&mut self) -> Result<(), ClientError> {
        let id = self.cache.selected_id().ok_or(ClientError::NoSelection)?;
        self.api.delete(id).await?;
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PageMeta, ReviewPage};
    use async_trait::async_trait;
    use chrono::{NaiveDate, Utc};
    use std::sync::Mutex;
    use uuid::Uuid;

    /// In-memory stand-in for the HTTP API, duplicate-date check included.
    #[derive(Default)]
    struct FakeApi {
        rows: Mutex<Vec<Review>>,
    }

    impl FakeApi {
        fn seeded(dates: &[&str]) -> Self {
            let rows = dates
                .iter()
                .map(|d| Review {
                    id: Uuid::new_v4(),
                    date: d.parse().unwrap(),
                    open: 10.0,
                    high: 12.0,
                    low: 9.0,
                    close: 11.0,
                    created_at: Utc::now(),
                })
                .collect();
            Self {
                rows: Mutex::new(rows),
            }
        }
    }

    #[async_trait]
    impl ReviewApi for FakeApi {
        async fn list_page(&self, page: i64, limit: i64) -> Result<ReviewPage, ClientError> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.sort_by_key(|r| std::cmp::Reverse(r.date));
            let total = rows.len() as i64;
            let offset = ((page - 1) * limit) as usize;
            let data = rows.into_iter().skip(offset).take(limit as usize).collect();
            Ok(ReviewPage {
                data,
                pagination: PageMeta { total, page, limit },
            })
        }

        async fn create(&self, input: &ReviewInput) -> Result<Review, ClientError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|r| r.date == input.date) {
                return Err(ClientError::Status {
                    status: 400,
                    message: format!("a review for {} already exists", input.date),
                });
            }
            let review = Review {
                id: Uuid::new_v4(),
                date: input.date,
                open: input.open,
                high: input.high,
                low: input.low,
                close: input.close,
                created_at: Utc::now(),
            };
            rows.push(review.clone());
            Ok(review)
        }

        async fn update(&self, id: Uuid, input: &ReviewInput) -> Result<Review, ClientError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.iter_mut().find(|r| r.id == id).ok_or(
                ClientError::Status {
                    status: 404,
                    message: "review not found".into(),
                },
            )?;
            row.date = input.date;
            row.open = input.open;
            row.high = input.high;
            row.low = input.low;
            row.close = input.close;
            Ok(row.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            if rows.len() == before {
                return Err(ClientError::Status {
                    status: 404,
                    message: "review not found".into(),
                });
            }
            Ok(())
        }
    }

    fn input(date: &str, close: f64) -> ReviewInput {
        ReviewInput {
            date: date.parse().unwrap(),
            open: 10.0,
            high: 12.0,
            low: 9.0,
            close,
        }
    }

    #[tokio::test]
    async fn load_filters_weekends_and_sorts() {
        let api = FakeApi::seeded(&["2024-01-08", "2024-01-06", "2024-01-02"]);
        let mut controller = PageController::new(api, TradingCalendar::new(0));

        controller.load().await.unwrap();

        let dates: Vec<NaiveDate> =
            controller.cache().records().iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![
                "2024-01-02".parse().unwrap(),
                "2024-01-08".parse().unwrap(),
            ]
        );
    }

    #[tokio::test]
    async fn submit_appends_without_refetch() {
        let api = FakeApi::seeded(&["2024-01-02"]);
        let mut controller = PageController::new(api, TradingCalendar::new(0));
        controller.load().await.unwrap();

        let outcome = controller.submit(input("2024-01-03", 13.0)).await.unwrap();

        match outcome {
            SubmitOutcome::Created(review) => assert_eq!(review.close, 13.0),
            other => panic!("expected Created, got {:?}", other),
        }
        assert_eq!(controller.cache().len(), 2);
        assert_eq!(controller.cache().chart().len(), 2);
    }

    #[tokio::test]
    async fn submit_blocks_weekend_dates_before_any_call() {
        let api = FakeApi::default();
        let mut controller = PageController::new(api, TradingCalendar::new(0));

        // 2024-01-06 is a Saturday.
        let outcome = controller.submit(input("2024-01-06", 11.0)).await.unwrap();

        assert_eq!(outcome, SubmitOutcome::WeekendRejected);
        assert!(controller.cache().is_empty());
    }

    #[tokio::test]
    async fn duplicate_date_surfaces_as_status_error() {
        let api = FakeApi::seeded(&["2024-01-02"]);
        let mut controller = PageController::new(api, TradingCalendar::new(0));
        controller.load().await.unwrap();

        let err = controller
            .submit(input("2024-01-02", 11.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 400, .. }));
        assert_eq!(controller.cache().len(), 1);
    }

    #[tokio::test]
    async fn update_selected_refetches_and_clears_selection() {
        let api = FakeApi::seeded(&["2024-01-02", "2024-01-03"]);
        let mut controller = PageController::new(api, TradingCalendar::new(0));
        controller.load().await.unwrap();

        let id = controller.cache().records()[0].id;
        controller.cache_mut().select(id);

        controller
            .update_selected(input("2024-01-02", 42.0))
            .await
            .unwrap();

        assert_eq!(controller.cache().selected_id(), None);
        assert_eq!(controller.cache().records()[0].close, 42.0);
    }

    #[tokio::test]
    async fn delete_selected_refetches() {
        let api = FakeApi::seeded(&["2024-01-02", "2024-01-03"]);
        let mut controller = PageController::new(api, TradingCalendar::new(0));
        controller.load().await.unwrap();

        let id = controller.cache().records()[0].id;
        controller.cache_mut().select(id);

        controller.delete_selected().await.unwrap();

        assert_eq!(controller.cache().len(), 1);
        assert_eq!(controller.cache().selected_id(), None);
    }

    #[tokio::test]
    async fn edit_without_selection_is_rejected() {
        let api = FakeApi::default();
        let mut controller = PageController::new(api, TradingCalendar::new(0));

        let err = controller
            .update_selected(input("2024-01-02", 11.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NoSelection));

        let err = controller.delete_selected().await.unwrap_err();
        assert!(matches!(err, ClientError::NoSelection));
    }

    #[tokio::test]
    async fn load_walks_multiple_pages() {
        // 150 weekday rows, limit 100: two pages.
        let mut dates = Vec::new();
        let mut day = "2020-01-01".parse::<NaiveDate>().unwrap();
        while dates.len() < 150 {
            if !TradingCalendar::new(0).is_weekend(day) {
                dates.push(day.to_string());
            }
            day = day.succ_opt().unwrap();
        }
        let refs: Vec<&str> = dates.iter().map(|s| s.as_str()).collect();
        let api = FakeApi::seeded(&refs);
        let mut controller = PageController::new(api, TradingCalendar::new(0));

        controller.load().await.unwrap();

        assert_eq!(controller.cache().len(), 150);
    }
}
