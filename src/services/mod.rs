pub mod review_service;
pub mod trading_calendar;
