pub mod alignment;
pub mod chart_service;
pub mod fx_service;
pub mod valuation_service;
