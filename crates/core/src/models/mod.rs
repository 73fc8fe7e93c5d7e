pub mod chart;
pub mod company;
pub mod fx;
pub mod price;
pub mod settings;
pub mod valuation;
