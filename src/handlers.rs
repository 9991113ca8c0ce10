pub mod dashboard;
pub mod dataset;
pub mod filters;
pub mod health;
