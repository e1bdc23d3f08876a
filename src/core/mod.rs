pub mod aggregator;
pub mod cell_edit;
pub mod log;
pub mod month_key;
pub mod repository;
pub mod tracker;
