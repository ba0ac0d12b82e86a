pub mod balance_service;
pub mod price_service;
pub mod snapshot_service;
