pub mod edit_ledger;
pub mod position;
pub mod record_store;
pub mod review_service;
