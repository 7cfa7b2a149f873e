pub mod edit;
pub mod geo;
pub mod record;
