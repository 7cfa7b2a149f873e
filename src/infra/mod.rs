pub mod geocode;
pub mod map;
pub mod storage;
pub mod xlsx;
