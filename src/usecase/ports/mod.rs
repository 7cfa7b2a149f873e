pub mod codec;
pub mod map;
pub mod storage;
