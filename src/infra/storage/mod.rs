pub mod memory;
pub mod schema;
pub mod sqlite;
