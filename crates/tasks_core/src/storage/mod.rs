pub mod csv_codec;
pub mod csv_store;
pub mod lock;

pub use csv_store::{TaskStore, next_id};
