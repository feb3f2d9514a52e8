mod task;

pub use task::{Task, ZERO_TIMESTAMP};
