pub mod flatten;
pub mod open_data;

pub use open_data::{HttpConfig, OpenDataClient};
