pub mod climate;
pub mod date_range;
pub mod db;
pub mod routes;
pub mod startup;
pub mod templates;
pub mod utils;

pub use climate::Climate;
pub use date_range::{DateRange, DateRangeError};
pub use db::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;
