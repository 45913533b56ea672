pub mod euclid;
pub mod field;
pub mod poly;

pub use field::{GfExp, GfTables, GfVec};
