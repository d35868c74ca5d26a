//! Value layer shared by the expression engine.
//!
//! - **Value**: Type-safe representation of column values
//! - **DataType**: Supported data types and their SQL spellings

pub mod value;

pub use value::{parse_hex, DataType, Value};
