pub mod config;
pub mod error;
pub mod value;

pub use value::Fields;
pub use value::Value;
