pub mod attributes;
pub mod error;
pub mod files;
pub mod memory;
pub mod merge;
pub mod path_helpers;
pub mod session;
pub mod store;
pub mod table;
pub mod tables;

pub use error::Result;
pub use files::file_id_from_path;
pub use files::file_name_from_path;
pub use session::Databases;
pub use session::Session;
pub use store::Store;
pub use table::NaturalKey;
pub use table::StoreKind;
pub use table::Table;
