pub mod batch;
pub mod context;
pub mod conversions;
pub mod device;
pub mod dispatch;
pub mod error;
pub mod extra_data;
pub mod handlers;
pub mod pipeline;
pub mod projector;
pub mod record;
pub mod resolver;

pub use batch::ingest_paths;
pub use batch::BatchReport;
pub use context::FileContext;
pub use dispatch::Dispatcher;
pub use dispatch::IngestStats;
pub use error::IngesterError;
pub use error::Result;
pub use pipeline::Ingester;
pub use record::DecodedFile;
pub use record::FitFile;
pub use record::Record;
pub use record::RecordType;
