use std::sync::Arc;

use common::config;
use healthdb::Databases;
use tracing::info;
use tracing::warn;

use crate::context::FileContext;
use crate::dispatch::Dispatcher;
use crate::dispatch::Env;
use crate::dispatch::IngestStats;
use crate::error::IngesterError;
use crate::error::Result;
use crate::record::FitFile;

/// Ingests decoded files into the stores, one session per file.
pub struct Ingester {
    dbs: Arc<Databases>,
    dispatcher: Dispatcher,
    preserve_fields: Vec<String>,
}

impl Ingester {
    pub fn new(dbs: Arc<Databases>, cfg: &config::Ingest) -> Self {
        Self::with_dispatcher(dbs, cfg, Dispatcher::default())
    }

    pub fn with_dispatcher(dbs: Arc<Databases>, cfg: &config::Ingest, dispatcher: Dispatcher) -> Self {
        Self {
            dbs,
            dispatcher,
            preserve_fields: cfg.preserve_fields.clone(),
        }
    }

    pub fn databases(&self) -> &Databases {
        &self.dbs
    }

    /// All of a file's writes are committed together. On error nothing of the
    /// file is kept.
    pub fn ingest_file(&self, file: &dyn FitFile) -> Result<IngestStats> {
        self.ingest(file).map_err(|err| IngesterError::File {
            path: file.path().to_path_buf(),
            source: Box::new(err),
        })
    }

    fn ingest(&self, file: &dyn FitFile) -> Result<IngestStats> {
        let record_types = file.record_types();
        info!(
            "importing {} ({:?}) [{:?}] with record types: {:?}",
            file.path().display(),
            file.time_created(),
            file.file_type(),
            record_types.iter().map(|t| t.name()).collect::<Vec<_>>()
        );

        let mut ctx = FileContext::new(file.path());
        let session = self.dbs.session();
        let env = Env {
            store: &session,
            file,
            preserve_fields: &self.preserve_fields,
        };
        let stats = match self.dispatcher.dispatch(&env, &mut ctx, file) {
            Ok(stats) => stats,
            Err(err) => {
                warn!("{}: rolling back: {}", ctx.file_name, err);
                session.rollback()?;
                return Err(err);
            }
        };
        session.commit()?;

        info!(
            "{}: {} records, {} skipped, {} unhandled",
            ctx.file_name, stats.records, stats.skipped, stats.unhandled
        );

        Ok(stats)
    }
}
