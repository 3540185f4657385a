use std::path::Path;
use std::path::PathBuf;

use tracing::error;

use crate::dispatch::IngestStats;
use crate::error::Result;
use crate::pipeline::Ingester;
use crate::record::FitFile;

#[derive(Debug, Default)]
pub struct BatchReport {
    pub ingested: Vec<(PathBuf, IngestStats)>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Loads and ingests `paths` one after another. A file that fails to load or
/// ingest is logged and left out, the rest of the batch goes on.
pub fn ingest_paths<F, L, P>(
    ingester: &Ingester,
    paths: &[PathBuf],
    load: L,
    mut progress: P,
) -> BatchReport
where
    F: FitFile,
    L: Fn(&Path) -> Result<F>,
    P: FnMut(&Path),
{
    let mut report = BatchReport::default();
    for path in paths {
        let res = load(path).and_then(|file| ingester.ingest_file(&file));
        match res {
            Ok(stats) => report.ingested.push((path.to_owned(), stats)),
            Err(err) => {
                error!("failed to import {}: {}", path.display(), err);
                report.failed.push((path.to_owned(), err.to_string()));
            }
        }
        progress(path);
    }

    report
}
