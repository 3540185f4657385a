use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use common::config::Config;
use common::Fields;
use healthdb::Databases;
use healthdb::Session;
use ingester::extra_data::import_file;
use ingester::extra_data::import_summary_file;
use ingester::extra_data::is_extra_data_file;
use ingester::extra_data::is_summary_file;
use tracing::debug;
use tracing::error;
use tracing::info;

use crate::command::progress_bar;
use crate::command::scan_files;
use crate::error::Error;
use crate::error::Result;

#[derive(Parser, Clone, Debug)]
pub struct ExtraData {
    /// Directory of `extra_data_YYYY-MM-DD.json` and
    /// `daily_summary_YYYY-MM-DD.json` files, defaults to `data.input_dir`
    #[arg(long)]
    pub input_dir: Option<PathBuf>,
}

fn import(session: &Session<'_>, path: &Path) -> ingester::Result<Option<Fields>> {
    let is_summary = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(is_summary_file);
    if is_summary {
        import_summary_file(session, path)
    } else {
        import_file(session, path).map(Some)
    }
}

/// Imports every extra data file and the extra data found in daily summary
/// descriptions, each file in its own session.
pub fn run(args: &ExtraData, cfg: &Config) -> Result<usize> {
    let dir = args.input_dir.as_ref().unwrap_or(&cfg.data.input_dir);
    let paths = scan_files(dir, |name| is_extra_data_file(name) || is_summary_file(name))?;
    info!("importing {} extra data files", paths.len());

    let dbs = Databases::open(&cfg.data.path)?;
    let pb = progress_bar(paths.len())?;
    let mut failed = 0;
    for path in &paths {
        let session = dbs.session();
        match import(&session, path) {
            Ok(Some(row)) => {
                session.commit()?;
                info!("{}: {:?}", path.display(), row);
            }
            Ok(None) => debug!("{}: no extra data", path.display()),
            Err(err) => {
                error!("failed to import {}: {}", path.display(), err);
                failed += 1;
            }
        }
        pb.inc(1);
    }
    pb.finish();

    if failed > 0 {
        return Err(Error::ImportFailed {
            failed,
            total: paths.len(),
        });
    }

    Ok(paths.len())
}
