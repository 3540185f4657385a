use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use common::config::Config;
use healthdb::Databases;
use ingester::extra_data::is_extra_data_file;
use ingester::ingest_paths;
use ingester::BatchReport;
use ingester::DecodedFile;
use ingester::Ingester;
use tracing::info;

use crate::command::progress_bar;
use crate::command::scan_files;
use crate::error::Error;
use crate::error::Result;

#[derive(Parser, Clone, Debug)]
pub struct Fit {
    /// Directory of decoded files, defaults to `data.input_dir`
    #[arg(long)]
    pub input_dir: Option<PathBuf>,
    /// Single decoded file
    #[arg(long, conflicts_with = "input_dir")]
    pub input_file: Option<PathBuf>,
}

fn is_decoded_file(name: &str) -> bool {
    name.ends_with(".json") && !is_extra_data_file(name)
}

pub fn paths(args: &Fit, cfg: &Config) -> Result<Vec<PathBuf>> {
    match &args.input_file {
        Some(file) => Ok(vec![file.to_owned()]),
        None => {
            let dir = args.input_dir.as_ref().unwrap_or(&cfg.data.input_dir);
            scan_files(dir, is_decoded_file)
        }
    }
}

pub fn run(args: &Fit, cfg: &Config) -> Result<BatchReport> {
    let paths = paths(args, cfg)?;
    if paths.is_empty() {
        return Err(Error::BadRequest("no files to import".to_string()));
    }
    info!("importing {} files into {}", paths.len(), cfg.data.path.display());

    let dbs = Arc::new(Databases::open(&cfg.data.path)?);
    let ingester = Ingester::new(dbs, &cfg.ingest);
    let pb = progress_bar(paths.len())?;
    let report = ingest_paths(&ingester, &paths, |p| DecodedFile::load(p), |_| pb.inc(1));
    pb.finish();

    let skipped: usize = report.ingested.iter().map(|(_, s)| s.skipped).sum();
    info!(
        "imported {} files, {} failed, {} records skipped",
        report.ingested.len(),
        report.failed.len(),
        skipped
    );
    if !report.is_success() {
        return Err(Error::ImportFailed {
            failed: report.failed.len(),
            total: paths.len(),
        });
    }

    Ok(report)
}
