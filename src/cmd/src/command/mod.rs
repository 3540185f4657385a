use std::path::Path;
use std::path::PathBuf;

use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use scan_dir::ScanDir;

use crate::error::Error;
use crate::error::Result;

pub mod extra_data;
pub mod fit;

/// Files directly in `dir` accepted by `filter`, sorted by name.
pub(crate) fn scan_files<F>(dir: &Path, filter: F) -> Result<Vec<PathBuf>>
where F: Fn(&str) -> bool {
    let mut files: Vec<PathBuf> = ScanDir::files()
        .read(dir, |iter| {
            iter.filter(|(_, name)| filter(name))
                .map(|(ref entry, _)| entry.path())
                .collect()
        })
        .map_err(|err| Error::ScanDir(format!("{}: {err:?}", dir.display())))?;
    files.sort();

    Ok(files)
}

pub(crate) fn progress_bar(len: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} files ({eta})",
    )?);

    Ok(pb)
}
