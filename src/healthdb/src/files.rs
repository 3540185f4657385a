use std::path::Path;

/// Name of a source file: its final path component.
pub fn file_name_from_path<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_name()
        .map(|v| v.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Stable identifier of a source file: its name up to the first dot.
pub fn file_id_from_path<P: AsRef<Path>>(path: P) -> String {
    let name = file_name_from_path(path);
    match name.split_once('.') {
        Some((id, _)) => id.to_string(),
        None => name,
    }
}
