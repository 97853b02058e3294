use std::fs;
use std::io;
use std::path::Path;

use triage_core::SelectedFile;

/// Reads a file for upload, guessing its mime type from the extension.
///
/// The type is only guessed here; the controller decides whether it is
/// acceptable.
pub fn load_file(path: &Path) -> io::Result<SelectedFile> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path).first_or_octet_stream();
    Ok(SelectedFile::new(name, mime_type.essence_str(), bytes))
}
