//! Package listing implementation.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use std::time::SystemTime;

use flate2::read::GzDecoder;

use crate::PackError;
use crate::Result;
use crate::inspection::package::EntryKind;
use crate::inspection::package::PackageEntry;
use crate::inspection::package::PackageListing;

/// Lists package contents without extracting.
///
/// # Errors
///
/// Returns [`PackError::Io`] if the file cannot be opened, or
/// [`PackError::InvalidPackage`] if it is not a gzip-compressed tar stream.
///
/// # Examples
///
/// ```no_run
/// use nbpack_core::list_package;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let listing = list_package("build/echo.nbp")?;
/// for entry in &listing.entries {
///     println!("{:>8} {}", entry.size, entry.name);
/// }
/// # Ok(())
/// # }
/// ```
pub fn list_package<P: AsRef<Path>>(package: P) -> Result<PackageListing> {
    scan_package(package.as_ref(), None).map(|(listing, _)| listing)
}

/// Reads every header of `package`, also returning the contents of the first
/// regular file named exactly `capture`.
pub(crate) fn scan_package(
    package: &Path,
    capture: Option<&str>,
) -> Result<(PackageListing, Option<Vec<u8>>)> {
    let file = File::open(package)?;
    let mut archive = tar::Archive::new(GzDecoder::new(BufReader::new(file)));

    let mut listing = PackageListing::new(package.to_path_buf());
    let mut captured = None;

    let entries = archive
        .entries()
        .map_err(|e| PackError::InvalidPackage(format!("failed to read tar entries: {e}")))?;

    for entry in entries {
        let mut entry = entry
            .map_err(|e| PackError::InvalidPackage(format!("failed to read tar entry: {e}")))?;

        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let header = entry.header();
        let kind = EntryKind::from(header.entry_type());
        let mode = header.mode().ok();
        let modified = header
            .mtime()
            .ok()
            .and_then(|t| SystemTime::UNIX_EPOCH.checked_add(Duration::from_secs(t)));
        let size = entry.size();

        if captured.is_none() && kind == EntryKind::File && capture == Some(name.as_str()) {
            let mut data = Vec::new();
            entry
                .read_to_end(&mut data)
                .map_err(|e| PackError::InvalidPackage(format!("failed to read {name}: {e}")))?;
            captured = Some(data);
        }

        listing.add_entry(PackageEntry {
            name,
            kind,
            size,
            mode,
            modified,
        });
    }

    Ok((listing, captured))
}
