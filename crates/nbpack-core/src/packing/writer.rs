//! Gzip-compressed tar writer for plugin packages.
//!
//! Every package is a GNU tar stream wrapped in gzip. Entries are regular
//! files only, written in the order produced by
//! [`collect_entries`](crate::packing::walker::collect_entries), with names
//! relative to the plugin root.

use crate::NoopProgress;
use crate::PackError;
use crate::ProgressCallback;
use crate::Result;
use crate::io::CountingWriter;
use crate::packing::atomic::PackageOutput;
use crate::packing::config::PackConfig;
use crate::packing::progress::ProgressReader;
use crate::packing::progress::ProgressTracker;
use crate::packing::report::PackReport;
use crate::packing::source::SourceDir;
use crate::packing::walker::PackEntry;
use crate::packing::walker::collect_entries;
use flate2::write::GzEncoder;
use std::fs;
use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use tar::Builder;
use tar::Header;
use tar::HeaderMode;
use tracing::debug;
use tracing::info;

/// Packs the plugin at `src` into a `.nbp` archive at `out`.
///
/// # Examples
///
/// ```no_run
/// use nbpack_core::packing::PackConfig;
/// use nbpack_core::packing::pack_plugin;
///
/// let config = PackConfig::default().with_extra_excludes(["coverage"]);
/// let report = pack_plugin("plugins/echo", "build/echo.nbp", &config)?;
/// println!("Packed {} files", report.files_added);
/// # Ok::<(), nbpack_core::PackError>(())
/// ```
///
/// # Errors
///
/// Configuration errors are returned before anything is written:
/// - [`PackError::InvalidCompressionLevel`](crate::PackError::InvalidCompressionLevel)
/// - [`PackError::SourceNotFound`](crate::PackError::SourceNotFound)
/// - [`PackError::NotADirectory`](crate::PackError::NotADirectory)
/// - [`PackError::ManifestMissing`](crate::PackError::ManifestMissing)
/// - [`PackError::InvalidConfiguration`](crate::PackError::InvalidConfiguration)
///   if `out` is the source's own `manifest.json`
///
/// Any filesystem failure afterwards aborts with
/// [`PackError::Io`](crate::PackError::Io) or
/// [`PackError::Walk`](crate::PackError::Walk).
pub fn pack_plugin<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    out: Q,
    config: &PackConfig,
) -> Result<PackReport> {
    let mut noop = NoopProgress;
    pack_plugin_with_progress(src, out, config, &mut noop)
}

/// Packs the plugin at `src` into `out`, reporting progress to `progress`.
///
/// Identical to [`pack_plugin`] apart from the callbacks. `on_complete` fires
/// only after the package has been moved into place.
///
/// # Errors
///
/// Same as [`pack_plugin`].
pub fn pack_plugin_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    out: Q,
    config: &PackConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    let start = Instant::now();

    config.validate()?;
    let source = SourceDir::new(src)?;

    let dest = resolve_output(out.as_ref())?;
    if dest == source.manifest_path() {
        return Err(PackError::InvalidConfiguration {
            reason: format!("output would overwrite the plugin manifest: {}", dest.display()),
        });
    }
    let output = PackageOutput::new(dest, config.atomic);

    let outcome = collect_entries(&source, config, &output.reserved_paths())?;

    let mut report = PackReport::new();
    report.output = output.dest().to_path_buf();
    report.paths_excluded = outcome.excluded;
    report.symlinks_skipped = outcome.skipped_symlinks.len();
    for name in &outcome.skipped_symlinks {
        report.add_warning(format!("skipped symlink: {name}"));
    }

    let mut tracker = ProgressTracker::new(progress, outcome.entries.len());

    let file = output.create()?;
    let encoder = GzEncoder::new(CountingWriter::new(file), config.gzip_level());
    let mut builder = Builder::new(encoder);
    let mode = if config.reproducible {
        HeaderMode::Deterministic
    } else {
        HeaderMode::Complete
    };

    for entry in &outcome.entries {
        tracker.on_entry_start(&entry.name);
        let size = append_file(&mut builder, entry, mode, tracker.callback())?;
        debug!(entry = %entry.name, size, "archived");
        report.bytes_written += size;
        report.files_added += 1;
        report.entries.push(entry.name.clone());
        tracker.on_entry_complete(&entry.name);
    }

    let counting = builder.into_inner()?.finish()?;
    report.bytes_compressed = counting.total_bytes();
    let file = counting.into_inner();
    file.sync_all()?;
    drop(file);

    output.commit()?;
    report.duration = start.elapsed();

    info!(
        output = %report.output.display(),
        files = report.files_added,
        bytes = report.bytes_compressed,
        "plugin packed"
    );
    tracker.on_complete();

    Ok(report)
}

/// Appends one regular file, returning the number of content bytes written.
///
/// Header metadata comes from the open handle, so a file replaced between
/// the walk and this call is described by what is actually read.
fn append_file<W: Write>(
    builder: &mut Builder<W>,
    entry: &PackEntry,
    mode: HeaderMode,
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    let file = File::open(&entry.path)?;
    let metadata = file.metadata()?;

    let mut header = Header::new_gnu();
    header.set_metadata_in_mode(&metadata, mode);

    append_sized(builder, &mut header, entry, file, metadata.len(), progress)
}

/// Streams exactly `size` bytes of `data` under `entry.name`.
///
/// A reader that runs dry early means the file shrank after its header was
/// built; the archive would be corrupt, so this is an error.
fn append_sized<W: Write, R: Read>(
    builder: &mut Builder<W>,
    header: &mut Header,
    entry: &PackEntry,
    data: R,
    size: u64,
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    header.set_size(size);

    let mut reader = ProgressReader::new(data.take(size), progress);
    builder.append_data(header, &entry.name, &mut reader)?;

    if reader.total_bytes() != size {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("file changed while packing: {}", entry.path.display()),
        )
        .into());
    }

    Ok(size)
}

/// Creates missing parent directories and returns the absolute destination.
fn resolve_output(out: &Path) -> Result<PathBuf> {
    let file_name = out.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("output path has no file name: {}", out.display()),
        )
    })?;

    let parent = match out.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    Ok(parent.canonicalize()?.join(file_name))
}
