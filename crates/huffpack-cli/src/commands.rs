//! File-level operations behind the `huffpack` subcommands.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use huffpack::{
    compress_with_stats, decompress_with_stats, inspect, CompressionStats, ContainerInfo, Error,
    HuffmanConfig, Result,
};

/// Extension appended to compressed files.
pub const CONTAINER_EXTENSION: &str = "huff";

/// Extension appended when a decompressed file has no `.huff` to strip.
const RESTORED_EXTENSION: &str = "out";

/// Result of a compress or decompress run over one file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: CompressionStats,
}

/// `<input>.huff`
pub fn default_compress_output(input: &Path) -> PathBuf {
    append_extension(input, CONTAINER_EXTENSION)
}

/// Strip a trailing `.huff`, or append `.out` when there is none.
pub fn default_decompress_output(input: &Path) -> PathBuf {
    match input.extension() {
        Some(ext) if ext == CONTAINER_EXTENSION && input.file_stem().is_some() => {
            input.with_extension("")
        }
        _ => append_extension(input, RESTORED_EXTENSION),
    }
}

/// Compress `input` into a container file.
pub fn compress_file(
    input: &Path,
    output: Option<&Path>,
    config: &HuffmanConfig,
    overwrite: bool,
) -> Result<FileOutcome> {
    let output = output.map_or_else(|| default_compress_output(input), Path::to_path_buf);
    ensure_distinct(input, &output)?;
    ensure_writable(&output, overwrite)?;

    let data = fs::read(input)?;
    let (container, stats) = compress_with_stats(&data, config)?;
    fs::write(&output, &container)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        policy = %config.leaf_policy,
        "compressed {} -> {} bytes ({:.1}% saved)",
        stats.original_size,
        stats.compressed_size,
        stats.savings_percent()
    );

    Ok(FileOutcome {
        input: input.to_path_buf(),
        output,
        stats,
    })
}

/// Restore the original bytes of a container file.
pub fn decompress_file(input: &Path, output: Option<&Path>, overwrite: bool) -> Result<FileOutcome> {
    let output = output.map_or_else(|| default_decompress_output(input), Path::to_path_buf);
    ensure_distinct(input, &output)?;
    ensure_writable(&output, overwrite)?;

    let container = fs::read(input)?;
    let (data, stats) = decompress_with_stats(&container)?;
    fs::write(&output, &data)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        "decompressed {} -> {} bytes",
        stats.compressed_size,
        stats.original_size
    );

    Ok(FileOutcome {
        input: input.to_path_buf(),
        output,
        stats,
    })
}

/// Describe a container file without decoding its data span.
pub fn inspect_file(input: &Path) -> Result<ContainerInfo> {
    let container = fs::read(input)?;
    let info = inspect(&container)?;
    debug!(
        input = %input.display(),
        leaves = info.leaf_count,
        depth = info.tree_depth,
        "inspected container"
    );
    Ok(info)
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    if input == output || same_file(input, output) {
        return Err(Error::config(format!(
            "output path {} is the same as the input",
            output.display()
        )));
    }
    Ok(())
}

/// Both paths exist and resolve to the same file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn ensure_writable(output: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && output.exists() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists (use --force to replace it)", output.display()),
        )));
    }
    Ok(())
}
