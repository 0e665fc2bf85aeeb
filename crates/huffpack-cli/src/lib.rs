//! huffpack command-line front end.
//!
//! File-level compress, decompress, and inspect operations used by the
//! `huffpack` binary, plus the JSON configuration it reads.
//!
//! ## Usage
//!
//! ```bash
//! # Compress to notes.txt.huff
//! huffpack compress notes.txt
//!
//! # Restore to notes.txt, replacing an existing file
//! huffpack --force decompress notes.txt.huff
//!
//! # Show container framing and code lengths
//! huffpack inspect notes.txt.huff --json
//! ```

pub mod commands;
pub mod config;

pub use commands::{
    compress_file, decompress_file, default_compress_output, default_decompress_output,
    inspect_file, FileOutcome, CONTAINER_EXTENSION,
};
pub use config::{parse_log_level, CliConfig};
