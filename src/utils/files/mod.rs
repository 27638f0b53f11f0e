#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Mode applied when the output file is created. Existing files keep their mode.
pub const OUTPUT_FILE_MODE: u32 = 0o644;

/// Create or truncate `path` and write `content` to it with a single buffer write.
pub fn write_output(path: &Path, content: &[u8]) -> Result<(), AppError> {
    let write_error = |e: std::io::Error| {
        AppError::with_source(
            ErrorCategory::IoError,
            format!("Failed to write output file {}", path.display()),
            e,
        )
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(OUTPUT_FILE_MODE);
    }

    let mut file = options.open(path).map_err(write_error)?;
    file.write_all(content).map_err(write_error)?;
    file.flush().map_err(write_error)?;
    Ok(())
}
