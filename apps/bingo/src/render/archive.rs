use std::io::{Cursor, Write};

use bytes::Bytes;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::AppError;

/// Bundles named artifacts into a single zip archive held in memory.
pub fn bundle(entries: &[(String, Bytes)]) -> Result<Bytes, AppError> {
    let mut buf = Vec::new();
    {
        let mut writer = ZipWriter::new(Cursor::new(&mut buf));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, contents) in entries {
            writer
                .start_file(name.as_str(), options)
                .map_err(|e| AppError::Internal(anyhow::anyhow!("zip entry {name}: {e}")))?;
            writer.write_all(contents)?;
        }
        writer
            .finish()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("zip finish: {e}")))?;
    }
    Ok(Bytes::from(buf))
}
