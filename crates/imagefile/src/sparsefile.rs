// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

use std::{
    fs,
    io::{self, Seek, SeekFrom, Write},
    path::Path,
};

use log::trace;

/// Creates a sparse file at the specified path with the given size.
///
/// Any existing file is truncated first. The file is extended by seeking to
/// the last byte and writing a single zero there, leaving everything before
/// it as a hole on filesystems that support them.
///
/// # Arguments
/// * `path` - Path where the sparse file should be created
/// * `size` - Size in bytes for the sparse file
///
/// # Returns
/// `io::Result<()>` indicating success or failure
pub fn create<P>(path: P, size: u64) -> io::Result<()>
where
    P: AsRef<Path>,
{
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    // Nothing to address for an empty image
    let Some(last) = size.checked_sub(1) else {
        return Ok(());
    };

    trace!("Seeking to offset {}", last);
    file.seek(SeekFrom::Start(last))?;
    file.write_all(&[0])?;
    file.flush()?;

    Ok(())
}
