// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

//! Allocation of sparse, cylinder aligned disk images.

pub mod args;
pub mod geometry;
pub mod sparsefile;

mod errors;
pub use errors::*;

pub use geometry::{format_size, round_up, Geometry, ImageSize, GRANULARITY, MAX_IMAGE_SIZE};

use log::{debug, info};
use std::path::Path;

/// Allocates the image at `path` with the already rounded `size`.
///
/// Any existing file at `path` is replaced.
pub fn allocate<P>(path: P, size: &ImageSize) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    debug!(
        "Allocating {:?}: {} cylinders, {} sectors",
        path,
        size.cylinders(),
        size.sectors()
    );

    sparsefile::create(path, size.allocated).map_err(|source| Error::Allocate {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Allocated {:?} ({})", path, format_size(size.allocated));
    Ok(())
}
