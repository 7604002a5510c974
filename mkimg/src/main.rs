// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

use imagefile::{args::Arguments, format_size, ImageSize};
use log::{debug, info};

/// Creates a sparse disk image rounded up to a whole number of cylinders:
///
/// `mkimg <imagename> <imagesize>`
fn main() -> miette::Result<()> {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = Arguments::from_env()?;
    let size = ImageSize::new(args.size)?;

    if size.was_rounded() {
        debug!("Rounded {} up to {} bytes", size.requested, size.allocated);
    }

    // Reported before touching the filesystem
    println!("Using image size: {}", size);

    info!(
        "Creating {} image {:?} ({} cylinders)",
        format_size(size.allocated),
        args.image,
        size.cylinders()
    );
    imagefile::allocate(&args.image, &size)?;

    Ok(())
}
