// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

//! Disk geometry and image size rounding.
//!
//! Images are always a whole number of cylinders of the emulated IDE disk,
//! so the rounding granularity is derived from the CHS geometry rather than
//! being a bare magic number.

use std::fmt;

use crate::Error;

/// CHS geometry of the emulated IDE disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Number of heads per cylinder
    pub heads: u64,
    /// Number of sectors per track
    pub sectors_per_track: u64,
    /// Size of one sector in bytes
    pub sector_size: u64,
}

impl Geometry {
    /// 16 heads, 63 sectors per track, 512 byte sectors
    pub const DEFAULT: Geometry = Geometry {
        heads: 16,
        sectors_per_track: 63,
        sector_size: 512,
    };

    /// Size of a single cylinder in bytes
    pub const fn cylinder_size(&self) -> u64 {
        self.heads * self.sectors_per_track * self.sector_size
    }

    /// Round `size` up to the next whole cylinder.
    ///
    /// Sizes that are already cylinder aligned (including zero) are returned
    /// unchanged. The result never exceeds [`MAX_IMAGE_SIZE`].
    pub fn round_up(&self, size: u64) -> Result<u64, Error> {
        let granularity = self.cylinder_size();
        let rounded = match size % granularity {
            0 => Some(size),
            rem => size.checked_add(granularity - rem),
        };
        rounded
            .filter(|rounded| *rounded <= MAX_IMAGE_SIZE)
            .ok_or(Error::SizeOverflow { size, granularity })
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Largest image length, file offsets are signed 64 bit
pub const MAX_IMAGE_SIZE: u64 = i64::MAX as u64;

/// Rounding granularity for all images, one cylinder of [`Geometry::DEFAULT`]
pub const GRANULARITY: u64 = Geometry::DEFAULT.cylinder_size();

/// Round `size` up to a multiple of [`GRANULARITY`]
pub fn round_up(size: u64) -> Result<u64, Error> {
    Geometry::DEFAULT.round_up(size)
}

/// A requested image size together with the size that will be allocated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    /// Size asked for on the command line
    pub requested: u64,
    /// Size after rounding, the final length of the image
    pub allocated: u64,
    geometry: Geometry,
}

impl ImageSize {
    /// Compute the allocated size for `requested` bytes using the default geometry
    pub fn new(requested: u64) -> Result<Self, Error> {
        Self::with_geometry(requested, Geometry::DEFAULT)
    }

    /// Compute the allocated size for `requested` bytes using a specific geometry
    pub fn with_geometry(requested: u64, geometry: Geometry) -> Result<Self, Error> {
        let allocated = geometry.round_up(requested)?;
        Ok(Self {
            requested,
            allocated,
            geometry,
        })
    }

    /// Whether rounding changed the requested size
    pub fn was_rounded(&self) -> bool {
        self.requested != self.allocated
    }

    /// Number of whole cylinders in the image
    pub fn cylinders(&self) -> u64 {
        self.allocated / self.geometry.cylinder_size()
    }

    /// Number of sectors in the image
    pub fn sectors(&self) -> u64 {
        self.allocated / self.geometry.sector_size
    }

    /// The geometry the size was rounded against
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.allocated)
    }
}

/// Format a byte count using binary units with one decimal place
pub fn format_size(size: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    const TB: f64 = GB * 1024.0;

    let size = size as f64;
    if size >= TB {
        format!("{:.1}TiB", size / TB)
    } else if size >= GB {
        format!("{:.1}GiB", size / GB)
    } else if size >= MB {
        format!("{:.1}MiB", size / MB)
    } else if size >= KB {
        format!("{:.1}KiB", size / KB)
    } else {
        format!("{}B", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_granularity_is_one_cylinder() {
        assert_eq!(GRANULARITY, 516096);
        assert_eq!(Geometry::default().cylinder_size(), GRANULARITY);
    }

    #[test]
    fn test_round_up_aligned() {
        assert_eq!(round_up(0).unwrap(), 0);
        assert_eq!(round_up(GRANULARITY).unwrap(), GRANULARITY);
        assert_eq!(round_up(7 * GRANULARITY).unwrap(), 7 * GRANULARITY);
    }

    #[test]
    fn test_round_up_unaligned() {
        assert_eq!(round_up(1).unwrap(), GRANULARITY);
        assert_eq!(round_up(GRANULARITY - 1).unwrap(), GRANULARITY);
        assert_eq!(round_up(GRANULARITY + 1).unwrap(), 2 * GRANULARITY);
        assert_eq!(round_up(516097).unwrap(), 1032192);
    }

    #[test]
    fn test_round_up_is_smallest_multiple() {
        for size in (0..20 * GRANULARITY).step_by(99_991) {
            let rounded = round_up(size).unwrap();
            assert_eq!(rounded % GRANULARITY, 0);
            assert!(rounded >= size);
            assert!(rounded - size < GRANULARITY);
        }
    }

    #[test]
    fn test_round_up_overflow() {
        let err = round_up(u64::MAX).unwrap_err();
        assert!(matches!(err, Error::SizeOverflow { size: u64::MAX, .. }));

        // The largest aligned value that is still a valid file offset
        let largest = MAX_IMAGE_SIZE - MAX_IMAGE_SIZE % GRANULARITY;
        assert_eq!(round_up(largest).unwrap(), largest);
        assert!(round_up(largest + 1).is_err());
        assert!(round_up(MAX_IMAGE_SIZE).is_err());
        assert!(round_up(MAX_IMAGE_SIZE + 1).is_err());
    }

    #[test]
    fn test_image_size() {
        let size = ImageSize::new(100 * 1024 * 1024).unwrap();
        assert!(size.was_rounded());
        assert_eq!(size.allocated % GRANULARITY, 0);
        assert_eq!(size.cylinders(), 204);
        assert_eq!(size.sectors(), 204 * 16 * 63);
        assert_eq!(size.to_string(), size.allocated.to_string());

        let exact = ImageSize::new(2 * GRANULARITY).unwrap();
        assert!(!exact.was_rounded());
        assert_eq!(exact.cylinders(), 2);
    }

    #[test]
    fn test_custom_geometry() {
        let geometry = Geometry {
            heads: 255,
            sectors_per_track: 63,
            sector_size: 512,
        };
        let size = ImageSize::with_geometry(1, geometry).unwrap();
        assert_eq!(size.allocated, 8_225_280);
        assert_eq!(size.geometry(), geometry);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(GRANULARITY), "504.0KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0MiB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.0GiB");
    }
}
