// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

//! Positional command line arguments.

use std::{ffi::OsString, num::ParseIntError, path::PathBuf};

use crate::Error;

/// The two positional arguments of the tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    /// Path of the image to create or overwrite
    pub image: PathBuf,
    /// Requested image size in bytes, before rounding
    pub size: u64,
}

impl Arguments {
    /// Parse arguments, excluding the program name.
    ///
    /// Exactly two arguments are accepted: the image path and a non-negative
    /// integer byte count. Fractional or exponent forms are rejected rather
    /// than truncated. A leading `+` is accepted, as is a negative zero.
    pub fn parse<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = args.into_iter().map(Into::into).collect::<Vec<OsString>>();
        let [image, size] =
            <[OsString; 2]>::try_from(args).map_err(|args| Error::ArgumentCount(args.len()))?;

        let value = size.to_string_lossy();
        let size = parse_size(value.trim()).map_err(|source| Error::InvalidSize {
            value: value.to_string(),
            source,
        })?;

        Ok(Self {
            image: PathBuf::from(image),
            size,
        })
    }

    /// Parse the arguments of the running process
    pub fn from_env() -> Result<Self, Error> {
        Self::parse(std::env::args_os().skip(1))
    }
}

/// Parse a byte count, treating `-0` (any number of zeros) as zero
fn parse_size(value: &str) -> Result<u64, ParseIntError> {
    let digits = value
        .strip_prefix('-')
        .filter(|rest| !rest.is_empty() && rest.bytes().all(|b| b == b'0'))
        .unwrap_or(value);
    digits.parse::<u64>()
}
