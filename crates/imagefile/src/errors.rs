// SPDX-FileCopyrightText: Copyright © 2025 Serpent OS Developers
//
// SPDX-License-Identifier: MPL-2.0

use std::{io, num::ParseIntError, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Error type for the imagefile crate
#[derive(Diagnostic, Debug, Error)]
pub enum Error {
    /// Wrong number of positional arguments
    #[error("expected 2 arguments, got {0}")]
    #[diagnostic(code(mkimg::args), help("usage: mkimg <imagename> <imagesize>"))]
    ArgumentCount(usize),

    /// The image size is not a non-negative integer
    #[error("invalid image size: {value:?}")]
    #[diagnostic(
        code(mkimg::size),
        help("the size must be a whole, non-negative number of bytes")
    )]
    InvalidSize {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Rounding the image size up would exceed the largest file offset
    #[error("image size {size} cannot be rounded up to a multiple of {granularity}")]
    #[diagnostic(
        code(mkimg::overflow),
        help("the rounded size must fit in a signed 64 bit file offset")
    )]
    SizeOverflow { size: u64, granularity: u64 },

    /// Creating or extending the image failed
    #[error("failed to allocate {path:?}")]
    #[diagnostic(code(mkimg::io))]
    Allocate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
