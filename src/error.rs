// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type shared by the library and the viewer binary.

use failure::Fail;

/// Everything that can stop a render before or after the sampling
/// pass.  The pass itself cannot fail; only a panicking worker can
/// interrupt it.
#[derive(Debug, Fail)]
pub enum Error {
    /// The configuration was rejected before any computation started.
    #[fail(display = "invalid configuration: {}", _0)]
    InvalidConfig(String),

    /// The window or its graphics context could not be created, or a
    /// frame could not be presented.
    #[fail(display = "display failure: {}", _0)]
    Display(String),

    /// A sampling worker panicked; the grid is incomplete.
    #[fail(display = "a sampling worker panicked")]
    Worker,
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        Error::InvalidConfig(msg.into())
    }

    pub(crate) fn display<E: std::fmt::Display>(err: E) -> Self {
        Error::Display(err.to_string())
    }
}
