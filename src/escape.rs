// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test.
//!
//! Starting from the configured starting point, `z` is repeatedly
//! squared and offset by `c`.  As soon as the squared magnitude of
//! `z` passes the threshold the point has escaped, and the step at
//! which that happened is what the palette shades by.
//!
//! Zero means "inside", and it is returned in two cases: the orbit
//! never escaped within the budget, or it escaped on the very last
//! iteration.  Folding the last-step escapes into the interior gives
//! the set a uniform color at the edge of the budget; it is
//! deliberate and the sampler depends on it.

use num::Complex;

use crate::config::FractalConfig;

/// Classifies `c`.  Returns 0 for points treated as inside the set,
/// otherwise the 1-based iteration on which the orbit escaped, which
/// is always below `config.iterations`.
///
/// Pure and lock-free; safe to call from any number of workers.
#[inline]
pub fn evaluate(c: Complex<f64>, config: &FractalConfig) -> usize {
    let mut z = config.starting_point;
    for i in 0..config.iterations {
        z = z * z + c;
        if z.norm_sqr() > config.threshold {
            if i + 1 == config.iterations {
                return 0;
            }
            return i + 1;
        }
    }
    0
}
