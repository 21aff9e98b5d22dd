//! Screen-space rasterization.
//!
//! The triangle walker lives in [`triangle`], thick-line and wireframe
//! expansion in [`line`]; both are implemented as methods on
//! [`Context`](crate::context::Context) since they commit fragments
//! straight into its buffers.

pub mod line;
pub mod triangle;

use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Per-call rasterization counters.
///
/// Addition is a plain component-wise sum, so partial counters from
/// worker threads can be reduced in any order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RasterStats {
    /// Fragments considered after the span early-out.
    pub total_pixels: u64,
    /// Fragments that passed every test and wrote.
    pub updated_pixels: u64,
}

impl Add for RasterStats {
    type Output = RasterStats;

    #[inline]
    fn add(self, other: RasterStats) -> RasterStats {
        RasterStats {
            total_pixels: self.total_pixels + other.total_pixels,
            updated_pixels: self.updated_pixels + other.updated_pixels,
        }
    }
}

impl AddAssign for RasterStats {
    #[inline]
    fn add_assign(&mut self, other: RasterStats) {
        *self = *self + other;
    }
}

impl Sum for RasterStats {
    fn sum<I: Iterator<Item = RasterStats>>(iter: I) -> RasterStats {
        iter.fold(RasterStats::default(), Add::add)
    }
}
