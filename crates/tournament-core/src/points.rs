//! Exact point totals.
//!
//! Chess scores move in steps of half a point, so totals are stored as a
//! count of half points instead of a float.

use std::fmt;
use std::ops::{Add, AddAssign};

/// A non-negative score measured in half points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Points(u32);

impl Points {
    /// No points.
    pub const ZERO: Points = Points(0);
    /// The award each player receives for a tie.
    pub const HALF: Points = Points(1);
    /// The award for a win or a bye.
    pub const ONE: Points = Points(2);

    /// Creates a score from a number of half points.
    pub const fn from_half_points(half_points: u32) -> Self {
        Points(half_points)
    }

    /// Returns the score as a number of half points.
    pub const fn half_points(self) -> u32 {
        self.0
    }

    /// Returns true if the score has no half point.
    pub const fn is_whole(self) -> bool {
        self.0 % 2 == 0
    }

    /// Returns the score as a float, for display and export only.
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Points {
        Points(self.0 + rhs.0)
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Points) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}
