//! RGB Spectrum.

#![allow(dead_code)]

use crate::pbrt::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub};

/// Number of spectral samples to use for `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// RGBSpectrum represents an spectral power distribution (SPD) with
/// a weighted sum of red, green and blue components.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RGBSpectrum {
    /// The sampled spectral values.
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Black.
    pub const ZERO: Self = Self { c: [0.0; RGB_SAMPLES] };

    /// White.
    pub const ONE: Self = Self { c: [1.0; RGB_SAMPLES] };

    /// Create a new `RGBSpectrum` with a constant value across all
    /// wavelengths.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        let ret = Self { c: [v; RGB_SAMPLES] };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Create a new `RGBSpectrum` from red, green and blue components.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub fn rgb(r: Float, g: Float, b: Float) -> Self {
        let ret = Self { c: [r, g, b] };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Returns the luminance (y-coefficient of XYZ colour).
    pub fn y(&self) -> Float {
        0.212671 * self.c[0] + 0.715160 * self.c[1] + 0.072169 * self.c[2]
    }

    /// Returns true if every component is zero.
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|&v| v == 0.0)
    }

    /// Returns true if any component is NaN.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| v.is_nan())
    }

    /// Returns true if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.c.iter().all(|v| v.is_finite())
    }

    /// Returns the largest component.
    pub fn max_component_value(&self) -> Float {
        max(self.c[0], max(self.c[1], self.c[2]))
    }

    /// Returns the smallest component.
    pub fn min_component_value(&self) -> Float {
        min(self.c[0], min(self.c[1], self.c[2]))
    }

    /// Clamps every component to the range [low, high].
    ///
    /// * `low`  - Lower bound.
    /// * `high` - Upper bound.
    pub fn clamp(&self, low: Float, high: Float) -> Self {
        Self {
            c: self.c.map(|v| clamp(v, low, high)),
        }
    }

    /// Returns the component-wise exponential.
    pub fn exp(&self) -> Self {
        Self {
            c: self.c.map(|v| v.exp()),
        }
    }

    /// Returns the component-wise square root.
    pub fn sqrt(&self) -> Self {
        Self {
            c: self.c.map(|v| v.sqrt()),
        }
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    /// Adds the given spectrum and returns the result.
    ///
    /// * `other` - The spectrum to add.
    fn add(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] + other.c[0],
                self.c[1] + other.c[1],
                self.c[2] + other.c[2],
            ],
        }
    }
}

impl AddAssign for RGBSpectrum {
    /// Performs the `+=` operation.
    ///
    /// * `other` - The spectrum to add.
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    /// Subtracts the given spectrum and returns the result.
    ///
    /// * `other` - The spectrum to subtract.
    fn sub(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] - other.c[0],
                self.c[1] - other.c[1],
                self.c[2] - other.c[2],
            ],
        }
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    /// Multiplies component-wise with the given spectrum.
    ///
    /// * `other` - The other spectrum.
    fn mul(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] * other.c[0],
                self.c[1] * other.c[1],
                self.c[2] * other.c[2],
            ],
        }
    }
}

impl MulAssign for RGBSpectrum {
    /// Multiplies component-wise with the given spectrum.
    ///
    /// * `other` - The other spectrum.
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the spectrum.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        Self {
            c: self.c.map(|v| v * f),
        }
    }
}

impl MulAssign<Float> for RGBSpectrum {
    /// Scales the spectrum.
    ///
    /// * `f` - The scaling factor.
    fn mul_assign(&mut self, f: Float) {
        *self = *self * f;
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    /// Scales the spectrum.
    ///
    /// * `s` - The spectrum.
    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl Div for RGBSpectrum {
    type Output = Self;

    /// Divides component-wise by the given spectrum.
    ///
    /// * `other` - The other spectrum.
    fn div(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] / other.c[0],
                self.c[1] / other.c[1],
                self.c[2] / other.c[2],
            ],
        }
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales the spectrum by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        Self {
            c: self.c.map(|v| v / f),
        }
    }
}

impl DivAssign<Float> for RGBSpectrum {
    /// Scales the spectrum by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div_assign(&mut self, f: Float) {
        *self = *self / f;
    }
}

impl Neg for RGBSpectrum {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            c: self.c.map(|v| -v),
        }
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    /// Returns the spectral sample at the given index.
    ///
    /// * `i` - The index.
    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl IndexMut<usize> for RGBSpectrum {
    /// Returns the mutable spectral sample at the given index.
    ///
    /// * `i` - The index.
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.c[i]
    }
}

impl fmt::Display for RGBSpectrum {
    /// Formats the value using the given formatter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.c[0], self.c[1], self.c[2])
    }
}
