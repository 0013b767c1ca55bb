//! Spectrum

mod rgb_spectrum;

// Re-export
pub use rgb_spectrum::*;

/// Default to using `RGBSpectrum`.
pub type Spectrum = RGBSpectrum;
