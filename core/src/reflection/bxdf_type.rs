//! BxDF Type

use bitflags::bitflags;

bitflags! {
    /// Stores combinations of reflection models.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct BxDFType: u8 {
        const BSDF_REFLECTION = 0b00000001;
        const BSDF_TRANSMISSION = 0b00000010;
        const BSDF_DIFFUSE = 0b00000100;
        const BSDF_GLOSSY = 0b00001000;
        const BSDF_SPECULAR = 0b00010000;
        const BSDF_ALL = 0b00011111;
    }
}

impl BxDFType {
    /// Returns true if the model has a Dirac delta distribution.
    pub fn is_specular(&self) -> bool {
        self.contains(Self::BSDF_SPECULAR)
    }
}
