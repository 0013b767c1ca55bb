//! Irradiance Light Distribution.

use super::*;

/// Lower bound for the vertex-averaged cosine of an area light. Keeps a coarse
/// estimate from starving lights near the horizon.
const MIN_AVERAGE_COSINE: Float = 0.1;

/// Returns a distribution with sampling probability proportional to an
/// estimate of the irradiance each light delivers at the lit point. Infinite
/// lights report their irradiance directly. Area lights are approximated by
/// the solid angle their bounding box subtends times a uniform intensity
/// derived from their power.
pub struct IrradianceLightsSamplingStrategy {
    /// The infinite lights.
    infinite: Vec<ArcLight>,

    /// Bounds and intensity of each area light.
    area: Vec<(Bounds3f, Float)>,
}

impl IrradianceLightsSamplingStrategy {
    /// Create a new instance of `IrradianceLightsSamplingStrategy`.
    ///
    /// * `light_sources` - The scene lights.
    pub fn new(light_sources: &LightSources) -> Self {
        let area = light_sources
            .area
            .iter()
            .map(|light| {
                let bounds = light.bounds();
                let surface_area = bounds.surface_area();
                let intensity = if !bounds.is_empty() && surface_area > 0.0 {
                    max(0.0, light.power().y()) / (PI * surface_area)
                } else {
                    0.0
                };
                (bounds, intensity)
            })
            .collect();

        Self {
            infinite: light_sources.infinite.iter().map(Arc::clone).collect(),
            area,
        }
    }

    /// Returns the weight of an area light seen from a point on a surface.
    ///
    /// * `p`         - The lit point.
    /// * `n`         - Surface normal.
    /// * `bounds`    - Bounds of the light.
    /// * `intensity` - Intensity of the light.
    fn oriented_area_weight(p: &Point3f, n: &Normal3f, bounds: &Bounds3f, intensity: Float) -> Float {
        if bounds.contains(p) {
            return PI * intensity;
        }

        let average_cosine = (0..8)
            .map(|i| max(0.0, (bounds.corner(i) - *p).normalize().dot(n)))
            .sum::<Float>()
            * 0.125;
        if average_cosine > 0.0 {
            subtended_solid_angle(p, bounds) * intensity * max(average_cosine, MIN_AVERAGE_COSINE)
        } else {
            0.0
        }
    }
}

impl LightsSamplingStrategy for IrradianceLightsSamplingStrategy {
    fn get_lights_cdf(&self, p: &Point3f, n: Option<&Normal3f>, cdf: &mut [Float]) {
        let n_infinite = self.infinite.len();
        debug_assert!(cdf.len() == n_infinite + self.area.len());
        if cdf.is_empty() {
            return;
        }

        for (w, light) in cdf.iter_mut().zip(self.infinite.iter()) {
            let e = match n {
                Some(n) => light.irradiance(n),
                None => light.fluence(),
            };
            *w = max(0.0, e.y());
        }

        for (w, (bounds, intensity)) in cdf[n_infinite..].iter_mut().zip(self.area.iter()) {
            *w = match n {
                _ if *intensity <= 0.0 => 0.0,
                Some(n) => Self::oriented_area_weight(p, n, bounds, *intensity),
                None => subtended_solid_angle(p, bounds) * intensity,
            };
        }

        weights_to_cdf(cdf);
    }
}
