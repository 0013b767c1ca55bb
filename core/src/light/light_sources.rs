//! Light Sources

use super::*;
use std::collections::HashMap;

/// The lights of a scene grouped by how they are sampled.
#[derive(Clone, Default)]
pub struct LightSources {
    /// Point and parallel lights. These are visited on every direct lighting
    /// evaluation and never selected through a CDF.
    pub delta: Vec<ArcLight>,

    /// Environment lights.
    pub infinite: Vec<ArcLight>,

    /// Emissive meshes.
    pub area: Vec<ArcLight>,

    /// CDF index of each area light keyed by its address.
    area_cdf_indices: HashMap<usize, usize>,
}

impl LightSources {
    /// Partitions lights by their type flags.
    ///
    /// * `lights` - All lights in the scene.
    pub fn new(lights: Vec<ArcLight>) -> Self {
        let mut sources = Self::default();
        for light in lights {
            let light_type = light.get_type();
            if light_type.is_delta_light() {
                sources.delta.push(light);
            } else if light_type.matches(LightType::INFINITE_LIGHT) {
                sources.infinite.push(light);
            } else {
                sources.area.push(light);
            }
        }

        let n_infinite = sources.infinite.len();
        sources.area_cdf_indices = sources
            .area
            .iter()
            .enumerate()
            .map(|(i, light)| (light_key(light), i + n_infinite))
            .collect();

        info!(
            "Light sources: {} delta, {} infinite, {} area",
            sources.delta.len(),
            sources.infinite.len(),
            sources.area.len()
        );
        sources
    }

    /// Returns the total number of lights.
    pub fn len(&self) -> usize {
        self.delta.len() + self.infinite.len() + self.area.len()
    }

    /// Returns true if there are no lights.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of lights selected through a CDF, i.e. the
    /// infinite and area lights.
    pub fn num_sampled(&self) -> usize {
        self.infinite.len() + self.area.len()
    }

    /// Returns a light by its index in the order delta, infinite, area.
    ///
    /// * `i` - Light index.
    pub fn get(&self, i: usize) -> Option<&ArcLight> {
        let n_delta = self.delta.len();
        let n_infinite = self.infinite.len();
        if i < n_delta {
            self.delta.get(i)
        } else if i < n_delta + n_infinite {
            self.infinite.get(i - n_delta)
        } else {
            self.area.get(i - n_delta - n_infinite)
        }
    }

    /// Returns a light by its index in a lights CDF, i.e. in the order
    /// infinite, area.
    ///
    /// * `i` - Index into the CDF.
    pub fn get_sampled(&self, i: usize) -> Option<&ArcLight> {
        let n_infinite = self.infinite.len();
        if i < n_infinite {
            self.infinite.get(i)
        } else {
            self.area.get(i - n_infinite)
        }
    }

    /// Returns the position of an area light in a lights CDF.
    ///
    /// * `light` - The area light.
    pub fn area_light_cdf_index(&self, light: &ArcLight) -> Option<usize> {
        self.area_cdf_indices.get(&light_key(light)).copied()
    }
}

/// Returns the address of the light's shared data.
///
/// * `light` - The light.
fn light_key(light: &ArcLight) -> usize {
    Arc::as_ptr(light) as *const () as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestLight(LightType);

    impl Light for TestLight {
        fn get_type(&self) -> LightType {
            self.0
        }

        fn power(&self) -> Spectrum {
            Spectrum::ONE
        }

        fn sample_li(&self, p: &Point3f, _n: Option<&Normal3f>, _u: &Point2f, _uc: Float) -> Li {
            Li::none(p)
        }

        fn pdf_li(&self, _p: &Point3f, _n: Option<&Normal3f>, _wi: &Vector3f) -> Float {
            0.0
        }
    }

    fn light(t: LightType) -> ArcLight {
        Arc::new(TestLight(t))
    }

    #[test]
    fn lights_are_partitioned_by_type() {
        let area = light(LightType::AREA_LIGHT);
        let sources = LightSources::new(vec![
            light(LightType::AREA_LIGHT),
            light(LightType::DELTA_POSITION_LIGHT),
            light(LightType::INFINITE_LIGHT),
            light(LightType::DELTA_DIRECTION_LIGHT),
            Arc::clone(&area),
        ]);

        assert_eq!(sources.delta.len(), 2);
        assert_eq!(sources.infinite.len(), 1);
        assert_eq!(sources.area.len(), 2);
        assert_eq!(sources.len(), 5);
        assert_eq!(sources.num_sampled(), 3);

        assert_eq!(sources.area_light_cdf_index(&area), Some(2));
        assert_eq!(sources.area_light_cdf_index(&light(LightType::AREA_LIGHT)), None);

        assert!(sources.get(1).unwrap().is_delta_light());
        assert_eq!(sources.get(2).unwrap().get_type(), LightType::INFINITE_LIGHT);
        assert!(same_light(sources.get(4).unwrap(), &area));
        assert!(sources.get(5).is_none());

        assert_eq!(sources.get_sampled(0).unwrap().get_type(), LightType::INFINITE_LIGHT);
        assert!(same_light(sources.get_sampled(2).unwrap(), &area));
    }

    #[test]
    fn every_area_light_maps_to_its_cdf_slot() {
        let areas: Vec<ArcLight> = (0..50).map(|_| light(LightType::AREA_LIGHT)).collect();
        let mut lights = vec![light(LightType::INFINITE_LIGHT), light(LightType::DELTA_POSITION_LIGHT)];
        lights.extend(areas.iter().cloned());
        lights.push(light(LightType::INFINITE_LIGHT));
        let sources = LightSources::new(lights);

        for (i, area) in areas.iter().enumerate() {
            let index = sources.area_light_cdf_index(area);
            assert_eq!(index, Some(i + 2));
            assert!(same_light(sources.get_sampled(i + 2).unwrap(), area));
        }
        for other in sources.infinite.iter().chain(sources.delta.iter()) {
            assert_eq!(sources.area_light_cdf_index(other), None);
        }
    }

    #[test]
    fn empty_catalog() {
        let sources = LightSources::new(vec![]);
        assert!(sources.is_empty());
        assert!(sources.get(0).is_none());
    }
}
