use crate::api::types::BodyIndex;
use crate::catalog::bodies::BodyCatalog;
use crate::components::body::BodyTransform;

/// Live body transforms, addressed by dense body index.
/// The host owns the scene; the engine only mutates transforms already in it.
pub struct Scene {
    bodies: Vec<BodyTransform>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(16),
        }
    }

    /// One transform per catalog body, in index order, tagged with its name.
    pub fn from_catalog(catalog: &BodyCatalog) -> Self {
        let bodies = catalog
            .iter()
            .map(|(idx, desc)| BodyTransform::new(idx).with_tag(desc.name.clone()))
            .collect();
        Self { bodies }
    }

    /// Append a transform. Its index must equal the current length.
    pub fn push(&mut self, body: BodyTransform) {
        debug_assert_eq!(body.index.0, self.bodies.len(), "scene indices must stay dense");
        self.bodies.push(body);
    }

    /// Get a reference to a body transform by index.
    pub fn get(&self, index: BodyIndex) -> Option<&BodyTransform> {
        self.bodies.get(index.0)
    }

    /// Get a mutable reference to a body transform by index.
    pub fn get_mut(&mut self, index: BodyIndex) -> Option<&mut BodyTransform> {
        self.bodies.get_mut(index.0)
    }

    /// Find the first body with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&BodyTransform> {
        self.bodies.iter().find(|b| b.tag == tag)
    }

    /// Iterate over all transforms in index order.
    pub fn iter(&self) -> impl Iterator<Item = &BodyTransform> {
        self.bodies.iter()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn push_and_get() {
        let mut scene = Scene::new();
        scene.push(BodyTransform::new(BodyIndex(0)).with_pos(Vec3::new(1.0, 2.0, 3.0)));
        let b = scene.get(BodyIndex(0)).unwrap();
        assert_eq!(b.pos, Vec3::new(1.0, 2.0, 3.0));
        assert!(scene.get(BodyIndex(1)).is_none());
    }

    #[test]
    fn from_catalog_tags_bodies() {
        let scene = Scene::from_catalog(&BodyCatalog::solar_system());
        assert_eq!(scene.len(), 9);
        let earth = scene.find_by_tag("Earth").unwrap();
        assert_eq!(earth.index, BodyIndex(3));
    }
}
