//! The solar system: every body, in draw order
//!
//! Bodies live in a [`SlotMap`] keyed by [`BodyKey`]. A separate order list
//! guarantees that parents are updated before their satellites, so each
//! satellite can pick up its parent's freshly computed orbit matrix.

use std::fmt;

use glam::Mat4;
use slotmap::{new_key_type, SlotMap};

use crate::body::{Body, BodyDesc};
use crate::catalog::STANDARD_CATALOG;
use crate::scene_transform::SceneTransform;

new_key_type! {
    /// Key for a body in the solar system
    pub struct BodyKey;
}

/// Errors building a solar system from a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A body names a parent that is not in the catalog
    UnknownParent { body: String, parent: String },
    /// A body appears before its parent
    ParentOrder { body: String, parent: String },
    /// Two bodies share a name
    DuplicateName(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::UnknownParent { body, parent } => {
                write!(f, "Body '{}' references unknown parent '{}'", body, parent)
            }
            CatalogError::ParentOrder { body, parent } => {
                write!(f, "Body '{}' is listed before its parent '{}'", body, parent)
            }
            CatalogError::DuplicateName(name) => write!(f, "Duplicate body name '{}'", name),
        }
    }
}

impl std::error::Error for CatalogError {}

struct Entry {
    body: Body,
    parent: Option<BodyKey>,
}

/// All bodies plus the global scene transform
pub struct SolarSystem {
    bodies: SlotMap<BodyKey, Entry>,
    order: Vec<BodyKey>,
    scene: SceneTransform,
}

impl SolarSystem {
    /// Build from the fixed catalog
    pub fn standard() -> Self {
        match Self::from_catalog(STANDARD_CATALOG) {
            Ok(system) => system,
            Err(e) => {
                log::error!("Standard catalog rejected: {}", e);
                Self::empty()
            }
        }
    }

    fn empty() -> Self {
        Self {
            bodies: SlotMap::with_key(),
            order: Vec::new(),
            scene: SceneTransform::identity(),
        }
    }

    /// Build from a catalog whose parents precede their satellites
    pub fn from_catalog(catalog: &[BodyDesc]) -> Result<Self, CatalogError> {
        let mut system = Self::empty();
        system.order.reserve(catalog.len());

        for (i, desc) in catalog.iter().enumerate() {
            if system.by_name(desc.name).is_some() {
                return Err(CatalogError::DuplicateName(desc.name.to_string()));
            }

            let parent = match desc.parent {
                None => None,
                Some(parent_name) => match system.by_name(parent_name) {
                    Some((key, _)) => Some(key),
                    None => {
                        let later = catalog[i + 1..].iter().any(|d| d.name == parent_name);
                        let (body, parent) = (desc.name.to_string(), parent_name.to_string());
                        return Err(if later {
                            CatalogError::ParentOrder { body, parent }
                        } else {
                            CatalogError::UnknownParent { body, parent }
                        });
                    }
                },
            };

            let key = system.bodies.insert(Entry {
                body: Body::new(*desc),
                parent,
            });
            system.order.push(key);
        }

        system.update_transforms();
        log::info!("Solar system built with {} bodies", system.len());
        Ok(system)
    }

    /// Advance every body by `frames` reference frames and refresh matrices
    pub fn advance(&mut self, frames: f32) {
        for entry in self.bodies.values_mut() {
            entry.body.advance(frames);
        }
        self.update_transforms();
    }

    /// Zero every angle and the scene transform
    pub fn reset(&mut self) {
        for entry in self.bodies.values_mut() {
            entry.body.reset();
        }
        self.scene.reset();
        self.update_transforms();
        log::info!("Scene reset");
    }

    /// Recompute world matrices from current angles, parents first
    pub fn update_transforms(&mut self) {
        let translation = self.scene.translation_matrix();
        let rotation = self.scene.rotation_matrix();
        let scale = self.scene.scale_matrix();

        for &key in &self.order {
            let parent_orbit = self.bodies[key]
                .parent
                .and_then(|p| self.bodies.get(p))
                .map(|p| p.body.orbit_chain())
                .unwrap_or(Mat4::IDENTITY);

            if let Some(entry) = self.bodies.get_mut(key) {
                entry.body.update_transform(parent_orbit, translation, rotation, scale);
            }
        }
    }

    /// Iterate bodies in draw order
    pub fn bodies(&self) -> impl Iterator<Item = (BodyKey, &Body)> + '_ {
        self.order.iter().map(move |&key| (key, &self.bodies[key].body))
    }

    pub fn get(&self, key: BodyKey) -> Option<&Body> {
        self.bodies.get(key).map(|e| &e.body)
    }

    /// Parent of a body, if it rides on another body's orbit
    pub fn parent_of(&self, key: BodyKey) -> Option<BodyKey> {
        self.bodies.get(key).and_then(|e| e.parent)
    }

    pub fn by_name(&self, name: &str) -> Option<(BodyKey, &Body)> {
        self.bodies()
            .find(|(_, body)| body.name() == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn scene_transform(&self) -> &SceneTransform {
        &self.scene
    }

    /// Mutable access to the global transform
    ///
    /// Call [`update_transforms`](Self::update_transforms) afterwards, or wait
    /// for the next [`advance`](Self::advance).
    pub fn scene_transform_mut(&mut self) -> &mut SceneTransform {
        &mut self.scene
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::standard()
    }
}
