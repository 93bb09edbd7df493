//! Block Catalog
//!
//! Which prefab each placeable shape instantiates, plus the material the
//! preview is tinted with. A shape with no prefab cannot be previewed.

use std::collections::HashMap;

use glam::{Vec3, Vec4};

use crate::physics::{BoxCollider, Material, Prefab};
use crate::world::{GridSnapConfig, ShapeKind};

/// Name given to the transient preview object.
pub const PREVIEW_NAME: &str = "BlockPreview";

/// Shape → prefab lookup.
#[derive(Clone, Debug)]
pub struct BlockCatalog {
    prefabs: HashMap<ShapeKind, Prefab>,
    preview_material: Material,
}

impl Default for BlockCatalog {
    fn default() -> Self {
        Self::standard(&GridSnapConfig::default())
    }
}

impl BlockCatalog {
    /// Catalog with no prefabs at all.
    pub fn empty() -> Self {
        Self {
            prefabs: HashMap::new(),
            preview_material: Material::new("Preview", Vec4::new(1.0, 1.0, 1.0, 0.3)),
        }
    }

    /// Cube and wheel prefabs sized to the grid.
    ///
    /// The cube fills one cell with its pivot on the bottom face; the wheel
    /// is centred on its pivot.
    pub fn standard(grid: &GridSnapConfig) -> Self {
        let half = grid.grid_size * 0.5;
        let cube = Prefab::block(
            "Cube",
            BoxCollider::resting(Vec3::splat(half)),
            Material::new("Block", Vec4::new(0.6, 0.6, 0.62, 1.0)),
        );
        let mut wheel = Prefab::block(
            "Wheel",
            BoxCollider::centered(Vec3::new(
                grid.wheel_width * 0.5,
                grid.wheel_radius,
                grid.wheel_radius,
            )),
            Material::new("Tyre", Vec4::new(0.1, 0.1, 0.1, 1.0)),
        );
        wheel
            .materials
            .push(Material::new("Rim", Vec4::new(0.8, 0.8, 0.8, 1.0)));

        Self::empty().with(ShapeKind::Cube, cube).with(ShapeKind::Wheel, wheel)
    }

    /// Builder-style prefab assignment.
    pub fn with(mut self, kind: ShapeKind, prefab: Prefab) -> Self {
        self.set(kind, prefab);
        self
    }

    pub fn set(&mut self, kind: ShapeKind, prefab: Prefab) {
        self.prefabs.insert(kind, prefab);
    }

    pub fn remove(&mut self, kind: ShapeKind) -> Option<Prefab> {
        self.prefabs.remove(&kind)
    }

    pub fn prefab(&self, kind: ShapeKind) -> Option<&Prefab> {
        self.prefabs.get(&kind)
    }

    pub fn preview_material(&self) -> &Material {
        &self.preview_material
    }

    pub fn set_preview_material(&mut self, material: Material) {
        self.preview_material = material;
    }

    /// Offset from a placed object's pivot to the centre of the space it
    /// will occupy (the collider centre; zero without a collider).
    pub fn footprint_offset(&self, kind: ShapeKind) -> Vec3 {
        self.prefab(kind)
            .and_then(|p| p.collider)
            .map_or(Vec3::ZERO, |c| c.center)
    }
}
