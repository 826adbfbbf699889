//! Plain-data descriptions of the static low-poly models.
//!
//! A [`Blueprint`] is a tree of [`ShapeNode`]s, each carrying a local
//! [`Transform`] and optionally one primitive with its material. A renderer
//! walks the tree with [`Blueprint::flatten`] and builds whatever meshes it
//! likes; nothing here knows about GPUs. Nodes the animation core drives at
//! runtime are tagged with a name (see [`PROPELLER`] and [`ENGINE_GLOW`]).

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3};

use crate::color::Rgb;
use crate::transform::Transform;

/// Anchor name of the biplane's spinning propeller group.
pub const PROPELLER: &str = "propeller";
/// Anchor name of the jet's pulsing engine glow group.
pub const ENGINE_GLOW: &str = "engine_glow";

/// Geometry primitive with its dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Axis-aligned box.
    Box {
        /// Extent along X.
        width: f32,
        /// Extent along Y.
        height: f32,
        /// Extent along Z.
        depth: f32,
    },
    /// Cylinder along Y, possibly tapered.
    Cylinder {
        /// Radius at `+Y`.
        radius_top: f32,
        /// Radius at `-Y`.
        radius_bottom: f32,
        /// Extent along Y.
        height: f32,
        /// Radial segment count.
        segments: u32,
    },
    /// Cone along Y with its tip at `+Y`.
    Cone {
        /// Base radius.
        radius: f32,
        /// Extent along Y.
        height: f32,
        /// Radial segment count.
        segments: u32,
    },
    /// Capsule along Y.
    Capsule {
        /// Cap radius.
        radius: f32,
        /// Length of the straight section.
        length: f32,
    },
    /// Flat disc in the XY plane.
    Circle {
        /// Disc radius.
        radius: f32,
        /// Segment count.
        segments: u32,
    },
}

/// Surface parameters for a primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Base color.
    pub color: Rgb,
    /// Microfacet roughness in `[0, 1]`.
    pub roughness: f32,
    /// Metalness in `[0, 1]`.
    pub metalness: f32,
    /// Opacity in `[0, 1]`; below 1 the primitive is drawn transparent.
    pub opacity: f32,
    /// Self-illumination strength, using `color` as the emissive color.
    pub emissive: f32,
    /// Skip lighting entirely.
    pub unlit: bool,
}

impl Material {
    /// Opaque lit material with default roughness.
    #[must_use]
    pub const fn solid(color: Rgb) -> Self {
        Self {
            color,
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
            emissive: 0.0,
            unlit: false,
        }
    }

    #[must_use]
    const fn rough(self, roughness: f32) -> Self {
        Self { roughness, ..self }
    }

    #[must_use]
    const fn metal(self, metalness: f32) -> Self {
        Self { metalness, ..self }
    }

    #[must_use]
    const fn glowing(self, emissive: f32) -> Self {
        Self { emissive, ..self }
    }
}

/// One node of a blueprint tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeNode {
    /// Anchor name for nodes animated at runtime.
    pub name: Option<&'static str>,
    /// Transform relative to the parent node.
    pub transform: Transform,
    /// Geometry drawn at this node, if any.
    pub shape: Option<(Primitive, Material)>,
    /// Child nodes.
    pub children: Vec<ShapeNode>,
}

impl ShapeNode {
    fn mesh(primitive: Primitive, material: Material, position: Vec3, rotation: Vec3) -> Self {
        Self {
            name: None,
            transform: Transform {
                position,
                rotation,
                scale: Vec3::ONE,
            },
            shape: Some((primitive, material)),
            children: Vec::new(),
        }
    }

    fn group(position: Vec3, children: Vec<ShapeNode>) -> Self {
        Self {
            name: None,
            transform: Transform::from_position(position),
            shape: None,
            children,
        }
    }

    fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    fn rotated(mut self, rotation: Vec3) -> Self {
        self.transform.rotation = rotation;
        self
    }
}

/// A primitive placed in model space, produced by [`Blueprint::flatten`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedShape {
    /// Geometry.
    pub primitive: Primitive,
    /// Surface.
    pub material: Material,
    /// Model-space matrix.
    pub matrix: Mat4,
    /// Name of the nearest named ancestor (or the node itself).
    pub anchor: Option<&'static str>,
}

/// A complete model as a shape tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    /// Root node; its transform carries the model's overall scale.
    pub root: ShapeNode,
}

impl Blueprint {
    /// Depth-first search for a named node.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ShapeNode> {
        fn walk<'a>(node: &'a ShapeNode, name: &str) -> Option<&'a ShapeNode> {
            if node.name == Some(name) {
                return Some(node);
            }
            node.children.iter().find_map(|child| walk(child, name))
        }
        walk(&self.root, name)
    }

    /// Model-space matrix of a named node (parent chain included).
    #[must_use]
    pub fn anchor_matrix(&self, name: &str) -> Option<Mat4> {
        fn walk(node: &ShapeNode, parent: Mat4, name: &str) -> Option<Mat4> {
            let matrix = parent * node.transform.matrix();
            if node.name == Some(name) {
                return Some(matrix);
            }
            node.children
                .iter()
                .find_map(|child| walk(child, matrix, name))
        }
        walk(&self.root, Mat4::IDENTITY, name)
    }

    /// Every primitive with its model-space matrix, in tree order.
    #[must_use]
    pub fn flatten(&self) -> Vec<PlacedShape> {
        fn walk(
            node: &ShapeNode,
            parent: Mat4,
            anchor: Option<&'static str>,
            out: &mut Vec<PlacedShape>,
        ) {
            let matrix = parent * node.transform.matrix();
            let anchor = node.name.or(anchor);
            if let Some((primitive, material)) = node.shape {
                out.push(PlacedShape {
                    primitive,
                    material,
                    matrix,
                    anchor,
                });
            }
            for child in &node.children {
                walk(child, matrix, anchor, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.root, Mat4::IDENTITY, None, &mut out);
        out
    }

    /// The red-winged biplane used as the hero model.
    #[must_use]
    pub fn biplane() -> Self {
        let wings = Material::solid(Rgb::hex(0xef4444));
        let fuselage = Material::solid(Rgb::hex(0xe2e8f0)).rough(0.5);
        let cockpit = Material::solid(Rgb::hex(0x1e293b));
        let struts = Material::solid(Rgb::hex(0x475569));
        let prop = Material::solid(Rgb::hex(0x78350f));
        let metal = Material::solid(Rgb::hex(0x94a3b8)).metal(0.8).rough(0.2);
        let tires = Material::solid(Rgb::hex(0x0f172a));
        let windshield = Material {
            opacity: 0.6,
            ..Material::solid(Rgb::hex(0x60a5fa)).rough(0.1).metal(0.8)
        };
        let tip = Material::solid(Rgb::hex(0xfbbf24));

        let along_z = Vec3::new(FRAC_PI_2, 0.0, 0.0);
        let cyl = |radius_top, radius_bottom, height| Primitive::Cylinder {
            radius_top,
            radius_bottom,
            height,
            segments: 16,
        };
        let cuboid = |width, height, depth| Primitive::Box {
            width,
            height,
            depth,
        };

        let body = ShapeNode::group(
            Vec3::ZERO,
            vec![
                ShapeNode::mesh(
                    cyl(0.85, 0.85, 1.5),
                    wings.rough(0.3),
                    Vec3::new(0.0, 0.0, 2.2),
                    along_z,
                ),
                ShapeNode::mesh(cyl(0.85, 0.8, 2.5), fuselage, Vec3::new(0.0, 0.0, 0.5), along_z),
                ShapeNode::mesh(cyl(0.8, 0.2, 3.0), fuselage, Vec3::new(0.0, 0.0, -2.25), along_z),
                ShapeNode::mesh(cuboid(0.9, 0.3, 1.2), cockpit, Vec3::new(0.0, 0.6, 0.2), Vec3::ZERO),
                ShapeNode::mesh(
                    cuboid(0.65, 0.4, 0.1),
                    windshield,
                    Vec3::new(0.0, 0.95, 0.8),
                    Vec3::new(0.4, 0.0, 0.0),
                ),
            ],
        );

        let mut wing_parts = vec![
            ShapeNode::mesh(cuboid(9.0, 0.15, 2.0), wings, Vec3::new(0.0, 1.6, 0.0), Vec3::ZERO),
            ShapeNode::mesh(cuboid(7.0, 0.15, 1.8), wings, Vec3::new(0.0, -0.8, 0.0), Vec3::ZERO),
        ];
        for x in [-2.5, 2.5] {
            let strut = cyl(0.04, 0.04, 2.4);
            wing_parts.push(ShapeNode::group(
                Vec3::new(x, 0.4, 0.0),
                vec![
                    ShapeNode::mesh(strut, struts, Vec3::new(0.0, 0.0, 0.5), Vec3::ZERO),
                    ShapeNode::mesh(strut, struts, Vec3::new(0.0, 0.0, -0.5), Vec3::ZERO),
                ],
            ));
        }
        let wing_set = ShapeNode::group(Vec3::new(0.0, 0.1, 1.2), wing_parts);

        let tail = ShapeNode::group(
            Vec3::new(0.0, 0.2, -3.5),
            vec![
                ShapeNode::mesh(cuboid(0.15, 1.8, 1.2), wings, Vec3::new(0.0, 0.8, 0.0), Vec3::ZERO),
                ShapeNode::mesh(
                    cuboid(0.16, 1.8, 0.1),
                    fuselage,
                    Vec3::new(0.0, 0.8, 0.61),
                    Vec3::ZERO,
                ),
                ShapeNode::mesh(cuboid(3.2, 0.15, 1.2), wings, Vec3::new(0.0, 0.2, 0.2), Vec3::ZERO),
            ],
        );

        let blade = cuboid(4.2, 0.3, 0.05);
        let blade_tip = cuboid(0.2, 0.31, 0.06);
        let spinner = ShapeNode::group(
            Vec3::ZERO,
            vec![
                ShapeNode::mesh(blade, prop, Vec3::new(0.0, 0.0, -0.2), Vec3::ZERO),
                ShapeNode::mesh(blade, prop, Vec3::new(0.0, 0.0, -0.2), Vec3::new(0.0, 0.0, FRAC_PI_2)),
                ShapeNode::mesh(blade_tip, tip, Vec3::new(2.0, 0.0, -0.19), Vec3::ZERO),
                ShapeNode::mesh(blade_tip, tip, Vec3::new(-2.0, 0.0, -0.19), Vec3::ZERO),
            ],
        )
        .named(PROPELLER);
        let nose = ShapeNode::group(
            Vec3::new(0.0, 0.0, 3.0),
            vec![
                ShapeNode::mesh(
                    Primitive::Cone {
                        radius: 0.4,
                        height: 0.6,
                        segments: 16,
                    },
                    metal,
                    Vec3::ZERO,
                    along_z,
                ),
                spinner,
            ],
        );

        let mut gear_parts = vec![
            ShapeNode::mesh(cuboid(2.0, 0.1, 0.2), struts, Vec3::new(0.0, -0.2, 0.0), Vec3::ZERO),
            ShapeNode::mesh(
                cyl(0.06, 0.06, 1.2),
                struts,
                Vec3::new(0.8, 0.3, 0.0),
                Vec3::new(0.0, 0.0, -0.5),
            ),
            ShapeNode::mesh(
                cyl(0.06, 0.06, 1.2),
                struts,
                Vec3::new(-0.8, 0.3, 0.0),
                Vec3::new(0.0, 0.0, 0.5),
            ),
        ];
        for x in [-1.1, 1.1] {
            gear_parts.push(
                ShapeNode::group(
                    Vec3::new(x, -0.3, 0.0),
                    vec![
                        ShapeNode::mesh(cyl(0.4, 0.4, 0.2), tires, Vec3::ZERO, Vec3::ZERO),
                        ShapeNode::mesh(cyl(0.15, 0.15, 0.21), metal, Vec3::ZERO, Vec3::ZERO),
                    ],
                )
                .rotated(along_z),
            );
        }
        gear_parts.push(ShapeNode::group(
            Vec3::new(0.0, 0.4, -5.0),
            vec![
                ShapeNode::mesh(
                    cyl(0.03, 0.03, 0.6),
                    struts,
                    Vec3::new(0.0, -0.4, 0.0),
                    Vec3::new(0.3, 0.0, 0.0),
                ),
                ShapeNode::mesh(cyl(0.15, 0.15, 0.1), tires, Vec3::new(0.0, -0.7, 0.1), along_z),
            ],
        ));
        let gear = ShapeNode::group(Vec3::new(0.0, -0.8, 1.8), gear_parts);

        let mut root = ShapeNode::group(Vec3::ZERO, vec![body, wing_set, tail, nose, gear]);
        root.transform.scale = Vec3::splat(0.5);
        Self { root }
    }

    /// The dark delta-wing jet with twin glowing engines.
    #[must_use]
    pub fn jet() -> Self {
        let hull = Material::solid(Rgb::hex(0x1e293b)).rough(0.3).metal(0.8);
        let wing = Material::solid(Rgb::hex(0x334155)).rough(0.4).metal(0.6);
        let accent = Material::solid(Rgb::hex(0x8b5cf6));
        let glass = Material::solid(Rgb::hex(0x0ea5e9))
            .rough(0.1)
            .metal(0.9)
            .glowing(0.2);
        let nacelle = Material::solid(Rgb::hex(0x475569));
        let glow = Material {
            unlit: true,
            ..Material::solid(Rgb::hex(0xa855f7))
        };

        let wing_box = Primitive::Box {
            width: 4.0,
            height: 0.1,
            depth: 2.5,
        };
        let fin = Primitive::Box {
            width: 0.2,
            height: 1.5,
            depth: 1.0,
        };
        let engine = Primitive::Cylinder {
            radius_top: 0.4,
            radius_bottom: 0.3,
            height: 1.5,
            segments: 8,
        };
        let disc = Primitive::Circle {
            radius: 0.3,
            segments: 16,
        };
        let along_z = Vec3::new(FRAC_PI_2, 0.0, 0.0);

        let engines = ShapeNode::group(
            Vec3::new(0.0, 0.2, -2.5),
            vec![
                ShapeNode::mesh(engine, nacelle, Vec3::new(0.8, 0.0, 0.0), along_z),
                ShapeNode::mesh(engine, nacelle, Vec3::new(-0.8, 0.0, 0.0), along_z),
                ShapeNode::group(
                    Vec3::ZERO,
                    vec![
                        ShapeNode::mesh(disc, glow, Vec3::new(0.8, -0.8, 0.0), along_z),
                        ShapeNode::mesh(disc, glow, Vec3::new(-0.8, -0.8, 0.0), along_z),
                    ],
                )
                .named(ENGINE_GLOW),
            ],
        );

        let children = vec![
            ShapeNode::mesh(
                Primitive::Cone {
                    radius: 0.8,
                    height: 5.0,
                    segments: 6,
                },
                hull,
                Vec3::ZERO,
                Vec3::ZERO,
            ),
            ShapeNode::mesh(
                Primitive::Capsule {
                    radius: 0.4,
                    length: 1.5,
                },
                glass,
                Vec3::new(0.0, 0.5, 0.5),
                Vec3::new(-0.5, 0.0, 0.0),
            ),
            ShapeNode::group(
                Vec3::new(0.0, 0.0, 0.5),
                vec![
                    ShapeNode::mesh(wing_box, wing, Vec3::new(-2.0, 0.0, 0.5), Vec3::new(0.0, 0.0, 0.1)),
                    ShapeNode::mesh(wing_box, wing, Vec3::new(2.0, 0.0, 0.5), Vec3::new(0.0, 0.0, -0.1)),
                ],
            ),
            ShapeNode::mesh(fin, accent, Vec3::new(3.8, 0.3, 1.0), Vec3::ZERO),
            ShapeNode::mesh(fin, accent, Vec3::new(-3.8, 0.3, 1.0), Vec3::ZERO),
            engines,
            ShapeNode::mesh(
                Primitive::Box {
                    width: 0.2,
                    height: 0.2,
                    depth: 2.0,
                },
                accent.glowing(0.5),
                Vec3::new(0.0, 0.85, -1.0),
                Vec3::ZERO,
            ),
        ];

        let mut root = ShapeNode::group(Vec3::ZERO, children).rotated(Vec3::new(0.0, PI, 0.0));
        root.transform.scale = Vec3::splat(0.4);
        Self { root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_biplane_has_propeller_anchor() {
        let plane = Blueprint::biplane();
        let prop = plane.find(PROPELLER).expect("propeller anchor");
        assert_eq!(prop.children.len(), 4);
    }

    #[test]
    fn test_propeller_sits_at_nose() {
        let m = Blueprint::biplane().anchor_matrix(PROPELLER).unwrap();
        let hub = m.transform_point3(Vec3::ZERO);
        // Nose group is at z = 3.0 under a 0.5 root scale.
        assert!((hub.z - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_flatten_tags_propeller_shapes() {
        let shapes = Blueprint::biplane().flatten();
        let tagged = shapes
            .iter()
            .filter(|s| s.anchor == Some(PROPELLER))
            .count();
        assert_eq!(tagged, 4);
        assert!(shapes.len() > 20);
    }

    #[test]
    fn test_jet_has_engine_glow_anchor() {
        let jet = Blueprint::jet();
        assert!(jet.find(ENGINE_GLOW).is_some());
        assert!(jet.find(PROPELLER).is_none());
        let glow: Vec<_> = jet
            .flatten()
            .into_iter()
            .filter(|s| s.anchor == Some(ENGINE_GLOW))
            .collect();
        assert_eq!(glow.len(), 2);
        assert!(glow.iter().all(|s| s.material.unlit));
    }

    #[test]
    fn test_flattened_matrices_finite() {
        for blueprint in [Blueprint::biplane(), Blueprint::jet()] {
            assert!(blueprint.flatten().iter().all(|s| s.matrix.is_finite()));
        }
    }
}
