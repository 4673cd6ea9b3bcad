//! The solar system scene: node layout, materials, and per-frame motion.
//!
//! [`SolarSystem`] owns a [`SceneGraph`] populated with the sun, its point
//! light, an orbit pivot carrying the earth, the orbit ring and the star
//! field. It is GPU-free; the renderer reads it through
//! [`SolarSystem::graph`] and [`SolarSystem::shape`].

mod graph;
mod light;
mod material;

use std::f32::consts::{FRAC_PI_2, TAU};

pub use graph::{MeshAttachment, Node, NodeId, SceneGraph, Transform};
use glam::Vec3;
pub use light::PointLight;
pub use material::{Material, MeshKind, Shading};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::options::{LightingOptions, SceneOptions};
use crate::util::color::Color;

/// Geometry parameters for one [`MeshKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// UV sphere centered on the origin.
    Sphere {
        /// Radius.
        radius: f32,
        /// Segments around the equator and from pole to pole.
        segments: u32,
    },
    /// Flat annulus in the local XY plane.
    Ring {
        /// Inner radius.
        inner: f32,
        /// Outer radius.
        outer: f32,
        /// Segments around the circle.
        segments: u32,
    },
}

/// Wrap a monotonically advancing angle into `[0, 2π)`.
fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Whether two scene configurations produce the same nodes and meshes,
/// differing at most in motion speeds and ring visibility.
#[must_use]
pub fn same_layout(a: &SceneOptions, b: &SceneOptions) -> bool {
    let strip = |options: &SceneOptions| {
        let mut options = options.clone();
        options.sun.spin_per_frame = 0.0;
        options.earth.spin_per_frame = 0.0;
        options.earth.orbit_speed = 0.0;
        options.orbit_ring.visible = true;
        options
    };
    strip(a) == strip(b)
}

/// Sun, earth, orbit ring and stars arranged in a scene graph.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    graph: SceneGraph,
    sun: NodeId,
    light_node: NodeId,
    earth_orbit: NodeId,
    earth: NodeId,
    orbit_ring: NodeId,
    stars: Vec<NodeId>,
    light: PointLight,
    options: SceneOptions,
    frames: u64,
}

impl SolarSystem {
    /// Build the scene. Stars are scattered with the configured seed, or
    /// with a thread-local random seed when none is set.
    #[must_use]
    pub fn new(scene: &SceneOptions, lighting: &LightingOptions) -> Self {
        match scene.stars.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                Self::with_rng(scene, lighting, &mut rng)
            }
            None => Self::with_rng(scene, lighting, &mut rand::rng()),
        }
    }

    /// Build the scene, drawing star positions from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        scene: &SceneOptions,
        lighting: &LightingOptions,
        rng: &mut R,
    ) -> Self {
        let mut graph = SceneGraph::new();

        let sun = graph.add_mesh(
            "sun",
            Transform::default(),
            None,
            MeshAttachment {
                kind: MeshKind::Sun,
                material: Material::standard(
                    Color::from_hex(scene.sun.color),
                    Color::from_hex(scene.sun.emissive),
                ),
            },
        );
        let light_node = graph.add("sun_light", Transform::default(), None);

        let earth_orbit = graph.add("earth_orbit", Transform::default(), None);
        let earth = graph.add_mesh(
            "earth",
            Transform::from_position(Vec3::new(
                scene.earth.orbit_distance,
                0.0,
                0.0,
            )),
            Some(earth_orbit),
            MeshAttachment {
                kind: MeshKind::Earth,
                material: Material::standard(
                    Color::from_hex(scene.earth.color),
                    Color::from_hex(scene.earth.emissive),
                ),
            },
        );

        let orbit_ring = graph.add_mesh(
            "orbit_ring",
            Transform::from_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
            None,
            MeshAttachment {
                kind: MeshKind::OrbitRing,
                material: Material::basic(Color::from_hex(
                    scene.orbit_ring.color,
                ))
                .double_sided(),
            },
        );
        graph.node_mut(orbit_ring).visible = scene.orbit_ring.visible;

        let half = scene.stars.spread.abs() / 2.0;
        let star_material = MeshAttachment {
            kind: MeshKind::Star,
            material: Material::basic(Color::from_hex(scene.stars.color)),
        };
        let stars = (0..scene.stars.count)
            .map(|i| {
                let position = Vec3::new(
                    rng.random_range(-half..=half),
                    rng.random_range(-half..=half),
                    rng.random_range(-half..=half),
                );
                graph.add_mesh(
                    format!("star_{i}"),
                    Transform::from_position(position),
                    None,
                    star_material,
                )
            })
            .collect::<Vec<_>>();

        log::debug!(
            "solar system populated: {} nodes, {} stars",
            graph.len(),
            stars.len()
        );

        Self {
            graph,
            sun,
            light_node,
            earth_orbit,
            earth,
            orbit_ring,
            stars,
            light: PointLight::from_options(lighting),
            options: scene.clone(),
            frames: 0,
        }
    }

    /// One animation tick.
    ///
    /// Sun and earth spin by a fixed amount per call, so their speed follows
    /// the frame rate. The orbit pivot angle is recomputed from
    /// `elapsed_secs`, so the orbit period is independent of it.
    pub fn advance(&mut self, elapsed_secs: f64) {
        let sun_spin = self.options.sun.spin_per_frame;
        let earth_spin = self.options.earth.spin_per_frame;
        let orbit_speed = f64::from(self.options.earth.orbit_speed);
        let orbit_angle = (elapsed_secs * orbit_speed)
            .rem_euclid(std::f64::consts::TAU) as f32;

        let sun = &mut self.graph.node_mut(self.sun).transform.rotation;
        sun.y = wrap_angle(sun.y + sun_spin);

        self.graph.node_mut(self.earth_orbit).transform.rotation.y =
            wrap_angle(orbit_angle);

        let earth = &mut self.graph.node_mut(self.earth).transform.rotation;
        earth.y = wrap_angle(earth.y + earth_spin);

        self.frames += 1;
    }

    /// Adopt new motion speeds and ring visibility without touching node
    /// layout. Callers rebuild when [`same_layout`] is false.
    pub fn apply_motion(&mut self, scene: &SceneOptions) {
        self.graph.node_mut(self.orbit_ring).visible = scene.orbit_ring.visible;
        self.options = scene.clone();
    }

    /// Replace the point light's parameters.
    pub fn set_lighting(&mut self, lighting: &LightingOptions) {
        self.light = PointLight::from_options(lighting);
    }

    /// Show or hide the orbit ring. Returns the new visibility.
    pub fn toggle_orbit_ring(&mut self) -> bool {
        let node = self.graph.node_mut(self.orbit_ring);
        node.visible = !node.visible;
        self.options.orbit_ring.visible = node.visible;
        node.visible
    }

    /// Geometry parameters for `kind`.
    #[must_use]
    pub fn shape(&self, kind: MeshKind) -> Shape {
        let o = &self.options;
        match kind {
            MeshKind::Sun => Shape::Sphere {
                radius: o.sun.radius,
                segments: o.sun.segments,
            },
            MeshKind::Earth => Shape::Sphere {
                radius: o.earth.radius,
                segments: o.earth.segments,
            },
            MeshKind::Star => Shape::Sphere {
                radius: o.stars.radius,
                segments: o.stars.segments,
            },
            MeshKind::OrbitRing => Shape::Ring {
                inner: o.earth.orbit_distance - o.orbit_ring.half_width,
                outer: o.earth.orbit_distance + o.orbit_ring.half_width,
                segments: o.orbit_ring.segments,
            },
        }
    }

    /// The scene graph.
    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// The sun node.
    #[must_use]
    pub fn sun(&self) -> NodeId {
        self.sun
    }

    /// The earth node.
    #[must_use]
    pub fn earth(&self) -> NodeId {
        self.earth
    }

    /// The group node whose rotation carries the earth around the sun.
    #[must_use]
    pub fn earth_orbit(&self) -> NodeId {
        self.earth_orbit
    }

    /// The orbit ring node.
    #[must_use]
    pub fn orbit_ring(&self) -> NodeId {
        self.orbit_ring
    }

    /// Star nodes in creation order.
    #[must_use]
    pub fn stars(&self) -> &[NodeId] {
        &self.stars
    }

    /// The sun's point light.
    #[must_use]
    pub fn light(&self) -> &PointLight {
        &self.light
    }

    /// World-space position of the point light.
    #[must_use]
    pub fn light_position(&self) -> Vec3 {
        self.graph.world_position(self.light_node)
    }

    /// Clear color.
    #[must_use]
    pub fn background(&self) -> Color {
        Color::from_hex(self.options.background)
    }

    /// Number of [`advance`](Self::advance) calls so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU as TAU64;

    use super::*;

    fn seeded() -> SolarSystem {
        let mut scene = SceneOptions::default();
        scene.stars.seed = Some(42);
        SolarSystem::new(&scene, &LightingOptions::default())
    }

    /// Shortest distance between two angles on the circle.
    fn orbit_angle(system: &SolarSystem) -> f32 {
        system.graph().node(system.earth_orbit()).transform.rotation.y
    }

    fn angle_gap(a: f64, b: f64) -> f64 {
        let d = (a - b).rem_euclid(TAU64);
        d.min(TAU64 - d)
    }

    #[test]
    fn orbit_angle_is_a_function_of_elapsed_time() {
        let mut system = seeded();
        for seconds in [0.0, 1.0, 7.5, 60.0, 3600.0] {
            system.advance(seconds);
            let angle = orbit_angle(&system);
            let gap = angle_gap(f64::from(angle), 0.5 * seconds);
            assert!(gap < 1e-5, "{seconds}");
            assert!((0.0..TAU).contains(&angle));
        }
    }

    #[test]
    fn earth_spin_accumulates_per_frame() {
        let mut system = seeded();
        let frames = 1000;
        for i in 0..frames {
            system.advance(f64::from(i) / 60.0);
        }
        let spin = system.graph().node(system.earth()).transform.rotation.y;
        let expected = f64::from(frames) * 0.02;
        assert!(angle_gap(f64::from(spin), expected) < 1e-3);
        assert!((0.0..TAU).contains(&spin));

        let sun = system.graph().node(system.sun()).transform.rotation.y;
        assert!(angle_gap(f64::from(sun), f64::from(frames) * 0.005) < 1e-3);
        assert_eq!(system.frame_count(), 1000);
    }

    #[test]
    fn star_field_has_requested_count_within_bounds() {
        let system = SolarSystem::new(
            &SceneOptions::default(),
            &LightingOptions::default(),
        );
        assert_eq!(system.stars().len(), 200);
        for &star in system.stars() {
            let p = system.graph().world_position(star);
            for c in p.to_array() {
                assert!((-150.0..=150.0).contains(&c), "{p}");
            }
        }
    }

    #[test]
    fn same_seed_same_field() {
        let a = seeded();
        let b = seeded();
        let positions = |s: &SolarSystem| {
            s.stars()
                .iter()
                .map(|&id| s.graph().world_position(id))
                .collect::<Vec<_>>()
        };
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn earth_travels_on_the_orbit_circle() {
        let mut system = seeded();
        for seconds in [0.0_f64, 0.8, 2.4, 10.0] {
            system.advance(seconds);
            let p = system.graph().world_position(system.earth());
            let theta = (0.5 * seconds) as f32;
            let expected =
                Vec3::new(15.0 * theta.cos(), 0.0, -15.0 * theta.sin());
            assert!((p - expected).length() < 1e-3, "{p} vs {expected}");
        }
    }

    #[test]
    fn orbit_ring_lies_in_the_xz_plane() {
        let system = seeded();
        let m = system.graph().world_matrix(system.orbit_ring());
        let on_ring = m.transform_point3(Vec3::new(15.0, 0.0, 0.0));
        let quarter = m.transform_point3(Vec3::new(0.0, 15.0, 0.0));
        assert!(on_ring.y.abs() < 1e-5);
        assert!(quarter.y.abs() < 1e-5);
        assert!((quarter.z.abs() - 15.0).abs() < 1e-4);
        assert_eq!(
            system.shape(MeshKind::OrbitRing),
            Shape::Ring { inner: 14.95, outer: 15.05, segments: 100 }
        );
    }

    #[test]
    fn toggle_ring_and_motion_updates() {
        let mut system = seeded();
        assert!(system.graph().is_visible(system.orbit_ring()));
        assert!(!system.toggle_orbit_ring());
        assert!(!system.graph().is_visible(system.orbit_ring()));

        let mut faster = SceneOptions::default();
        faster.earth.orbit_speed = 2.0;
        assert!(same_layout(&SceneOptions::default(), &faster));
        system.apply_motion(&faster);
        assert!(system.graph().is_visible(system.orbit_ring()));
        system.advance(1.0);
        assert!((orbit_angle(&system) - 2.0).abs() < 1e-6);

        let mut more_stars = SceneOptions::default();
        more_stars.stars.count = 10;
        assert!(!same_layout(&SceneOptions::default(), &more_stars));
    }

    #[test]
    fn light_and_background() {
        let system = seeded();
        assert_eq!(system.light_position(), Vec3::ZERO);
        assert_eq!(system.light().intensity, 3.0);
        assert!(system.background().b > 0.0);
        assert_eq!(system.background().r, 0.0);
    }
}
