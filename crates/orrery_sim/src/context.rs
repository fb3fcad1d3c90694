use bevy::math::{DAffine3, DVec3};
use bevy::prelude::*;
use orrery_core::{
    BodyId, CelestialBody, ConfigError, MeshHandle, OrreryConfig, SimError, SpeedConfig,
};

use crate::clock::SimulationClock;
use crate::events::ControlEvent;
use crate::renderer::{SceneRenderer, TransformSink};
use crate::scene::{BodyTransform, NodeIndex, NodeKind, SceneGraph};
use crate::speed::SpeedState;
use crate::starfield::Starfield;
use crate::updater::{self, OrbitParams};

/// Everything the simulation owns: body records, the scene hierarchy, speeds,
/// the clock and the starfield. Built in one piece by [`SimulationContext::assemble`].
#[derive(Resource, Debug)]
pub struct SimulationContext {
    /// Indexed by `BodyId::index()`
    bodies: Vec<CelestialBody>,
    /// Scene node of each body, same indexing as `bodies`
    body_nodes: Vec<NodeIndex>,
    ring: NodeIndex,
    scene: SceneGraph,
    speeds: SpeedState,
    speed_bounds: SpeedConfig,
    clock: SimulationClock,
    starfield: Starfield,
    params: OrbitParams,
}

impl SimulationContext {
    /// Build the whole scene: nine bodies at (orbital_radius, 0, 0), Saturn's
    /// ring as a child of Saturn, default speeds and the starfield.
    ///
    /// Either everything is built or nothing is returned.
    pub fn assemble(
        config: &OrreryConfig,
        renderer: &mut impl SceneRenderer,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut scene = SceneGraph::default();
        let mut bodies = Vec::with_capacity(BodyId::ALL.len());
        let mut body_nodes = Vec::with_capacity(BodyId::ALL.len());

        for id in BodyId::ALL {
            let body_config = config
                .body(id)
                .ok_or_else(|| ConfigError::Invalid(format!("no parameters for {id}")))?;

            let mesh = renderer.create_mesh(&body_config.geometry(), &body_config.material());
            let initial = BodyTransform::at(DVec3::new(body_config.orbital_radius, 0.0, 0.0));
            renderer.set_transform(mesh, &initial);

            body_nodes.push(scene.add_root(NodeKind::Body(id), mesh, initial));
            bodies.push(body_config.to_body(mesh));
        }

        let saturn = BodyId::Saturn.index();
        let ring_mesh = renderer.create_mesh(&config.ring.geometry(), &config.ring.material());
        let ring_local = BodyTransform {
            translation: DVec3::from_array(config.ring.offset),
            rotation: DVec3::new(config.ring.tilt_x, 0.0, 0.0),
        };
        renderer.attach_child(bodies[saturn].mesh, ring_mesh, &ring_local);
        let ring = scene.add_child(body_nodes[saturn], NodeKind::Ring, ring_mesh, ring_local);

        let speeds = SpeedState::with_defaults(&bodies, &config.speed);
        let starfield = Starfield::generate(&config.starfield);

        info!(
            "Scene assembled: {} bodies, ring on {}, {} stars",
            bodies.len(),
            BodyId::Saturn,
            starfield.len()
        );

        Ok(Self {
            bodies,
            body_nodes,
            ring,
            scene,
            speeds,
            speed_bounds: config.speed.clone(),
            clock: SimulationClock::new(),
            starfield,
            params: OrbitParams::from_config(config),
        })
    }

    /// Apply one UI event. Out-of-range speeds are clamped with a warning
    /// so an invalid value never reaches the speed state.
    pub fn apply_event(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::SetSpeed { body, value } => match self.speeds.set_speed(body, value) {
                Ok(()) => {}
                Err(SimError::InputOutOfRange { .. }) => {
                    let clamped = self.speed_bounds.clamp(value);
                    warn!("{body} speed {value} out of range, clamped to {clamped}");
                    if let Err(e) = self.speeds.set_speed(body, clamped) {
                        error!("{e}");
                    }
                }
                Err(e) => warn!("ignoring speed change: {e}"),
            },
            ControlEvent::TogglePause => {
                let paused = self.clock.toggle_pause();
                info!(
                    "Simulation {} at {:.3}s",
                    if paused { "paused" } else { "resumed" },
                    self.clock.elapsed()
                );
            }
        }
    }

    /// One frame: apply queued events, advance the clock, recompute every body.
    /// While paused nothing moves. Returns the elapsed simulation seconds.
    pub fn tick(&mut self, events: impl IntoIterator<Item = ControlEvent>, real_dt: f64) -> f64 {
        for event in events {
            self.apply_event(event);
        }

        let elapsed = self.clock.tick(real_dt);
        if self.clock.is_paused() {
            return elapsed;
        }

        for (index, result) in self.compute_transforms(elapsed).into_iter().enumerate() {
            match result {
                Ok(transform) => self.scene.set_local(self.body_nodes[index], transform),
                // One broken body must not stop the others
                Err(e) => error!("skipping {}: {e}", self.bodies[index].id),
            }
        }
        elapsed
    }

    /// Pure snapshot of every body's transform at `elapsed`, in body order
    pub fn compute_transforms(&self, elapsed: f64) -> Vec<Result<BodyTransform, SimError>> {
        self.bodies
            .iter()
            .map(|body| updater::update_body(body, &self.speeds, elapsed, &self.params))
            .collect()
    }

    /// Push the current body transforms to the renderer
    pub fn write_transforms(&self, sink: &mut impl TransformSink) {
        for (body, node) in self.bodies.iter().zip(&self.body_nodes) {
            sink.set_transform(body.mesh, &self.scene.node(*node).local);
        }
    }

    pub fn body(&self, id: BodyId) -> &CelestialBody {
        &self.bodies[id.index()]
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Current local (parent-relative) transform of a body
    pub fn transform_of(&self, id: BodyId) -> BodyTransform {
        self.scene.node(self.body_nodes[id.index()]).local
    }

    pub fn world_transform_of(&self, id: BodyId) -> DAffine3 {
        self.scene.world_transform(self.body_nodes[id.index()])
    }

    pub fn ring_world_transform(&self) -> DAffine3 {
        self.scene.world_transform(self.ring)
    }

    pub fn ring_mesh(&self) -> MeshHandle {
        self.scene.node(self.ring).mesh
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn speeds(&self) -> &SpeedState {
        &self.speeds
    }

    pub fn speed_bounds(&self) -> &SpeedConfig {
        &self.speed_bounds
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    #[cfg(test)]
    pub(crate) fn speeds_mut(&mut self) -> &mut SpeedState {
        &mut self.speeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingRenderer;
    use orrery_core::GeometrySpec;
    use std::iter;

    fn assembled() -> (SimulationContext, RecordingRenderer) {
        let mut renderer = RecordingRenderer::default();
        let context = SimulationContext::assemble(&OrreryConfig::default(), &mut renderer).unwrap();
        (context, renderer)
    }

    fn run(context: &mut SimulationContext, frames: usize, dt: f64) {
        for _ in 0..frames {
            context.tick(iter::empty(), dt);
        }
    }

    #[test]
    fn test_assembly_builds_nine_bodies_and_ring() {
        let (context, renderer) = assembled();
        assert_eq!(context.bodies().len(), 9);
        assert_eq!(renderer.mesh_count(), 10);
        assert_eq!(context.scene().len(), 10);

        for body in context.bodies() {
            let recorded = renderer.mesh(body.mesh).unwrap();
            assert_eq!(recorded.transform.translation.x, body.orbital_radius);
            assert!(matches!(recorded.geometry, GeometrySpec::Sphere { .. }));
            assert!(recorded.parent.is_none());
        }

        let saturn = context.body(BodyId::Saturn).mesh;
        assert_eq!(renderer.children_of(saturn), vec![context.ring_mesh()]);
        let ring = renderer.mesh(context.ring_mesh()).unwrap();
        assert!(matches!(ring.geometry, GeometrySpec::Ring { .. }));
        assert_eq!(context.starfield().len(), 5000);
    }

    #[test]
    fn test_assembly_rejects_bad_config() {
        let mut config = OrreryConfig::default();
        config.bodies[2].orbital_radius = -1.0;
        let mut renderer = RecordingRenderer::default();
        let err = SimulationContext::assemble(&config, &mut renderer).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert_eq!(renderer.mesh_count(), 0);
    }

    #[test]
    fn test_tick_keeps_orbits_circular() {
        let (mut context, _) = assembled();
        run(&mut context, 600, 1.0 / 60.0);
        for id in BodyId::PLANETS {
            let p = context.transform_of(id).translation;
            let r = context.body(id).orbital_radius;
            assert!(((p.x * p.x + p.z * p.z).sqrt() - r).abs() < 1e-9, "{id}");
        }
        assert_eq!(context.transform_of(BodyId::Sun).translation, DVec3::ZERO);
    }

    #[test]
    fn test_transforms_depend_only_on_elapsed() {
        let (mut many, _) = assembled();
        let (mut one, _) = assembled();
        run(&mut many, 1000, 0.01);
        one.tick(iter::empty(), many.clock().elapsed());
        for id in BodyId::ALL {
            let a = many.transform_of(id);
            let b = one.transform_of(id);
            assert!(a.translation.abs_diff_eq(b.translation, 1e-9), "{id}");
            assert!(a.rotation.abs_diff_eq(b.rotation, 1e-9), "{id}");
        }
    }

    #[test]
    fn test_compute_transforms_idempotent() {
        let (context, _) = assembled();
        let first = context.compute_transforms(42.0);
        let second = context.compute_transforms(42.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let (mut context, _) = assembled();
        run(&mut context, 30, 1.0 / 30.0);
        context.tick([ControlEvent::TogglePause], 1.0 / 30.0);
        let frozen: Vec<_> = BodyId::ALL.iter().map(|id| context.transform_of(*id)).collect();
        let elapsed = context.clock().elapsed();

        for _ in 0..120 {
            assert_eq!(context.tick(iter::empty(), 1.0 / 30.0), elapsed);
        }
        // A speed change while paused does not move anything yet
        context.tick(
            [ControlEvent::SetSpeed {
                body: BodyId::Earth,
                value: 99.0,
            }],
            1.0,
        );
        let after: Vec<_> = BodyId::ALL.iter().map(|id| context.transform_of(*id)).collect();
        assert_eq!(frozen, after);

        context.tick([ControlEvent::TogglePause], 0.5);
        assert!(!context.is_paused());
        assert!((context.clock().elapsed() - (elapsed + 0.5)).abs() < 1e-12);
        assert_ne!(context.transform_of(BodyId::Earth), frozen[BodyId::Earth.index()]);
    }

    #[test]
    fn test_pause_resume_same_frame_is_noop() {
        let (mut context, _) = assembled();
        run(&mut context, 10, 0.1);
        let elapsed = context.clock().elapsed();
        let was_paused = context.is_paused();
        context.apply_event(ControlEvent::TogglePause);
        context.apply_event(ControlEvent::TogglePause);
        assert_eq!(context.is_paused(), was_paused);
        assert_eq!(context.clock().elapsed(), elapsed);
    }

    #[test]
    fn test_speed_event_applies_before_tick() {
        let (mut context, _) = assembled();
        context.tick(
            [ControlEvent::SetSpeed {
                body: BodyId::Earth,
                value: 1.0,
            }],
            10.0,
        );
        let p = context.transform_of(BodyId::Earth).translation;
        assert!((p.x - 34.825).abs() < 1e-3);
        assert!((p.z - 3.494).abs() < 1e-3);
    }

    #[test]
    fn test_out_of_range_event_clamped() {
        let (mut context, _) = assembled();
        context.apply_event(ControlEvent::SetSpeed {
            body: BodyId::Mars,
            value: 250.0,
        });
        assert_eq!(context.speeds().get_speed(BodyId::Mars), Ok(100.0));
        context.apply_event(ControlEvent::SetSpeed {
            body: BodyId::Mars,
            value: -4.0,
        });
        assert_eq!(context.speeds().get_speed(BodyId::Mars), Ok(1.0));
    }

    #[test]
    fn test_speed_event_for_sun_ignored() {
        let (mut context, _) = assembled();
        let before = context.speeds().clone();
        context.apply_event(ControlEvent::SetSpeed {
            body: BodyId::Sun,
            value: 50.0,
        });
        assert_eq!(context.speeds(), &before);
    }

    #[test]
    fn test_desync_skips_only_that_body() {
        let (mut context, _) = assembled();
        run(&mut context, 5, 0.2);
        let stuck = context.transform_of(BodyId::Jupiter);
        let earth_before = context.transform_of(BodyId::Earth);
        context.speeds_mut().remove_for_test(BodyId::Jupiter);

        context.tick(iter::empty(), 0.2);
        assert_eq!(context.transform_of(BodyId::Jupiter), stuck);
        assert_ne!(context.transform_of(BodyId::Earth), earth_before);
    }

    #[test]
    fn test_ring_follows_saturn() {
        let (mut context, _) = assembled();
        let offset = DVec3::from_array(OrreryConfig::default().ring.offset);
        for _ in 0..50 {
            context.tick(iter::empty(), 3.7);
            let saturn = context.world_transform_of(BodyId::Saturn);
            let ring = context.ring_world_transform();
            let expected = saturn.transform_point3(offset);
            assert!(ring.translation.abs_diff_eq(expected, 1e-9));
            assert!(ring.translation.abs_diff_eq(saturn.translation, 1e-9));
        }
    }

    #[test]
    fn test_ring_offset_rides_with_saturn_spin() {
        let mut config = OrreryConfig::default();
        config.ring.offset = [0.0, 1.5, -2.0];
        let offset = DVec3::from_array(config.ring.offset);
        let mut renderer = RecordingRenderer::default();
        let mut context = SimulationContext::assemble(&config, &mut renderer).unwrap();

        let mut saw_rotated_offset = false;
        for _ in 0..40 {
            context.tick(iter::empty(), 2.3);
            let saturn = context.transform_of(BodyId::Saturn);
            assert!(saturn.rotation.length() > 0.0);

            // Saturn's position plus its rotated local offset
            let expected = saturn.translation + saturn.quat() * offset;
            let ring = context.ring_world_transform().translation;
            assert!(ring.abs_diff_eq(expected, 1e-9), "{ring} vs {expected}");

            let saturn_world = context.world_transform_of(BodyId::Saturn);
            assert!(ring.abs_diff_eq(saturn_world.transform_point3(offset), 1e-9));
            assert!((ring.distance(saturn.translation) - offset.length()).abs() < 1e-9);

            if !ring.abs_diff_eq(saturn.translation + offset, 1e-6) {
                saw_rotated_offset = true;
            }
        }
        assert!(saw_rotated_offset);
    }

    #[test]
    fn test_write_transforms_reaches_renderer() {
        let (mut context, mut renderer) = assembled();
        let writes_after_assembly = renderer.writes;
        context.tick(iter::empty(), 2.0);
        context.write_transforms(&mut renderer);
        assert_eq!(renderer.writes, writes_after_assembly + 9);

        let transforms = renderer.transforms();
        for id in BodyId::ALL {
            assert_eq!(transforms[&context.body(id).mesh], context.transform_of(id));
        }
        // The ring keeps its fixed local transform
        let ring = transforms[&context.ring_mesh()];
        assert!((ring.rotation.x - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert_eq!(ring.translation, DVec3::ZERO);
    }
}
