use crate::factory::{PrimitiveFactory, PrimitiveHandle};
use crate::spin::{self, SpinPhase, SpinState};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use voxglobe_common::{GlobeConfig, SurfaceMaterials, Transform};
use voxglobe_input::PointerInput;
use voxglobe_terrain::{Surface, TerrainGenerator, Voxel};

/// An event record produced by globe mutations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GlobeEvent {
    /// The voxel set was rebuilt from scratch.
    Regenerated {
        voxel_count: usize,
        land_count: usize,
    },
    /// The rotation controller switched mode.
    SpinPhaseChanged {
        tick: u64,
        from: SpinPhase,
        to: SpinPhase,
    },
}

/// The globe aggregate: voxel shell, world transform and rotation state.
///
/// Voxels are never edited in place. [`regenerate`](Self::regenerate) builds
/// the complete new set before touching the published one, so hosts never
/// observe a half-built shell. Only [`tick`](Self::tick) moves the transform.
#[derive(Debug, Clone)]
pub struct Globe {
    config: GlobeConfig,
    materials: SurfaceMaterials,
    voxels: Vec<Voxel>,
    primitives: Vec<PrimitiveHandle>,
    transform: Transform,
    spin: SpinState,
    angular_velocity: Vec3,
    tick: u64,
    event_log: Vec<GlobeEvent>,
}

impl Globe {
    /// Create an empty globe at the configured center. No voxels yet.
    pub fn new(config: GlobeConfig, materials: SurfaceMaterials) -> Self {
        Self {
            transform: Transform::from_position(config.terrain.center),
            config,
            materials,
            voxels: Vec::new(),
            primitives: Vec::new(),
            spin: SpinState::default(),
            angular_velocity: Vec3::ZERO,
            tick: 0,
            event_log: Vec::new(),
        }
    }

    /// Create a globe and publish its first shell through `factory`.
    pub fn start(
        config: GlobeConfig,
        materials: SurfaceMaterials,
        factory: &mut impl PrimitiveFactory,
    ) -> Self {
        let mut globe = Self::new(config, materials);
        globe.regenerate(factory);
        globe
    }

    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    pub fn materials(&self) -> SurfaceMaterials {
        self.materials
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    /// Primitive handles, parallel to [`voxels`](Self::voxels).
    pub fn primitives(&self) -> &[PrimitiveHandle] {
        &self.primitives
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn spin(&self) -> &SpinState {
        &self.spin
    }

    pub fn phase(&self) -> SpinPhase {
        self.spin.phase()
    }

    /// Angular velocity applied on the most recent tick, degrees per second.
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn land_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.surface.is_land()).count()
    }

    pub fn water_count(&self) -> usize {
        self.voxels.len() - self.land_count()
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<GlobeEvent> {
        std::mem::take(&mut self.event_log)
    }

    pub fn events(&self) -> &[GlobeEvent] {
        &self.event_log
    }

    /// Rebuild the shell from the current config and republish it.
    pub fn regenerate(&mut self, factory: &mut impl PrimitiveFactory) {
        let voxels = TerrainGenerator::new(self.config.terrain).generate();
        self.publish(voxels, factory);
    }

    /// Replace the configuration and rebuild the shell.
    ///
    /// Orientation and rotation state carry over; the new spin tuning applies
    /// from the next tick.
    pub fn reconfigure(&mut self, config: GlobeConfig, factory: &mut impl PrimitiveFactory) {
        self.config = config;
        self.transform.position = config.terrain.center;
        self.regenerate(factory);
    }

    /// Swap the material handles and republish the existing shell.
    pub fn set_materials(
        &mut self,
        materials: SurfaceMaterials,
        factory: &mut impl PrimitiveFactory,
    ) {
        self.materials = materials;
        let voxels = std::mem::take(&mut self.voxels);
        self.publish(voxels, factory);
    }

    fn publish(&mut self, voxels: Vec<Voxel>, factory: &mut impl PrimitiveFactory) {
        factory.destroy_all();
        let center = self.config.terrain.center;
        self.primitives = voxels
            .iter()
            .map(|v| {
                let material = match v.surface {
                    Surface::Land => self.materials.land,
                    Surface::Water => self.materials.water,
                };
                factory.create_primitive(v.position - center, v.size, material)
            })
            .collect();
        self.voxels = voxels;

        let land_count = self.land_count();
        tracing::info!(
            voxels = self.voxels.len(),
            land = land_count,
            "globe published"
        );
        self.event_log.push(GlobeEvent::Regenerated {
            voxel_count: self.voxels.len(),
            land_count,
        });
    }

    /// Advance one frame: run the rotation controller and apply its delta.
    /// Returns the angular velocity applied.
    pub fn tick(&mut self, input: &PointerInput, dt: f32) -> Vec3 {
        self.tick += 1;
        let from = self.spin.phase();
        let step = spin::advance(self.spin, input, dt, &self.config.spin);
        self.transform.rotate_world(step.rotation(dt));
        self.spin = step.state;
        self.angular_velocity = step.angular_velocity;

        let to = self.spin.phase();
        if from != to {
            tracing::debug!(tick = self.tick, %from, %to, "spin phase changed");
            self.event_log.push(GlobeEvent::SpinPhaseChanged {
                tick: self.tick,
                from,
                to,
            });
        }
        step.angular_velocity
    }

    /// Deterministic FNV-1a hash of the voxel set, for comparing generations.
    pub fn voxel_hash(&self) -> u64 {
        voxel_hash(&self.voxels)
    }
}

/// FNV-1a over each voxel's cell, position, size and surface, in generation order.
pub fn voxel_hash(voxels: &[Voxel]) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    let mut mix = |bytes: &[u8]| {
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(0x0100_0000_01b3);
        }
    };
    for v in voxels {
        for c in v.cell.to_array() {
            mix(&c.to_le_bytes());
        }
        for p in v.position.to_array() {
            mix(&p.to_le_bytes());
        }
        mix(&v.size.to_le_bytes());
        mix(&[v.surface.is_land() as u8]);
    }
    h
}
