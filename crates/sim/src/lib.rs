#![deny(unsafe_code)]
//! Simulation layer for the flowfield visualizer: the arrow grid, the
//! particle swarm, and the frame loop that drives a presentation surface.
//!
//! The loop is single-threaded and strictly sequential: one close-poll, one
//! particle update pass, one draw pass per frame. All simulation state is
//! owned by [`Simulation`] for its entire lifetime; nothing is shared.

pub mod grid;
pub mod particles;
pub mod raster;
pub mod surface;

use flowfield_core::error::FlowError;
use flowfield_core::field::FieldKind;
use flowfield_core::prng::Xorshift64;
use flowfield_core::scene::SceneConfig;
use flowfield_core::Rgba;

use grid::ArrowGrid;
use particles::ParticleSwarm;
use surface::{Surface, ARROW_OUTLINE};

pub use grid::ArrowCell;
pub use particles::Particle;
pub use raster::RasterSurface;
pub use surface::{DrawCall, RecordingSurface};

/// Tracer fill color.
const PARTICLE_COLOR: Rgba = Rgba::new(255, 255, 255, 255);

/// A fully constructed scene: the active field, the one-time arrow grid,
/// and the particle swarm, ready to drive a [`Surface`].
pub struct Simulation {
    config: SceneConfig,
    field: FieldKind,
    grid: ArrowGrid,
    swarm: ParticleSwarm,
}

impl Simulation {
    /// Validates the config, builds the field and the arrow grid, and
    /// scatters the swarm from the config's seed.
    pub fn new(config: SceneConfig) -> Result<Self, FlowError> {
        config.validate()?;
        let field = config.build_field()?;
        let grid = ArrowGrid::build(&config, &field)?;
        let mut rng = Xorshift64::new(config.seed);
        let swarm = ParticleSwarm::scatter(&config, &mut rng);
        tracing::debug!(
            field = %config.field,
            cells = grid.rows() * grid.cols(),
            particles = swarm.len(),
            "simulation constructed"
        );
        Ok(Self {
            config,
            field,
            grid,
            swarm,
        })
    }

    /// The scene configuration this simulation was built from.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The one-time arrow grid.
    pub fn grid(&self) -> &ArrowGrid {
        &self.grid
    }

    /// The particle swarm.
    pub fn swarm(&self) -> &ParticleSwarm {
        &self.swarm
    }

    /// Executes one frame against `surface`.
    ///
    /// Polls for close first and returns `false` without touching the frame
    /// if requested. Otherwise steps every particle, then draws: clear, the
    /// full arrow pass, the full particle pass, present. Returns `true`.
    pub fn frame<S>(&mut self, surface: &mut S) -> bool
    where
        S: Surface + ?Sized,
    {
        if surface.close_requested() {
            return false;
        }

        self.swarm.step(&self.field);

        surface.clear();
        for cell in self.grid.iter() {
            surface.draw_polygon(
                &ARROW_OUTLINE,
                cell.position,
                cell.rotation_degrees,
                self.config.arrow_scale,
                cell.color,
            );
        }
        for particle in self.swarm.iter() {
            surface.draw_circle(particle.position, self.config.particle_size, PARTICLE_COLOR);
        }
        surface.present();
        true
    }

    /// Drives frames until the surface requests close; returns the number of
    /// frames rendered.
    ///
    /// Surfaces that never close (the offline rasterizer) make this loop
    /// forever; bound the frame count by calling [`Self::frame`] directly.
    pub fn run<S>(&mut self, surface: &mut S) -> u64
    where
        S: Surface + ?Sized,
    {
        let mut frames = 0;
        while self.frame(surface) {
            frames += 1;
        }
        frames
    }
}
