//! Massless tracer particles advected by the field.
//!
//! Each frame, every particle samples the field at its current position and
//! steps by the sampled vector times the scene's speed factor — explicit
//! Euler, no time scaling, so fast-field regions move particles farther per
//! frame. Particles are never created or destroyed after scatter; ones that
//! drift off-canvas keep integrating indefinitely.

use flowfield_core::field::FlowField;
use flowfield_core::prng::Xorshift64;
use flowfield_core::scene::SceneConfig;
use glam::DVec2;

/// A single tracer: mutable position plus the displacement applied on the
/// most recent step. Velocity is transient — overwritten from the field
/// sample every frame, never integrated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
}

/// The full swarm. Count is fixed at scatter time; only positions and the
/// transient velocities change afterward.
#[derive(Debug, Clone)]
pub struct ParticleSwarm {
    particles: Vec<Particle>,
    speed: f64,
}

impl ParticleSwarm {
    /// Scatters `config.num_particles` particles uniformly over a rectangle
    /// double the canvas size, centered on the canvas:
    /// `[-W/2, 3W/2) x [-H/2, 3H/2)`.
    ///
    /// The margin lets particles flow into view from outside over time.
    /// Initial velocity is zero; the first `step` overwrites it.
    pub fn scatter(config: &SceneConfig, rng: &mut Xorshift64) -> Self {
        let w = config.canvas_width;
        let h = config.canvas_height;
        let particles = (0..config.num_particles)
            .map(|_| Particle {
                position: DVec2::new(
                    rng.next_range(-w / 2.0, 1.5 * w),
                    rng.next_range(-h / 2.0, 1.5 * h),
                ),
                velocity: DVec2::ZERO,
            })
            .collect();
        Self {
            particles,
            speed: config.particle_speed,
        }
    }

    /// Advances every particle by one explicit-Euler step.
    ///
    /// Applied identically and independently per particle: sample the field
    /// at the current position, scale by the speed factor, add in place.
    /// The displacement is a pure function of position, so stepping from
    /// the same position under the same field always moves the same way.
    pub fn step<F>(&mut self, field: &F)
    where
        F: FlowField + ?Sized,
    {
        for particle in &mut self.particles {
            let displacement = field.sample(particle.position) * self.speed;
            particle.position += displacement;
            particle.velocity = displacement;
        }
    }

    /// Number of particles in the swarm.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the swarm is empty.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Iterates over all particles.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowfield_core::field::{Radial, Rotation, Swirl};
    use flowfield_core::vec2::magnitude;

    fn config_with(n: usize) -> SceneConfig {
        SceneConfig {
            num_particles: n,
            ..Default::default()
        }
    }

    #[test]
    fn scatter_produces_requested_count() {
        let config = config_with(500);
        let swarm = ParticleSwarm::scatter(&config, &mut Xorshift64::new(1));
        assert_eq!(swarm.len(), 500);
    }

    #[test]
    fn scatter_zero_particles_is_empty() {
        let config = config_with(0);
        let swarm = ParticleSwarm::scatter(&config, &mut Xorshift64::new(1));
        assert!(swarm.is_empty());
    }

    #[test]
    fn scatter_stays_in_double_size_rectangle() {
        let config = config_with(2000);
        let swarm = ParticleSwarm::scatter(&config, &mut Xorshift64::new(7));
        let (w, h) = (config.canvas_width, config.canvas_height);
        for p in swarm.iter() {
            assert!(p.position.x >= -w / 2.0 && p.position.x < 1.5 * w, "{p:?}");
            assert!(p.position.y >= -h / 2.0 && p.position.y < 1.5 * h, "{p:?}");
        }
    }

    #[test]
    fn scatter_is_deterministic_per_seed() {
        let config = config_with(100);
        let a = ParticleSwarm::scatter(&config, &mut Xorshift64::new(42));
        let b = ParticleSwarm::scatter(&config, &mut Xorshift64::new(42));
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn scatter_initial_velocity_is_zero() {
        let config = config_with(50);
        let swarm = ParticleSwarm::scatter(&config, &mut Xorshift64::new(3));
        assert!(swarm.iter().all(|p| p.velocity == DVec2::ZERO));
    }

    #[test]
    fn step_scales_displacement_by_speed() {
        let config = SceneConfig {
            num_particles: 1,
            particle_speed: 0.1,
            ..Default::default()
        };
        let field = Swirl::new(config.center());
        let mut swarm = ParticleSwarm::scatter(&config, &mut Xorshift64::new(5));
        let before = swarm.iter().next().unwrap().position;
        let expected = field.sample(before) * 0.1;
        swarm.step(&field);
        let after = swarm.iter().next().unwrap();
        assert_eq!(after.position, before + expected);
        assert_eq!(after.velocity, expected);
    }

    #[test]
    fn step_is_a_pure_function_of_position() {
        // Two swarms starting identically must trace identical paths.
        let config = config_with(200);
        let field = Swirl::new(config.center());
        let mut a = ParticleSwarm::scatter(&config, &mut Xorshift64::new(11));
        let mut b = a.clone();
        for _ in 0..25 {
            a.step(&field);
            b.step(&field);
        }
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_eq!(pa, pb);
        }
    }

    #[test]
    fn particle_at_field_fixed_point_does_not_move() {
        let config = config_with(1);
        let field = Rotation::new(config.center());
        let mut swarm = ParticleSwarm::scatter(&config, &mut Xorshift64::new(2));
        // Pin the single particle to the rotation field's fixed point.
        let mut pinned = ParticleSwarm {
            particles: vec![Particle {
                position: config.center(),
                velocity: DVec2::ZERO,
            }],
            speed: config.particle_speed,
        };
        pinned.step(&field);
        let p = pinned.particles[0];
        assert_eq!(p.position, config.center());
        assert_eq!(p.velocity, DVec2::ZERO);
        // The scattered swarm still steps normally.
        swarm.step(&field);
    }

    #[test]
    fn off_canvas_particles_keep_integrating() {
        let config = SceneConfig {
            num_particles: 1,
            ..Default::default()
        };
        let field = Radial::new(config.center());
        let mut swarm = ParticleSwarm {
            particles: vec![Particle {
                // Far outside the visible canvas.
                position: DVec2::new(-5000.0, -5000.0),
                velocity: DVec2::ZERO,
            }],
            speed: config.particle_speed,
        };
        let before = swarm.particles[0].position;
        swarm.step(&field);
        assert_ne!(swarm.particles[0].position, before);
    }

    // -- Property-based tests --

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn displacement_magnitude_is_speed_times_sample(
                x in -2000.0_f64..2000.0,
                y in -2000.0_f64..2000.0,
                speed in 0.0_f64..10.0,
            ) {
                let config = SceneConfig {
                    num_particles: 0,
                    particle_speed: speed,
                    ..Default::default()
                };
                let field = Swirl::new(config.center());
                let mut swarm = ParticleSwarm {
                    particles: vec![Particle {
                        position: DVec2::new(x, y),
                        velocity: DVec2::ZERO,
                    }],
                    speed,
                };
                let sample_mag = magnitude(field.sample(DVec2::new(x, y)));
                swarm.step(&field);
                let moved = magnitude(swarm.particles[0].velocity);
                prop_assert!(
                    (moved - speed * sample_mag).abs() < 1e-9,
                    "|d| = {moved}, speed * |v| = {}",
                    speed * sample_mag
                );
            }
        }
    }
}
