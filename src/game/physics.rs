//! Constant-acceleration integration for the bird, pipes and particles.

use super::types::{Bird, Particle, Pipe};
use crate::constants::{
    FLAP_VELOCITY, GRAVITY, PARTICLES_PER_FLAP, PARTICLE_LIFE_MIN, PARTICLE_LIFE_SPREAD,
    PARTICLE_Y_OFFSET,
};
use rand::Rng;

/// Outcome of one bird integration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirdStep {
    Airborne,
    /// The bird reached the ground line. Terminal.
    Grounded,
}

/// Flap: velocity is overwritten, not accumulated.
pub fn apply_flap(bird: &mut Bird) {
    bird.vy = FLAP_VELOCITY;
}

/// Advance the bird one frame and clamp it to the playfield.
pub fn step_bird(bird: &mut Bird, ground_y: f64) -> BirdStep {
    bird.vy += GRAVITY;
    bird.y += bird.vy;

    // Ceiling holds position only; velocity is left alone so gravity
    // brings the bird back down without a bounce.
    if bird.top() < 0.0 {
        bird.y = bird.radius;
    }

    if bird.bottom() > ground_y {
        bird.y = ground_y - bird.radius;
        return BirdStep::Grounded;
    }

    BirdStep::Airborne
}

/// Scroll every pipe left by its own speed.
pub fn step_pipes(pipes: &mut [Pipe]) {
    for pipe in pipes {
        pipe.x -= pipe.speed;
    }
}

/// Drop dead particles, then move and age the rest.
pub fn step_particles(particles: &mut Vec<Particle>) {
    particles.retain(|p| p.life > 0.0);
    for p in particles.iter_mut() {
        p.x += p.vx;
        p.y += p.vy;
        p.life -= 1.0;
    }
}

/// Emit the puff shown under the bird on each flap.
pub fn spawn_flap_particles<R: Rng>(particles: &mut Vec<Particle>, bird: &Bird, rng: &mut R) {
    let y = bird.y + PARTICLE_Y_OFFSET;
    for _ in 0..PARTICLES_PER_FLAP {
        particles.push(Particle {
            x: bird.x,
            y,
            vx: rng.gen_range(-1.0..1.0),
            vy: rng.gen_range(-1.0..0.5),
            life: PARTICLE_LIFE_MIN + rng.gen::<f64>() * PARTICLE_LIFE_SPREAD,
            hue: 40.0 + rng.gen::<f64>() * 20.0,
        });
    }
}
