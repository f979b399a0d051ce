//! Collision spark bursts
//!
//! Purely visual: nothing here feeds back into gameplay, but it is stepped
//! with the rest of the simulation so replays stay deterministic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use crate::consts::*;

/// A single spark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks left before removal
    pub life: u32,
}

/// Active sparks, oldest first
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    capacity: usize,
}

impl ParticleSystem {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity.min(MAX_PARTICLES)),
            capacity,
        }
    }

    /// Spawn `count` sparks flying out of `origin` in random directions
    ///
    /// When the burst would exceed the capacity, the oldest sparks make room.
    pub fn spawn_burst<R: RandomSource + ?Sized>(&mut self, origin: Vec2, count: usize, rng: &mut R) {
        if self.capacity == 0 {
            return;
        }
        let count = count.min(self.capacity);
        let overflow = (self.particles.len() + count).saturating_sub(self.capacity);
        if overflow > 0 {
            self.particles.drain(..overflow);
        }

        for _ in 0..count {
            let angle = rng.next_f32_in(0.0, std::f32::consts::TAU);
            let speed = rng.next_f32_in(BURST_SPEED_MIN, BURST_SPEED_MAX);
            // Integer life in [MIN, MAX]
            let life = rng
                .next_f32_in(BURST_LIFE_MIN as f32, (BURST_LIFE_MAX + 1) as f32)
                .floor() as u32;
            let radius = rng.next_f32_in(BURST_RADIUS_MIN, BURST_RADIUS_MAX);

            self.particles.push(Particle {
                pos: origin,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                radius,
                life: life.clamp(BURST_LIFE_MIN, BURST_LIFE_MAX),
            });
        }
    }

    /// Integrate one tick and drop expired sparks
    pub fn advance(&mut self) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel;
            particle.vel *= PARTICLE_DAMPING;
            particle.life = particle.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::FixedSequence;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_samples_within_ranges() {
        let mut system = ParticleSystem::new(MAX_PARTICLES);
        let mut rng = Pcg32::seed_from_u64(3);
        system.spawn_burst(Vec2::new(50.0, 60.0), BURST_COUNT, &mut rng);

        assert_eq!(system.len(), BURST_COUNT);
        for p in system.iter() {
            assert_eq!(p.pos, Vec2::new(50.0, 60.0));
            let speed = p.vel.length();
            assert!(speed >= BURST_SPEED_MIN - 1e-4 && speed <= BURST_SPEED_MAX + 1e-4);
            assert!(p.radius >= BURST_RADIUS_MIN && p.radius <= BURST_RADIUS_MAX);
            assert!((BURST_LIFE_MIN..=BURST_LIFE_MAX).contains(&p.life));
        }
    }

    #[test]
    fn test_fixed_source_pins_values() {
        let mut system = ParticleSystem::new(16);
        let mut rng = FixedSequence::constant(0.0);
        system.spawn_burst(Vec2::ZERO, 2, &mut rng);

        let p = &system.as_slice()[0];
        assert!((p.vel.x - BURST_SPEED_MIN).abs() < 1e-6);
        assert!(p.vel.y.abs() < 1e-6);
        assert_eq!(p.life, BURST_LIFE_MIN);
        assert!((p.radius - BURST_RADIUS_MIN).abs() < 1e-6);
    }

    #[test]
    fn test_advance_integrates_damped_velocity() {
        let mut system = ParticleSystem::new(16);
        let mut rng = FixedSequence::constant(0.0);
        system.spawn_burst(Vec2::new(10.0, 10.0), 1, &mut rng);

        let mut last_x = 10.0;
        let mut last_step = f32::MAX;
        for _ in 0..5 {
            system.advance();
            let p = &system.as_slice()[0];
            let step = p.pos.x - last_x;
            // Always moves forward along +x, each step shorter than the previous
            assert!(step > 0.0);
            assert!(step < last_step);
            assert!((p.pos.y - 10.0).abs() < 1e-6);
            last_x = p.pos.x;
            last_step = step;
        }

        let p = &system.as_slice()[0];
        let expected_vel = BURST_SPEED_MIN * PARTICLE_DAMPING.powi(5);
        assert!((p.vel.x - expected_vel).abs() < 1e-5);
        assert_eq!(p.life, BURST_LIFE_MIN - 5);
    }

    #[test]
    fn test_all_particles_expire() {
        let mut system = ParticleSystem::new(MAX_PARTICLES);
        let mut rng = Pcg32::seed_from_u64(11);
        system.spawn_burst(Vec2::ZERO, BURST_COUNT, &mut rng);
        system.spawn_burst(Vec2::ONE, BURST_COUNT, &mut rng);

        for _ in 0..BURST_LIFE_MAX {
            system.advance();
        }
        assert!(system.is_empty());
    }

    #[test]
    fn test_longest_life_survives_until_last_tick() {
        let mut system = ParticleSystem::new(16);
        // Unit value just below 1 samples the maximum life
        let mut rng = FixedSequence::constant(0.999);
        system.spawn_burst(Vec2::ZERO, 3, &mut rng);
        assert!(system.iter().all(|p| p.life == BURST_LIFE_MAX));

        for _ in 0..BURST_LIFE_MAX - 1 {
            system.advance();
        }
        assert_eq!(system.len(), 3);
        system.advance();
        assert!(system.is_empty());
    }

    #[test]
    fn test_removal_does_not_skip_neighbours() {
        let mut system = ParticleSystem::new(16);
        // Alternate short and long lives: 18, 32, 18, 32
        let mut rng = FixedSequence::new(vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.999, 0.0]);
        system.spawn_burst(Vec2::ZERO, 4, &mut rng);
        let lives: Vec<u32> = system.iter().map(|p| p.life).collect();
        assert_eq!(lives, vec![18, 32, 18, 32]);

        for _ in 0..BURST_LIFE_MIN {
            system.advance();
        }
        assert_eq!(system.len(), 2);
        assert!(system.iter().all(|p| p.life == BURST_LIFE_MAX - BURST_LIFE_MIN));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut system = ParticleSystem::new(20);
        let mut rng = FixedSequence::constant(0.0);
        system.spawn_burst(Vec2::new(1.0, 0.0), 14, &mut rng);
        system.spawn_burst(Vec2::new(2.0, 0.0), 14, &mut rng);

        assert_eq!(system.len(), 20);
        let from_first = system.iter().filter(|p| p.pos.x == 1.0).count();
        assert_eq!(from_first, 6);
        // Newest burst is intact at the end
        assert!(system.as_slice()[6..].iter().all(|p| p.pos.x == 2.0));
    }

    #[test]
    fn test_zero_capacity_disables_bursts() {
        let mut system = ParticleSystem::new(0);
        let mut rng = FixedSequence::constant(0.5);
        system.spawn_burst(Vec2::ZERO, BURST_COUNT, &mut rng);
        assert!(system.is_empty());
    }

    #[test]
    fn test_capacity_comes_from_constructor() {
        let system = ParticleSystem::new(MAX_PARTICLES);
        assert_eq!(system.capacity(), MAX_PARTICLES);
        assert!(system.is_empty());
    }
}
