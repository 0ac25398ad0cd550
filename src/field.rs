// The particle field: a fixed population of drifting points that bounce off
// the surface edges, get pushed away from the pointer, and are joined by
// faint lines when they come close to each other.
//
// Connections are found by checking every unordered pair, which is O(N²).
// That is fine for the default 50 particles but will not scale past the low
// hundreds; larger populations need a spatial grid in front of
// `ParticleField::connections`.

use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::surface::Surface;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A line between particles `a` and `b` (with `a < b`) drawn at `alpha`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub alpha: f64,
}

pub struct ParticleField {
    width: f64,
    height: f64,
    config: FieldConfig,
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Builds a field seeded from `config.seed`, or from entropy when unset.
    pub fn new(width: f64, height: f64, config: FieldConfig) -> Self {
        match config.seed {
            Some(seed) => ParticleField::with_seed(width, height, config, seed),
            None => ParticleField::with_rng(width, height, config, &mut rand::thread_rng()),
        }
    }

    pub fn with_seed(width: f64, height: f64, config: FieldConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        ParticleField::with_rng(width, height, config, &mut rng)
    }

    pub fn with_rng<R: Rng + ?Sized>(
        width: f64,
        height: f64,
        config: FieldConfig,
        rng: &mut R,
    ) -> Self {
        let width = dimension(width);
        let height = dimension(height);
        let mut particles = Vec::with_capacity(config.particle_count);
        for _ in 0..config.particle_count {
            particles.push(Particle::random(rng, width, height));
        }
        log::debug!(
            "spawned {} particles on a {}x{} surface",
            particles.len(),
            width,
            height
        );
        ParticleField {
            width,
            height,
            config,
            particles,
        }
    }

    /// Builds a field around an explicit particle set, mostly for tests and
    /// replaying a captured state.
    pub fn from_particles(
        width: f64,
        height: f64,
        config: FieldConfig,
        particles: Vec<Particle>,
    ) -> Self {
        ParticleField {
            width: dimension(width),
            height: dimension(height),
            config,
            particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// New bounds take effect on the next step, which clamps stragglers back in.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = dimension(width);
        self.height = dimension(height);
    }

    /// One animation frame: clear, move, then draw.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        surface.clear();
        self.step();
        self.draw(surface);
    }

    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for particle in &mut self.particles {
            particle.update(width, height);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let color = self.config.particle_color;
        for p in &self.particles {
            surface.fill_circle(p.pos, p.radius(), color, p.opacity());
        }
        for c in self.connections() {
            let from = self.particles[c.a].pos;
            let to = self.particles[c.b].pos;
            surface.stroke_line(from, to, color, c.alpha);
        }
    }

    /// Every unordered pair closer than the connection threshold, once each.
    pub fn connections(&self) -> Vec<Connection> {
        let threshold = self.config.connection_threshold;
        let base_alpha = self.config.connection_alpha;
        let mut connections = Vec::new();
        if threshold <= 0.0 {
            return connections;
        }
        for (a, pa) in self.particles.iter().enumerate() {
            for (offset, pb) in self.particles[a + 1..].iter().enumerate() {
                let distance = vecmath::vec2_len(vecmath::vec2_sub(pa.pos, pb.pos));
                if distance < threshold {
                    connections.push(Connection {
                        a,
                        b: a + 1 + offset,
                        alpha: base_alpha * (1.0 - distance / threshold),
                    });
                }
            }
        }
        connections
    }

    /// Pushes every particle near the pointer directly away from it.
    /// Returns how many particles were pushed.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> usize {
        if !x.is_finite() || !y.is_finite() {
            return 0;
        }
        let radius = self.config.repulsion_radius;
        let strength = self.config.repulsion_strength;
        let max_speed = self.config.max_speed;
        let mut pushed = 0;
        for particle in &mut self.particles {
            if particle.repel_from([x, y], radius, strength) {
                if let Some(max_speed) = max_speed {
                    particle.limit_speed(max_speed);
                }
                pushed += 1;
            }
        }
        pushed
    }
}

fn dimension(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Recorder};

    fn field_with(particles: Vec<Particle>) -> ParticleField {
        ParticleField::from_particles(400.0, 300.0, FieldConfig::default(), particles)
    }

    fn at(x: f64, y: f64) -> Particle {
        Particle::new([x, y], [0.0, 0.0], 2.0, 0.5)
    }

    #[test]
    fn particles_stay_inside_bounds() {
        let mut field = ParticleField::with_seed(320.0, 240.0, FieldConfig::default(), 3);
        let mut surface = Recorder::new(320.0, 240.0);
        for frame in 0..2_000 {
            // keep stirring so some particles get fast
            if frame % 7 == 0 {
                let p = field.particles()[frame % field.len()].pos;
                field.on_pointer_move(p[0] + 1.0, p[1] + 1.0);
            }
            field.tick(&mut surface);
            for p in field.particles() {
                assert!(p.pos[0] >= 0.0 && p.pos[0] <= 320.0, "x out of bounds: {:?}", p);
                assert!(p.pos[1] >= 0.0 && p.pos[1] <= 240.0, "y out of bounds: {:?}", p);
                assert!(p.vel[0].is_finite() && p.vel[1].is_finite());
            }
            surface.commands.clear();
        }
    }

    #[test]
    fn population_never_changes() {
        let mut field = ParticleField::with_seed(800.0, 600.0, FieldConfig::default(), 11);
        let mut surface = Recorder::new(800.0, 600.0);
        assert_eq!(field.len(), 50);
        for _ in 0..300 {
            field.tick(&mut surface);
        }
        assert_eq!(field.len(), 50);
        assert_eq!(surface.circles().count(), 50);
    }

    #[test]
    fn tick_bounces_particle_at_right_edge() {
        let mut field = field_with(vec![Particle::new([399.9, 150.0], [5.0, 0.0], 2.0, 0.5)]);
        let mut surface = Recorder::new(400.0, 300.0);
        field.tick(&mut surface);
        let p = field.particles()[0];
        assert!(p.vel[0] < 0.0);
        assert_eq!(p.pos[0], 400.0);
    }

    #[test]
    fn tick_clears_before_drawing() {
        let mut field = field_with(vec![at(10.0, 10.0)]);
        let mut surface = Recorder::new(400.0, 300.0);
        field.tick(&mut surface);
        assert_eq!(surface.commands[0], DrawCommand::Clear);
        assert_eq!(
            surface.commands[1],
            DrawCommand::Circle {
                center: [10.0, 10.0],
                radius: 2.0,
                color: crate::color::Color::WHITE,
                alpha: 0.5,
            }
        );
    }

    #[test]
    fn each_close_pair_is_connected_once() {
        let mut field = field_with(vec![at(100.0, 100.0), at(150.0, 100.0), at(350.0, 250.0)]);
        let connections = field.connections();
        assert_eq!(connections.len(), 1);
        assert_eq!((connections[0].a, connections[0].b), (0, 1));
        assert!((connections[0].alpha - 0.1).abs() < 1e-12);

        let mut surface = Recorder::new(400.0, 300.0);
        field.tick(&mut surface);
        assert_eq!(surface.lines().count(), 1);
    }

    #[test]
    fn pair_at_threshold_is_not_connected() {
        let field = field_with(vec![at(0.0, 0.0), at(100.0, 0.0)]);
        assert!(field.connections().is_empty());
    }

    #[test]
    fn dense_cluster_connects_every_pair() {
        let particles = (0..6).map(|i| at(10.0 + i as f64, 10.0)).collect();
        let field = field_with(particles);
        let connections = field.connections();
        assert_eq!(connections.len(), 6 * 5 / 2);
        for c in &connections {
            assert!(c.a < c.b);
            assert!(!connections
                .iter()
                .any(|o| o.a == c.b && o.b == c.a));
        }
    }

    #[test]
    fn pointer_pushes_nearby_particle_away() {
        let mut field = field_with(vec![at(110.0, 100.0), at(300.0, 100.0)]);
        assert_eq!(field.on_pointer_move(100.0, 100.0), 1);
        assert!(field.particles()[0].vel[0] > 0.0);
        assert_eq!(field.particles()[1].vel, [0.0, 0.0]);
    }

    #[test]
    fn pointer_on_particle_keeps_velocity_finite() {
        let mut field = field_with(vec![at(42.0, 24.0)]);
        field.on_pointer_move(42.0, 24.0);
        let v = field.particles()[0].vel;
        assert!(v[0].is_finite() && v[1].is_finite());
    }

    #[test]
    fn non_finite_pointer_is_ignored() {
        let mut field = field_with(vec![at(42.0, 24.0)]);
        assert_eq!(field.on_pointer_move(f64::NAN, 24.0), 0);
        assert_eq!(field.particles()[0].vel, [0.0, 0.0]);
    }

    #[test]
    fn repeated_pushes_grow_without_cap_by_default() {
        let mut field = field_with(vec![at(110.0, 100.0)]);
        for _ in 0..100 {
            field.on_pointer_move(100.0, 100.0);
        }
        assert!((field.particles()[0].vel[0] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn max_speed_caps_pushes() {
        let config = FieldConfig::default().with_max_speed(Some(2.0));
        let mut field = ParticleField::from_particles(400.0, 300.0, config, vec![at(110.0, 100.0)]);
        for _ in 0..100 {
            field.on_pointer_move(100.0, 100.0);
        }
        assert!(field.particles()[0].speed() <= 2.0 + 1e-9);
    }

    #[test]
    fn same_seed_replays_identically() {
        let run = || {
            let mut field = ParticleField::with_seed(640.0, 480.0, FieldConfig::default(), 1234);
            let mut surface = Recorder::new(640.0, 480.0);
            let mut frames = Vec::new();
            for frame in 0..120 {
                if frame % 10 == 0 {
                    field.on_pointer_move(320.0, 240.0 + frame as f64);
                }
                field.tick(&mut surface);
                frames.push(field.particles().to_vec());
            }
            (frames, surface.commands)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn seed_from_config_is_used() {
        let config = FieldConfig::default().with_seed(77);
        let a = ParticleField::new(200.0, 200.0, config);
        let b = ParticleField::with_seed(200.0, 200.0, config, 77);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn zero_sized_surface_is_accepted() {
        let mut field = ParticleField::with_seed(0.0, 0.0, FieldConfig::default(), 5);
        let mut surface = Recorder::new(0.0, 0.0);
        field.tick(&mut surface);
        for p in field.particles() {
            assert_eq!(p.pos, [0.0, 0.0]);
        }
    }

    #[test]
    fn empty_field_draws_nothing() {
        let config = FieldConfig::default().with_particle_count(0);
        let mut field = ParticleField::with_seed(100.0, 100.0, config, 5);
        let mut surface = Recorder::new(100.0, 100.0);
        field.tick(&mut surface);
        assert!(field.is_empty());
        assert_eq!(surface.commands, vec![DrawCommand::Clear]);
    }

    #[test]
    fn shrinking_pulls_particles_back_in() {
        let mut field = field_with(vec![at(390.0, 290.0)]);
        field.resize(100.0, 100.0);
        field.step();
        let p = field.particles()[0];
        assert_eq!(p.pos, [100.0, 100.0]);
    }
}
