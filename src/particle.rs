// Simple particle struct to keep track of individual position and velocity.
// Radius and opacity are picked once at spawn and never change afterwards.

use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    radius: f64,
    opacity: f64,
}

impl Particle {
    pub const MIN_RADIUS: f64 = 1.0;
    pub const MAX_RADIUS: f64 = 4.0;
    pub const MIN_OPACITY: f64 = 0.2;
    pub const MAX_OPACITY: f64 = 0.7;
    pub const MAX_SPAWN_SPEED: f64 = 1.0;

    pub fn new(pos: Vector2<f64>, vel: Vector2<f64>, radius: f64, opacity: f64) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            opacity,
        }
    }

    /// Spawns a particle anywhere inside a `width` x `height` surface.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: f64, height: f64) -> Particle {
        // gen::<f64>() is in [0, 1), scaling keeps zero sized surfaces at 0
        // where gen_range(0.0..0.0) would panic
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * Particle::MAX_SPAWN_SPEED;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * Particle::MAX_SPAWN_SPEED;
        let radius = rng.gen_range(Particle::MIN_RADIUS, Particle::MAX_RADIUS);
        let opacity = rng.gen_range(Particle::MIN_OPACITY, Particle::MAX_OPACITY);
        Particle::new([pos_x, pos_y], [vel_x, vel_y], radius, opacity)
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn speed(&self) -> f64 {
        vecmath::vec2_len(self.vel)
    }

    /// Advances one frame and bounces off the `[0, width] x [0, height]` box.
    pub fn update(&mut self, width: f64, height: f64) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
        let bounds = [width, height];
        for axis in 0..2 {
            if self.pos[axis] < 0.0 || self.pos[axis] > bounds[axis] {
                self.vel[axis] *= -1.0;
            }
            // a fast particle can overshoot by more than one frame's travel
            self.pos[axis] = self.pos[axis].max(0.0).min(bounds[axis]);
        }
    }

    /// Pushes the particle directly away from `from` if it sits strictly
    /// inside `radius`. Returns whether the particle was pushed.
    ///
    /// When the particle sits exactly on `from` the direction is undefined,
    /// `atan2(0, 0)` is `0` so the push falls back to the +x axis.
    pub fn repel_from(&mut self, from: Vector2<f64>, radius: f64, strength: f64) -> bool {
        let away = vecmath::vec2_sub(self.pos, from);
        if vecmath::vec2_len(away) >= radius {
            return false;
        }
        let angle = away[1].atan2(away[0]);
        let push = vecmath::vec2_scale([angle.cos(), angle.sin()], strength);
        self.vel = vecmath::vec2_add(self.vel, push);
        true
    }

    /// Rescales the velocity so its length is at most `max_speed`.
    pub fn limit_speed(&mut self, max_speed: f64) {
        let speed = self.speed();
        if speed > max_speed && speed > 0.0 {
            self.vel = vecmath::vec2_scale(self.vel, max_speed / speed);
        }
    }
}
