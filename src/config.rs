// Construction-time settings for the particle field.
//
// A `FieldConfig` is an immutable snapshot: the simulator copies it in at
// construction and never reads shared state afterwards. Browser callers fill
// a `FieldOptions` from JavaScript, every unset field falls back to the
// defaults below.

use crate::color::Color;
use wasm_bindgen::prelude::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub connection_threshold: f64, // max distance at which two particles get a line
    pub connection_alpha: f64,     // stroke alpha of a zero length connection
    pub repulsion_radius: f64,     // pointer influence radius, exclusive
    pub repulsion_strength: f64,   // velocity added per pointer event
    pub particle_color: Color,
    pub max_speed: Option<f64>, // None keeps pointer pushes unbounded
    pub seed: Option<u64>,      // fixed seed for reproducible spawns
}

impl FieldConfig {
    pub const DEFAULT_PARTICLE_COUNT: usize = 50;
    pub const DEFAULT_CONNECTION_THRESHOLD: f64 = 100.0;
    pub const DEFAULT_CONNECTION_ALPHA: f64 = 0.2;
    pub const DEFAULT_REPULSION_RADIUS: f64 = 50.0;
    pub const DEFAULT_REPULSION_STRENGTH: f64 = 0.5;

    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_connection_threshold(mut self, threshold: f64) -> Self {
        self.connection_threshold = non_negative(threshold, Self::DEFAULT_CONNECTION_THRESHOLD);
        self
    }

    pub fn with_connection_alpha(mut self, alpha: f64) -> Self {
        self.connection_alpha = non_negative(alpha, Self::DEFAULT_CONNECTION_ALPHA).min(1.0);
        self
    }

    pub fn with_repulsion(mut self, radius: f64, strength: f64) -> Self {
        self.repulsion_radius = non_negative(radius, Self::DEFAULT_REPULSION_RADIUS);
        self.repulsion_strength = if strength.is_finite() {
            strength
        } else {
            Self::DEFAULT_REPULSION_STRENGTH
        };
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.particle_color = color;
        self
    }

    pub fn with_max_speed(mut self, max_speed: Option<f64>) -> Self {
        self.max_speed = max_speed.filter(|s| s.is_finite() && *s >= 0.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: Self::DEFAULT_PARTICLE_COUNT,
            connection_threshold: Self::DEFAULT_CONNECTION_THRESHOLD,
            connection_alpha: Self::DEFAULT_CONNECTION_ALPHA,
            repulsion_radius: Self::DEFAULT_REPULSION_RADIUS,
            repulsion_strength: Self::DEFAULT_REPULSION_STRENGTH,
            particle_color: Color::WHITE,
            max_speed: None,
            seed: None,
        }
    }
}

fn non_negative(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

/// JavaScript facing builder for [`FieldConfig`].
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, Default)]
pub struct FieldOptions {
    particle_count: Option<u32>,
    connection_threshold: Option<f64>,
    repulsion_radius: Option<f64>,
    repulsion_strength: Option<f64>,
    particle_color: Option<u32>,
    max_speed: Option<f64>,
    seed: Option<u32>,
}

#[wasm_bindgen]
impl FieldOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> FieldOptions {
        FieldOptions::default()
    }

    pub fn set_particle_count(&mut self, count: u32) {
        self.particle_count = Some(count);
    }

    pub fn set_connection_threshold(&mut self, threshold: f64) {
        self.connection_threshold = Some(threshold);
    }

    pub fn set_repulsion_radius(&mut self, radius: f64) {
        self.repulsion_radius = Some(radius);
    }

    pub fn set_repulsion_strength(&mut self, strength: f64) {
        self.repulsion_strength = Some(strength);
    }

    /// Color packed as 0xRRGGBBAA, the alpha byte is ignored when drawing.
    pub fn set_particle_color(&mut self, rgba: u32) {
        self.particle_color = Some(rgba);
    }

    pub fn set_max_speed(&mut self, max_speed: f64) {
        self.max_speed = Some(max_speed);
    }

    pub fn set_seed(&mut self, seed: u32) {
        self.seed = Some(seed);
    }
}

impl From<FieldOptions> for FieldConfig {
    fn from(options: FieldOptions) -> Self {
        let defaults = FieldConfig::default();
        let mut config = defaults
            .with_particle_count(
                options
                    .particle_count
                    .map(|c| c as usize)
                    .unwrap_or(defaults.particle_count),
            )
            .with_connection_threshold(
                options
                    .connection_threshold
                    .unwrap_or(defaults.connection_threshold),
            )
            .with_repulsion(
                options.repulsion_radius.unwrap_or(defaults.repulsion_radius),
                options
                    .repulsion_strength
                    .unwrap_or(defaults.repulsion_strength),
            )
            .with_max_speed(options.max_speed);
        if let Some(rgba) = options.particle_color {
            config = config.with_color(Color::from_u32(rgba));
        }
        if let Some(seed) = options.seed {
            config = config.with_seed(seed as u64);
        }
        config
    }
}
