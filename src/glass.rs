// Frosted "glass" styling: blur, tint opacity and saturation applied to
// every `.glass-element` on the page.
//
// `GlassSettings` is a value type. Sliders produce a new snapshot and the
// page is restyled from that snapshot, nothing reads ambient globals.

use crate::color::Color;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlassSettings {
    pub blur_px: f64,
    pub opacity: f64,
    pub saturation_pct: f64,
}

impl GlassSettings {
    pub const DEFAULT_BLUR_PX: f64 = 15.0;
    pub const DEFAULT_OPACITY: f64 = 0.25;
    pub const DEFAULT_SATURATION_PCT: f64 = 150.0;

    pub fn with_blur(self, blur_px: f64) -> Self {
        GlassSettings {
            blur_px: at_least_zero(blur_px, self.blur_px),
            ..self
        }
    }

    pub fn with_opacity(self, opacity: f64) -> Self {
        GlassSettings {
            opacity: at_least_zero(opacity, self.opacity).min(1.0),
            ..self
        }
    }

    pub fn with_saturation(self, saturation_pct: f64) -> Self {
        GlassSettings {
            saturation_pct: at_least_zero(saturation_pct, self.saturation_pct),
            ..self
        }
    }

    pub fn reset() -> Self {
        GlassSettings::default()
    }

    /// Value for both `backdrop-filter` and `-webkit-backdrop-filter`.
    pub fn backdrop_filter(&self) -> String {
        format!(
            "blur({}px) saturate({}%)",
            self.blur_px, self.saturation_pct
        )
    }

    pub fn background_for(&self, sample: GlassSample) -> String {
        sample.tint().css_rgba(self.opacity)
    }
}

impl Default for GlassSettings {
    fn default() -> Self {
        GlassSettings {
            blur_px: Self::DEFAULT_BLUR_PX,
            opacity: Self::DEFAULT_OPACITY,
            saturation_pct: Self::DEFAULT_SATURATION_PCT,
        }
    }
}

// keep the previous value when a slider hands us garbage
fn at_least_zero(value: f64, previous: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        previous
    }
}

/// The three tinted demo panels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GlassSample {
    Coral,
    Teal,
    Amber,
}

impl GlassSample {
    pub fn tint(self) -> Color {
        match self {
            GlassSample::Coral => Color::rgb(255, 107, 107),
            GlassSample::Teal => Color::rgb(78, 205, 196),
            GlassSample::Amber => Color::rgb(255, 193, 7),
        }
    }

    pub fn from_class(class: &str) -> Option<GlassSample> {
        match class {
            "sample-1" => Some(GlassSample::Coral),
            "sample-2" => Some(GlassSample::Teal),
            "sample-3" => Some(GlassSample::Amber),
            _ => None,
        }
    }

    /// First sample class found in a space separated `class` attribute.
    pub fn from_class_list(classes: &str) -> Option<GlassSample> {
        classes.split_whitespace().find_map(GlassSample::from_class)
    }
}
