// Tilt cards lean towards the pointer: hovering the top edge tips the card
// back, the right edge turns it right. Values are in css degrees and pixels.

extern crate nalgebra_glm as glm;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tilt {
    pub rotate_x_deg: f64,
    pub rotate_y_deg: f64,
    pub lift_px: f64,
}

impl Tilt {
    pub const PERSPECTIVE_PX: f64 = 1000.0;
    pub const MAX_DEG: f64 = 10.0;
    pub const LIFT_PX: f64 = 20.0;

    /// Resting pose, applied when the pointer leaves the card.
    pub const NEUTRAL: Tilt = Tilt {
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
        lift_px: 0.0,
    };

    pub fn css(&self) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) translateZ({}px)",
            Tilt::PERSPECTIVE_PX,
            unsigned_zero(self.rotate_x_deg),
            unsigned_zero(self.rotate_y_deg),
            unsigned_zero(self.lift_px)
        )
    }
}

/// Tilt for a pointer at `pointer` inside a card of `size`, both in the
/// card's local pixels.
pub fn tilt_for(pointer: [f64; 2], size: [f64; 2], max_deg: f64) -> Tilt {
    if !(size[0] > 0.0 && size[1] > 0.0) || !pointer.iter().all(|v| v.is_finite()) {
        return Tilt::NEUTRAL;
    }
    let center = glm::vec2(size[0] / 2.0, size[1] / 2.0);
    let offset = (glm::vec2(pointer[0], pointer[1]) - center).component_div(&center);
    Tilt {
        rotate_x_deg: -offset.y * max_deg,
        rotate_y_deg: offset.x * max_deg,
        lift_px: Tilt::LIFT_PX,
    }
}

// -0 would print as "-0deg"
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
