// Click feedback for glass buttons: the ripple circle that grows from the
// click point, and the temporary "busy" label some buttons show.

pub const RIPPLE_MS: i32 = 600;
pub const BUSY_MS: i32 = 1500;
pub const PRESS_MS: i32 = 150;
pub const PRESS_SCALE: f64 = 0.95;

/// Class that marks an element as a glass button.
pub const BUTTON_CLASS: &str = "glass-button";

/// Id of the `<style>` element that carries `PULSE_KEYFRAMES`.
pub const PULSE_STYLE_ID: &str = "glass-pulse-keyframes";

// "Animate" sets the card's animation to `pulse`, which needs these keyframes
pub const PULSE_KEYFRAMES: &str = "
    @keyframes pulse {
        0% { transform: scale(1); }
        50% { transform: scale(1.05); }
        100% { transform: scale(1); }
    }
";

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// Ripple centred on the click, sized to cover the whole button.
/// `rect` is the button's `[left, top, width, height]` in client pixels.
pub fn ripple_geometry(rect: [f64; 4], client_x: f64, client_y: f64) -> Ripple {
    let size = rect[2].max(rect[3]);
    Ripple {
        size,
        left: client_x - rect[0] - size / 2.0,
        top: client_y - rect[1] - size / 2.0,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    Interact,
    Explore,
    Animate,
    Blend,
}

impl ButtonAction {
    pub fn from_label(label: &str) -> Option<ButtonAction> {
        if label.contains("Interact") {
            Some(ButtonAction::Interact)
        } else if label.contains("Explore") {
            Some(ButtonAction::Explore)
        } else if label.contains("Animate") {
            Some(ButtonAction::Animate)
        } else if label.contains("Blend") {
            Some(ButtonAction::Blend)
        } else {
            None
        }
    }

    pub fn busy_label(self) -> &'static str {
        match self {
            ButtonAction::Interact => "Interacting...",
            ButtonAction::Explore => "Exploring...",
            ButtonAction::Animate => "Animating...",
            ButtonAction::Blend => "Blending...",
        }
    }

    /// Inline style the enclosing card gets while the action runs.
    pub fn card_effect(self) -> Option<(&'static str, &'static str)> {
        match self {
            ButtonAction::Animate => Some(("animation", "pulse 0.5s ease-in-out")),
            ButtonAction::Blend => Some((
                "background",
                "linear-gradient(45deg, rgba(255, 0, 150, 0.3), rgba(0, 255, 255, 0.3))",
            )),
            _ => None,
        }
    }
}

pub fn busy_label(label: &str) -> Option<&'static str> {
    ButtonAction::from_label(label).map(ButtonAction::busy_label)
}
