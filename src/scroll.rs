// Scroll driven page effects: parallax blobs, the background hue drift and
// which nav link is highlighted.

/// Pixels below the top of the viewport at which a section counts as current.
pub const NAV_ANCHOR_OFFSET: f64 = 150.0;

/// Blob `index` moves at `0.5 + 0.1 * index` times the scroll speed.
pub fn parallax_offset(scroll_y: f64, index: usize) -> f64 {
    let speed = 0.5 + index as f64 * 0.1;
    scroll_y * speed
}

pub fn scroll_fraction(scroll_y: f64, max_scroll: f64) -> f64 {
    if !(max_scroll > 0.0) || !scroll_y.is_finite() {
        return 0.0;
    }
    (scroll_y / max_scroll).max(0.0).min(1.0)
}

/// Body background, drifting from blue towards purple as the page scrolls.
pub fn background_gradient(scroll_y: f64, max_scroll: f64) -> String {
    let fraction = scroll_fraction(scroll_y, max_scroll);
    let hue_start = 235.0 + fraction * 50.0;
    let hue_end = 280.0 + fraction * 30.0;
    format!(
        "linear-gradient(135deg, hsl({}, 60%, 60%) 0%, hsl({}, 55%, 55%) 100%)",
        hue_start, hue_end
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: &str, top: f64, height: f64) -> Self {
        Section {
            id: id.to_owned(),
            top,
            height,
        }
    }

    fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.top + self.height
    }
}

/// Id of the section under the nav anchor. When sections overlap the last one
/// in document order wins.
pub fn active_section(scroll_y: f64, sections: &[Section]) -> Option<&str> {
    let anchor = scroll_y + NAV_ANCHOR_OFFSET;
    sections
        .iter()
        .rev()
        .find(|s| s.contains(anchor))
        .map(|s| s.id.as_str())
}

/// Inline styles for the reveal-on-scroll fade in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub opacity: &'static str,
    pub transform: &'static str,
}

impl Reveal {
    pub const HIDDEN: Reveal = Reveal {
        opacity: "0",
        transform: "translateY(50px)",
    };
    pub const VISIBLE: Reveal = Reveal {
        opacity: "1",
        transform: "translateY(0)",
    };
    pub const TRANSITION: &'static str = "opacity 0.6s ease, transform 0.6s ease";
    pub const SELECTOR: &'static str = ".glass-card, .experiment-item, .effect-control";
}

/// Share of an element that must be on screen before it fades in.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Observer root margin, the viewport bottom is pulled up by 50px.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
