// Browser bindings: everything here talks to the DOM through web-sys and
// hands the actual work to the plain Rust modules.

use crate::animation::AnimationLoop;
use crate::button::{self, ButtonAction};
use crate::config::{FieldConfig, FieldOptions};
use crate::field::ParticleField;
use crate::glass::{GlassSample, GlassSettings};
use crate::scroll::{self, Reveal, Section};
use crate::surface::CanvasSurface;
use crate::tilt::{self, Tilt};
#[cfg(feature = "frame-timing")]
use crate::utils::Timer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement,
    HtmlInputElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit,
    KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};

const MODAL_ID: &str = "glass-modal";
const MODAL_OPEN_CLASS: &str = "active";

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))
}

fn html_elements(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// A running particle field bound to a canvas. Dropping it (or calling
/// `free()` from JavaScript) stops the frame loop and unhooks the pointer
/// listener.
#[wasm_bindgen]
pub struct ParticleFieldHandle {
    field: Rc<RefCell<ParticleField>>,
    surface: Rc<RefCell<CanvasSurface>>,
    canvas: HtmlCanvasElement,
    animation: AnimationLoop,
    on_pointer: Closure<dyn FnMut(MouseEvent)>,
}

#[wasm_bindgen]
impl ParticleFieldHandle {
    /// Binds a field with default settings to `#canvas_id`. Returns nothing
    /// when the page has no such canvas.
    pub fn attach(canvas_id: &str) -> Option<ParticleFieldHandle> {
        ParticleFieldHandle::attach_with(canvas_id, FieldOptions::default())
    }

    pub fn attach_with(canvas_id: &str, options: FieldOptions) -> Option<ParticleFieldHandle> {
        match attach_field(canvas_id, options.into()) {
            Ok(handle) => handle,
            Err(err) => {
                log::warn!("particle field on #{} disabled: {:?}", canvas_id, err);
                None
            }
        }
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.animation.start()
    }

    pub fn stop(&self) {
        self.animation.stop();
    }

    pub fn is_running(&self) -> bool {
        self.animation.control().is_running()
    }

    /// Pointer position in canvas pixels. Returns how many particles moved.
    pub fn pointer_move(&self, x: f64, y: f64) -> u32 {
        self.field.borrow_mut().on_pointer_move(x, y) as u32
    }

    pub fn particle_count(&self) -> u32 {
        self.field.borrow().len() as u32
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.surface.borrow_mut().resize(width, height);
        self.field.borrow_mut().resize(width as f64, height as f64);
    }
}

impl Drop for ParticleFieldHandle {
    fn drop(&mut self) {
        self.animation.stop();
        let _ = self.canvas.remove_event_listener_with_callback(
            "mousemove",
            self.on_pointer.as_ref().unchecked_ref(),
        );
    }
}

fn attach_field(
    canvas_id: &str,
    config: FieldConfig,
) -> Result<Option<ParticleFieldHandle>, JsValue> {
    let canvas = match document()?.get_element_by_id(canvas_id) {
        Some(element) => element
            .dyn_into::<HtmlCanvasElement>()
            .map_err(JsValue::from)?,
        None => {
            log::debug!("no #{} canvas on this page", canvas_id);
            return Ok(None);
        }
    };
    let context = match canvas.get_context("2d")? {
        Some(context) => context
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?,
        None => {
            log::debug!("#{} has no 2d context", canvas_id);
            return Ok(None);
        }
    };

    let (width, height) = (canvas.width(), canvas.height());
    let field = Rc::new(RefCell::new(ParticleField::new(
        width as f64,
        height as f64,
        config,
    )));
    let surface = Rc::new(RefCell::new(CanvasSurface::new(context, width, height)));

    let animation = {
        let field = field.clone();
        let surface = surface.clone();
        AnimationLoop::new(move || {
            #[cfg(feature = "frame-timing")]
            let _timer = Timer::new("ParticleField::tick");
            field.borrow_mut().tick(&mut *surface.borrow_mut());
        })
    };

    let on_pointer = {
        let field = field.clone();
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = canvas.get_bounding_client_rect();
            let x = event.client_x() as f64 - rect.left();
            let y = event.client_y() as f64 - rect.top();
            field.borrow_mut().on_pointer_move(x, y);
        }) as Box<dyn FnMut(MouseEvent)>)
    };
    canvas.add_event_listener_with_callback("mousemove", on_pointer.as_ref().unchecked_ref())?;

    log::info!(
        "particle field attached to #{} ({}x{}, {} particles)",
        canvas_id,
        width,
        height,
        config.particle_count
    );
    Ok(Some(ParticleFieldHandle {
        field,
        surface,
        canvas,
        animation,
        on_pointer,
    }))
}

/// Owns the current glass snapshot and restyles `.glass-element` nodes.
#[wasm_bindgen]
pub struct GlassControls {
    settings: GlassSettings,
}

#[wasm_bindgen]
impl GlassControls {
    #[wasm_bindgen(constructor)]
    pub fn new() -> GlassControls {
        GlassControls {
            settings: GlassSettings::default(),
        }
    }

    pub fn blur(&self) -> f64 {
        self.settings.blur_px
    }

    pub fn opacity(&self) -> f64 {
        self.settings.opacity
    }

    pub fn saturation(&self) -> f64 {
        self.settings.saturation_pct
    }

    pub fn update_blur(&mut self, blur_px: f64) -> Result<(), JsValue> {
        self.settings = self.settings.with_blur(blur_px);
        self.apply()
    }

    pub fn update_opacity(&mut self, opacity: f64) -> Result<(), JsValue> {
        self.settings = self.settings.with_opacity(opacity);
        self.apply()
    }

    pub fn update_saturation(&mut self, saturation_pct: f64) -> Result<(), JsValue> {
        self.settings = self.settings.with_saturation(saturation_pct);
        self.apply()
    }

    /// Back to defaults, including the slider positions.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.settings = GlassSettings::reset();
        let document = document()?;
        sync_slider(&document, "blur-range", self.settings.blur_px);
        sync_slider(&document, "opacity-range", self.settings.opacity);
        sync_slider(&document, "saturation-range", self.settings.saturation_pct);
        self.apply()
    }

    pub fn apply(&self) -> Result<(), JsValue> {
        let filter = self.settings.backdrop_filter();
        for element in html_elements(&document()?, ".glass-element")? {
            let style = element.style();
            style.set_property("backdrop-filter", &filter)?;
            style.set_property("-webkit-backdrop-filter", &filter)?;
            if let Some(sample) = GlassSample::from_class_list(&element.class_name()) {
                style.set_property("background", &self.settings.background_for(sample))?;
            }
        }
        Ok(())
    }
}

impl Default for GlassControls {
    fn default() -> Self {
        GlassControls::new()
    }
}

fn sync_slider(document: &Document, id: &str, value: f64) {
    if let Some(input) = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    {
        input.set_value(&value.to_string());
    }
}

#[wasm_bindgen]
pub fn tilt_transform(x: f64, y: f64, width: f64, height: f64) -> String {
    tilt::tilt_for([x, y], [width, height], Tilt::MAX_DEG).css()
}

#[wasm_bindgen]
pub fn tilt_reset_transform() -> String {
    Tilt::NEUTRAL.css()
}

#[wasm_bindgen]
pub fn parallax_offset(scroll_y: f64, index: u32) -> f64 {
    scroll::parallax_offset(scroll_y, index as usize)
}

#[wasm_bindgen]
pub fn background_gradient(scroll_y: f64, max_scroll: f64) -> String {
    scroll::background_gradient(scroll_y, max_scroll)
}

/// `[size, left, top]` of the ripple for a click at client coordinates.
#[wasm_bindgen]
pub fn ripple_geometry(
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    client_x: f64,
    client_y: f64,
) -> Vec<f64> {
    let ripple = button::ripple_geometry([left, top, width, height], client_x, client_y);
    vec![ripple.size, ripple.left, ripple.top]
}

#[wasm_bindgen]
pub fn button_busy_label(label: &str) -> Option<String> {
    button::busy_label(label).map(str::to_owned)
}

/// Hooks up tilt cards, reveal on scroll, parallax, the background drift,
/// nav highlighting, glass buttons and the modal. Listeners live for the rest
/// of the page.
#[wasm_bindgen]
pub fn install_page_effects() -> Result<(), JsValue> {
    let document = document()?;
    let cards = install_tilt_cards(&document)?;
    install_reveal(&document)?;
    install_scroll_effects(&document)?;
    install_nav_links(&document)?;
    install_glass_buttons(&document)?;
    install_modal(&document)?;
    log::info!("page effects installed ({} tilt cards)", cards);
    Ok(())
}

fn install_tilt_cards(document: &Document) -> Result<usize, JsValue> {
    let cards = html_elements(document, "[data-tilt]")?;
    for card in &cards {
        let on_move = {
            let card = card.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                let rect = card.get_bounding_client_rect();
                let pointer = [
                    event.client_x() as f64 - rect.left(),
                    event.client_y() as f64 - rect.top(),
                ];
                let tilt = tilt::tilt_for(pointer, [rect.width(), rect.height()], Tilt::MAX_DEG);
                let _ = card.style().set_property("transform", &tilt.css());
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        let on_leave = {
            let card = card.clone();
            Closure::wrap(Box::new(move |_: MouseEvent| {
                let _ = card.style().set_property("transform", &Tilt::NEUTRAL.css());
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        card.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        card.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref())?;
        on_move.forget();
        on_leave.forget();
    }
    Ok(cards.len())
}

fn install_reveal(document: &Document) -> Result<(), JsValue> {
    let on_intersect = Closure::wrap(Box::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            for i in 0..entries.length() {
                let entry = entries.get(i).unchecked_into::<IntersectionObserverEntry>();
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if let Some(element) = target.dyn_ref::<HtmlElement>() {
                    let style = element.style();
                    let _ = style.set_property("opacity", Reveal::VISIBLE.opacity);
                    let _ = style.set_property("transform", Reveal::VISIBLE.transform);
                }
                // revealed elements stay revealed
                observer.unobserve(&target);
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let mut options = IntersectionObserverInit::new();
    options
        .threshold(&JsValue::from_f64(scroll::REVEAL_THRESHOLD))
        .root_margin(scroll::REVEAL_ROOT_MARGIN);
    let observer =
        IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &options)?;
    on_intersect.forget();

    for element in html_elements(document, Reveal::SELECTOR)? {
        let style = element.style();
        style.set_property("opacity", Reveal::HIDDEN.opacity)?;
        style.set_property("transform", Reveal::HIDDEN.transform)?;
        style.set_property("transition", Reveal::TRANSITION)?;
        observer.observe(&element);
    }
    Ok(())
}

fn install_scroll_effects(document: &Document) -> Result<(), JsValue> {
    let window = window()?;
    let on_scroll = {
        let window = window.clone();
        let document = document.clone();
        Closure::wrap(Box::new(move || {
            if let Err(err) = apply_scroll_effects(&window, &document) {
                log::warn!("scroll effects failed: {:?}", err);
            }
        }) as Box<dyn FnMut()>)
    };
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();
    Ok(())
}

fn apply_scroll_effects(window: &Window, document: &Document) -> Result<(), JsValue> {
    let scroll_y = window.scroll_y()?;

    for (index, blob) in html_elements(document, ".animated-blob")?.iter().enumerate() {
        let offset = scroll::parallax_offset(scroll_y, index);
        blob.style()
            .set_property("transform", &format!("translateY({}px)", offset))?;
    }

    if let Some(body) = document.body() {
        let viewport = window.inner_height()?.as_f64().unwrap_or(0.0);
        let max_scroll = body.scroll_height() as f64 - viewport;
        body.style().set_property(
            "background",
            &scroll::background_gradient(scroll_y, max_scroll),
        )?;
    }

    let sections: Vec<Section> = html_elements(document, "section[id]")?
        .iter()
        .map(|s| Section::new(&s.id(), s.offset_top() as f64, s.offset_height() as f64))
        .collect();
    if let Some(active) = scroll::active_section(scroll_y, &sections) {
        let selector = format!(".nav-link[href=\"#{}\"]", active);
        if let Some(link) = document.query_selector(&selector)? {
            set_active_link(document, &link)?;
        }
    }
    Ok(())
}

fn set_active_link(document: &Document, active: &Element) -> Result<(), JsValue> {
    for link in html_elements(document, ".nav-link")? {
        link.class_list().remove_1("active")?;
    }
    active.class_list().add_1("active")
}

fn install_nav_links(document: &Document) -> Result<(), JsValue> {
    for link in html_elements(document, ".nav-link")? {
        let on_click = {
            let document = document.clone();
            let link = link.clone();
            Closure::wrap(Box::new(move |event: MouseEvent| {
                event.prevent_default();
                if let Err(err) = set_active_link(&document, &link) {
                    log::warn!("nav highlight failed: {:?}", err);
                }
                let target = link
                    .get_attribute("href")
                    .and_then(|href| href.strip_prefix('#').map(str::to_owned))
                    .and_then(|id| document.get_element_by_id(&id));
                if let Some(target) = target {
                    let mut options = ScrollIntoViewOptions::new();
                    options
                        .behavior(ScrollBehavior::Smooth)
                        .block(ScrollLogicalPosition::Start);
                    target.scroll_into_view_with_scroll_into_view_options(&options);
                }
            }) as Box<dyn FnMut(MouseEvent)>)
        };
        link.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }
    Ok(())
}

// One listener on the document serves every glass button, including ones
// added after installation.
fn install_glass_buttons(document: &Document) -> Result<(), JsValue> {
    install_pulse_keyframes(document)?;
    let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
        let button = match event
            .target()
            .and_then(|target| target.dyn_into::<HtmlElement>().ok())
        {
            Some(element) if element.class_list().contains(button::BUTTON_CLASS) => element,
            _ => return,
        };
        if let Err(err) = press_glass_button(button) {
            log::warn!("glass button feedback failed: {:?}", err);
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn install_pulse_keyframes(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(button::PULSE_STYLE_ID).is_some() {
        return Ok(());
    }
    let head = match document.head() {
        Some(head) => head,
        None => {
            log::debug!("no <head>, pulse keyframes skipped");
            return Ok(());
        }
    };
    let style = document.create_element("style")?;
    style.set_id(button::PULSE_STYLE_ID);
    style.set_text_content(Some(button::PULSE_KEYFRAMES));
    head.append_child(&style)?;
    Ok(())
}

fn modal(document: &Document) -> Option<Element> {
    let modal = document.get_element_by_id(MODAL_ID);
    if modal.is_none() {
        log::debug!("no #{} on this page", MODAL_ID);
    }
    modal
}

#[wasm_bindgen]
pub fn open_modal() -> Result<(), JsValue> {
    match modal(&document()?) {
        Some(modal) => modal.class_list().add_1(MODAL_OPEN_CLASS),
        None => Ok(()),
    }
}

#[wasm_bindgen]
pub fn close_modal() -> Result<(), JsValue> {
    match modal(&document()?) {
        Some(modal) => modal.class_list().remove_1(MODAL_OPEN_CLASS),
        None => Ok(()),
    }
}

// Clicking the backdrop (the modal element itself, not its content) or
// pressing Escape closes the modal.
fn install_modal(document: &Document) -> Result<(), JsValue> {
    let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
        let on_backdrop = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .map_or(false, |element| element.id() == MODAL_ID);
        if on_backdrop {
            if let Err(err) = close_modal() {
                log::warn!("closing modal failed: {:?}", err);
            }
        }
    }) as Box<dyn FnMut(MouseEvent)>);
    let on_key = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if event.key() == "Escape" {
            if let Err(err) = close_modal() {
                log::warn!("closing modal failed: {:?}", err);
            }
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_click.forget();
    on_key.forget();
    Ok(())
}

/// Busy label and card effect for a clicked glass button, restored after
/// the busy period.
#[wasm_bindgen]
pub fn press_glass_button(element: HtmlElement) -> Result<(), JsValue> {
    let window = window()?;
    element
        .style()
        .set_property("transform", &format!("scale({})", button::PRESS_SCALE))?;
    let release = {
        let element = element.clone();
        Closure::once_into_js(move || {
            let _ = element.style().set_property("transform", "");
        })
    };
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        release.unchecked_ref::<js_sys::Function>(),
        button::PRESS_MS,
    )?;

    let original = element.text_content().unwrap_or_default();
    let action = match ButtonAction::from_label(&original) {
        Some(action) => action,
        None => return Ok(()),
    };
    element.set_text_content(Some(action.busy_label()));

    let card = match action.card_effect() {
        Some((property, value)) => {
            let card = element
                .closest(".glass-card")?
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            match card {
                Some(card) => {
                    let previous = card.style().get_property_value(property)?;
                    card.style().set_property(property, value)?;
                    Some((card, property, previous))
                }
                None => None,
            }
        }
        None => None,
    };

    let restore = Closure::once_into_js(move || {
        element.set_text_content(Some(&original));
        if let Some((card, property, previous)) = card {
            let _ = card.style().set_property(property, &previous);
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        restore.unchecked_ref::<js_sys::Function>(),
        button::BUSY_MS,
    )?;
    Ok(())
}

/// Adds a ripple `<span>` to `element` at the click point and removes it once
/// the css animation has run.
#[wasm_bindgen]
pub fn create_ripple(element: HtmlElement, client_x: f64, client_y: f64) -> Result<(), JsValue> {
    let document = document()?;
    let rect = element.get_bounding_client_rect();
    let ripple = button::ripple_geometry(
        [rect.left(), rect.top(), rect.width(), rect.height()],
        client_x,
        client_y,
    );

    let span = document
        .create_element("span")?
        .dyn_into::<HtmlElement>()
        .map_err(JsValue::from)?;
    let style = span.style();
    style.set_property("width", &format!("{}px", ripple.size))?;
    style.set_property("height", &format!("{}px", ripple.size))?;
    style.set_property("left", &format!("{}px", ripple.left))?;
    style.set_property("top", &format!("{}px", ripple.top))?;
    span.class_list().add_1("ripple")?;
    element.append_child(&span)?;

    let remove = Closure::once_into_js(move || span.remove());
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        remove.unchecked_ref::<js_sys::Function>(),
        button::RIPPLE_MS,
    )?;
    Ok(())
}
