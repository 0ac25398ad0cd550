// Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use liquid_glass_effects::web::{
    background_gradient, button_busy_label, close_modal, install_page_effects, open_modal,
    press_glass_button, tilt_reset_transform, tilt_transform, GlassControls, ParticleFieldHandle,
};
use liquid_glass_effects::FieldOptions;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str, width: u32, height: u32) -> HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<HtmlCanvasElement>()
        .unwrap();
    canvas.set_id(id);
    canvas.set_width(width);
    canvas.set_height(height);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn add_element(parent: &web_sys::Node, tag: &str, class: &str) -> HtmlElement {
    let element = document()
        .create_element(tag)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap();
    element.set_class_name(class);
    parent.append_child(&element).unwrap();
    element
}

fn button_in_card(label: &str) -> (HtmlElement, HtmlElement) {
    let body = document().body().unwrap();
    let card = add_element(&body, "div", "glass-card");
    let button = add_element(&card, "button", "glass-button");
    button.set_text_content(Some(label));
    (card, button)
}

#[wasm_bindgen_test]
fn missing_canvas_is_a_no_op() {
    assert!(ParticleFieldHandle::attach("no-such-canvas").is_none());
}

#[wasm_bindgen_test]
fn field_attaches_and_stops() {
    add_canvas("particle-canvas-a", 320, 200);
    let handle = ParticleFieldHandle::attach("particle-canvas-a").unwrap();
    assert_eq!(handle.particle_count(), 50);
    assert!(!handle.is_running());

    handle.start().unwrap();
    assert!(handle.is_running());
    handle.stop();
    assert!(!handle.is_running());
}

#[wasm_bindgen_test]
fn options_shape_the_field() {
    add_canvas("particle-canvas-b", 320, 200);
    let mut options = FieldOptions::new();
    options.set_particle_count(7);
    options.set_seed(3);
    let handle = ParticleFieldHandle::attach_with("particle-canvas-b", options).unwrap();
    assert_eq!(handle.particle_count(), 7);
    // far outside the canvas, nothing to push
    assert_eq!(handle.pointer_move(-1000.0, -1000.0), 0);
}

#[wasm_bindgen_test]
fn glass_controls_restyle_elements() {
    let document = web_sys::window().unwrap().document().unwrap();
    let panel = document.create_element("div").unwrap();
    panel.set_class_name("glass-element sample-2");
    document.body().unwrap().append_child(&panel).unwrap();

    let mut controls = GlassControls::new();
    controls.update_opacity(0.5).unwrap();
    assert_eq!(controls.opacity(), 0.5);
    let style = panel.get_attribute("style").unwrap_or_default();
    assert!(style.contains("rgba(78, 205, 196, 0.5)"), "style was {}", style);

    controls.reset().unwrap();
    assert_eq!(controls.opacity(), 0.25);
}

#[wasm_bindgen_test]
fn exported_helpers() {
    assert_eq!(
        tilt_reset_transform(),
        "perspective(1000px) rotateX(0deg) rotateY(0deg) translateZ(0px)"
    );
    assert!(tilt_transform(0.0, 0.0, 100.0, 100.0).contains("rotateX(10deg)"));
    assert!(background_gradient(0.0, 0.0).contains("hsl(235, 60%, 60%)"));
    assert_eq!(button_busy_label("Explore"), Some("Exploring...".to_owned()));
}

#[wasm_bindgen_test]
fn animate_button_pulses_its_card() {
    let (card, button) = button_in_card("Animate");
    press_glass_button(button.clone()).unwrap();
    assert_eq!(button.text_content().as_deref(), Some("Animating..."));
    assert_eq!(button.style().get_property_value("transform").unwrap(), "scale(0.95)");
    let animation = card.style().get_property_value("animation").unwrap();
    assert!(animation.contains("pulse"), "animation was {}", animation);
}

#[wasm_bindgen_test]
fn blend_button_tints_its_card() {
    let (card, button) = button_in_card("Blend Colors");
    press_glass_button(button.clone()).unwrap();
    assert_eq!(button.text_content().as_deref(), Some("Blending..."));
    let background = card.style().get_property_value("background").unwrap();
    assert!(background.contains("linear-gradient"), "background was {}", background);
}

#[wasm_bindgen_test]
fn plain_button_keeps_its_label() {
    let (card, button) = button_in_card("Submit");
    press_glass_button(button.clone()).unwrap();
    assert_eq!(button.text_content().as_deref(), Some("Submit"));
    assert_eq!(card.style().get_property_value("animation").unwrap(), "");
}

#[wasm_bindgen_test]
fn modal_toggles_active_class() {
    let body = document().body().unwrap();
    let modal = add_element(&body, "div", "modal");
    modal.set_id("glass-modal");

    open_modal().unwrap();
    assert!(modal.class_list().contains("active"));
    close_modal().unwrap();
    assert!(!modal.class_list().contains("active"));
    modal.remove();
}

#[wasm_bindgen_test]
fn modal_functions_without_modal_are_no_ops() {
    assert!(document().get_element_by_id("glass-modal").is_none());
    open_modal().unwrap();
    close_modal().unwrap();
}

// the only test that installs the page listeners, so each click is handled once
#[wasm_bindgen_test]
fn page_effects_wire_buttons_and_modal() {
    let document = document();
    let body = document.body().unwrap();
    let modal = add_element(&body, "div", "modal");
    modal.set_id("glass-modal");
    let content = add_element(&modal, "div", "modal-content");
    let (card, button) = button_in_card("Animate");
    let revealed = add_element(&body, "div", "experiment-item");

    install_page_effects().unwrap();
    assert!(document.get_element_by_id("glass-pulse-keyframes").is_some());
    assert_eq!(revealed.style().get_property_value("opacity").unwrap(), "0");

    button.click();
    assert_eq!(button.text_content().as_deref(), Some("Animating..."));
    assert!(card
        .style()
        .get_property_value("animation")
        .unwrap()
        .contains("pulse"));

    open_modal().unwrap();
    content.click();
    assert!(modal.class_list().contains("active"));
    modal.click();
    assert!(!modal.class_list().contains("active"));
    modal.remove();
}
