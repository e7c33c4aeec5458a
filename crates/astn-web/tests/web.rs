//! Browser tests for the JavaScript facade
//!
//! Run with `wasm-pack test --headless --firefox crates/astn-web`.

#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use astn_web::AstNotif;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Start each test from an empty body
fn fresh() -> AstNotif {
    let body = document().body().unwrap();
    body.set_inner_html("");
    body.set_class_name("");
    AstNotif::new(JsValue::UNDEFINED)
}

fn options(json: &str) -> JsValue {
    js_sys::JSON::parse(json).unwrap()
}

fn click(id: &str) {
    document()
        .get_element_by_id(id)
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
}

#[wasm_bindgen_test]
fn test_toast_mounts_once() {
    let notif = fresh();
    notif
        .toast("one".into(), JsValue::UNDEFINED)
        .toast("two".into(), options(r#"{"length": "long"}"#));

    let found = document().query_selector_all("#ast-toast-el").unwrap();
    assert_eq!(found.length(), 1);
    let text = document().get_element_by_id("ast-toast-text").unwrap();
    assert_eq!(text.inner_html(), "two");
}

#[wasm_bindgen_test]
fn test_dialog_positive_callback() {
    let notif = fresh();
    let hits = Rc::new(Cell::new(0));
    let on_positive = {
        let hits = Rc::clone(&hits);
        Closure::wrap(Box::new(move || {
            // Still in the document while the callback runs
            if document().get_element_by_id("ast-dialog-bg").is_some() {
                hits.set(hits.get() + 1);
            }
        }) as Box<dyn FnMut()>)
    };

    notif.dialog(
        "Title".into(),
        "<script>bad()</script>Body".into(),
        JsValue::UNDEFINED,
        on_positive.as_ref().clone(),
        JsValue::NULL,
    );
    let message = document().get_element_by_id("ast-dialog-message").unwrap();
    assert_eq!(message.inner_html(), "Body");
    assert!(document().body().unwrap().class_list().contains("ast-dialog"));

    click("ast-positive-dialog-button");
    assert_eq!(hits.get(), 1);
    assert!(document().get_element_by_id("ast-dialog-bg").is_none());
    assert!(!document().body().unwrap().class_list().contains("ast-dialog"));
}

#[wasm_bindgen_test]
fn test_persistent_card_close_glyph() {
    let notif = fresh();
    notif.notify(
        "Title".into(),
        "Body".into(),
        "".into(),
        options(r#"{"length": -1}"#),
        JsValue::UNDEFINED,
    );

    let glyphs = document().query_selector_all(".ast-notify-close").unwrap();
    assert_eq!(glyphs.length(), 1);
    assert!(document().get_element_by_id("ast-notify-container").is_some());
}

#[wasm_bindgen_test]
fn test_settings_round_trip() {
    let notif = fresh();
    notif.set_theme("dark".into());
    notif.set_theme("nope".into());
    assert_eq!(notif.get_theme(), "dark");

    notif.set_z_index("20000".into());
    notif.set_z_index("abc".into());
    assert_eq!(notif.get_z_index(), 20000);
}

#[wasm_bindgen_test]
fn test_status_and_version() {
    let notif = fresh();
    notif.poster("Promo".into(), JsValue::UNDEFINED, JsValue::UNDEFINED, JsValue::UNDEFINED);

    let status: serde_json::Value = serde_json::from_str(&notif.get_status_json()).unwrap();
    assert_eq!(status["version"], AstNotif::version());
    assert_eq!(status["widgets"][1]["phase"], "visible");

    notif.close("poster".into());
    let status: serde_json::Value = serde_json::from_str(&notif.get_status_json()).unwrap();
    assert_eq!(status["widgets"][1]["phase"], "absent");
}

#[wasm_bindgen_test]
fn test_bad_arguments_do_not_throw() {
    let notif = fresh();
    notif
        .toast(JsValue::from_f64(42.0), JsValue::from_str("not an object"))
        .snackbar(JsValue::NULL, options("[1, 2]"), JsValue::from_f64(1.0))
        .close("toast".into())
        .close(JsValue::UNDEFINED);

    let text = document().get_element_by_id("ast-toast-text").unwrap();
    assert_eq!(text.inner_html(), "42");
}

#[wasm_bindgen_test]
fn test_icon_base_from_settings() {
    fresh();
    let notif = AstNotif::new(options(r#"{"iconBase": "/static/icons/"}"#));
    notif.poster("Promo".into(), JsValue::UNDEFINED, JsValue::UNDEFINED, JsValue::UNDEFINED);

    let img = document().query_selector("#ast-poster-icon img").unwrap().unwrap();
    assert_eq!(
        img.get_attribute("src").as_deref(),
        Some("/static/icons/error_putih_garis.png")
    );
}

#[wasm_bindgen_test]
fn test_bad_settings_fall_back() {
    fresh();
    let notif = AstNotif::new(options(r#"{"theme": "not-a-real-theme", "zIndex": 5}"#));
    assert_eq!(notif.get_theme(), "default");
    assert_eq!(notif.get_z_index(), 10000);
}
