use crate::*;

use js_sys::{Function, Object, Promise, Reflect};
use lazy_render::{FADE_IN_CLASS, MARKER_ATTRIBUTE, STYLE_MARKER_ATTRIBUTE};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn options(pairs: &[(&str, JsValue)]) -> JsValue {
    let obj = Object::new();
    for (key, value) in pairs {
        Reflect::set(&obj, &JsValue::from_str(key), value).unwrap();
    }
    obj.into()
}

fn clear_marked() {
    let list = document()
        .query_selector_all(lazy_render::MARKER_SELECTOR)
        .unwrap();
    for i in 0..list.length() {
        if let Some(node) = list.get(i) {
            if let Some(parent) = node.parent_node() {
                parent.remove_child(&node).unwrap();
            }
        }
    }
}

async fn sleep(ms: i32) {
    let promise = Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn dispatch(name: &str) {
    let event = web_sys::Event::new(name).unwrap();
    web_sys::window().unwrap().dispatch_event(&event).unwrap();
}

fn add_marked_image(marker: &str) -> web_sys::Element {
    let doc = document();
    let img = doc.create_element("img").unwrap();
    img.set_attribute(MARKER_ATTRIBUTE, marker).unwrap();
    img.set_attribute("style", "position: fixed; top: 0; left: 0; width: 10px; height: 10px")
        .unwrap();
    doc.body().unwrap().append_child(&img).unwrap();
    img
}

#[wasm_bindgen_test]
fn non_numeric_threshold_throws() {
    for bad in [
        JsValue::NULL,
        JsValue::from_str("50"),
        Object::new().into(),
        JsValue::TRUE,
    ] {
        let err = WebLazyRender::new(options(&[("distanceThreshold", bad)]))
            .err()
            .unwrap();
        let message = err.dyn_into::<js_sys::Error>().unwrap().message();
        assert!(String::from(message).contains("must be a number"));
    }
}

#[wasm_bindgen_test]
fn numeric_threshold_is_parsed() {
    let parsed =
        options_from_js(&options(&[("distanceThreshold", JsValue::from_f64(-10.0))])).unwrap();
    assert_eq!(parsed.distance_threshold, -10.0);
    let parsed = options_from_js(&JsValue::UNDEFINED).unwrap();
    assert_eq!(parsed.distance_threshold, lazy_render::DEFAULT_DISTANCE_THRESHOLD);
}

#[wasm_bindgen_test]
fn stylesheet_is_injected_once() {
    clear_marked();
    let _a = WebLazyRender::new(JsValue::UNDEFINED).unwrap();
    let _b = WebLazyRender::new(JsValue::UNDEFINED).unwrap();
    let selector = format!("style[{STYLE_MARKER_ATTRIBUTE}]");
    let styles = document().query_selector_all(&selector).unwrap();
    assert_eq!(styles.length(), 1);
}

#[wasm_bindgen_test]
fn inert_without_marked_elements() {
    clear_marked();
    let r = WebLazyRender::new(JsValue::UNDEFINED).unwrap();
    assert!(!r.is_listening());
}

#[wasm_bindgen_test]
async fn scroll_loads_fades_and_cleans_up() {
    clear_marked();
    let img = add_marked_image("src;a.jpg");
    let r = WebLazyRender::new(JsValue::UNDEFINED).unwrap();
    assert!(r.is_listening());

    dispatch("scroll");
    sleep(50).await;
    let src = Reflect::get(&img, &JsValue::from_str("src")).unwrap();
    assert!(src.as_string().unwrap().ends_with("a.jpg"));
    assert!(img.class_list().contains(FADE_IN_CLASS));
    assert!(img.has_attribute(MARKER_ATTRIBUTE));
    assert_eq!(r.pending_cleanups(), 1);

    sleep(1_000).await;
    assert!(!img.class_list().contains(FADE_IN_CLASS));
    assert!(!img.has_attribute(MARKER_ATTRIBUTE));
    assert_eq!(r.pending_cleanups(), 0);
    assert!(!r.is_listening());
    img.remove();
}

#[wasm_bindgen_test]
async fn renderer_outlives_its_handle() {
    clear_marked();
    let img = add_marked_image("src;a.jpg");
    drop(WebLazyRender::new(JsValue::UNDEFINED).unwrap());

    dispatch("scroll");
    sleep(50).await;
    assert!(img.class_list().contains(FADE_IN_CLASS));
    sleep(1_000).await;
    assert!(!img.has_attribute(MARKER_ATTRIBUTE));
    img.remove();
}

#[wasm_bindgen_test]
async fn events_dispatched_from_the_callback_are_not_lost() {
    clear_marked();
    let img = add_marked_image("src;a.jpg");
    let window = web_sys::window().unwrap();
    Reflect::set(&window, &JsValue::from_str("lazyRenderFaded"), &JsValue::from_f64(0.0)).unwrap();
    let callback = Function::new_no_args(
        "window.lazyRenderFaded += 1; window.dispatchEvent(new Event('resize'));",
    );
    let r = WebLazyRender::new(options(&[("callback", callback.into())])).unwrap();

    dispatch("scroll");
    sleep(100).await;
    let faded = Reflect::get(&window, &JsValue::from_str("lazyRenderFaded")).unwrap();
    assert_eq!(faded.as_f64(), Some(1.0));
    // The resize from the callback scheduled a second pass, which queued a second cleanup.
    assert_eq!(r.pending_cleanups(), 2);

    sleep(1_000).await;
    assert!(!r.is_listening());
    img.remove();
}
