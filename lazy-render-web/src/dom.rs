use js_sys::{Function, Reflect};
use lazy_render::{
    Document, ListenerTarget, MARKER_ATTRIBUTE, MARKER_SELECTOR, Rect, STYLE_MARKER_ATTRIBUTE,
    StyleSink, TriggerEvent, Viewport,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, EventTarget, Window};

/// A browser page exposed to the engine through `web-sys`.
///
/// DOM failures on this path are logged (with `feature = "tracing"`) and otherwise ignored: the
/// engine treats the page as best effort.
pub struct WebDocument {
    window: Window,
    document: web_sys::Document,
    listener: Function,
}

impl WebDocument {
    /// `listener` is registered for every trigger event while the renderer listens.
    pub fn new(window: Window, document: web_sys::Document, listener: Function) -> Self {
        Self {
            window,
            document,
            listener,
        }
    }

    fn target(&self, target: ListenerTarget) -> &EventTarget {
        match target {
            ListenerTarget::Document => AsRef::<EventTarget>::as_ref(&self.document),
            ListenerTarget::Window => AsRef::<EventTarget>::as_ref(&self.window),
        }
    }

    fn head(&self) -> Option<Element> {
        self.document
            .head()
            .map(Element::from)
            .or_else(|| self.document.get_elements_by_tag_name("head").item(0))
    }
}

fn dimension(value: Result<JsValue, JsValue>) -> f64 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
}

pub(crate) fn describe_js_error(err: &JsValue) -> String {
    if let Some(message) = err.as_string() {
        return message;
    }
    if let Some(err) = err.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{err:?}")
}

impl StyleSink for WebDocument {
    fn has_marked_style(&self) -> bool {
        let styles = self.document.get_elements_by_tag_name("style");
        (0..styles.length())
            .filter_map(|i| styles.item(i))
            .any(|style| {
                style
                    .get_attribute(STYLE_MARKER_ATTRIBUTE)
                    .is_some_and(|v| !v.is_empty())
            })
    }

    fn append_style(&mut self, marker_attribute: &str, marker_value: &str, css: &str) {
        let style = match self.document.create_element("style") {
            Ok(style) => style,
            Err(_err) => {
                wwarn!(error = ?_err, "could not create style element");
                return;
            }
        };
        let _ = style.set_attribute(marker_attribute, marker_value);
        style.set_text_content(Some(css));

        let Some(head) = self.head() else {
            wwarn!("document has no head; stylesheet not injected");
            return;
        };
        if let Err(_err) = head.append_child(&style) {
            wwarn!(error = ?_err, "could not append stylesheet");
        }
    }
}

impl Document for WebDocument {
    type Element = Element;

    fn marked_elements(&self) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(MARKER_SELECTOR) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn marked_count(&self) -> usize {
        self.document
            .query_selector_all(MARKER_SELECTOR)
            .map(|list| list.length() as usize)
            .unwrap_or(0)
    }

    fn viewport(&self) -> Viewport {
        let root = self.document.document_element();
        let mut width = dimension(self.window.inner_width());
        let mut height = dimension(self.window.inner_height());
        if width == 0.0 {
            width = root.as_ref().map_or(0.0, |r| f64::from(r.client_width()));
        }
        if height == 0.0 {
            height = root.as_ref().map_or(0.0, |r| f64::from(r.client_height()));
        }
        Viewport::new(width, height)
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let r = element.get_bounding_client_rect();
        Rect::new(r.top(), r.left(), r.bottom(), r.right())
    }

    fn marker(&self, element: &Element) -> Option<String> {
        element.get_attribute(MARKER_ATTRIBUTE)
    }

    fn set_property(
        &mut self,
        element: &Element,
        property: &str,
        value: &str,
    ) -> Result<(), String> {
        let target: &JsValue = element.as_ref();
        match Reflect::set(
            target,
            &JsValue::from_str(property),
            &JsValue::from_str(value),
        ) {
            Ok(true) => Ok(()),
            Ok(false) => Err(format!("property `{property}` is not writable")),
            Err(err) => Err(describe_js_error(&err)),
        }
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&mut self, element: &Element, class: &str) {
        if let Err(_err) = element.class_list().add_1(class) {
            wwarn!(error = ?_err, class, "could not add class");
        }
    }

    fn remove_class(&mut self, element: &Element, class: &str) {
        if let Err(_err) = element.class_list().remove_1(class) {
            wwarn!(error = ?_err, class, "could not remove class");
        }
    }

    fn remove_marker(&mut self, element: &Element) {
        let _ = element.remove_attribute(MARKER_ATTRIBUTE);
    }

    fn attach_listener(&mut self, event: TriggerEvent) {
        let name = event.event_name();
        if let Err(_err) = self
            .target(event.target())
            .add_event_listener_with_callback(name, &self.listener)
        {
            wwarn!(error = ?_err, name, "could not attach listener");
        }
        wdebug!(name, "listener attached");
    }

    fn detach_listener(&mut self, event: TriggerEvent) {
        let name = event.event_name();
        if let Err(_err) = self
            .target(event.target())
            .remove_event_listener_with_callback(name, &self.listener)
        {
            wwarn!(error = ?_err, name, "could not detach listener");
        }
    }
}
