use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use js_sys::{Function, Reflect};
use lazy_render::{ConfigError, RendererOptions, TriggerEvent, invalid_threshold};
use wasm_bindgen::prelude::*;

use crate::dom::WebDocument;
use crate::timer::{Timeout, now_ms};

type Engine = lazy_render::LazyRender<WebDocument>;

struct Inner {
    engine: Engine,
    timeout: Timeout,
    // Strong self-reference held while the renderer can still act.
    anchor: Option<Rc<Binding>>,
}

impl Inner {
    /// Re-arms the timer for the next deadline. Once the engine is dormant, hands back the
    /// anchor so the caller can release it after the borrow ends.
    fn settle(&mut self, now_ms: u64) -> Option<Rc<Binding>> {
        match self.engine.next_deadline() {
            Some(deadline) => self.timeout.arm(deadline.saturating_sub(now_ms)),
            None => self.timeout.cancel(),
        }
        if self.engine.is_dormant() {
            wdebug!("LazyRender dormant; releasing page bindings");
            self.anchor.take()
        } else {
            None
        }
    }
}

/// Host callbacks raised during a pass, run once the engine is no longer borrowed.
#[derive(Clone, Default)]
struct Deferred(Rc<RefCell<VecDeque<Box<dyn FnOnce()>>>>);

impl Deferred {
    fn wrap(&self, mut options: RendererOptions) -> RendererOptions {
        if let Some(callback) = options.callback.take() {
            let queue = self.clone();
            options = options.with_callback(move || {
                let callback = Rc::clone(&callback);
                queue.push(move || callback());
            });
        }
        if let Some(on_error) = options.on_error.take() {
            let queue = self.clone();
            options = options.with_on_error(move |err| {
                let on_error = Rc::clone(&on_error);
                let err = err.clone();
                queue.push(move || on_error(&err));
            });
        }
        options
    }

    fn push(&self, f: impl FnOnce() + 'static) {
        self.0.borrow_mut().push_back(Box::new(f));
    }

    fn flush(&self) {
        loop {
            let Some(next) = self.0.borrow_mut().pop_front() else {
                return;
            };
            next();
        }
    }
}

struct Binding {
    inner: RefCell<Inner>,
    deferred: Deferred,
    _listener: Closure<dyn FnMut(web_sys::Event)>,
    _on_timeout: Closure<dyn FnMut()>,
}

/// A lazy renderer bound to the current page.
///
/// From JavaScript:
///
/// ```js
/// new LazyRender({ distanceThreshold: 50, callback: () => console.log("faded in") });
/// ```
///
/// The renderer keeps itself alive while it has listeners attached or work pending, so the
/// handle may be dropped (or `free()`-d) right away. The handle only offers introspection.
#[wasm_bindgen(js_name = LazyRender)]
pub struct WebLazyRender {
    binding: Rc<Binding>,
}

#[wasm_bindgen(js_class = LazyRender)]
impl WebLazyRender {
    /// Throws if `distanceThreshold` is present and not a number.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<WebLazyRender, JsValue> {
        let options = options_from_js(&options).map_err(config_error_to_js)?;
        Self::with_options(options)
    }

    #[wasm_bindgen(js_name = isListening)]
    pub fn is_listening(&self) -> bool {
        self.binding
            .inner
            .try_borrow()
            .is_ok_and(|inner| inner.engine.is_listening())
    }

    #[wasm_bindgen(js_name = pendingCleanups)]
    pub fn pending_cleanups(&self) -> usize {
        self.binding
            .inner
            .try_borrow()
            .map_or(0, |inner| inner.engine.pending_cleanups())
    }
}

impl WebLazyRender {
    /// Binds a renderer with typed options to the global `window` / `document`.
    pub fn with_options(options: RendererOptions) -> Result<WebLazyRender, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no `document`"))?;

        let deferred = Deferred::default();
        let options = deferred.wrap(options);

        let binding = Rc::new_cyclic(|weak: &Weak<Binding>| {
            let listener = Closure::<dyn FnMut(web_sys::Event)>::new({
                let weak = weak.clone();
                move |event: web_sys::Event| on_trigger(&weak, &event)
            });
            let on_timeout = Closure::<dyn FnMut()>::new({
                let weak = weak.clone();
                move || on_timer(&weak)
            });

            let listener_fn: Function = listener.as_ref().unchecked_ref::<Function>().clone();
            let timeout_fn: Function = on_timeout.as_ref().unchecked_ref::<Function>().clone();

            let engine = Engine::new(
                WebDocument::new(window.clone(), document, listener_fn),
                options,
            );
            Binding {
                inner: RefCell::new(Inner {
                    engine,
                    timeout: Timeout::new(window, timeout_fn),
                    anchor: None,
                }),
                deferred,
                _listener: listener,
                _on_timeout: on_timeout,
            }
        });

        {
            let mut inner = binding.inner.borrow_mut();
            wdebug!(listening = inner.engine.is_listening(), "LazyRender bound to page");
            if !inner.engine.is_dormant() {
                inner.anchor = Some(Rc::clone(&binding));
            }
        }

        Ok(Self { binding })
    }
}

fn on_trigger(binding: &Weak<Binding>, event: &web_sys::Event) {
    let Some(trigger) = TriggerEvent::from_event_name(&event.type_()) else {
        return;
    };
    let Some(binding) = binding.upgrade() else {
        return;
    };
    let released = {
        let Ok(mut inner) = binding.inner.try_borrow_mut() else {
            wwarn!(event = %event.type_(), "LazyRender busy; trigger dropped");
            return;
        };
        let now = now_ms();
        inner.engine.on_event(trigger, now);
        inner.settle(now)
    };
    drop(released);
}

fn on_timer(binding: &Weak<Binding>) {
    let Some(binding) = binding.upgrade() else {
        return;
    };
    let released = {
        let Ok(mut inner) = binding.inner.try_borrow_mut() else {
            return;
        };
        inner.timeout.fired();
        let now = now_ms();
        inner.engine.tick(now);
        inner.settle(now)
    };
    // Callbacks may dispatch trigger events or query the handle.
    binding.deferred.flush();
    drop(released);
}

/// Reads a JS options object: `{ distanceThreshold?: number, callback?: () => void,
/// onError?: (message: string) => void }`.
pub fn options_from_js(options: &JsValue) -> Result<RendererOptions, ConfigError> {
    let mut parsed = RendererOptions::new();
    if options.is_undefined() || options.is_null() {
        return Ok(parsed);
    }
    if !options.is_object() {
        return Err(ConfigError::NotAnObject {
            found: js_type_name(options),
        });
    }

    let threshold = get(options, "distanceThreshold");
    if !threshold.is_undefined() {
        let value = threshold
            .as_f64()
            .ok_or_else(|| invalid_threshold(&js_type_name(&threshold)))?;
        parsed = parsed.with_distance_threshold(value);
    }

    if let Ok(callback) = get(options, "callback").dyn_into::<Function>() {
        parsed = parsed.with_callback(move || {
            let _ = callback.call0(&JsValue::UNDEFINED);
        });
    }

    if let Ok(on_error) = get(options, "onError").dyn_into::<Function>() {
        parsed = parsed.with_on_error(move |err| {
            let _ = on_error.call1(&JsValue::UNDEFINED, &JsValue::from_str(&err.to_string()));
        });
    }

    Ok(parsed)
}

fn get(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn js_type_name(value: &JsValue) -> String {
    if value.is_null() {
        return "null".to_string();
    }
    value.js_typeof().as_string().unwrap_or_default()
}

fn config_error_to_js(err: ConfigError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
