use js_sys::Function;
use web_sys::Window;

/// Milliseconds since the epoch, as the engine's clock.
pub(crate) fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

/// A single re-armable `setTimeout`.
///
/// The engine exposes one next deadline at a time, so one browser timer is enough.
pub(crate) struct Timeout {
    window: Window,
    callback: Function,
    handle: Option<i32>,
}

impl Timeout {
    pub(crate) fn new(window: Window, callback: Function) -> Self {
        Self {
            window,
            callback,
            handle: None,
        }
    }

    pub(crate) fn arm(&mut self, delay_ms: u64) {
        self.cancel();
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&self.callback, delay)
        {
            Ok(handle) => self.handle = Some(handle),
            Err(_err) => {
                wwarn!(error = ?_err, "setTimeout failed");
            }
        }
    }

    pub(crate) fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    /// Forgets the handle of a timeout that has just fired.
    pub(crate) fn fired(&mut self) {
        self.handle = None;
    }
}
