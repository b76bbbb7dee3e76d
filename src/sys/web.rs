use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::errors::*;
use crate::utils::time::Timestamp;

pub fn timestamp() -> Timestamp {
    let ms = web_sys::window()
        .and_then(|window| window.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0);

    Timestamp::from_micros((ms * 1000.0) as u64)
}

/// Installs the browser console logger and forwards panics to `console.error`.
pub fn init() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if log::set_boxed_logger(Box::new(WebBrowserLogger {})).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

fn request_animation_frame(closure: &Closure<dyn FnMut(f64)>) -> Result<()> {
    let window =
        web_sys::window().ok_or_else(|| Error::Window("no global `window` exists.".to_owned()))?;

    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .map_err(|_| Error::Window("failed to request an animation frame.".to_owned()))?;

    Ok(())
}

/// Schedules `advance` on every animation frame until it returns `Ok(false)`.
/// Returns right away, the browser drives the loop.
pub fn run_forever<F>(mut advance: F) -> Result<()>
where
    F: FnMut() -> Result<bool> + 'static,
{
    let closure: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let clone = closure.clone();

    *closure.borrow_mut() = Some(Closure::wrap(Box::new(move |_: f64| {
        let proceed = match advance() {
            Ok(v) => v,
            Err(err) => {
                error!("Frame loop stopped: {}", err);
                false
            }
        };

        if proceed {
            if let Some(inner) = clone.borrow().as_ref() {
                if let Err(err) = request_animation_frame(inner) {
                    error!("{}", err);
                }
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(inner) = closure.borrow().as_ref() {
        request_animation_frame(inner)?;
    }

    Ok(())
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

struct WebBrowserLogger;

impl ::log::Log for WebBrowserLogger {
    fn enabled(&self, metadata: &::log::Metadata) -> bool {
        metadata.level() <= ::log::Level::Info
    }

    fn log(&self, record: &::log::Record) {
        if self.enabled(record.metadata()) {
            let level = match record.level() {
                ::log::Level::Warn => "WARNING".to_owned(),
                v => v.to_string(),
            };

            log(&format!(
                "{} {}: {}",
                String::from(js_sys::Date::new_0().to_iso_string()),
                level,
                record.args()
            ));
        }
    }

    fn flush(&self) {}
}
