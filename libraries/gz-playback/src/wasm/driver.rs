//! `<audio>` element media driver

use std::collections::HashMap;

use gz_core::AudioLocator;
use wasm_bindgen::prelude::*;
use web_sys::HtmlMediaElement;

use crate::driver::MediaDriver;
use crate::error::{PlaybackError, Result};

/// Media driver over an `HtmlMediaElement`
///
/// `play()` resolves asynchronously; a rejected promise is logged to the
/// console and the element's own `pause` event reconciles the player.
/// Imported tracks resolve through `data:` URLs registered by the host.
pub struct HtmlAudioDriver {
    element: HtmlMediaElement,
    imported: HashMap<String, String>,
    has_source: bool,
    on_rejected: Closure<dyn FnMut(JsValue)>,
}

impl HtmlAudioDriver {
    /// Wrap a media element
    pub fn new(element: HtmlMediaElement) -> Self {
        let on_rejected = Closure::wrap(Box::new(|err: JsValue| {
            web_sys::console::warn_2(&JsValue::from_str("play() rejected:"), &err);
        }) as Box<dyn FnMut(JsValue)>);

        Self {
            element,
            imported: HashMap::new(),
            has_source: false,
            on_rejected,
        }
    }

    /// Make an imported payload loadable
    pub fn register_imported(&mut self, key: impl Into<String>, data_url: String) {
        self.imported.insert(key.into(), data_url);
    }

    /// Underlying element
    pub fn element(&self) -> &HtmlMediaElement {
        &self.element
    }

    fn resolve(&self, locator: &AudioLocator) -> Option<String> {
        match locator {
            AudioLocator::Remote { url } => Some(url.clone()),
            AudioLocator::Imported { key, .. } => self.imported.get(key).cloned(),
        }
    }
}

impl MediaDriver for HtmlAudioDriver {
    fn load(&mut self, locator: &AudioLocator) {
        match self.resolve(locator) {
            Some(src) => {
                self.element.set_src(&src);
                self.element.load();
                self.has_source = true;
            }
            None => {
                web_sys::console::warn_1(&JsValue::from_str("imported payload not registered"));
                self.unload();
            }
        }
    }

    fn play(&mut self) -> Result<()> {
        if !self.has_source {
            return Err(PlaybackError::NoSourceLoaded);
        }

        let promise = self
            .element
            .play()
            .map_err(|e| PlaybackError::PlaybackRejected(format!("{:?}", e)))?;
        let _ = promise.catch(&self.on_rejected);
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            web_sys::console::warn_2(&JsValue::from_str("pause() failed:"), &e);
        }
    }

    fn seek(&mut self, seconds: f64) {
        self.element.set_current_time(seconds);
    }

    fn position(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.element.duration();
        (duration.is_finite() && duration > 0.0).then_some(duration)
    }

    fn has_source(&self) -> bool {
        self.has_source
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn unload(&mut self) {
        if let Err(e) = self.element.pause() {
            web_sys::console::warn_2(&JsValue::from_str("pause() failed:"), &e);
        }
        let _ = self.element.remove_attribute("src");
        self.element.load();
        self.has_source = false;
    }
}
