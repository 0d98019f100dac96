//! Heading observation for the scroll-spy.
//!
//! Uses `IntersectionObserver` shrunk to the focus band when the browser has
//! one; otherwise samples heading geometry on throttled scroll events.

use snip_outline::{FocusBand, HeadingRect, IntersectionEntry};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// A live `IntersectionObserver`. Disconnects when dropped.
pub struct Observer {
    inner: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Observer {
    /// Observe the elements with `ids`, reporting batches to `on_entries`.
    pub fn new<F>(
        document: &Document,
        band: FocusBand,
        ids: &[String],
        mut on_entries: F,
    ) -> Result<Self, JsValue>
    where
        F: FnMut(Vec<IntersectionEntry>) + 'static,
    {
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let batch = entries
                    .iter()
                    .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| IntersectionEntry {
                        id: entry.target().id(),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                on_entries(batch);
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&band.root_margin());
        let inner =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        for id in ids {
            if let Some(element) = document.get_element_by_id(id) {
                inner.observe(&element);
            }
        }

        Ok(Self {
            inner,
            _callback: callback,
        })
    }
}

impl Drop for Observer {
    fn drop(&mut self) {
        self.inner.disconnect();
    }
}

/// Whether the browser provides `IntersectionObserver`.
pub fn supported(window: &web_sys::Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Viewport-relative geometry of the elements with `ids`.
pub fn heading_rects(document: &Document, ids: &[String]) -> Vec<HeadingRect> {
    ids.iter()
        .filter_map(|id| {
            let rect = document.get_element_by_id(id)?.get_bounding_client_rect();
            Some(HeadingRect::new(id.clone(), rect.top(), rect.bottom()))
        })
        .collect()
}
