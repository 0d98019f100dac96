//! Browser runtime for snipdocs pages.
//!
//! Loaded as a module by the static pages. It hydrates the shell (search
//! overlay, sidebar groups, mobile menu, copy buttons), drives the "On this
//! page" scroll-spy and switches topics on `#/<slug>` routes without a page
//! load.

mod app;
mod copy;
mod dom;
mod listener;
mod observer;
mod settings;

use std::cell::RefCell;

use snip_content::Library;
use wasm_bindgen::prelude::*;

pub use app::App;
pub use settings::RuntimeSettings;

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// Entry point run when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = dom::document()?;
    let dataset = dom::body(&document)?.dataset();
    let settings = RuntimeSettings::from_dataset(|key| dataset.get(key));
    let library = Library::builtin().map_err(|e| JsValue::from_str(&e.to_string()))?;

    let app = App::mount(library, settings)?;
    APP.with(|slot| slot.replace(Some(app)));
    Ok(())
}
