//! Copy buttons.
//!
//! Buttons get a `data-copy-id` on first use; each id owns a
//! [`CopyFeedback`](snip_shell::CopyFeedback) in the state's registry. The clipboard write is a
//! promise, so confirmation and failure arrive asynchronously.

use snip_shell::{ClipboardError, CopyTicket};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::Element;

use crate::app::{Handle, State, with_state};

const COPY_LABEL: &str = "Copy";
const COPIED_LABEL: &str = "Copied";

/// Handle a click on a copy button.
pub(crate) fn start(
    state: &mut State,
    handle: &Handle,
    button: &Element,
) -> Result<(), JsValue> {
    let text = button
        .closest(".code-block")?
        .and_then(|block| block.query_selector("code").ok().flatten())
        .and_then(|code| code.text_content())
        .unwrap_or_default();

    let key = if let Some(id) = button.get_attribute("data-copy-id") {
        id
    } else {
        let id = state.copies.assign_key();
        button.set_attribute("data-copy-id", &id)?;
        id
    };
    state.copies.feedback(&key);

    let navigator = state.window.navigator();
    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("clipboard")).unwrap_or(false) {
        return failed(state, &key, button, &ClipboardError::Unavailable);
    }

    let promise = navigator.clipboard().write_text(&text);
    let handle = handle.clone();
    let button = button.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let result = JsFuture::from(promise).await;
        with_state(&handle, |st, h| match result {
            Ok(_) => confirmed(st, h, &key, &button),
            Err(err) => {
                let message = err.as_string().unwrap_or_else(|| format!("{err:?}"));
                failed(st, &key, &button, &ClipboardError::Rejected(message))
            }
        });
    });
    Ok(())
}

fn confirmed(
    state: &mut State,
    handle: &Handle,
    key: &str,
    button: &Element,
) -> Result<(), JsValue> {
    let Some(feedback) = state.copies.get_mut(key) else {
        return Ok(());
    };
    let ticket = feedback.confirm();
    let delay = i32::try_from(feedback.duration().as_millis()).unwrap_or(i32::MAX);
    show(button, true)?;

    let handle = handle.clone();
    let key = key.to_owned();
    let button = button.clone();
    let callback = Closure::once_into_js(move || {
        with_state(&handle, |st, _| revert(st, &key, &button, ticket));
    });
    state
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)?;
    Ok(())
}

fn failed(
    state: &mut State,
    key: &str,
    button: &Element,
    err: &ClipboardError,
) -> Result<(), JsValue> {
    web_sys::console::warn_1(&format!("snip: copy failed: {err}").into());
    if let Some(feedback) = state.copies.get_mut(key) {
        feedback.fail(err);
    }
    show(button, false)
}

fn revert(state: &mut State, key: &str, button: &Element, ticket: CopyTicket) -> Result<(), JsValue> {
    if let Some(feedback) = state.copies.get_mut(key)
        && feedback.revert(ticket)
    {
        show(button, false)
    } else {
        Ok(())
    }
}

fn show(button: &Element, copied: bool) -> Result<(), JsValue> {
    button.set_attribute("data-copied", if copied { "true" } else { "false" })?;
    button.set_text_content(Some(if copied { COPIED_LABEL } else { COPY_LABEL }));
    Ok(())
}
