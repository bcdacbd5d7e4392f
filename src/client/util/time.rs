use chrono::Duration;

/// Resolves after `duration` using the browser's `setTimeout`
#[cfg(feature = "web")]
pub async fn sleep(duration: Duration) {
    use wasm_bindgen::JsValue;

    let timeout = duration.num_milliseconds().clamp(0, i32::MAX as i64) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        let scheduled = web_sys::window().map(|window| {
            window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout)
        });

        if !matches!(scheduled, Some(Ok(_))) {
            let _ = resolve.call0(&JsValue::NULL);
        }
    });

    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

/// Without a browser there is no timer to wait on, the delay is skipped
#[cfg(not(feature = "web"))]
pub async fn sleep(_duration: Duration) {}
