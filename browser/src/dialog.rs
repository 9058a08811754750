//! 阻塞式提示框

/// `window.alert`
pub fn alert(message: &str) {
    let Some(window) = web_sys::window() else {
        log::warn!("alert without window: {}", message);
        return;
    };
    if let Err(e) = window.alert_with_message(message) {
        log::error!("alert failed: {:?}", e);
    }
}
