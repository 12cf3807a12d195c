//! LocalStorage access shared by progress and settings
//!
//! Natively there is no storage: reads miss and writes are dropped.

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Stored string under `key`, if any
#[cfg(target_arch = "wasm32")]
pub fn read(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

/// Store `value` under `key`; false if storage is unavailable or full
#[cfg(target_arch = "wasm32")]
pub fn write(key: &str, value: &str) -> bool {
    local_storage().is_some_and(|storage| storage.set_item(key, value).is_ok())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write(key: &str, _value: &str) -> bool {
    log::debug!("No storage natively, dropping write to {}", key);
    false
}
