use super::Storage;
use crate::error::{Error, Result};

/// Browser LocalStorage
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// The window's LocalStorage, if the page allows it
    pub fn open() -> Result<Self> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| Error::StorageUnavailable("localStorage not available".into()))?;
        Ok(Self { inner })
    }
}

fn js_err(e: wasm_bindgen::JsValue) -> Error {
    Error::StorageUnavailable(format!("{:?}", e))
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key).map_err(js_err)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.inner.set_item(key, value).map_err(js_err)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.inner.remove_item(key).map_err(js_err)
    }
}
