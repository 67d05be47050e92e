use admin_state::{SESSION_TOKEN_KEY, TokenStore};
use web_sys::Storage;

/// Keeps the session token in the browser's local storage.
pub struct LocalStorageTokenStore;

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        local_storage()?.get_item(SESSION_TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) {
        match local_storage() {
            Some(storage) => {
                if storage.set_item(SESSION_TOKEN_KEY, token).is_err() {
                    tracing::error!("Failed to persist session token");
                }
            }
            None => tracing::error!("Local storage is not available"),
        }
    }

    fn clear(&self) {
        match local_storage() {
            Some(storage) => {
                if storage.remove_item(SESSION_TOKEN_KEY).is_err() {
                    tracing::error!("Failed to remove session token");
                }
            }
            None => tracing::error!("Local storage is not available"),
        }
    }
}
