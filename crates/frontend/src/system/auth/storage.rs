use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";

pub(crate) fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get access token from localStorage
pub fn get_access_token() -> Option<String> {
    get_local_storage()?
        .get_item(ACCESS_TOKEN_KEY)
        .ok()?
        .filter(|token| !token.is_empty())
}

/// Read an arbitrary localStorage item
pub fn read_item(key: &str) -> Option<String> {
    get_local_storage()?.get_item(key).ok()?
}
