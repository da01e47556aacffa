use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Страницы приложения; ключ совпадает с индексом сущности
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Provinces,
    Cities,
    Brands,
    Products,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Provinces, Page::Cities, Page::Brands, Page::Products];

    pub fn key(self) -> &'static str {
        match self {
            Page::Provinces => "a001_province",
            Page::Cities => "a002_city",
            Page::Brands => "a003_brand",
            Page::Products => "a004_product",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Provinces => "Провинции",
            Page::Cities => "Города",
            Page::Brands => "Бренды",
            Page::Products => "Товары",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Page::Provinces => "province",
            Page::Cities => "city",
            Page::Brands => "brand",
            Page::Products => "products",
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.key() == key)
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Page>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Page::Products),
            left_open: RwSignal::new(true),
        }
    }

    /// Активная страница берётся из `?active=` и записывается обратно при переключении
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(page) = params.get("active").and_then(|key| Page::from_key(key)) {
            self.active.set(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let active_key = this.active.get().key();
            let query_string =
                serde_qs::to_string(&HashMap::from([("active", active_key)])).unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn activate(&self, page: Page) {
        log::debug!("activate page '{}'", page.key());
        self.active.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keys_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_key(page.key()), Some(page));
        }
        assert_eq!(Page::from_key("a009_unknown"), None);
    }
}
