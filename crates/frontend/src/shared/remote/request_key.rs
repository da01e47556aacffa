use std::fmt;

/// Ключ запроса: путь ресурса плюс действующий поисковый запрос.
///
/// Контроллер коллекции кэширует данные по ключу и считает два запроса
/// с одинаковым ключом одним и тем же запросом.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    path: String,
    search: Option<String>,
}

impl RequestKey {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            search: None,
        }
    }

    /// Ключ списка с параметром `search` (пустая строка тоже передаётся)
    pub fn with_search(path: impl Into<String>, search: &str) -> Self {
        Self {
            path: path.into(),
            search: Some(search.trim().to_string()),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Путь с query-строкой относительно базового URL API
    pub fn path_and_query(&self) -> String {
        match &self.search {
            Some(search) => format!("{}?search={}", self.path, urlencoding::encode(search)),
            None => self.path.clone(),
        }
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path_and_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_and_query() {
        assert_eq!(RequestKey::new("/api/Brands/1").path_and_query(), "/api/Brands/1");
        assert_eq!(
            RequestKey::with_search("/api/Provinces", "").path_and_query(),
            "/api/Provinces?search="
        );
        assert_eq!(
            RequestKey::with_search("/api/Provinces", " Jawa Barat ").path_and_query(),
            "/api/Provinces?search=Jawa%20Barat"
        );
    }

    #[test]
    fn test_search_distinguishes_keys() {
        assert_ne!(
            RequestKey::new("/api/Brands"),
            RequestKey::with_search("/api/Brands", "")
        );
        assert_eq!(
            RequestKey::with_search("/api/Brands", "ac "),
            RequestKey::with_search("/api/Brands", "ac")
        );
    }
}
