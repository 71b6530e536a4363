pub const DEFAULT_SITE_URL: &str = "https://www.hurtigruten.com/en";

/// Builds public site links for CMS slugs
#[derive(Debug, Clone)]
pub struct SiteLinks {
    base_url: String,
}

impl SiteLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn ship(&self, slug: &str) -> Option<String> {
        self.page("ships", slug)
    }

    pub fn port(&self, slug: &str) -> Option<String> {
        self.page("ports", slug)
    }

    fn page(&self, section: &str, slug: &str) -> Option<String> {
        if slug.is_empty() {
            return None;
        }
        Some(format!("{}/{}/{}", self.base_url, section, slug))
    }
}

impl Default for SiteLinks {
    fn default() -> Self {
        Self::new(DEFAULT_SITE_URL)
    }
}
