use url::Url;

/// One page of a paginated listing endpoint.
///
/// Only the page index changes between iterations; [`ListingRequest::next`]
/// hands back a new value rather than mutating in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub base_url: Url,
    pub page_param: String,
    pub page: u32,
}

impl ListingRequest {
    pub fn new(base_url: Url, page_param: impl Into<String>, first_page: u32) -> Self {
        Self {
            base_url,
            page_param: page_param.into(),
            page: first_page,
        }
    }

    /// `None` once the page index cannot advance any further.
    pub fn next(&self) -> Option<Self> {
        let page = self.page.checked_add(1)?;
        Some(Self {
            page,
            ..self.clone()
        })
    }

    /// Base URL with the page parameter set to the current index. An existing
    /// parameter of the same name is replaced, other query pairs are kept.
    pub fn url(&self) -> Url {
        let retained: Vec<(String, String)> = self
            .base_url
            .query_pairs()
            .filter(|(key, _)| key != self.page_param.as_str())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(retained)
            .append_pair(&self.page_param, &self.page.to_string());
        url
    }
}
