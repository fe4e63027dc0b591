use crate::Error;

use super::common::{non_empty, push_pair, CommonQuery, Query, QueryCommon, DEFAULT_PAGE_SIZE};

/// Query for the full-text search endpoint `/api/v1/urls/search/`.
///
/// Takes the generic parameters, first-seen bounds and free text matched
/// against the captured page content.
#[derive(Clone, Debug, PartialEq)]
pub struct FullTextQuery {
    pub common: QueryCommon,
    pub first_seen_after: Option<String>,
    pub first_seen_before: Option<String>,
    pub content: Option<String>,
}

impl Default for FullTextQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon {
                page_size: Some(DEFAULT_PAGE_SIZE),
                ..Default::default()
            },
            first_seen_after: None,
            first_seen_before: None,
            content: None,
        }
    }
}

impl FullTextQuery {
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn with_first_seen_after(mut self, date: &str) -> Self {
        self.first_seen_after = Some(date.to_string());
        self
    }

    pub fn with_first_seen_before(mut self, date: &str) -> Self {
        self.first_seen_before = Some(date.to_string());
        self
    }
}

impl Query for FullTextQuery {
    fn query_pairs(&self) -> Result<Vec<(String, String)>, Error> {
        let mut pairs = self.common.to_pairs()?;
        if let Some(date) = non_empty(&self.first_seen_after) {
            push_pair(&mut pairs, "first_seen_after", date);
        }
        if let Some(date) = non_empty(&self.first_seen_before) {
            push_pair(&mut pairs, "first_seen_before", date);
        }
        if let Some(content) = non_empty(&self.content) {
            push_pair(&mut pairs, "content", content);
        }
        Ok(pairs)
    }
}

impl CommonQuery for FullTextQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::query::{CommonQuery, FullTextQuery, Query};

    #[test]
    fn test_full_text_query() {
        let url = Url::parse("https://example.com/api/v1/urls/search/").unwrap();

        insta::assert_snapshot!(FullTextQuery::default()
            .with_content("verify your account")
            .with_first_seen_before("2024-05-01")
            .with_page(3)
            .add_to_url(&url)
            .unwrap()
            .to_string(), @"https://example.com/api/v1/urls/search/?page=3&page_size=50&first_seen_before=2024-05-01&content=verify+your+account");
    }
}
