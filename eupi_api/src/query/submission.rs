use crate::Error;

use super::{
    common::{non_empty, push_pair, CommonQuery, Query, QueryCommon, DEFAULT_PAGE_SIZE},
    filters::{FilterQuery, UrlFilters},
};

/// Query for `/api/v1/submissions/`: the URL filters plus submission-time bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmissionQuery {
    pub common: QueryCommon,
    pub filters: UrlFilters,
    pub submitted_before: Option<String>,
    pub submitted_after: Option<String>,
}

impl Default for SubmissionQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon {
                page_size: Some(DEFAULT_PAGE_SIZE),
                ..Default::default()
            },
            filters: UrlFilters::default(),
            submitted_before: None,
            submitted_after: None,
        }
    }
}

impl SubmissionQuery {
    pub fn with_submitted_before(mut self, date: &str) -> Self {
        self.submitted_before = Some(date.to_string());
        self
    }

    pub fn with_submitted_after(mut self, date: &str) -> Self {
        self.submitted_after = Some(date.to_string());
        self
    }
}

impl Query for SubmissionQuery {
    fn query_pairs(&self) -> Result<Vec<(String, String)>, Error> {
        let mut pairs = self.filters.to_pairs(&self.common)?;
        if let Some(date) = non_empty(&self.submitted_before) {
            push_pair(&mut pairs, "submitted_before", date);
        }
        if let Some(date) = non_empty(&self.submitted_after) {
            push_pair(&mut pairs, "submitted_after", date);
        }
        Ok(pairs)
    }
}

impl CommonQuery for SubmissionQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl FilterQuery for SubmissionQuery {
    fn get_filters(&mut self) -> &mut UrlFilters {
        &mut self.filters
    }
}
