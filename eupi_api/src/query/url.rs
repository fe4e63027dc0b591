use crate::Error;

use super::{
    common::{CommonQuery, Query, QueryCommon, DEFAULT_PAGE_SIZE},
    filters::{FilterQuery, UrlFilters},
};

/// Query for `/api/v1/urls/`: generic parameters plus the expanded filters.
#[derive(Clone, Debug, PartialEq)]
pub struct UrlQuery {
    pub common: QueryCommon,
    pub filters: UrlFilters,
}

impl Default for UrlQuery {
    fn default() -> Self {
        Self {
            common: QueryCommon {
                page_size: Some(DEFAULT_PAGE_SIZE),
                ..Default::default()
            },
            filters: UrlFilters::default(),
        }
    }
}

impl Query for UrlQuery {
    fn query_pairs(&self) -> Result<Vec<(String, String)>, Error> {
        self.filters.to_pairs(&self.common)
    }
}

impl CommonQuery for UrlQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl FilterQuery for UrlQuery {
    fn get_filters(&mut self) -> &mut UrlFilters {
        &mut self.filters
    }
}
