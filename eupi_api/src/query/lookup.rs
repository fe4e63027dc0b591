use crate::Error;

use super::common::{push_pair, Query};

/// Exact-match query for `/api/v1/urls/lookup/`. Always sends exactly one
/// `url` parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct LookupQuery {
    pub url: String,
}

impl LookupQuery {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

impl Query for LookupQuery {
    fn query_pairs(&self) -> Result<Vec<(String, String)>, Error> {
        let mut pairs = Vec::with_capacity(1);
        push_pair(&mut pairs, "url", &self.url);
        Ok(pairs)
    }
}
