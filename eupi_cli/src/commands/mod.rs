//! CLI action implementations.

pub mod post;
pub mod submissions;
pub mod urls;

use chrono::NaiveDate;
use clap::Args;
use eupi_api::{CommonQuery, DEFAULT_PAGE_SIZE};

/// The single action selected on the command line.
#[derive(Debug)]
pub enum Action {
    Urls(String),
    Submissions(u64),
    Post(String),
    Tag(i64),
    Lookup(String),
}

/// Paging and date bounds applied to listing and search actions.
#[derive(Args)]
pub struct SearchArgs {
    /// Page number
    #[arg(long)]
    pub page: Option<u32>,

    /// Results per page (at most 50)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Only entries first seen (URLs) or submitted (submissions) on or after this date, YYYY-MM-DD
    #[arg(long)]
    pub since: Option<NaiveDate>,

    /// Only entries first seen (URLs) or submitted (submissions) on or before this date, YYYY-MM-DD
    #[arg(long)]
    pub until: Option<NaiveDate>,
}

impl SearchArgs {
    /// Applies `--page` and `--page-size` to any search query.
    pub fn apply<Q: CommonQuery>(&self, query: Q) -> Q {
        let query = query.with_page_size(self.page_size);
        match self.page {
            Some(page) => query.with_page(page),
            None => query,
        }
    }

    pub fn since_param(&self) -> Option<String> {
        self.since.map(|date| date.format("%Y-%m-%d").to_string())
    }

    pub fn until_param(&self) -> Option<String> {
        self.until.map(|date| date.format("%Y-%m-%d").to_string())
    }
}

#[cfg(test)]
pub(crate) fn search_args() -> SearchArgs {
    SearchArgs {
        page: None,
        page_size: DEFAULT_PAGE_SIZE,
        since: None,
        until: None,
    }
}
