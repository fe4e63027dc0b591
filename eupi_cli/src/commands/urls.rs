use anyhow::Result;
use eupi_api::{ApiResponse, Client, CommonQuery, FilterQuery, FullTextQuery, UrlQuery};

use super::SearchArgs;

/// `--urls`: an integer is a URL ID (0 lists URLs), anything else is a search.
pub async fn run(
    target: &str,
    full_text: bool,
    search: &SearchArgs,
    client: &Client,
) -> Result<ApiResponse> {
    let resp = match target.trim().parse::<u64>() {
        Ok(0) => client.search_urls(&url_listing(search)).await?,
        Ok(id) => client.get_url(Some(id)).await?,
        Err(_) if full_text => client.search_full_text(&full_text_search(target, search)).await?,
        Err(_) => client.search_urls(&url_listing(search).with_url(target)).await?,
    };
    Ok(resp)
}

/// `--tag`: URLs carrying the given tag.
pub async fn run_tag(tag: i64, search: &SearchArgs, client: &Client) -> Result<ApiResponse> {
    let resp = client
        .search_urls(&url_listing(search).with_tag(tag))
        .await?;
    Ok(resp)
}

fn url_listing(search: &SearchArgs) -> UrlQuery {
    let mut query = search.apply(UrlQuery::default());
    if let Some(since) = search.since_param() {
        query = query.with_first_seen_after(&since);
    }
    if let Some(until) = search.until_param() {
        query = query.with_first_seen_before(&until);
    }
    query
}

fn full_text_search(content: &str, search: &SearchArgs) -> FullTextQuery {
    let mut query = search.apply(FullTextQuery::default()).with_content(content);
    if let Some(since) = search.since_param() {
        query = query.with_first_seen_after(&since);
    }
    if let Some(until) = search.until_param() {
        query = query.with_first_seen_before(&until);
    }
    query
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use eupi_api::Query;

    use super::*;
    use crate::commands::search_args;

    #[test]
    fn listing_carries_date_bounds() {
        let mut search = search_args();
        search.since = NaiveDate::from_ymd_opt(2024, 3, 1);
        search.page = Some(2);
        let pairs = url_listing(&search).query_pairs().unwrap();
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("first_seen_after".to_string(), "2024-03-01".to_string())));
    }

    #[test]
    fn full_text_uses_content() {
        let pairs = full_text_search("verify your account", &search_args())
            .query_pairs()
            .unwrap();
        assert_eq!(
            pairs.last().unwrap(),
            &("content".to_string(), "verify your account".to_string())
        );
    }

    #[test]
    fn oversized_page_is_rejected_locally() {
        let mut search = search_args();
        search.page_size = 500;
        assert!(url_listing(&search).query_pairs().is_err());
    }
}
