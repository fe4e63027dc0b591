use anyhow::Result;
use eupi_api::{ApiResponse, Client, SubmissionQuery};

use super::SearchArgs;

/// `--submissions`: 0 lists the caller's submissions, any other value fetches one.
pub async fn run(id: u64, search: &SearchArgs, client: &Client) -> Result<ApiResponse> {
    if id > 0 {
        return Ok(client.get_submission(Some(id)).await?);
    }
    Ok(client.search_submissions(&submission_listing(search)).await?)
}

fn submission_listing(search: &SearchArgs) -> SubmissionQuery {
    let mut query = search.apply(SubmissionQuery::default());
    if let Some(since) = search.since_param() {
        query = query.with_submitted_after(&since);
    }
    if let Some(until) = search.until_param() {
        query = query.with_submitted_before(&until);
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
    fn dates_map_to_submission_bounds() {
        let mut search = search_args();
        search.since = NaiveDate::from_ymd_opt(2024, 1, 1);
        search.until = NaiveDate::from_ymd_opt(2024, 1, 31);
        let pairs = submission_listing(&search).query_pairs().unwrap();
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["page_size", "submitted_before", "submitted_after"]);
    }
}
