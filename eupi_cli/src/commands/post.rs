use anyhow::Result;
use clap::Args;
use eupi_api::{ApiResponse, Client, NewSubmission};

#[derive(Args)]
pub struct PostArgs {
    /// Comment attached to a --post submission
    #[arg(long, default_value = "")]
    pub comment: String,

    /// Ask to be notified once a --post submission is tagged
    #[arg(long)]
    pub notify: bool,

    /// Suggested tag for a --post submission: 0 (unknown), 1 (phishing), 2 (clean)
    #[arg(long, default_value_t = 0)]
    pub submit_tag: i64,
}

pub async fn run(url: &str, args: &PostArgs, client: &Client) -> Result<ApiResponse> {
    let submission = NewSubmission::new(url)
        .with_comment(&args.comment)
        .with_notify(args.notify)
        .with_tag(args.submit_tag);
    Ok(client.post_submission(&submission).await?)
}
