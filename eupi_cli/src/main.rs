mod commands;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use eupi_api::Client;

use crate::commands::{Action, SearchArgs};

#[derive(Parser)]
#[command(name = "eupi")]
#[command(about = "Query the Phishing Initiative service")]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args(["urls", "submissions", "post", "tag", "lookup"])
))]
struct Cli {
    /// URL where the service is running (no path)
    #[arg(long, default_value = "https://phishing-initiative.fr")]
    url: String,

    /// Authorization key to query the service
    #[arg(long, env = "EUPI_KEY", hide_env_values = true)]
    key: String,

    /// Enable debug output: resolved URL, raw bodies, and debug logs
    #[arg(long)]
    debug: bool,

    /// Do not verify the TLS certificate
    #[arg(long = "not_verify")]
    not_verify: bool,

    /// Treat a textual --urls value as a full-text search on page content
    #[arg(short = 'f', long = "full_text_search")]
    full_text_search: bool,

    /// Pretty-print the JSON document
    #[arg(long)]
    pretty: bool,

    /// Query URLs. An integer is a URL ID (0 lists URLs), any other value searches URLs
    #[arg(short = 'u', long)]
    urls: Option<String>,

    /// Query your submissions by ID (0 lists submissions)
    #[arg(short = 's', long)]
    submissions: Option<u64>,

    /// URL to submit
    #[arg(short = 'p', long)]
    post: Option<String>,

    /// List URLs with this tag: 0 (unknown), 1 (phishing), 2 (clean)
    #[arg(short = 't', long)]
    tag: Option<i64>,

    /// Look up a URL by exact match
    #[arg(short = 'l', long)]
    lookup: Option<String>,

    #[command(flatten)]
    search: SearchArgs,

    #[command(flatten)]
    submission: commands::post::PostArgs,
}

impl Cli {
    fn action(&self) -> Option<Action> {
        if let Some(target) = &self.urls {
            Some(Action::Urls(target.clone()))
        } else if let Some(id) = self.submissions {
            Some(Action::Submissions(id))
        } else if let Some(url) = &self.post {
            Some(Action::Post(url.clone()))
        } else if let Some(tag) = self.tag {
            Some(Action::Tag(tag))
        } else {
            self.lookup.clone().map(Action::Lookup)
        }
    }
}

fn init_tracing(debug: bool) -> Result<()> {
    let (cli_level, api_level) = if debug {
        ("debug", "debug")
    } else {
        ("info", "warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("eupi={}", cli_level).parse()?)
                .add_directive(format!("eupi_api={}", api_level).parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    let client = Client::builder(&cli.key)
        .base_url(&cli.url)
        .verify_tls(!cli.not_verify)
        .debug(cli.debug)
        .build()?;

    let action = cli.action().ok_or_else(|| {
        anyhow::anyhow!("one of --urls, --submissions, --post, --tag, --lookup is required")
    })?;
    tracing::debug!("Running {:?} against {}", action, client.base_url());

    let response = match &action {
        Action::Urls(target) => {
            commands::urls::run(target, cli.full_text_search, &cli.search, &client).await?
        }
        Action::Tag(tag) => commands::urls::run_tag(*tag, &cli.search, &client).await?,
        Action::Lookup(url) => client.lookup_url(url).await?,
        Action::Submissions(id) => commands::submissions::run(*id, &cli.search, &client).await?,
        Action::Post(url) => commands::post::run(url, &cli.submission, &client).await?,
    };

    output::print_json(&response, cli.pretty)?;

    if response.is_error() {
        tracing::warn!("Service did not return a JSON document");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut argv = vec!["eupi", "--key", "secret"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv)
    }

    #[test]
    fn urls_flag_selects_urls_action() {
        let cli = parse(&["-u", "42"]).unwrap();
        assert!(matches!(cli.action(), Some(Action::Urls(ref t)) if t == "42"));
        assert_eq!(cli.url, "https://phishing-initiative.fr");
        assert!(!cli.not_verify);
    }

    #[test]
    fn actions_are_mutually_exclusive() {
        assert!(parse(&["-u", "42", "-s", "1"]).is_err());
        assert!(parse(&["-p", "http://evil.example", "-t", "1"]).is_err());
    }

    #[test]
    fn an_action_is_required() {
        assert!(parse(&["--debug"]).is_err());
    }

    #[test]
    fn long_flags_match_historic_names() {
        let cli = parse(&["--not_verify", "--full_text_search", "--urls", "bank"]).unwrap();
        assert!(cli.not_verify);
        assert!(cli.full_text_search);
    }

    #[test]
    fn post_options_parse() {
        let cli = parse(&[
            "-p",
            "http://evil.example",
            "--comment",
            "mail campaign",
            "--notify",
            "--submit-tag",
            "1",
        ])
        .unwrap();
        assert!(matches!(cli.action(), Some(Action::Post(_))));
        assert_eq!(cli.submission.comment, "mail campaign");
        assert!(cli.submission.notify);
        assert_eq!(cli.submission.submit_tag, 1);
    }

    #[test]
    fn dates_parse_as_iso() {
        let cli = parse(&["-t", "1", "--since", "2024-03-01"]).unwrap();
        assert_eq!(cli.search.since_param().as_deref(), Some("2024-03-01"));
        assert!(parse(&["-t", "1", "--since", "March 1st"]).is_err());
    }
}
