//! Client for the Phishing Initiative API: URL lookup and search, and
//! submission of suspicious URLs.
//!
//! Queries validate their enumerated values (`tag`, `tag_label`, `order_by`)
//! and `page_size` before anything is sent. Every response is normalized into
//! an [`Envelope`], whether the service answered with a JSON list, a JSON
//! object, or an HTML error page.

mod client;
mod envelope;
mod errors;
mod query;
mod submission;
pub use self::client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use self::envelope::{ApiResponse, DebugInfo, Envelope, UNAUTHORIZED_MESSAGE};
pub use self::errors::Error;
pub use self::query::{
    CommonQuery, FilterQuery, FullTextQuery, LookupQuery, OrderBy, Query, QueryCommon,
    SubmissionQuery, Tag, TagLabel, UrlFilters, UrlQuery, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use self::submission::NewSubmission;
