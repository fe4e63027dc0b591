mod common;
pub use self::common::{CommonQuery, Query, QueryCommon, Tag, TagLabel, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
mod filters;
pub use self::filters::{FilterQuery, OrderBy, UrlFilters};

mod url;
pub use self::url::UrlQuery;

mod submission;
pub use self::submission::SubmissionQuery;

mod search;
pub use self::search::FullTextQuery;

mod lookup;
pub use self::lookup::LookupQuery;
