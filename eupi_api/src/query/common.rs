//! Shared query infrastructure: the [`Query`] and [`CommonQuery`] traits, the
//! generic [`QueryCommon`] fields, and the [`Tag`] / [`TagLabel`] enumerations.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::Error;

/// Largest `page_size` the service accepts.
pub const MAX_PAGE_SIZE: u32 = 50;

/// `page_size` used by the search queries unless the caller overrides it.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Trait implemented by all query builders. Produces the validated, ordered
/// list of query-string parameters for one endpoint.
pub trait Query {
    /// Validates the stored values and returns the parameters in their fixed order.
    fn query_pairs(&self) -> Result<Vec<(String, String)>, Error>;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    ///
    /// A URL is returned unchanged when the query has no parameters.
    fn add_to_url(&self, url: &Url) -> Result<Url, Error> {
        let pairs = self.query_pairs()?;
        let mut url = url.clone();
        if !pairs.is_empty() {
            let mut serializer = url.query_pairs_mut();
            for (key, value) in pairs.iter() {
                serializer.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

/// Builder methods for the generic parameters shared by every search endpoint.
pub trait CommonQuery: Query {
    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Filters on a (partial) URL.
    fn with_url(mut self, url: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().url = Some(url.to_string());
        self
    }

    /// Filters on the numeric tag. Must be 0, 1 or 2.
    fn with_tag(mut self, tag: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().tag = Some(tag);
        self
    }

    /// Filters on the tag label. Must be `unknown`, `phishing` or `clean`.
    fn with_tag_label(mut self, tag_label: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().tag_label = Some(tag_label.to_string());
        self
    }

    /// Sets the page number (1-indexed).
    fn with_page(mut self, page: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = Some(page);
        self
    }

    /// Sets the number of results per page. Must not exceed [`MAX_PAGE_SIZE`].
    fn with_page_size(mut self, page_size: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().page_size = Some(page_size);
        self
    }
}

/// Fields shared by all search queries: pagination, URL and tag filters.
///
/// Values are stored as given and checked by [`QueryCommon::to_pairs`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryCommon {
    /// Page number. `None` or 0 uses the API default.
    pub page: Option<u32>,
    /// Results per page. `None` or 0 uses the API default.
    pub page_size: Option<u32>,
    /// URL (or URL fragment) to filter on.
    pub url: Option<String>,
    /// Numeric tag, see [`Tag`].
    pub tag: Option<i64>,
    /// Tag label, see [`TagLabel`].
    pub tag_label: Option<String>,
}

impl QueryCommon {
    /// Builds the generic parameters in the order
    /// `page, page_size, url, tag, tag_label`, skipping absent values.
    pub fn to_pairs(&self) -> Result<Vec<(String, String)>, Error> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page.filter(|p| *p > 0) {
            push_pair(&mut pairs, "page", page);
        }
        if let Some(page_size) = self.page_size.filter(|s| *s > 0) {
            if page_size > MAX_PAGE_SIZE {
                return Err(Error::InvalidSearchQuery(format!(
                    "Page size must be <= {} - {}",
                    MAX_PAGE_SIZE, page_size
                )));
            }
            push_pair(&mut pairs, "page_size", page_size);
        }
        if let Some(url) = non_empty(&self.url) {
            push_pair(&mut pairs, "url", url);
        }
        if let Some(tag) = self.tag {
            push_pair(&mut pairs, "tag", Tag::try_from(tag)?);
        }
        if let Some(tag_label) = non_empty(&self.tag_label) {
            push_pair(&mut pairs, "tag_label", tag_label.parse::<TagLabel>()?);
        }
        Ok(pairs)
    }
}

pub(super) fn push_pair(pairs: &mut Vec<(String, String)>, key: &str, value: impl ToString) {
    pairs.push((key.to_string(), value.to_string()));
}

pub(super) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Classification of a URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tag {
    #[default]
    Unknown = 0,
    Phishing = 1,
    Clean = 2,
}

impl Tag {
    /// Numeric value sent to the API.
    pub fn as_i64(self) -> i64 {
        self as i64
    }

    /// Label matching this tag.
    pub fn label(self) -> TagLabel {
        match self {
            Tag::Unknown => TagLabel::Unknown,
            Tag::Phishing => TagLabel::Phishing,
            Tag::Clean => TagLabel::Clean,
        }
    }
}

impl TryFrom<i64> for Tag {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Tag::Unknown),
            1 => Ok(Tag::Phishing),
            2 => Ok(Tag::Clean),
            _ => Err(Error::InvalidSearchQuery(format!(
                "Tag can only be in 0 (unknown), 1 (phishing), 2 (clean) - {}",
                value
            ))),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

impl FromStr for Tag {
    type Err = Error;

    /// Accepts the numeric form (`"1"`) or the label (`"phishing"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(value) => Tag::try_from(value),
            Err(_) => Ok(match s.parse::<TagLabel>()? {
                TagLabel::Unknown => Tag::Unknown,
                TagLabel::Phishing => Tag::Phishing,
                TagLabel::Clean => Tag::Clean,
            }),
        }
    }
}

/// Textual form of [`Tag`], accepted by the `tag_label` filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagLabel {
    Unknown,
    Phishing,
    Clean,
}

impl TagLabel {
    const ALL: [&'static str; 3] = ["unknown", "phishing", "clean"];
}

impl fmt::Display for TagLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TagLabel::Unknown => "unknown",
                TagLabel::Phishing => "phishing",
                TagLabel::Clean => "clean",
            }
        )
    }
}

impl FromStr for TagLabel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(TagLabel::Unknown),
            "phishing" => Ok(TagLabel::Phishing),
            "clean" => Ok(TagLabel::Clean),
            _ => Err(Error::InvalidSearchQuery(format!(
                "Tag label can only be in {} - {}",
                TagLabel::ALL.join(", "),
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_common_has_no_pairs() {
        assert!(QueryCommon::default().to_pairs().unwrap().is_empty());
    }

    #[test]
    fn common_pairs_keep_fixed_order() {
        let common = QueryCommon {
            page: Some(2),
            page_size: Some(10),
            url: Some("example.com".to_string()),
            tag: Some(1),
            tag_label: Some("phishing".to_string()),
        };
        let keys: Vec<String> = common.to_pairs().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["page", "page_size", "url", "tag", "tag_label"]);
    }

    #[test]
    fn zero_page_and_empty_url_are_skipped() {
        let common = QueryCommon {
            page: Some(0),
            page_size: Some(0),
            url: Some(String::new()),
            ..Default::default()
        };
        assert!(common.to_pairs().unwrap().is_empty());
    }

    #[test]
    fn tag_zero_is_kept() {
        let common = QueryCommon {
            tag: Some(0),
            ..Default::default()
        };
        assert_eq!(
            common.to_pairs().unwrap(),
            vec![("tag".to_string(), "0".to_string())]
        );
    }

    #[test]
    fn page_size_above_limit_rejected() {
        let common = QueryCommon {
            page_size: Some(51),
            ..Default::default()
        };
        let err = common.to_pairs().unwrap_err();
        assert!(matches!(err, Error::InvalidSearchQuery(_)));
        assert!(err.to_string().contains("51"));
    }

    #[test]
    fn tag_out_of_range_rejected() {
        for tag in [-1, 3, 42] {
            assert!(Tag::try_from(tag).is_err(), "tag {} accepted", tag);
        }
    }

    #[test]
    fn tag_parses_number_or_label() {
        assert_eq!("2".parse::<Tag>().unwrap(), Tag::Clean);
        assert_eq!("phishing".parse::<Tag>().unwrap(), Tag::Phishing);
        assert!("7".parse::<Tag>().is_err());
        assert!("evil".parse::<Tag>().is_err());
    }

    #[test]
    fn tag_label_round_trips_through_display() {
        for tag in [Tag::Unknown, Tag::Phishing, Tag::Clean] {
            let label = tag.label();
            assert_eq!(label.to_string().parse::<TagLabel>().unwrap(), label);
        }
    }

    #[test]
    fn tag_label_error_lists_allowed_values() {
        let err = "Phishing".parse::<TagLabel>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid search query: Tag label can only be in unknown, phishing, clean - Phishing"
        );
    }
}
