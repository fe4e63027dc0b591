//! Expanded URL filters shared by the URL and submission searches.

use std::str::FromStr;

use crate::Error;

use super::common::{non_empty, push_pair, CommonQuery, QueryCommon};

/// Filters accepted by `/api/v1/urls/` and `/api/v1/submissions/` on top of
/// the generic parameters.
///
/// Only `order_by` is checked locally. Country codes, ASNs, IP ranges and
/// dates are passed through as given and validated by the service.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UrlFilters {
    pub url_exact: Option<String>,
    pub country: Option<String>,
    pub asn: Option<u32>,
    pub domain: Option<String>,
    pub redirector: Option<String>,
    pub language: Option<String>,
    pub tld: Option<String>,
    pub ip_address: Option<String>,
    pub ip_range: Option<String>,
    pub first_seen_before: Option<String>,
    pub first_seen_after: Option<String>,
    pub last_tagged_before: Option<String>,
    pub last_tagged_after: Option<String>,
    pub order_by: Option<String>,
}

impl UrlFilters {
    /// Builds the generic parameters of `common`, then appends the expanded
    /// filters in their fixed order.
    pub fn to_pairs(&self, common: &QueryCommon) -> Result<Vec<(String, String)>, Error> {
        let mut pairs = common.to_pairs()?;
        let text_filters = [
            ("url_exact", &self.url_exact),
            ("country", &self.country),
        ];
        for (key, value) in text_filters {
            if let Some(value) = non_empty(value) {
                push_pair(&mut pairs, key, value);
            }
        }
        if let Some(asn) = self.asn.filter(|a| *a > 0) {
            push_pair(&mut pairs, "asn", asn);
        }
        let text_filters = [
            ("domain", &self.domain),
            ("redirector", &self.redirector),
            ("language", &self.language),
            ("tld", &self.tld),
            ("ip_address", &self.ip_address),
            ("ip_range", &self.ip_range),
            ("first_seen_before", &self.first_seen_before),
            ("first_seen_after", &self.first_seen_after),
            ("last_tagged_before", &self.last_tagged_before),
            ("last_tagged_after", &self.last_tagged_after),
        ];
        for (key, value) in text_filters {
            if let Some(value) = non_empty(value) {
                push_pair(&mut pairs, key, value);
            }
        }
        if let Some(order_by) = non_empty(&self.order_by) {
            push_pair(&mut pairs, "order_by", order_by.parse::<OrderBy>()?);
        }
        Ok(pairs)
    }
}

/// Builder methods for the expanded filters, on top of [`CommonQuery`].
pub trait FilterQuery: CommonQuery {
    /// Returns a mutable reference to the expanded filters.
    fn get_filters(&mut self) -> &mut UrlFilters;

    /// Matches the URL exactly instead of as a fragment.
    fn with_url_exact(mut self, url_exact: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().url_exact = Some(url_exact.to_string());
        self
    }

    /// Filters by hosting country (e.g. `FR`).
    fn with_country(mut self, country: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().country = Some(country.to_string());
        self
    }

    /// Filters by autonomous system number.
    fn with_asn(mut self, asn: u32) -> Self
    where
        Self: Sized,
    {
        self.get_filters().asn = Some(asn);
        self
    }

    fn with_domain(mut self, domain: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().domain = Some(domain.to_string());
        self
    }

    fn with_redirector(mut self, redirector: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().redirector = Some(redirector.to_string());
        self
    }

    fn with_language(mut self, language: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().language = Some(language.to_string());
        self
    }

    fn with_tld(mut self, tld: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().tld = Some(tld.to_string());
        self
    }

    fn with_ip_address(mut self, ip_address: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().ip_address = Some(ip_address.to_string());
        self
    }

    /// Filters by IP range in CIDR notation.
    fn with_ip_range(mut self, ip_range: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().ip_range = Some(ip_range.to_string());
        self
    }

    fn with_first_seen_before(mut self, date: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().first_seen_before = Some(date.to_string());
        self
    }

    fn with_first_seen_after(mut self, date: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().first_seen_after = Some(date.to_string());
        self
    }

    fn with_last_tagged_before(mut self, date: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().last_tagged_before = Some(date.to_string());
        self
    }

    fn with_last_tagged_after(mut self, date: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().last_tagged_after = Some(date.to_string());
        self
    }

    /// Sets the result ordering. Must be one of the [`OrderBy`] values.
    fn with_order_by(mut self, order_by: &str) -> Self
    where
        Self: Sized,
    {
        self.get_filters().order_by = Some(order_by.to_string());
        self
    }
}

/// Result orderings accepted by the `order_by` filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderBy {
    FirstSeen,
    Url,
    FirstSeenDesc,
    UrlDesc,
}

impl OrderBy {
    const ALL: [&'static str; 4] = ["first_seen", "url", "-first_seen", "-url"];
}

impl std::fmt::Display for OrderBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                OrderBy::FirstSeen => "first_seen",
                OrderBy::Url => "url",
                OrderBy::FirstSeenDesc => "-first_seen",
                OrderBy::UrlDesc => "-url",
            }
        )?;
        Ok(())
    }
}

impl FromStr for OrderBy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_seen" => Ok(OrderBy::FirstSeen),
            "url" => Ok(OrderBy::Url),
            "-first_seen" => Ok(OrderBy::FirstSeenDesc),
            "-url" => Ok(OrderBy::UrlDesc),
            _ => Err(Error::InvalidSearchQuery(format!(
                "order_by can only be in {} - {}",
                OrderBy::ALL.join(", "),
                s
            ))),
        }
    }
}
