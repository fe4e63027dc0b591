//! Payload for creating a submission.

use serde::Serialize;

use crate::{query::Tag, Error};

/// A URL proposed for classification. Serialized as
/// `{"url", "comment", "notify", "tag"}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewSubmission {
    pub url: String,
    pub comment: String,
    /// Ask the service to notify the submitter once the URL is tagged.
    pub notify: bool,
    /// Suggested tag, see [`Tag`]. Defaults to 0 (unknown).
    pub tag: i64,
}

impl NewSubmission {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            comment: String::new(),
            notify: false,
            tag: Tag::Unknown.as_i64(),
        }
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    pub fn with_notify(mut self, notify: bool) -> Self {
        self.notify = notify;
        self
    }

    pub fn with_tag(mut self, tag: i64) -> Self {
        self.tag = tag;
        self
    }

    /// Checks the suggested tag. Called before the submission is sent.
    pub fn validate(&self) -> Result<(), Error> {
        Tag::try_from(self.tag).map(|_| ())
    }
}
