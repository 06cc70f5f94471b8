//! Status code and content length exclusion. Exact equality only.

use std::collections::HashSet;

use crate::FilterSpec;

pub fn is_status_hidden(status_code: u16, hidden: &HashSet<u16>) -> bool {
    hidden.contains(&status_code)
}

/// `-1` (no declared length) is compared like any other value.
pub fn is_length_hidden(content_length: i64, hidden: &HashSet<i64>) -> bool {
    hidden.contains(&content_length)
}

impl FilterSpec {
    pub fn new(
        hidden_status_codes: impl IntoIterator<Item = u16>,
        hidden_content_lengths: impl IntoIterator<Item = i64>,
    ) -> Self {
        Self {
            hidden_status_codes: hidden_status_codes.into_iter().collect(),
            hidden_content_lengths: hidden_content_lengths.into_iter().collect(),
        }
    }

    /// Accepted iff neither the status nor the length is in its exclusion set.
    pub fn accepts(&self, status_code: u16, content_length: i64) -> bool {
        !is_status_hidden(status_code, &self.hidden_status_codes)
            && !is_length_hidden(content_length, &self.hidden_content_lengths)
    }

    pub fn is_empty(&self) -> bool {
        self.hidden_status_codes.is_empty() && self.hidden_content_lengths.is_empty()
    }
}
