//! Query-string criteria for paged listings and sampled statistics.

use crate::error::{invalid, Result};
use serde::{Deserialize, Serialize};

/// Largest page the management API will return.
pub const MAX_PAGE_SIZE: u32 = 500;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageCriteria {
    page: u32,
    page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    use_regex: Option<bool>,
}

impl PageCriteria {
    /// `page` counts from 1; `page_size` must be between 1 and [MAX_PAGE_SIZE].
    pub fn new(page: u32, page_size: u32) -> Result<Self> {
        if page == 0 {
            return Err(invalid("page", "pages are numbered from 1"));
        }
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(invalid(
                "page_size",
                format!("must be between 1 and {}", MAX_PAGE_SIZE),
            ));
        }
        Ok(Self {
            page,
            page_size,
            name: None,
            use_regex: None,
        })
    }

    /// Only list objects whose name contains `name`, or matches it if `use_regex` is set.
    pub fn with_name(self, name: impl Into<String>, use_regex: bool) -> Self {
        Self {
            name: Some(name.into()),
            use_regex: Some(use_regex),
            ..self
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    pub filtered_count: u64,
    pub item_count: u64,
    pub items: Vec<T>,
    pub page: u32,
    pub page_count: u32,
    pub page_size: u32,
    pub total_count: u64,
}

/// Sampling window for the `*_details` histories, in seconds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StatsCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lengths_age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lengths_incr: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg_rates_age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg_rates_incr: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_rates_age: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_rates_incr: Option<u64>,
}

impl StatsCriteria {
    /// Lengths and message rates over the last `age` seconds, sampled every `incr` seconds.
    pub fn new(age: u64, incr: u64) -> Self {
        Self {
            lengths_age: Some(age),
            lengths_incr: Some(incr),
            msg_rates_age: Some(age),
            msg_rates_incr: Some(incr),
            data_rates_age: None,
            data_rates_incr: None,
        }
    }
}
