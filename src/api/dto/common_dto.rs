//! Shared DTO types used across multiple endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::page::{DEFAULT_PAGE_SIZE, Sort};
use crate::domain::{Page, PageRequest};
use crate::error::ApiError;

/// Paging query parameters for list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (0-indexed). Defaults to 0.
    #[serde(default)]
    pub page: u32,
    /// Items per page (1 to 100). Defaults to 20.
    #[serde(default = "default_size")]
    pub size: u32,
    /// Sort expression `property[,asc|desc]`, e.g. `name,DESC`.
    #[serde(default)]
    pub sort: Option<String>,
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl PageParams {
    /// Converts the raw query into a [`PageRequest`], clamping `size`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidQuery`] if `sort` names an unknown
    /// property or direction.
    pub fn to_request(&self) -> Result<PageRequest, ApiError> {
        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") => Sort::default(),
            Some(expr) => expr.parse()?,
        };
        Ok(PageRequest::new(self.page, self.size, sort))
    }
}

/// Paging metadata included in list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Items per page.
    pub size: u32,
    /// Total number of items.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Current page number (0-indexed).
    pub number: u32,
}

impl<T> From<&Page<T>> for PageMeta {
    fn from(page: &Page<T>) -> Self {
        Self {
            size: page.request.size,
            total_elements: page.total_elements,
            total_pages: page.total_pages(),
            number: page.request.number,
        }
    }
}

/// Lenient ISO-8601 local date-time parsing for request bodies.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS[.fff]]`; seconds default to zero.
pub mod local_date_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer};

    const WITH_SECONDS: &str = "%Y-%m-%dT%H:%M:%S%.f";
    const MINUTES_ONLY: &str = "%Y-%m-%dT%H:%M";

    /// Parses a single local date-time.
    ///
    /// # Errors
    ///
    /// Returns the parse error of the minutes-only form when neither
    /// layout matches.
    pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(raw, WITH_SECONDS)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, MINUTES_ONLY))
    }

    /// `deserialize_with` helper for `Option<NaiveDateTime>` fields.
    ///
    /// # Errors
    ///
    /// Fails when the value is neither `null` nor a parseable string.
    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse(raw.trim()).map_err(serde::de::Error::custom))
            .transpose()
    }
}
