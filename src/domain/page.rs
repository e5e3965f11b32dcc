//! Paged, sorted listing.
//!
//! Pages are 0-indexed. Sorting accepts a single `property[,direction]`
//! expression naming an [`Event`] JSON key; ties are always broken by id
//! so that a page boundary never splits equal rows non-deterministically.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::Event;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl Direction {
    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Event properties that can be sorted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    /// Repository-assigned id.
    #[default]
    Id,
    /// `name`
    Name,
    /// `description`
    Description,
    /// `beginEnrollmentDateTime`
    BeginEnrollmentDateTime,
    /// `closeEnrollmentDateTime`
    CloseEnrollmentDateTime,
    /// `beginEventDateTime`
    BeginEventDateTime,
    /// `endEventDateTime`
    EndEventDateTime,
    /// `location`
    Location,
    /// `basePrice`
    BasePrice,
    /// `maxPrice`
    MaxPrice,
    /// `limitOfEnrollment`
    LimitOfEnrollment,
    /// `eventStatus`
    EventStatus,
}

impl SortField {
    /// Column name in the `events` table.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Description => "description",
            Self::BeginEnrollmentDateTime => "begin_enrollment_date_time",
            Self::CloseEnrollmentDateTime => "close_enrollment_date_time",
            Self::BeginEventDateTime => "begin_event_date_time",
            Self::EndEventDateTime => "end_event_date_time",
            Self::Location => "location",
            Self::BasePrice => "base_price",
            Self::MaxPrice => "max_price",
            Self::LimitOfEnrollment => "limit_of_enrollment",
            Self::EventStatus => "event_status",
        }
    }

    /// Compares two events on this property alone.
    #[must_use]
    pub fn compare(self, a: &Event, b: &Event) -> Ordering {
        match self {
            Self::Id => a.id.cmp(&b.id),
            Self::Name => a.name.cmp(&b.name),
            Self::Description => a.description.cmp(&b.description),
            Self::BeginEnrollmentDateTime => a
                .begin_enrollment_date_time
                .cmp(&b.begin_enrollment_date_time),
            Self::CloseEnrollmentDateTime => a
                .close_enrollment_date_time
                .cmp(&b.close_enrollment_date_time),
            Self::BeginEventDateTime => a.begin_event_date_time.cmp(&b.begin_event_date_time),
            Self::EndEventDateTime => a.end_event_date_time.cmp(&b.end_event_date_time),
            // Postgres sorts NULLs last in ascending order.
            Self::Location => match (&a.location, &b.location) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            Self::BasePrice => a.base_price.cmp(&b.base_price),
            Self::MaxPrice => a.max_price.cmp(&b.max_price),
            Self::LimitOfEnrollment => a.limit_of_enrollment.cmp(&b.limit_of_enrollment),
            Self::EventStatus => a.event_status.as_str().cmp(b.event_status.as_str()),
        }
    }
}

impl FromStr for SortField {
    type Err = InvalidSort;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "id" => Self::Id,
            "name" => Self::Name,
            "description" => Self::Description,
            "beginEnrollmentDateTime" => Self::BeginEnrollmentDateTime,
            "closeEnrollmentDateTime" => Self::CloseEnrollmentDateTime,
            "beginEventDateTime" => Self::BeginEventDateTime,
            "endEventDateTime" => Self::EndEventDateTime,
            "location" => Self::Location,
            "basePrice" => Self::BasePrice,
            "maxPrice" => Self::MaxPrice,
            "limitOfEnrollment" => Self::LimitOfEnrollment,
            "eventStatus" => Self::EventStatus,
            other => return Err(InvalidSort::Property(other.to_string())),
        };
        Ok(field)
    }
}

/// Rejected `sort` expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSort {
    /// The property is not a sortable event key.
    #[error("unknown sort property: {0}")]
    Property(String),
    /// The direction is neither `asc` nor `desc`.
    #[error("unknown sort direction: {0}")]
    Direction(String),
}

/// A sort order: one property plus a direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort {
    /// Property to sort on.
    pub field: SortField,
    /// Direction of the property.
    pub direction: Direction,
}

impl Sort {
    /// Total order used for listing: the requested property, then id.
    #[must_use]
    pub fn compare(&self, a: &Event, b: &Event) -> Ordering {
        let primary = match self.direction {
            Direction::Asc => self.field.compare(a, b),
            Direction::Desc => self.field.compare(b, a),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl FromStr for Sort {
    type Err = InvalidSort;

    /// Parses `property` or `property,asc|desc` (direction is
    /// case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (property, direction) = match s.split_once(',') {
            Some((p, d)) => (p.trim(), Some(d.trim())),
            None => (s.trim(), None),
        };
        let field = property.parse()?;
        let direction = match direction {
            None => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("asc") => Direction::Asc,
            Some(d) if d.eq_ignore_ascii_case("desc") => Direction::Desc,
            Some(d) => return Err(InvalidSort::Direction(d.to_string())),
        };
        Ok(Self { field, direction })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.column(), self.direction.as_sql())
    }
}

/// Which slice of the collection to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-indexed page number.
    pub number: u32,
    /// Items per page, within `1..=MAX_PAGE_SIZE`.
    pub size: u32,
    /// Sort order.
    pub sort: Sort,
}

impl PageRequest {
    /// Builds a request, clamping `size` to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub fn new(number: u32, size: u32, sort: Sort) -> Self {
        Self {
            number,
            size: size.clamp(1, MAX_PAGE_SIZE),
            sort,
        }
    }

    /// Number of rows to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.number as u64 * self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE, Sort::default())
    }
}

/// One page of results plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in sort order.
    pub content: Vec<T>,
    /// The request that produced this page.
    pub request: PageRequest,
    /// Number of items across all pages.
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Number of pages needed to hold `total_elements`.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.request.size))
    }

    /// Transforms every item, keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            request: self.request,
            total_elements: self.total_elements,
        }
    }
}
