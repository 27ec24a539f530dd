//! Pagination primitives shared by the list endpoints.
//!
//! Clients page through collections with two query parameters: `maxResults`
//! (page size) and `nextToken` (opaque continuation token). The token is the
//! stringified offset of the first item of the next page. It carries no
//! snapshot, so writes between page fetches may shift items across pages.
//!
//! ```
//! use pagination::{PageRequest, NextToken};
//!
//! let request = PageRequest::new(Some(2), None).expect("valid page size");
//! let page = request.slice(vec!["a", "b", "c"]);
//! assert_eq!(page.items(), &["a", "b"]);
//! assert_eq!(page.next_token(), Some(NextToken::new(2)));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Page size applied when the client does not send `maxResults`.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Errors raised while interpreting pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The requested page size was zero.
    #[error("maxResults must be at least 1")]
    ZeroPageSize,
    /// The token is not a stringified non-negative offset.
    #[error("nextToken is not a valid continuation token: {value}")]
    InvalidToken {
        /// Raw token supplied by the client.
        value: String,
    },
}

/// Continuation token pointing at the offset of the next page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NextToken(usize);

impl NextToken {
    /// Token addressing the given offset.
    pub const fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// Offset of the first item on the page this token addresses.
    pub const fn offset(self) -> usize {
        self.0
    }

    /// Interpret a client-supplied token, falling back to the first page.
    ///
    /// Missing, empty, and unparseable tokens all address offset zero, which
    /// matches how existing clients restart listing after a bad token.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for NextToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NextToken {
    type Err = PaginationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .map(Self)
            .map_err(|_| PaginationError::InvalidToken {
                value: s.to_owned(),
            })
    }
}

impl Serialize for NextToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NextToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Window over a collection: where the page starts and how many items it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    offset: usize,
    limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a window from the raw `maxResults` and `nextToken` parameters.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPageSize`] when `max_results` is zero.
    pub fn new(max_results: Option<usize>, next_token: Option<&str>) -> Result<Self, PaginationError> {
        let limit = max_results.unwrap_or(DEFAULT_PAGE_SIZE);
        if limit == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self {
            offset: NextToken::parse_lenient(next_token).offset(),
            limit,
        })
    }

    /// Window starting at `offset` holding at most `limit` items.
    ///
    /// # Errors
    /// Returns [`PaginationError::ZeroPageSize`] when `limit` is zero.
    pub fn at(offset: usize, limit: usize) -> Result<Self, PaginationError> {
        if limit == 0 {
            return Err(PaginationError::ZeroPageSize);
        }
        Ok(Self { offset, limit })
    }

    /// Number of items skipped before the page starts.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Maximum number of items on the page.
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Token for the following page, present only when items remain past
    /// this window in a collection of `total` items.
    pub fn next_token(&self, total: usize) -> Option<NextToken> {
        let end = self.offset.saturating_add(self.limit);
        (total > end).then_some(NextToken(end))
    }

    /// Cut this window out of an already ordered collection.
    pub fn slice<T>(&self, items: Vec<T>) -> Page<T> {
        let next_token = self.next_token(items.len());
        let items = items
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .collect();
        Page { items, next_token }
    }

    /// Wrap items fetched by a storage-side window query.
    ///
    /// `total` is the size of the whole filtered collection.
    pub fn page_of<T>(&self, items: Vec<T>, total: usize) -> Page<T> {
        Page {
            items,
            next_token: self.next_token(total),
        }
    }
}

/// One page of results plus the token for the next page, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    next_token: Option<NextToken>,
}

impl<T> Page<T> {
    /// Assemble a page from items and an optional continuation.
    pub const fn new(items: Vec<T>, next_token: Option<NextToken>) -> Self {
        Self { items, next_token }
    }

    /// Items on this page.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Continuation for the next page.
    pub const fn next_token(&self) -> Option<NextToken> {
        self.next_token
    }

    /// Transform every item while keeping the continuation.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_token: self.next_token,
        }
    }

    /// Split into items and continuation.
    pub fn into_parts(self) -> (Vec<T>, Option<NextToken>) {
        (self.items, self.next_token)
    }
}
