//! Sort keys, sort direction and offset pagination.
//!
//! Cypher cannot take property names or the `ORDER BY` direction as
//! parameters, so both are interpolated into query text. Only the enum
//! values below ever reach that text; anything else is rejected while
//! parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::DaoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            _ => Err(DaoError::validation(
                "order",
                format!("unsupported sort order `{s}`"),
            )),
        }
    }
}

/// A property that results may be ordered by.
pub trait SortKey: Copy + fmt::Debug {
    fn property(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovieSort {
    #[default]
    Title,
    Released,
    ImdbRating,
    Year,
    Runtime,
    ImdbVotes,
    Budget,
    Revenue,
}

impl MovieSort {
    const ALL: [MovieSort; 8] = [
        MovieSort::Title,
        MovieSort::Released,
        MovieSort::ImdbRating,
        MovieSort::Year,
        MovieSort::Runtime,
        MovieSort::ImdbVotes,
        MovieSort::Budget,
        MovieSort::Revenue,
    ];
}

impl SortKey for MovieSort {
    fn property(self) -> &'static str {
        match self {
            MovieSort::Title => "title",
            MovieSort::Released => "released",
            MovieSort::ImdbRating => "imdbRating",
            MovieSort::Year => "year",
            MovieSort::Runtime => "runtime",
            MovieSort::ImdbVotes => "imdbVotes",
            MovieSort::Budget => "budget",
            MovieSort::Revenue => "revenue",
        }
    }
}

impl FromStr for MovieSort {
    type Err = DaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MovieSort::ALL
            .into_iter()
            .find(|k| k.property() == s)
            .ok_or_else(|| DaoError::validation("sort", format!("unsupported sort field `{s}`")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingSort {
    #[default]
    Timestamp,
    Rating,
}

impl SortKey for RatingSort {
    fn property(self) -> &'static str {
        match self {
            RatingSort::Timestamp => "timestamp",
            RatingSort::Rating => "rating",
        }
    }
}

impl FromStr for RatingSort {
    type Err = DaoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timestamp" => Ok(RatingSort::Timestamp),
            "rating" => Ok(RatingSort::Rating),
            _ => Err(DaoError::validation("sort", format!("unsupported sort field `{s}`"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<S = MovieSort> {
    pub sort: S,
    pub order: SortOrder,
    pub limit: u32,
    pub skip: u32,
}

pub const DEFAULT_LIMIT: u32 = 6;

impl Default for Page<MovieSort> {
    fn default() -> Self {
        Self {
            sort: MovieSort::Title,
            order: SortOrder::Asc,
            limit: DEFAULT_LIMIT,
            skip: 0,
        }
    }
}

impl Default for Page<RatingSort> {
    fn default() -> Self {
        Self {
            sort: RatingSort::Timestamp,
            order: SortOrder::Desc,
            limit: DEFAULT_LIMIT,
            skip: 0,
        }
    }
}

impl<S: SortKey + FromStr<Err = DaoError>> Page<S> {
    /// Builds a page from caller-supplied strings, rejecting anything
    /// outside the allow-lists.
    pub fn parse(sort: &str, order: &str, limit: u32, skip: u32) -> Result<Self, DaoError> {
        Ok(Self {
            sort: sort.parse()?,
            order: order.parse()?,
            limit,
            skip,
        })
    }
}

impl<S: SortKey> Page<S> {
    /// `ORDER BY` clause for `alias`, e.g. ``ORDER BY m.`title` ASC``.
    pub fn order_by(&self, alias: &str) -> String {
        format!(
            "ORDER BY {alias}.`{}` {}",
            self.sort.property(),
            self.order.keyword()
        )
    }
}
