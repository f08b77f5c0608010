//! Listing filter and pagination arithmetic.

use mongodb::bson::{doc, Document};
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Query string accepted by `GET /api/products`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsQuery {
    /// Case-insensitive pattern searched in the category
    pub category: Option<String>,
    /// Case-insensitive pattern searched in the name
    pub search: Option<String>,
    /// 1-based page number
    #[serde(default = "default_page")]
    #[param(default = 1)]
    pub page: i64,
    /// Page size
    #[serde(default = "default_limit")]
    #[param(default = 10)]
    pub limit: i64,
}

impl Default for ListProductsQuery {
    fn default() -> Self {
        Self {
            category: None,
            search: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListProductsQuery {
    /// Empty strings impose no constraint.
    pub fn filter(&self) -> ProductFilter {
        let non_empty = |s: &Option<String>| s.clone().filter(|s| !s.is_empty());
        ProductFilter {
            category: non_empty(&self.category),
            search: non_empty(&self.search),
        }
    }

    /// `(page - 1) * limit`. Not clamped: a negative result is left for the
    /// storage layer to reject.
    pub fn skip(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// Ceiling of `total / limit`; zero when `limit` is not positive.
pub fn total_pages(total: u64, limit: i64) -> u64 {
    match u64::try_from(limit) {
        Ok(limit) if limit > 0 => total.div_ceil(limit),
        _ => 0,
    }
}

/// Predicate over stored products. Both constraints are ANDed.
///
/// Each value is a case-insensitive regular expression searched anywhere in
/// the field, so plain text behaves as a substring match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ProductFilter {
    /// MongoDB filter document. Patterns are handed to `$regex` unchanged.
    pub fn to_document(&self) -> Document {
        let mut filter = doc! {};

        if let Some(ref category) = self.category {
            filter.insert("category", pattern_ignore_case(category));
        }

        if let Some(ref search) = self.search {
            filter.insert("name", pattern_ignore_case(search));
        }

        filter
    }

    /// Compiles the patterns for in-process evaluation.
    ///
    /// A pattern that does not compile is a storage fault, matching what the
    /// database reports for the same filter.
    pub fn matcher(&self) -> ProductResult<FilterMatcher> {
        Ok(FilterMatcher {
            category: self.category.as_deref().map(compile).transpose()?,
            search: self.search.as_deref().map(compile).transpose()?,
        })
    }
}

/// Compiled form of a [`ProductFilter`]
#[derive(Debug, Clone)]
pub struct FilterMatcher {
    category: Option<Regex>,
    search: Option<Regex>,
}

impl FilterMatcher {
    pub fn matches(&self, product: &Product) -> bool {
        let hit = |pattern: &Option<Regex>, field: &str| {
            pattern.as_ref().is_none_or(|re| re.is_match(field))
        };

        hit(&self.category, product.category.as_str())
            && hit(&self.search, product.name.as_str())
    }
}

fn pattern_ignore_case(pattern: &str) -> Document {
    doc! { "$regex": pattern, "$options": "i" }
}

fn compile(pattern: &str) -> ProductResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ProductError::Database(format!("invalid filter pattern {pattern:?}: {e}")))
}
