use mongodb::bson::{doc, Document};
use serde::Deserialize;

use crate::utils::{AppError, AppResult};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 6;

/// Text fields covered by the free-text search
pub const SEARCH_FIELDS: [&str; 6] = [
    "name",
    "email",
    "subject",
    "message",
    "userType",
    "rankAndPosition",
];

/// Raw query string of `GET /api/reviews`.
///
/// Everything arrives as text; `ReviewQuery::parse` does the typing so that
/// bad input gets our own error message instead of the extractor's.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewListQuery {
    /// Page number, starting at 1 (default 1)
    pub page: Option<String>,
    /// Page size (default 6)
    pub limit: Option<String>,
    /// Case-insensitive substring matched against the text fields
    pub search: Option<String>,
    /// "true" or "false"; omit to disable the status filter
    pub status: Option<String>,
}

/// The `(skip, limit)` pair derived from `page` and `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub limit: u64,
    skip: u64,
}

impl PageWindow {
    pub fn new(page: u64, limit: u64) -> AppResult<Self> {
        if page < 1 {
            return Err(invalid("page"));
        }
        if limit < 1 {
            return Err(invalid("limit"));
        }
        let skip = (page - 1).checked_mul(limit).ok_or_else(|| invalid("page"))?;
        Ok(Self { page, limit, skip })
    }

    pub fn skip(&self) -> u64 {
        self.skip
    }

    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

/// Conditions a review must satisfy to be listed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub status: Option<bool>,
    /// Literal search term, already trimmed and non-empty
    pub search: Option<String>,
}

impl ReviewFilter {
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();

        if let Some(status) = self.status {
            filter.insert("status", status);
        }

        if let Some(term) = &self.search {
            let pattern = regex::escape(term);
            let clauses: Vec<Document> = SEARCH_FIELDS
                .iter()
                .map(|field| {
                    let mut clause = Document::new();
                    clause.insert(*field, doc! { "$regex": pattern.as_str(), "$options": "i" });
                    clause
                })
                .collect();
            filter.insert("$or", clauses);
        }

        filter
    }
}

/// Newest first; `_id` breaks ties between documents created in the same millisecond
pub fn newest_first() -> Document {
    doc! { "createdAt": -1, "_id": -1 }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    pub window: PageWindow,
    pub filter: ReviewFilter,
}

impl ReviewQuery {
    pub fn parse(raw: &ReviewListQuery) -> AppResult<Self> {
        let page = parse_positive("page", raw.page.as_deref(), DEFAULT_PAGE)?;
        let limit = parse_positive("limit", raw.limit.as_deref(), DEFAULT_LIMIT)?;
        let window = PageWindow::new(page, limit)?;

        // Presence is what matters: status=false is a filter, no status is not
        let status = raw.status.as_deref().map(|value| value == "true");

        let search = raw
            .search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_string);

        Ok(Self {
            window,
            filter: ReviewFilter { status, search },
        })
    }
}

fn parse_positive(name: &str, raw: Option<&str>, default: u64) -> AppResult<u64> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(value) => value,
    };

    match raw.parse::<i64>() {
        Ok(value) if value >= 1 => Ok(value as u64),
        _ => Err(invalid(name)),
    }
}

fn invalid(name: &str) -> AppError {
    AppError::InvalidParameter(format!("Invalid {} parameter: must be a positive integer", name))
}
