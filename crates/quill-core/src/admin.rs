//! Administrative surface configuration and list filtering.
//!
//! [`AdminConfig`] describes how posts are presented to whatever admin
//! frontend is mounted: which columns are listed, which fields can be
//! filtered or searched, and the default ordering. It is plain data handed
//! to that frontend rather than a registration side effect.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Post, PostStatus};
use crate::error::DomainError;

/// A post attribute as referenced by the admin configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostField {
    Title,
    Slug,
    Author,
    Body,
    Publish,
    Created,
    Updated,
    Status,
}

impl PostField {
    /// Text content of the field, for fields that can be searched.
    pub fn text<'a>(self, post: &'a Post) -> Option<&'a str> {
        match self {
            PostField::Title => Some(post.title.as_str()),
            PostField::Slug => Some(post.slug.as_str()),
            PostField::Body => Some(post.body.as_str()),
            _ => None,
        }
    }

    /// Ascending comparison of two posts on this field.
    pub fn compare(self, a: &Post, b: &Post) -> Ordering {
        match self {
            PostField::Title => a.title.cmp(&b.title),
            PostField::Slug => a.slug.cmp(&b.slug),
            PostField::Author => a.author_id.cmp(&b.author_id),
            PostField::Body => a.body.cmp(&b.body),
            PostField::Publish => a.publish.cmp(&b.publish),
            PostField::Created => a.created.cmp(&b.created),
            PostField::Updated => a.updated.cmp(&b.updated),
            PostField::Status => a.status.cmp(&b.status),
        }
    }
}

/// A field whose value is filled in from other fields when left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prepopulated {
    pub field: PostField,
    pub from: Vec<PostField>,
}

/// Presentation and behaviour of the post admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminConfig {
    pub list_display: Vec<PostField>,
    pub list_filter: Vec<PostField>,
    pub search_fields: Vec<PostField>,
    pub prepopulated_fields: Vec<Prepopulated>,
    /// Relations edited by raw id instead of a lookup widget.
    pub raw_id_fields: Vec<PostField>,
    pub date_hierarchy: Option<PostField>,
    pub ordering: Vec<PostField>,
}

impl Default for AdminConfig {
    fn default() -> Self {
        use PostField::*;

        Self {
            list_display: vec![Title, Slug, Author, Publish, Status],
            list_filter: vec![Status, Created, Publish, Author],
            search_fields: vec![Title, Body],
            prepopulated_fields: vec![Prepopulated {
                field: Slug,
                from: vec![Title],
            }],
            raw_id_fields: vec![Author],
            date_hierarchy: Some(Publish),
            ordering: vec![Status, Publish],
        }
    }
}

impl AdminConfig {
    /// Compare two posts by the configured ordering, falling back to id.
    pub fn compare(&self, a: &Post, b: &Post) -> Ordering {
        self.ordering
            .iter()
            .map(|field| field.compare(a, b))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| a.id.cmp(&b.id))
    }

    /// Whether every search term occurs in at least one search field.
    pub fn matches_search(&self, post: &Post, query: &str) -> bool {
        query.split_whitespace().all(|term| {
            let term = term.to_lowercase();
            self.search_fields
                .iter()
                .filter_map(|field| field.text(post))
                .any(|text| text.to_lowercase().contains(&term))
        })
    }
}

/// Relative date filter offered for date fields in the admin list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    Today,
    #[serde(rename = "past_7_days")]
    Past7Days,
    ThisMonth,
    ThisYear,
}

impl DateFilter {
    /// Half-open UTC range `[start, end)` this filter covers at `now`.
    pub fn range(self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let today = now.date_naive();
        let tomorrow = today.checked_add_days(Days::new(1))?;
        let (start, end) = match self {
            DateFilter::Today => (today, tomorrow),
            DateFilter::Past7Days => (today.checked_sub_days(Days::new(7))?, tomorrow),
            DateFilter::ThisMonth => {
                let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?;
                (first, first.checked_add_months(Months::new(1))?)
            }
            DateFilter::ThisYear => {
                let first = NaiveDate::from_ymd_opt(today.year(), 1, 1)?;
                (first, NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?)
            }
        };
        Some((midnight(start), midnight(end)))
    }

    pub fn contains(self, at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        self.range(now)
            .is_some_and(|(start, end)| start <= at && at < end)
    }
}

impl FromStr for DateFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "today" => Ok(DateFilter::Today),
            "past_7_days" => Ok(DateFilter::Past7Days),
            "this_month" => Ok(DateFilter::ThisMonth),
            "this_year" => Ok(DateFilter::ThisYear),
            other => Err(DomainError::Validation(format!(
                "unknown date filter `{other}`"
            ))),
        }
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Drill-down into the publish date: a year, optionally narrowed to a
/// month and then a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateDrillDown {
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl DateDrillDown {
    pub fn new(year: i32, month: Option<u32>, day: Option<u32>) -> Result<Self, DomainError> {
        if day.is_some() && month.is_none() {
            return Err(DomainError::Validation(
                "a day drill-down requires a month".into(),
            ));
        }
        Ok(Self { year, month, day })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let date = at.date_naive();
        date.year() == self.year
            && self.month.is_none_or(|m| date.month() == m)
            && self.day.is_none_or(|d| date.day() == d)
    }
}

/// Criteria for the admin post list. Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct AdminPostFilter {
    pub status: Option<PostStatus>,
    pub author_id: Option<Uuid>,
    pub created: Option<DateFilter>,
    pub publish: Option<DateFilter>,
    pub publish_drill_down: Option<DateDrillDown>,
    pub search: Option<String>,
}

impl AdminPostFilter {
    pub fn matches(&self, post: &Post, config: &AdminConfig, now: DateTime<Utc>) -> bool {
        self.status.is_none_or(|s| post.status == s)
            && self.author_id.is_none_or(|a| post.author_id == a)
            && self.created.is_none_or(|f| f.contains(post.created, now))
            && self.publish.is_none_or(|f| f.contains(post.publish, now))
            && self
                .publish_drill_down
                .is_none_or(|d| d.contains(post.publish))
            && self
                .search
                .as_deref()
                .is_none_or(|q| config.matches_search(post, q))
    }
}
