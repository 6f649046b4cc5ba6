//! Year/month grouping of posts for the navigation panel.

use crate::locale::Locale;
use crate::post::Post;
use chrono::{DateTime, Datelike, Month, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct MonthGroup<'a> {
    /// `YYYY-MM`
    pub key: String,
    /// Localized month name
    pub name: String,
    pub posts: Vec<&'a Post>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearGroup<'a> {
    pub year: i32,
    pub months: Vec<MonthGroup<'a>>,
}

/// Posts grouped by year and month, newest first at every level
#[derive(Debug, Clone, Serialize)]
pub struct Archive<'a> {
    pub years: Vec<YearGroup<'a>>,
}

impl<'a> Archive<'a> {
    pub fn build(posts: &'a [Post], locale: Locale) -> Self {
        let mut grouped: BTreeMap<i32, BTreeMap<u32, Vec<&'a Post>>> = BTreeMap::new();

        for post in posts {
            let Some(date) = parse_date(&post.date) else {
                tracing::warn!(slug = %post.slug, date = %post.date, "unparseable post date, leaving it out of the archive");
                continue;
            };
            grouped
                .entry(date.year())
                .or_default()
                .entry(date.month())
                .or_default()
                .push(post);
        }

        let years = grouped
            .into_iter()
            .rev()
            .map(|(year, months)| YearGroup {
                year,
                months: months
                    .into_iter()
                    .rev()
                    .map(|(month, mut posts)| {
                        posts.sort_by(|a, b| b.date.cmp(&a.date));
                        MonthGroup {
                            key: format!("{:04}-{:02}", year, month),
                            name: month_name(month, locale),
                            posts,
                        }
                    })
                    .collect(),
            })
            .collect();

        Self { years }
    }

    /// Year expanded by default
    pub fn latest_year(&self) -> Option<i32> {
        self.years.first().map(|group| group.year)
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    let date = date.trim();
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()))
}

fn month_name(month: u32, locale: Locale) -> String {
    match locale {
        Locale::Ko => format!("{}월", month),
        Locale::En => u8::try_from(month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name().to_string())
            .unwrap_or_else(|| month.to_string()),
    }
}
