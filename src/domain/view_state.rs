//! Transient listing state and the transitions driven by user input.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};
use url::Url;

use super::{error::DomainError, posts::Post};

/// Filter value meaning "no category constraint".
pub const ALL_CATEGORIES: &str = "all";
/// Query parameter carrying the active category on the page URL.
pub const CATEGORY_PARAM: &str = "category";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn from_value(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Category(value) => value.as_str(),
        }
    }

    /// Exact, case-sensitive category match.
    pub fn matches(&self, post: &Post) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(value) => post.category == *value,
        }
    }

    /// Reads the `category` parameter of a page URL. Absent or empty values mean `All`.
    pub fn from_location(location: &Url) -> Self {
        location
            .query_pairs()
            .find(|(key, _)| key == CATEGORY_PARAM)
            .filter(|(_, value)| !value.is_empty())
            .map(|(_, value)| CategoryFilter::from_value(&value))
            .unwrap_or_default()
    }

    /// Returns `location` with the `category` parameter rewritten for this filter.
    ///
    /// `All` removes the parameter; every other query parameter is kept in order.
    pub fn apply_to_location(&self, location: &Url) -> Url {
        let retained: Vec<(String, String)> = location
            .query_pairs()
            .filter(|(key, _)| key != CATEGORY_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        let mut next = location.clone();
        next.set_query(None);
        if retained.is_empty() && *self == CategoryFilter::All {
            return next;
        }

        {
            let mut pairs = next.query_pairs_mut();
            pairs.extend_pairs(retained.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            if let CategoryFilter::Category(value) = self {
                pairs.append_pair(CATEGORY_PARAM, value);
            }
        }
        next
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Desc,
    Asc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Desc => "desc",
            SortOrder::Asc => "asc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "desc" => Ok(SortOrder::Desc),
            "asc" => Ok(SortOrder::Asc),
            other => Err(DomainError::validation(format!(
                "unknown sort order `{other}` (expected `desc` or `asc`)"
            ))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single user interaction on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingEvent {
    SelectCategory(CategoryFilter),
    SelectSort(SortOrder),
    Search(String),
}

impl ListingEvent {
    /// Page URL after this event. Only category changes rewrite it.
    pub fn next_location(&self, location: &Url) -> Url {
        match self {
            ListingEvent::SelectCategory(filter) => filter.apply_to_location(location),
            _ => location.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub filter: CategoryFilter,
    pub sort: SortOrder,
    pub query: String,
}

impl ViewState {
    /// Initial state for a page load: the filter comes from the URL, everything else defaults.
    pub fn seeded_from(location: &Url) -> Self {
        Self {
            filter: CategoryFilter::from_location(location),
            ..Self::default()
        }
    }

    pub fn apply(self, event: ListingEvent) -> Self {
        match event {
            ListingEvent::SelectCategory(filter) => Self { filter, ..self },
            ListingEvent::SelectSort(sort) => Self { sort, ..self },
            ListingEvent::Search(query) => Self { query, ..self },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(value: &str) -> Url {
        Url::parse(value).expect("valid url")
    }

    #[test]
    fn seeds_filter_from_category_param() {
        let state = ViewState::seeded_from(&url("https://example.com/blog.html?category=diary"));
        assert_eq!(state.filter, CategoryFilter::Category("diary".into()));
        assert_eq!(state.sort, SortOrder::Desc);
        assert!(state.query.is_empty());
    }

    #[test]
    fn missing_or_empty_param_means_all() {
        assert_eq!(
            CategoryFilter::from_location(&url("https://example.com/blog.html")),
            CategoryFilter::All
        );
        assert_eq!(
            CategoryFilter::from_location(&url("https://example.com/blog.html?category=")),
            CategoryFilter::All
        );
        assert_eq!(
            CategoryFilter::from_location(&url("https://example.com/blog.html?category=all")),
            CategoryFilter::All
        );
    }

    #[test]
    fn selecting_category_sets_param_and_keeps_others() {
        let location = url("https://example.com/blog.html?ref=home&category=tech");
        let next = CategoryFilter::Category("diary".into()).apply_to_location(&location);
        assert_eq!(next.as_str(), "https://example.com/blog.html?ref=home&category=diary");
    }

    #[test]
    fn selecting_all_removes_param() {
        let location = url("https://example.com/blog.html?category=tech");
        let next = CategoryFilter::All.apply_to_location(&location);
        assert_eq!(next.as_str(), "https://example.com/blog.html");

        let location = url("https://example.com/blog.html?category=tech&ref=home");
        let next = CategoryFilter::All.apply_to_location(&location);
        assert_eq!(next.as_str(), "https://example.com/blog.html?ref=home");
    }

    #[test]
    fn category_values_are_percent_encoded() {
        let location = url("https://example.com/blog.html");
        let next = CategoryFilter::Category("tech & life".into()).apply_to_location(&location);
        assert_eq!(CategoryFilter::from_location(&next).as_str(), "tech & life");
    }

    #[test]
    fn transitions_replace_one_field() {
        let state = ViewState::default()
            .apply(ListingEvent::SelectCategory(CategoryFilter::from_value("tech")))
            .apply(ListingEvent::SelectSort(SortOrder::Asc))
            .apply(ListingEvent::Search("intro".into()));

        assert_eq!(state.filter.as_str(), "tech");
        assert_eq!(state.sort, SortOrder::Asc);
        assert_eq!(state.query, "intro");

        let cleared = state.apply(ListingEvent::Search(String::new()));
        assert!(cleared.query.is_empty());
        assert_eq!(cleared.sort, SortOrder::Asc);
    }

    #[test]
    fn only_category_events_move_the_page() {
        let location = url("https://example.com/blog.html?ref=home");

        let next = ListingEvent::SelectCategory(CategoryFilter::from_value("diary"))
            .next_location(&location);
        assert_eq!(next.as_str(), "https://example.com/blog.html?ref=home&category=diary");

        assert_eq!(
            ListingEvent::SelectSort(SortOrder::Asc).next_location(&next),
            next
        );
        assert_eq!(ListingEvent::Search("go".into()).next_location(&next), next);
    }

    #[test]
    fn parses_sort_orders() {
        assert_eq!("desc".parse::<SortOrder>().expect("desc"), SortOrder::Desc);
        assert_eq!("asc".parse::<SortOrder>().expect("asc"), SortOrder::Asc);
        assert!("newest".parse::<SortOrder>().is_err());
    }
}
