use serde::{Deserialize, Serialize};
use time::{Date, format_description::FormatItem, macros::format_description};

pub const FEED_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month padding:zero]-[day padding:zero]");

pub const DIARY_CATEGORY: &str = "diary";
pub const DIARY_LABEL: &str = "Diary";
pub const TECH_LABEL: &str = "Tech";

/// One entry of the blog feed, as published in `posts.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: PostDate,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub url: String,
}

impl Post {
    /// Label shown on the card. Anything that is not a diary entry is presented as tech.
    pub fn category_label(&self) -> &'static str {
        if self.category == DIARY_CATEGORY {
            DIARY_LABEL
        } else {
            TECH_LABEL
        }
    }

    pub fn title_contains(&self, lowered_query: &str) -> bool {
        self.title.to_lowercase().contains(lowered_query)
    }
}

/// Publication date as written in the feed, plus its parsed calendar value.
///
/// Missing, empty, or malformed dates are kept verbatim for display and carry no
/// ordering key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub struct PostDate {
    raw: String,
    parsed: Option<Date>,
}

impl PostDate {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parsed = Date::parse(raw.trim(), FEED_DATE_FORMAT).ok();
        Self { raw, parsed }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn ordering_key(&self) -> Option<Date> {
        self.parsed
    }

    /// `2024-01-05` becomes `2024.01.05`; an empty date stays empty.
    pub fn display(&self) -> String {
        self.raw.replace('-', ".")
    }
}

impl From<Option<String>> for PostDate {
    fn from(value: Option<String>) -> Self {
        value.map(PostDate::new).unwrap_or_default()
    }
}

impl From<PostDate> for String {
    fn from(value: PostDate) -> Self {
        value.raw
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    fn post(category: &str) -> Post {
        Post {
            title: "Intro to Go".into(),
            category: category.into(),
            date: PostDate::new("2024-01-05"),
            excerpt: String::new(),
            url: "/blog/intro-to-go.html".into(),
        }
    }

    #[test]
    fn parses_feed_dates() {
        let date = PostDate::new("2024-02-01");
        assert_eq!(date.ordering_key(), Some(date!(2024 - 02 - 01)));
        assert_eq!(date.display(), "2024.02.01");
    }

    #[test]
    fn empty_date_has_no_ordering_key() {
        let date = PostDate::new("");
        assert_eq!(date.ordering_key(), None);
        assert_eq!(date.display(), "");
    }

    #[test]
    fn malformed_date_keeps_raw_text() {
        let date = PostDate::new("someday");
        assert_eq!(date.ordering_key(), None);
        assert_eq!(date.display(), "someday");
    }

    #[test]
    fn deserializes_records_with_missing_fields() {
        let json = r#"[
            {"title": "My Day", "category": "diary", "date": "2024-02-01", "excerpt": "e", "url": "/d"},
            {"title": "Draft", "date": null},
            {"title": "Undated", "category": "tech"}
        ]"#;
        let posts: Vec<Post> = serde_json::from_str(json).expect("valid feed");

        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].date.ordering_key(), Some(date!(2024 - 02 - 01)));
        assert_eq!(posts[1].date, PostDate::default());
        assert_eq!(posts[1].category, "");
        assert_eq!(posts[2].date.raw(), "");
    }

    #[test]
    fn title_is_required() {
        let result: Result<Vec<Post>, _> = serde_json::from_str(r#"[{"category": "tech"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn labels_follow_category() {
        assert_eq!(post("diary").category_label(), "Diary");
        assert_eq!(post("tech").category_label(), "Tech");
        assert_eq!(post("travel").category_label(), "Tech");
        assert_eq!(post("Diary").category_label(), "Tech");
    }

    #[test]
    fn title_search_is_case_insensitive() {
        let post = post("tech");
        assert!(post.title_contains("intro"));
        assert!(post.title_contains("to go"));
        assert!(!post.title_contains("rust"));
    }
}
