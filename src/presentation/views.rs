use askama::{Error as AskamaError, Template};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::application::listing::ListingView;
use crate::domain::{
    posts::Post,
    view_state::{CategoryFilter, SortOrder, ViewState},
};

/// Shown in place of the list when the feed could not be loaded.
pub const LOAD_FAILURE_MESSAGE: &str = "記事の読み込みに失敗しました。";

const FILTER_CONTROLS: &[(&str, &str)] =
    &[("all", "All"), ("tech", "Tech"), ("diary", "Diary")];
const SORT_CONTROLS: &[(SortOrder, &str)] =
    &[(SortOrder::Desc, "Newest"), (SortOrder::Asc, "Oldest")];

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(public_message: &'static str, error: AskamaError) -> Self {
        Self {
            public_message,
            error,
        }
    }
}

pub fn render_template<T: Template>(template: T) -> Result<String, TemplateRenderError> {
    template
        .render()
        .map_err(|err| TemplateRenderError::new("Template rendering failed", err))
}

/// A post ready to be rendered as a linked card.
#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    pub href: String,
    pub category_label: &'static str,
    pub title: String,
    pub display_date: String,
    pub excerpt: String,
}

impl From<&Post> for PostCard {
    fn from(post: &Post) -> Self {
        Self {
            href: post.url.clone(),
            category_label: post.category_label(),
            title: post.title.clone(),
            display_date: post.date.display(),
            excerpt: post.excerpt.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterButton {
    pub value: &'static str,
    pub label: &'static str,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SortButton {
    pub value: &'static str,
    pub label: &'static str,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingContext {
    pub posts: Vec<PostCard>,
    pub post_count: usize,
    pub has_results: bool,
    pub filters: Vec<FilterButton>,
    pub sorts: Vec<SortButton>,
    pub query: String,
    pub location: String,
}

impl ListingContext {
    pub fn from_view(view: &ListingView) -> Self {
        Self::build(&view.state, &view.location, &view.posts)
    }

    /// Controls reflect `state`, the list itself stays empty.
    pub fn without_posts(state: &ViewState, location: &Url) -> Self {
        Self::build(state, location, &[])
    }

    fn build(state: &ViewState, location: &Url, posts: &[Post]) -> Self {
        let posts: Vec<PostCard> = posts.iter().map(PostCard::from).collect();
        let post_count = posts.len();

        Self {
            posts,
            post_count,
            has_results: post_count > 0,
            filters: filter_buttons(&state.filter),
            sorts: sort_buttons(state.sort),
            query: state.query.clone(),
            location: location.to_string(),
        }
    }
}

fn filter_buttons(active: &CategoryFilter) -> Vec<FilterButton> {
    FILTER_CONTROLS
        .iter()
        .map(|&(value, label)| FilterButton {
            value,
            label,
            is_active: active.as_str() == value,
        })
        .collect()
}

fn sort_buttons(active: SortOrder) -> Vec<SortButton> {
    SORT_CONTROLS
        .iter()
        .map(|&(order, label)| SortButton {
            value: order.as_str(),
            label,
            is_active: order == active,
        })
        .collect()
}

/// The whole blog page: controls plus either the list region or the load failure.
#[derive(Template)]
#[template(path = "blog.html")]
pub struct BlogPageTemplate {
    pub content: ListingContext,
    pub failure: Option<&'static str>,
}

pub fn render_page(view: &ListingView) -> Result<String, TemplateRenderError> {
    render_template(BlogPageTemplate {
        content: ListingContext::from_view(view),
        failure: None,
    })
}

pub fn render_load_failure(
    state: &ViewState,
    location: &Url,
) -> Result<String, TemplateRenderError> {
    render_template(BlogPageTemplate {
        content: ListingContext::without_posts(state, location),
        failure: Some(LOAD_FAILURE_MESSAGE),
    })
}
