//! The listing pipeline: category filter, title search, then date sort.

use std::cmp::Ordering;

use crate::domain::{
    posts::Post,
    view_state::{CategoryFilter, SortOrder, ViewState},
};

/// Compute the ordered posts to display.
///
/// Equal dates keep their feed order. Posts without a usable date come after every
/// dated post, whichever direction is active.
pub fn compute_view<'a>(
    posts: &'a [Post],
    filter: &CategoryFilter,
    sort: SortOrder,
    query: &str,
) -> Vec<&'a Post> {
    let mut visible: Vec<&Post> = posts.iter().filter(|post| filter.matches(post)).collect();

    if !query.is_empty() {
        let lowered = query.to_lowercase();
        visible.retain(|post| post.title_contains(&lowered));
    }

    visible.sort_by(|a, b| compare_dates(a, b, sort));
    visible
}

pub fn compute_view_for<'a>(posts: &'a [Post], state: &ViewState) -> Vec<&'a Post> {
    compute_view(posts, &state.filter, state.sort, &state.query)
}

fn compare_dates(a: &Post, b: &Post, sort: SortOrder) -> Ordering {
    match (a.date.ordering_key(), b.date.ordering_key()) {
        (Some(left), Some(right)) => match sort {
            SortOrder::Desc => right.cmp(&left),
            SortOrder::Asc => left.cmp(&right),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
