use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::application::{reducer::compute_view_for, store::PostStore};
use crate::domain::{
    posts::Post,
    view_state::{CategoryFilter, ListingEvent, SortOrder, ViewState},
};

/// Result of one recomputation: the visible posts plus the state that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub location: Url,
    pub state: ViewState,
    pub posts: Vec<Post>,
}

impl ListingView {
    pub fn has_results(&self) -> bool {
        !self.posts.is_empty()
    }
}

/// One page view of the blog listing: the loaded posts, the current UI state and the
/// page URL. Every input handler replaces the state and recomputes the full list.
#[derive(Debug, Clone)]
pub struct ListingSession {
    store: Arc<PostStore>,
    state: ViewState,
    location: Url,
}

impl ListingSession {
    pub fn start(store: Arc<PostStore>, location: Url) -> Self {
        let state = ViewState::seeded_from(&location);
        debug!(
            target = "blogview::listing",
            filter = %state.filter,
            %location,
            "listing session started"
        );
        Self {
            store,
            state,
            location,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn view(&self) -> ListingView {
        let posts = compute_view_for(self.store.posts(), &self.state)
            .into_iter()
            .cloned()
            .collect();
        ListingView {
            location: self.location.clone(),
            state: self.state.clone(),
            posts,
        }
    }

    pub fn handle(&mut self, event: ListingEvent) -> ListingView {
        debug!(target = "blogview::listing", ?event, "applying listing event");
        self.location = event.next_location(&self.location);
        self.state = std::mem::take(&mut self.state).apply(event);
        self.view()
    }

    pub fn select_category(&mut self, filter: CategoryFilter) -> ListingView {
        self.handle(ListingEvent::SelectCategory(filter))
    }

    pub fn select_sort(&mut self, sort: SortOrder) -> ListingView {
        self.handle(ListingEvent::SelectSort(sort))
    }

    pub fn search(&mut self, query: impl Into<String>) -> ListingView {
        self.handle(ListingEvent::Search(query.into()))
    }
}
