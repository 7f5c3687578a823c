use std::{path::Path, process, sync::Arc};

use blogview::{
    application::{
        error::AppError,
        listing::{ListingSession, ListingView},
        store::PostStore,
    },
    config::{self, Command, InteractionArgs},
    domain::view_state::{CategoryFilter, ListingEvent, SortOrder, ViewState},
    infra::{error::InfraError, telemetry},
    presentation::views,
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;
use url::Url;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let chain = error.report().chain();
    if dispatcher::has_been_set() {
        error!(error = %chain, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %chain, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    let command = cli_args.command_or_default();
    let events = interaction_events(command.interactions())?;
    let source = settings.feed.location.source();
    let location = settings.listing.page_url.clone();

    let store = match PostStore::load(source.as_ref()).await {
        Ok(store) => Arc::new(store),
        Err(err) => {
            error!(
                target = "blogview::store",
                error = %err,
                feed = %settings.feed.location,
                "failed to load post feed"
            );
            return match command {
                Command::Render(args) => {
                    let (state, location) = replay_without_posts(location, events);
                    let html = views::render_load_failure(&state, &location)?;
                    write_output(args.output.as_deref(), &html).await
                }
                Command::List(_) => Err(err.into()),
            };
        }
    };

    let mut session = ListingSession::start(store, location);
    let view = replay_interactions(&mut session, events);

    if !view.has_results() {
        warn!(
            target = "blogview::listing",
            filter = %view.state.filter,
            query = %view.state.query,
            "no posts match the current listing state"
        );
    }

    match command {
        Command::Render(args) => {
            let html = views::render_page(&view)?;
            write_output(args.output.as_deref(), &html).await
        }
        Command::List(_) => {
            let json = serde_json::to_string_pretty(&view)
                .map_err(|err| AppError::unexpected(format!("failed to encode listing: {err}")))?;
            write_output(None, &json).await
        }
    }
}

/// The requested clicks and keystrokes in page order: category, sort, search.
fn interaction_events(interactions: &InteractionArgs) -> Result<Vec<ListingEvent>, AppError> {
    let mut events = Vec::new();

    if let Some(category) = interactions.category.as_deref() {
        events.push(ListingEvent::SelectCategory(CategoryFilter::from_value(
            category,
        )));
    }
    if let Some(sort) = interactions.sort.as_deref() {
        let sort: SortOrder = sort.parse()?;
        events.push(ListingEvent::SelectSort(sort));
    }
    if let Some(query) = interactions.query.as_deref() {
        events.push(ListingEvent::Search(query.to_string()));
    }
    Ok(events)
}

fn replay_interactions(session: &mut ListingSession, events: Vec<ListingEvent>) -> ListingView {
    let mut view = session.view();
    for event in events {
        view = session.handle(event);
    }

    info!(
        target = "blogview::listing",
        filter = %view.state.filter,
        sort = %view.state.sort,
        query = %view.state.query,
        location = %view.location,
        visible = view.posts.len(),
        "listing computed"
    );
    view
}

/// Drives the controls and the page URL when there are no posts to show.
fn replay_without_posts(location: Url, events: Vec<ListingEvent>) -> (ViewState, Url) {
    let state = ViewState::seeded_from(&location);
    events
        .into_iter()
        .fold((state, location), |(state, location), event| {
            let location = event.next_location(&location);
            (state.apply(event), location)
        })
}

async fn write_output(path: Option<&Path>, contents: &str) -> Result<(), AppError> {
    match path {
        Some(path) => {
            tokio::fs::write(path, contents)
                .await
                .map_err(InfraError::from)?;
            info!(target = "blogview::output", path = %path.display(), "wrote listing");
        }
        None => {
            use tokio::io::AsyncWriteExt;

            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(contents.as_bytes())
                .await
                .map_err(InfraError::from)?;
            stdout.write_all(b"\n").await.map_err(InfraError::from)?;
            stdout.flush().await.map_err(InfraError::from)?;
        }
    }
    Ok(())
}
