//! Terminal entry point.
//!
//! A thin line-oriented shim over the ratemovie library: it translates typed
//! commands into library [`Event`]s, executes the returned [`Action`]s
//! (driving the search session and the terminal title), and renders state
//! after each handled event. All business logic lives in the library.
//!
//! # Commands
//!
//! - any bare text — change the search query (empty line clears it)
//! - `:open N` — select the Nth search result
//! - `:rate N` — choose a rating (1-10) for the selected movie
//! - `:add` — submit the chosen rating to the watched list
//! - `:rm N` — remove the Nth watched entry
//! - `:back` — dismiss the current selection (Escape equivalent)
//! - `:watched` — show the watched list and its statistics
//! - `:quit` — exit

use std::io::Write as _;
use std::rc::Rc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::unbounded_channel;
use tokio::task::LocalSet;

use ratemovie::{
    handle_event, initialize, observability, Action, AppState, Config, Event, OmdbCatalog,
    SearchSession, SessionOutcome, DEFAULT_TITLE,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ratemovie::Result<()> {
    let config = Config::load_default()?;
    observability::init_tracing(&config);

    let local = LocalSet::new();
    local.run_until(run(config)).await
}

/// Parsed user input: either a library event or a shim-level command.
enum Input {
    Event(Event),
    ShowWatched,
    Help,
    Quit,
    Nothing,
}

async fn run(config: Config) -> ratemovie::Result<()> {
    let (mut state, mut storage) = initialize(&config)?;
    let catalog = Rc::new(OmdbCatalog::new(&config)?);

    let (outcome_tx, mut outcomes) = unbounded_channel();
    let mut session = SearchSession::new(catalog, config.session_config(), outcome_tx);

    set_window_title(DEFAULT_TITLE);
    println!("RateMovie — type to search, :help for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&state, line.trim_end()) {
                    Input::Event(event) => {
                        dispatch(&mut state, &mut storage, &mut session, &event);
                    }
                    Input::ShowWatched => render_watched(&state),
                    Input::Help => print_help(),
                    Input::Quit => break,
                    Input::Nothing => {}
                }
            }
            Some(outcome) = outcomes.recv() => {
                dispatch(&mut state, &mut storage, &mut session, &Event::Session(outcome));
                // Outcomes may arrive in bursts; drain before re-rendering.
                while let Ok(outcome) = outcomes.try_recv() {
                    dispatch(&mut state, &mut storage, &mut session, &Event::Session(outcome));
                }
            }
        }
    }

    set_window_title(DEFAULT_TITLE);
    Ok(())
}

/// Runs one event through the handler and executes the resulting actions.
fn dispatch(
    state: &mut AppState,
    storage: &mut ratemovie::JsonStorage,
    session: &mut SearchSession<OmdbCatalog>,
    event: &Event,
) {
    match handle_event(state, storage, event) {
        Ok((render, actions)) => {
            for action in actions {
                execute(session, action);
            }
            if render && !matches!(event, Event::Session(SessionOutcome::SearchStarted)) {
                render_state(state);
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "event handling failed");
            println!("error: {e}");
        }
    }
}

fn execute(session: &mut SearchSession<OmdbCatalog>, action: Action) {
    match action {
        Action::Search { query } => session.set_query(&query),
        Action::Lookup { id } => session.select(&id),
        Action::CancelLookup => session.cancel_selection(),
        Action::SetWindowTitle { title } => set_window_title(&title),
        Action::ResetWindowTitle => set_window_title(DEFAULT_TITLE),
    }
}

fn parse_line(state: &AppState, line: &str) -> Input {
    let Some(command) = line.strip_prefix(':') else {
        return Input::Event(Event::QueryChanged(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("open" | "o"), Some(n)) => match indexed(&state.movies, n) {
            Some(movie) => Input::Event(Event::SelectMovie(movie.imdb_id.clone())),
            None => {
                println!("no such result: {n}");
                Input::Nothing
            }
        },
        (Some("rate"), Some(n)) => match n.parse() {
            Ok(rating) => Input::Event(Event::RateDraft(rating)),
            Err(_) => {
                println!("rating must be a number from 1 to 10");
                Input::Nothing
            }
        },
        (Some("add"), None) => Input::Event(Event::SubmitRating),
        (Some("rm"), Some(n)) => match indexed(&state.watched, n) {
            Some(entry) => Input::Event(Event::DeleteWatched(entry.imdb_id.clone())),
            None => {
                println!("no such watched entry: {n}");
                Input::Nothing
            }
        },
        (Some("back" | "b"), None) => Input::Event(Event::Back),
        (Some("esc"), None) => Input::Event(Event::Escape),
        (Some("watched" | "w"), None) => Input::ShowWatched,
        (Some("help" | "h"), None) => Input::Help,
        (Some("quit" | "q"), None) => Input::Quit,
        _ => {
            println!("unknown command, :help for help");
            Input::Nothing
        }
    }
}

/// Resolves a 1-based index argument into a slice.
fn indexed<'a, T>(items: &'a [T], arg: &str) -> Option<&'a T> {
    let n: usize = arg.parse().ok()?;
    items.get(n.checked_sub(1)?)
}

fn render_state(state: &AppState) {
    if let Some(id) = &state.selected_id {
        render_detail(state, id);
        return;
    }

    if state.is_loading {
        println!("Loading...");
        return;
    }

    if let Some(error) = &state.error {
        println!("⛔ {error}");
        return;
    }

    if state.movies.is_empty() {
        render_watched(state);
        return;
    }

    if let Some(count) = state.num_results {
        println!("Found {count} results");
    }
    for (i, movie) in state.movies.iter().enumerate() {
        println!("{:>3}. {} ({})", i + 1, movie.title, movie.year);
    }
    println!("(:open N to view details)");
}

fn render_detail(state: &AppState, id: &str) {
    if state.detail_loading {
        println!("Loading...");
        return;
    }

    if let Some(error) = &state.detail_error {
        println!("⛔ {error}");
        return;
    }

    let Some(details) = &state.detail else {
        return;
    };

    println!("{} ({})", details.title, details.year);
    println!("{} • {} • {}", details.released, details.runtime, details.genre);
    println!("⭐ {} IMDB rating", details.imdb_rating);
    println!("{}", details.plot);
    println!("Starring: {}", details.actors);
    println!("Directed by {}", details.director);

    if let Some(rating) = state.watched_rating(id) {
        println!("You rated this movie {rating} 🌟");
    } else if state.draft_rating > 0 {
        println!("Chosen rating: {} (:add to save)", state.draft_rating);
    } else {
        println!("(:rate 1-10 to rate, :back to return)");
    }
}

fn render_watched(state: &AppState) {
    let stats = state.stats();
    println!("Movies you watched");
    println!(
        "#️⃣ {} movies  ⭐ {:.2}  🌟 {:.2}  ⏳ {:.1} min",
        stats.count, stats.avg_imdb_rating, stats.avg_user_rating, stats.avg_runtime
    );
    for (i, entry) in state.watched.iter().enumerate() {
        println!(
            "{:>3}. {} — ⭐ {} 🌟 {} ⏳ {} min",
            i + 1,
            entry.title,
            entry.imdb_rating,
            entry.user_rating,
            entry.runtime
        );
    }
}

fn print_help() {
    println!("type text     search movies (empty line clears)");
    println!(":open N       view details of result N");
    println!(":rate N       choose a 1-10 rating");
    println!(":add          add the rated movie to your watched list");
    println!(":rm N         remove watched entry N");
    println!(":back         leave the detail view");
    println!(":watched      show the watched list and statistics");
    println!(":quit         exit");
}

/// Sets the terminal window title via the OSC 0 escape sequence.
fn set_window_title(title: &str) {
    print!("\x1b]0;{title}\x07");
    let _ = std::io::stdout().flush();
}
