//! Application loop and screen routing.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::gallery;
use crate::model::Poi;
use crate::store::{self, PoiStore};

use super::screens::{DetailScreen, HomeScreen};

/// How long to wait for a key press before checking the load channel.
const TICK: Duration = Duration::from_millis(50);

/// Which screen is currently displayed. `Detail` carries the suspended
/// home screen and hands it back on pop, state intact.
enum Screen {
    Home(HomeScreen),
    Detail {
        detail: DetailScreen,
        prev: HomeScreen,
    },
}

/// Results delivered by spawned backend calls.
enum AppEvent {
    PoisLoaded(Vec<Poi>),
}

/// Runs the TUI event loop until the user quits.
pub async fn run(store: PoiStore, config: &Config) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, store, config).await;
    ratatui::restore();
    result
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    store: PoiStore,
    config: &Config,
) -> io::Result<()> {
    // The mount-time fetch runs on its own task so the UI, including the
    // creation modal, stays responsive while it is in flight.
    let (tx, mut rx) = mpsc::unbounded_channel();
    {
        let store = store.clone();
        tokio::spawn(async move {
            let pois = store::pois_or_empty(store.list_pois().await);
            let _ = tx.send(AppEvent::PoisLoaded(pois));
        });
    }

    let gallery_dir = config
        .gallery_dir
        .clone()
        .or_else(gallery::default_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    let mut screen = Screen::Home(HomeScreen::new(gallery_dir));

    loop {
        terminal.draw(|frame| match &screen {
            Screen::Home(home) => home.render(frame),
            Screen::Detail { detail, .. } => detail.render(frame),
        })?;

        while let Ok(event) = rx.try_recv() {
            apply_event(&mut screen, event);
        }

        if !event::poll(TICK)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match step(screen, key, &store).await {
            Some(next) => screen = next,
            None => return Ok(()),
        }
    }
}

/// Applies a backend event to the home screen wherever it lives in the
/// stack; a load resolving under an open detail screen still lands.
fn apply_event(screen: &mut Screen, event: AppEvent) {
    let AppEvent::PoisLoaded(pois) = event;
    match screen {
        Screen::Home(home) => home.pois_loaded(pois),
        Screen::Detail { prev, .. } => prev.pois_loaded(pois),
    }
}

/// Advances the screen stack by one key press. Returns None to quit.
///
/// Submitting the form awaits the insert inline, suspending this flow
/// until the store responds; only success closes the modal and appends.
async fn step(screen: Screen, key: KeyEvent, store: &PoiStore) -> Option<Screen> {
    match screen {
        Screen::Home(mut home) if home.form_is_open() => {
            match key.code {
                KeyCode::Esc => home.form_esc(),
                KeyCode::Enter => {
                    if let Some(new) = home.form_enter() {
                        match store.insert_poi(&new).await {
                            Ok(id) => home.apply_created(new.into_poi(id)),
                            Err(e) => tracing::error!(error = %e, "failed to create poi"),
                        }
                    }
                }
                KeyCode::Tab | KeyCode::Down => home.form_down(),
                KeyCode::BackTab | KeyCode::Up => home.form_up(),
                KeyCode::Backspace => home.form_backspace(),
                KeyCode::Char(c) => home.form_char(c),
                _ => {}
            }
            Some(Screen::Home(home))
        }
        Screen::Home(mut home) => match key.code {
            KeyCode::Char('q') => None,
            KeyCode::Char('a') => {
                home.open_form();
                Some(Screen::Home(home))
            }
            KeyCode::Up | KeyCode::Char('k') => {
                home.move_up();
                Some(Screen::Home(home))
            }
            KeyCode::Down | KeyCode::Char('j') => {
                home.move_down();
                Some(Screen::Home(home))
            }
            KeyCode::Enter => match home.selected_poi().cloned() {
                Some(poi) => Some(Screen::Detail {
                    detail: DetailScreen::new(poi),
                    prev: home,
                }),
                None => Some(Screen::Home(home)),
            },
            _ => Some(Screen::Home(home)),
        },
        Screen::Detail { detail, prev } => match key.code {
            KeyCode::Char('q') => None,
            KeyCode::Esc | KeyCode::Enter => Some(Screen::Home(prev)),
            _ => Some(Screen::Detail { detail, prev }),
        },
    }
}
