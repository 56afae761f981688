pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::poller::Poller;
use crate::render::Renderer;
use crate::selection;
use crate::state::StateStore;
use crate::submit;

use self::app::TuiApp;
use self::event::{Action, AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;
type TuiStore = StateStore<Renderer<TuiApp>>;

pub async fn run(ctx: Arc<AppContext>, urls: Vec<String>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, urls).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, urls: Vec<String>) -> Result<()> {
    let mut store = StateStore::new(Renderer::new(TuiApp::new(ctx.messages.clone())));

    for url in &urls {
        submit::submit(&ctx, &mut store, url).await;
    }

    let poller = Poller::new(ctx.config.dedup);
    let interval = Duration::from_millis(ctx.config.poll_interval_ms);
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let mut next_poll = Instant::now() + interval;

    loop {
        terminal.draw(|frame| layout::render(frame, store.dispatcher().view()))?;

        if let AppEvent::Key(key) = event_handler.next()? {
            let (editing, modal_open) = {
                let view = store.dispatcher().view();
                (view.editing, view.modal_open)
            };
            handle_action(Action::from_key(key, editing, modal_open), &ctx, &mut store).await;
        }

        if store.dispatcher().view().should_quit {
            break;
        }

        // The poll schedule lives here: the next cycle is armed only after
        // the previous one has settled.
        if Instant::now() >= next_poll {
            poller.run_cycle(&ctx, &mut store).await;
            next_poll = Instant::now() + interval;
        }
    }

    Ok(())
}

async fn handle_action(action: Action, ctx: &AppContext, store: &mut TuiStore) {
    match action {
        Action::Quit => store.dispatcher_mut().view_mut().should_quit = true,
        Action::MoveUp => store.dispatcher_mut().view_mut().move_up(),
        Action::MoveDown => store.dispatcher_mut().view_mut().move_down(),
        Action::EditInput => store.dispatcher_mut().view_mut().editing = true,
        Action::LeaveInput => store.dispatcher_mut().view_mut().editing = false,
        Action::InputChar(c) => store.dispatcher_mut().view_mut().input.push(c),
        Action::InputBackspace => {
            store.dispatcher_mut().view_mut().input.pop();
        }
        Action::Submit => {
            let candidate = store.dispatcher().view().input.clone();
            submit::submit(ctx, store, &candidate).await;
        }
        Action::Preview => {
            let id = store.dispatcher().view().selected_post().map(|p| p.id);
            if let Some(id) = id {
                selection::preview_post(store, id);
            }
        }
        Action::OpenLink => {
            let selected = store
                .dispatcher()
                .view()
                .selected_post()
                .map(|p| (p.id, p.link.clone()));
            if let Some((id, link)) = selected {
                if let Err(e) = open::that(&link) {
                    tracing::warn!(%link, error = %e, "failed to open browser");
                }
                selection::open_post(store, id);
            }
        }
        Action::DismissModal => store.dispatcher_mut().view_mut().modal_open = false,
        Action::None => {}
    }
}
