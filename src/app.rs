use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, KeyEvent};
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::dashboard::{self, Controls, Dashboard, Halt, Outcome};
use crate::provider::MarketData;
use crate::render::{DirtyFlags, RenderState};
use crate::views::sidebar::Sidebar;
use crate::widgets::{Loading, Terminal};

/// What the main area shows
#[derive(Clone, Debug, PartialEq)]
pub enum Page {
    /// No pass has finished yet
    Loading,
    Halted(Halt),
    Ready(Box<Dashboard>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Nothing,
    Redraw(DirtyFlags),
    /// Controls changed or a reload was asked for
    Rerun,
    Quit,
}

pub struct App {
    pub controls: Controls,
    pub sidebar: Sidebar,
    pub page: Page,
    pub help: bool,
    pub loading: Loading,
    pub updated_at: Option<OffsetDateTime>,
    generation: u64,
    pending: bool,
    /// Task of the latest pass; an older one is aborted when replaced
    pass: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(controls: Controls) -> Self {
        Self {
            sidebar: Sidebar::new(&controls),
            controls,
            page: Page::Loading,
            help: false,
            loading: Loading::default(),
            updated_at: None,
            generation: 0,
            pending: false,
            pass: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// Start a pass; the returned generation tags its result
    pub fn begin(&mut self) -> (u64, Controls) {
        self.generation += 1;
        self.pending = true;
        (self.generation, self.controls.clone())
    }

    /// Keep `handle` as the running pass, aborting the one it supersedes
    pub fn track(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.pass.replace(handle) {
            if !previous.is_finished() {
                tracing::debug!(generation = self.generation, "aborting superseded pass");
            }
            previous.abort();
        }
    }

    /// Take the result of a pass; results of superseded passes are dropped
    pub fn finish(&mut self, generation: u64, outcome: Outcome) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, latest = self.generation, "discarding stale pass");
            return false;
        }
        self.pending = false;
        self.updated_at = Some(
            OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc()),
        );
        self.page = match outcome {
            Outcome::Halted(halt) => Page::Halted(halt),
            Outcome::Ready(dashboard) => Page::Ready(dashboard),
        };
        true
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> Action {
        if self.help {
            return match event {
                ctrl!('c') => Action::Quit,
                key!('?') | key!('q') | key!(Esc) => {
                    self.help = false;
                    Action::Redraw(DirtyFlags::ALL)
                }
                _ => Action::Nothing,
            };
        }

        match event {
            ctrl!('c') | key!('q') | key!(Esc) => Action::Quit,
            key!('?') => {
                self.help = true;
                Action::Redraw(DirtyFlags::POPUP_HELP)
            }
            key!('r') => Action::Rerun,
            key!(Tab) => {
                self.sidebar.focus_next();
                Action::Redraw(DirtyFlags::SIDEBAR)
            }
            key!(BackTab) | shift!(BackTab) => {
                self.sidebar.focus_prev();
                Action::Redraw(DirtyFlags::SIDEBAR)
            }
            key!(Up) | key!('k') => {
                self.sidebar.cursor_up(&self.controls);
                Action::Redraw(DirtyFlags::SIDEBAR)
            }
            key!(Down) | key!('j') => {
                self.sidebar.cursor_down(&self.controls);
                Action::Redraw(DirtyFlags::SIDEBAR)
            }
            key!(' ') | key!(Enter) => {
                if self.sidebar.activate(&mut self.controls) {
                    Action::Rerun
                } else {
                    Action::Nothing
                }
            }
            _ => Action::Nothing,
        }
    }
}

type PassResult = (u64, Outcome);

fn spawn_pass<P>(provider: &Arc<P>, app: &mut App, tx: &mpsc::UnboundedSender<PassResult>)
where
    P: MarketData + 'static,
{
    let (generation, controls) = app.begin();
    tracing::debug!(
        generation,
        group = ?controls.group,
        period = %controls.period,
        chart = ?controls.chart,
        selected = controls.selected.len(),
        "render pass started"
    );
    let provider = Arc::clone(provider);
    let tx = tx.clone();
    let handle = tokio::spawn(async move {
        let outcome = dashboard::evaluate(provider.as_ref(), &controls).await;
        _ = tx.send((generation, outcome));
    });
    app.track(handle);
}

pub async fn run<P>(provider: Arc<P>, controls: Controls) -> Result<()>
where
    P: MarketData + 'static,
{
    let mut terminal = Terminal::new()?;
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(controls);
    spawn_pass(&provider, &mut app, &tx);

    // ~30 FPS
    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut events = crossterm::event::EventStream::new();
    let mut render_state = RenderState::new();
    render_state.mark_all_dirty();

    loop {
        tokio::select! {
            _ = render_tick.tick() => {
                if app.is_loading() {
                    render_state.mark_dirty(DirtyFlags::STATUS);
                }
                if render_state.needs_render() {
                    tracing::trace!(dirty = ?render_state.dirty(), "draw");
                    terminal.draw(|frame| crate::views::render(frame, &app))?;
                    render_state.clear();
                } else {
                    render_state.skip();
                }
            }
            Some((generation, outcome)) = rx.recv() => {
                if app.finish(generation, outcome) {
                    render_state.mark_dirty(DirtyFlags::NONE.mark_pass_finished());
                }
            }
            Some(event) = tokio_stream::StreamExt::next(&mut events) => {
                let event = match event {
                    Ok(Event::Key(event)) => event,
                    Ok(Event::Resize(..)) => {
                        render_state.mark_all_dirty();
                        continue;
                    }
                    Ok(_) => continue,
                    Err(err) => {
                        tracing::error!(error = %err, "failed to read terminal event");
                        return Err(err.into());
                    }
                };

                match app.handle_key(event) {
                    Action::Quit => break,
                    Action::Rerun => {
                        spawn_pass(&provider, &mut app, &tx);
                        render_state.mark_dirty(DirtyFlags::NONE.mark_control_change());
                    }
                    Action::Redraw(flags) => render_state.mark_dirty(flags),
                    Action::Nothing => {}
                }
            }
        }
    }

    tracing::info!(stats = %render_state.stats(), "event loop finished");
    Ok(())
}
