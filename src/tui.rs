mod input;

pub use input::{map_event, map_key_event, map_mouse_event};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Gauge, Paragraph},
    Frame, Terminal,
};
use std::error::Error;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::audio::ClickPlayer;
use crate::event_loop::{EngineMessage, EventLoop};
use crate::metronome::Metronome;
use crate::timer::Scheduler;
use crate::view::View;

const WIDGET_WIDTH: u16 = 44;
const BUTTON_WIDTH: u16 = 12;
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Screen regions of the three widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub label: Rect,
    pub slider: Rect,
    pub button: Rect,
}

impl Areas {
    /// Centres the widget column inside `area`.
    pub fn new(area: Rect) -> Self {
        let [column] = Layout::horizontal([Constraint::Length(WIDGET_WIDTH)])
            .flex(Flex::Center)
            .areas(area);

        let [label, slider, button_row] = Layout::vertical([
            Constraint::Length(1), // "{bpm} BPM"
            Constraint::Length(3), // slider
            Constraint::Length(3), // Start/Stop
        ])
        .flex(Flex::Center)
        .areas(column);

        let [button] = Layout::horizontal([Constraint::Length(BUTTON_WIDTH)])
            .flex(Flex::Center)
            .areas(button_row);

        Areas {
            label,
            slider,
            button,
        }
    }

    /// Track of the slider, inside its border.
    pub fn slider_track(&self) -> Rect {
        self.slider.inner(Margin::new(1, 1))
    }
}

pub fn render(f: &mut Frame, view: &View) {
    let areas = Areas::new(f.area());

    let label = Paragraph::new(view.label.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(label, areas.label);

    let slider = Gauge::default()
        .block(Block::bordered())
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(view.slider.ratio())
        .label("");
    f.render_widget(slider, areas.slider);

    let button = Paragraph::new(view.button.label)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::bordered());
    f.render_widget(button, areas.button);
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        log::info!("Terminal cleaned up");
    }
}

fn spawn_input_thread(
    message_tx: Sender<EngineMessage>,
    shutdown: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while !shutdown.load(Ordering::SeqCst) {
            match event::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    log::error!("Input poll failed: {}", e);
                    break;
                }
            }

            let event = match event::read() {
                Ok(event) => event,
                Err(e) => {
                    log::error!("Input read failed: {}", e);
                    break;
                }
            };

            let areas = match crossterm::terminal::size() {
                Ok((width, height)) => Areas::new(Rect::new(0, 0, width, height)),
                Err(_) => continue,
            };

            if let Some(message) = map_event(event, &areas) {
                log::debug!("Sending message to event loop: {:?}", message);
                if message_tx.send(message).is_err() {
                    break;
                }
            }
        }
        log::debug!("Input thread finished");
    })
}

/// Takes over the terminal and runs the metronome until the user quits.
pub fn run_tui<S: Scheduler, P: ClickPlayer>(
    metronome: Metronome<S, P>,
    message_tx: Sender<EngineMessage>,
    message_rx: Receiver<EngineMessage>,
) -> Result<(), Box<dyn Error>> {
    log::info!("Starting TUI event loop");
    let guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let input = spawn_input_thread(message_tx, shutdown.clone());

    let result = EventLoop::new(metronome, message_rx)
        .run(|view| terminal.draw(|f| render(f, view)).map(|_| ()));

    shutdown.store(true, Ordering::SeqCst);
    if input.join().is_err() {
        log::warn!("Input thread panicked");
    }
    drop(guard);

    let state = result?;
    log::info!("Stopped at {} BPM", state.bpm());
    Ok(())
}
