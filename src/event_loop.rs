// event_loop.rs

use crate::audio::ClickPlayer;
use crate::metronome::Metronome;
use crate::state::{Action, MetronomeState};
use crate::timer::Scheduler;
use crate::view::View;
use log::{debug, error, info};
use std::io;
use std::sync::mpsc::Receiver;

/// Everything the event loop reacts to: UI input and timer ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMessage {
    /// The timer with this generation fired
    Tick { generation: u64 },
    /// A widget produced an action
    Ui(Action),
    /// Move the slider by this many steps
    NudgeBpm(i64),
    /// The screen changed size; repaint without touching state
    Redraw,
    Quit,
}

/// Single-threaded loop that owns the metronome. All state changes happen here.
pub struct EventLoop<S: Scheduler, P: ClickPlayer> {
    metronome: Metronome<S, P>,
    message_rx: Receiver<EngineMessage>,
}

impl<S: Scheduler, P: ClickPlayer> EventLoop<S, P> {
    pub fn new(metronome: Metronome<S, P>, message_rx: Receiver<EngineMessage>) -> Self {
        EventLoop {
            metronome,
            message_rx,
        }
    }

    /// Runs until `Quit` arrives or every sender is gone, calling `redraw` with the
    /// current view after each message. The metronome is unmounted on the way out
    /// and its final state returned.
    pub fn run<F>(self, mut redraw: F) -> io::Result<MetronomeState>
    where
        F: FnMut(&View) -> io::Result<()>,
    {
        let EventLoop {
            mut metronome,
            message_rx,
        } = self;

        info!("Event loop started");
        let result = pump_messages(&mut metronome, &message_rx, &mut redraw);
        let state = metronome.unmount();
        result.map(|()| state)
    }
}

fn pump_messages<S, P, F>(
    metronome: &mut Metronome<S, P>,
    message_rx: &Receiver<EngineMessage>,
    redraw: &mut F,
) -> io::Result<()>
where
    S: Scheduler,
    P: ClickPlayer,
    F: FnMut(&View) -> io::Result<()>,
{
    redraw(&metronome.view())?;
    loop {
        match message_rx.recv() {
            Ok(message) => {
                debug!("Event loop received {:?}", message);
                if !metronome.handle_message(message) {
                    info!("Quit requested");
                    return Ok(());
                }
                redraw(&metronome.view())?;
            }
            Err(e) => {
                error!("Message channel error: {}", e);
                return Ok(());
            }
        }
    }
}
