//! The metronome component
//!
//! [`Metronome`] holds the current [`MetronomeState`], feeds every event through
//! [`MetronomeState::update`] and carries out the requested effects: it owns the
//! single repeating timer and the click player.
//!
//! Each timer gets a generation number that travels with its ticks. Ticks whose
//! generation is not the running timer's were queued before a cancel and are dropped.

use crate::audio::{Click, ClickPlayer};
use crate::config::Config;
use crate::event_loop::EngineMessage;
use crate::state::{Action, Effect, MetronomeState};
use crate::timer::{Scheduler, TimerHandle};
use crate::view::{self, View};
use log::{debug, info, trace, warn};
use std::sync::mpsc::Sender;
use std::time::Duration;

struct ActiveTimer {
    generation: u64,
    handle: TimerHandle,
}

pub struct Metronome<S: Scheduler, P: ClickPlayer> {
    state: MetronomeState,
    scheduler: S,
    player: P,
    timer: Option<ActiveTimer>,
    generation: u64,
    tick_tx: Sender<EngineMessage>,
}

impl<S: Scheduler, P: ClickPlayer> Metronome<S, P> {
    /// Creates a stopped metronome. Timer ticks are delivered as
    /// [`EngineMessage::Tick`] on `tick_tx`.
    pub fn mount(config: &Config, scheduler: S, player: P, tick_tx: Sender<EngineMessage>) -> Self {
        let state = MetronomeState::new(config.bpm, config.beats_per_measure);
        info!(
            "Metronome mounted at {} BPM, {} beats per measure",
            state.bpm(),
            state.beats_per_measure()
        );
        Metronome {
            state,
            scheduler,
            player,
            timer: None,
            generation: 0,
            tick_tx,
        }
    }

    pub fn state(&self) -> &MetronomeState {
        &self.state
    }

    pub fn view(&self) -> View {
        view::view(&self.state)
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    /// Handles one message from the event loop. Returns `false` when the app should quit.
    pub fn handle_message(&mut self, message: EngineMessage) -> bool {
        match message {
            EngineMessage::Tick { generation } => {
                if self.is_current(generation) {
                    self.dispatch(Action::Tick);
                } else {
                    trace!("Dropping stale tick from timer generation {}", generation);
                }
            }
            EngineMessage::Ui(action) => self.dispatch(action),
            EngineMessage::NudgeBpm(delta) => {
                let action = self.view().slider.stepped(delta);
                self.dispatch(action);
            }
            EngineMessage::Redraw => {}
            EngineMessage::Quit => return false,
        }
        true
    }

    pub fn toggle_start_stop(&mut self) {
        self.dispatch(Action::ToggleStartStop);
    }

    pub fn set_bpm(&mut self, bpm: i64) {
        self.dispatch(Action::SetBpm(bpm));
    }

    pub fn dispatch(&mut self, action: Action) {
        let was_playing = self.state.is_playing();
        let transition = self.state.update(action);
        self.state = transition.state;

        if was_playing != self.state.is_playing() {
            info!(
                "Transport {} at {} BPM",
                if self.state.is_playing() { "started" } else { "stopped" },
                self.state.bpm()
            );
        } else if let Action::SetBpm(requested) = action {
            debug!("Tempo request {} -> {} BPM", requested, self.state.bpm());
        }

        for effect in transition.effects {
            match effect {
                Effect::RestartTimer(period) => self.restart_timer(period),
                Effect::CancelTimer => self.cancel_timer(),
                Effect::Click(click) => self.play(click),
            }
        }
    }

    /// Tears the component down, releasing the timer.
    pub fn unmount(mut self) -> MetronomeState {
        self.cancel_timer();
        info!("Metronome unmounted");
        self.state
    }

    fn is_current(&self, generation: u64) -> bool {
        self.timer
            .as_ref()
            .is_some_and(|timer| timer.generation == generation)
    }

    // The only place a timer is started: the previous one is always cancelled first.
    fn restart_timer(&mut self, period: Duration) {
        self.cancel_timer();

        self.generation += 1;
        let generation = self.generation;
        let tick_tx = self.tick_tx.clone();
        let handle = self.scheduler.schedule_repeating(period, move || {
            let _ = tick_tx.send(EngineMessage::Tick { generation });
        });

        debug!("Timer {} started with period {:?}", generation, period);
        self.timer = Some(ActiveTimer { generation, handle });
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.handle.cancel();
            debug!("Timer {} cancelled", timer.generation);
        }
    }

    fn play(&self, click: Click) {
        if let Err(e) = self.player.play(click) {
            warn!("Could not play {:?} click: {}", click, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingPlayer;
    use crate::timer::ManualScheduler;
    use std::sync::mpsc;

    #[test]
    fn test_handle_message_quit() {
        let (tx, _rx) = mpsc::channel();
        let mut metronome = Metronome::mount(
            &Config::default(),
            ManualScheduler::new(),
            RecordingPlayer::new(),
            tx,
        );
        assert!(metronome.handle_message(EngineMessage::NudgeBpm(1)));
        assert!(!metronome.handle_message(EngineMessage::Quit));
        assert_eq!(metronome.state().bpm().get(), 101);
    }

    #[test]
    fn test_redraw_keeps_state() {
        let scheduler = ManualScheduler::new();
        let (tx, _rx) = mpsc::channel();
        let mut metronome = Metronome::mount(
            &Config::default(),
            scheduler.clone(),
            RecordingPlayer::new(),
            tx,
        );
        metronome.toggle_start_stop();
        let before = *metronome.state();

        assert!(metronome.handle_message(EngineMessage::Redraw));
        assert_eq!(*metronome.state(), before);
        assert_eq!(scheduler.started(), 1);
    }

    #[test]
    fn test_timer_generations_increase() {
        let (tx, _rx) = mpsc::channel();
        let mut metronome = Metronome::mount(
            &Config::default(),
            ManualScheduler::new(),
            RecordingPlayer::new(),
            tx,
        );
        metronome.toggle_start_stop();
        assert!(metronome.is_current(1));
        metronome.set_bpm(120);
        assert!(!metronome.is_current(1));
        assert!(metronome.is_current(2));
    }
}
