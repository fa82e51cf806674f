// view.rs

use crate::config::{MAX_BPM, MIN_BPM};
use crate::state::{Action, MetronomeState};

/// Everything the metronome shows, derived from state alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub label: String,
    pub slider: Slider,
    pub button: Button,
}

/// Tempo slider. Moving it produces [`Action::SetBpm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slider {
    pub min: u32,
    pub max: u32,
    pub value: u32,
}

impl Slider {
    pub fn on_change(&self, value: i64) -> Action {
        Action::SetBpm(value)
    }

    /// Moves the thumb by `delta` steps. Bounds are enforced by the clamp in `SetBpm`.
    pub fn stepped(&self, delta: i64) -> Action {
        self.on_change(i64::from(self.value) + delta)
    }

    /// Value for a position along the track, 0.0 at `min` and 1.0 at `max`.
    pub fn value_at(&self, fraction: f64) -> i64 {
        let span = f64::from(self.max - self.min);
        i64::from(self.min) + (fraction * span).round() as i64
    }

    /// Thumb position along the track in 0.0..=1.0.
    pub fn ratio(&self) -> f64 {
        let span = f64::from(self.max - self.min);
        (f64::from(self.value.saturating_sub(self.min)) / span).clamp(0.0, 1.0)
    }
}

impl Default for Slider {
    fn default() -> Self {
        Slider {
            min: MIN_BPM,
            max: MAX_BPM,
            value: MIN_BPM,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
}

impl Button {
    pub fn on_press(&self) -> Action {
        Action::ToggleStartStop
    }
}

pub fn view(state: &MetronomeState) -> View {
    let bpm = state.bpm().get();
    View {
        label: format!("{} BPM", bpm),
        slider: Slider {
            value: bpm,
            ..Slider::default()
        },
        button: Button {
            label: if state.is_playing() { "Stop" } else { "Start" },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Bpm;

    #[test]
    fn test_stopped_view() {
        let view = view(&MetronomeState::default());
        assert_eq!(view.label, "100 BPM");
        assert_eq!(view.button.label, "Start");
        assert_eq!(view.slider.min, 60);
        assert_eq!(view.slider.max, 240);
        assert_eq!(view.slider.value, 100);
    }

    #[test]
    fn test_playing_view() {
        let state = MetronomeState::new(Bpm::clamped(72), 4)
            .update(Action::ToggleStartStop)
            .state;
        let view = view(&state);
        assert_eq!(view.label, "72 BPM");
        assert_eq!(view.button.label, "Stop");
    }

    #[test]
    fn test_slider_bindings() {
        let slider = view(&MetronomeState::default()).slider;
        assert_eq!(slider.stepped(5), Action::SetBpm(105));
        assert_eq!(slider.stepped(-50), Action::SetBpm(50));
        assert_eq!(slider.on_change(200), Action::SetBpm(200));
    }

    #[test]
    fn test_slider_positions() {
        let slider = Slider::default();
        assert_eq!(slider.value_at(0.0), 60);
        assert_eq!(slider.value_at(1.0), 240);
        assert_eq!(slider.value_at(0.5), 150);
        assert_eq!(Slider { value: 150, ..slider }.ratio(), 0.5);
    }

    #[test]
    fn test_button_toggles() {
        let button = view(&MetronomeState::default()).button;
        assert_eq!(button.on_press(), Action::ToggleStartStop);
    }
}
