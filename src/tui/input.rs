use crate::event_loop::EngineMessage;
use crate::tui::Areas;
use crate::view::{Button, Slider};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

const SMALL_STEP: i64 = 1;
const LARGE_STEP: i64 = 10;

pub fn map_event(event: Event, areas: &Areas) -> Option<EngineMessage> {
    match event {
        Event::Key(key) => map_key_event(key),
        Event::Mouse(mouse) => map_mouse_event(mouse, areas),
        Event::Resize(_, _) => Some(EngineMessage::Redraw),
        _ => None,
    }
}

pub fn map_key_event(key: KeyEvent) -> Option<EngineMessage> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(EngineMessage::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(EngineMessage::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => {
            Some(EngineMessage::Ui(Button::default().on_press()))
        }
        KeyCode::Left | KeyCode::Char('-') => Some(EngineMessage::NudgeBpm(-SMALL_STEP)),
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
            Some(EngineMessage::NudgeBpm(SMALL_STEP))
        }
        KeyCode::Down | KeyCode::PageDown => Some(EngineMessage::NudgeBpm(-LARGE_STEP)),
        KeyCode::Up | KeyCode::PageUp => Some(EngineMessage::NudgeBpm(LARGE_STEP)),
        KeyCode::Home => {
            let slider = Slider::default();
            Some(EngineMessage::Ui(slider.on_change(i64::from(slider.min))))
        }
        KeyCode::End => {
            let slider = Slider::default();
            Some(EngineMessage::Ui(slider.on_change(i64::from(slider.max))))
        }
        _ => None,
    }
}

pub fn map_mouse_event(mouse: MouseEvent, areas: &Areas) -> Option<EngineMessage> {
    let position = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if areas.button.contains(position) => {
            Some(EngineMessage::Ui(Button::default().on_press()))
        }
        MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
            if areas.slider.contains(position) =>
        {
            let track = areas.slider_track();
            if track.width < 2 {
                return None;
            }
            let offset = f64::from(mouse.column) - f64::from(track.x);
            let fraction = offset / f64::from(track.width - 1);
            let slider = Slider::default();
            Some(EngineMessage::Ui(slider.on_change(slider.value_at(fraction))))
        }
        _ => None,
    }
}
