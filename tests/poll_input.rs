use std::sync::Arc;

use dpi::{PhysicalPosition, PhysicalSize};
use parking_lot::Mutex;

use fx_frame_bridge::engine::input::keys::{UiKeyCode, UiMouseButton, buttons, keys};
use fx_frame_bridge::engine::input::{FocusLossPolicy, Orientation, Peripheral, PointerKind, RawUiEvent};
use fx_frame_bridge::{
    InputConfig, InputError, InputSink, PollInput, PollInputSource, PresentationImage, Presenter, PresenterConfig,
    SurfaceTarget,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Default)]
struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock())
    }
}

impl InputSink for Journal {
    fn key_down(&mut self, key_code: i32) -> bool {
        self.0.lock().push(format!("key_down {key_code}"));
        true
    }

    fn key_up(&mut self, key_code: i32) -> bool {
        self.0.lock().push(format!("key_up {key_code}"));
        true
    }

    fn touch_down(&mut self, x: i32, y: i32, pointer: i32, button: i32) -> bool {
        self.0.lock().push(format!("touch_down {x} {y} {pointer} {button}"));
        true
    }

    fn touch_up(&mut self, x: i32, y: i32, pointer: i32, button: i32) -> bool {
        self.0.lock().push(format!("touch_up {x} {y} {pointer} {button}"));
        true
    }

    fn touch_dragged(&mut self, x: i32, y: i32, pointer: i32) -> bool {
        self.0.lock().push(format!("touch_dragged {x} {y} {pointer}"));
        true
    }
}

fn pointer(kind: PointerKind, x: f64, y: f64) -> RawUiEvent {
    RawUiEvent::Pointer {
        kind,
        x,
        y,
        button: UiMouseButton::Primary,
    }
}

#[test]
fn press_drag_release_updates_position_and_delta() {
    init_logging();
    let (mut poll, capture) = PollInput::new(InputConfig::default(), None);
    let journal = Journal::default();
    poll.set_input_sink(Some(Box::new(journal.clone())));

    capture.handle(pointer(PointerKind::Pressed, 10.0, 10.0));
    capture.handle(pointer(PointerKind::Dragged, 50.0, 30.0));
    capture.handle(pointer(PointerKind::Released, 50.0, 30.0));
    poll.drain();

    assert_eq!(
        journal.take(),
        vec![
            format!("touch_down 10 10 0 {}", buttons::LEFT),
            "touch_dragged 50 30 0".to_owned(),
            format!("touch_up 50 30 0 {}", buttons::LEFT),
        ]
    );
    assert_eq!((poll.x(), poll.y()), (50, 30));
    assert_eq!((poll.delta_x(), poll.delta_y()), (40, 20));
    assert!(poll.just_touched());
    assert!(!poll.is_touched());
    assert_eq!(poll.last_recorded_position(), Some(PhysicalPosition::new(50, 30)));

    poll.drain();
    assert!(journal.take().is_empty());
    assert_eq!((poll.delta_x(), poll.delta_y()), (0, 0));
    assert!(!poll.just_touched());
}

#[test]
fn events_within_a_drain_keep_capture_order() {
    init_logging();
    let (mut poll, capture) = PollInput::new(InputConfig::default(), None);
    let journal = Journal::default();
    poll.set_input_sink(Some(Box::new(journal.clone())));

    capture.handle(pointer(PointerKind::Pressed, 1.0, 1.0));
    poll.drain();
    journal.take();

    capture.handle(pointer(PointerKind::Dragged, 2.0, 2.0));
    capture.handle(RawUiEvent::KeyPressed {
        code: UiKeyCode::Escape,
        text: None,
    });
    capture.handle(pointer(PointerKind::Dragged, 3.0, 3.0));
    capture.handle(RawUiEvent::KeyReleased {
        code: UiKeyCode::Escape,
    });
    poll.drain();

    assert_eq!(
        journal.take(),
        vec![
            format!("key_down {}", keys::ESCAPE),
            format!("key_up {}", keys::ESCAPE),
            "touch_dragged 2 2 0".to_owned(),
            "touch_dragged 3 3 0".to_owned(),
        ]
    );
    assert!(!poll.is_key_pressed(keys::ANY_KEY));
    assert!(!poll.is_key_pressed(keys::ESCAPE));
}

#[test]
fn focus_survives_release_until_root_is_pressed() {
    init_logging();
    let (mut poll, capture) = PollInput::new(InputConfig::default(), None);

    capture.handle(pointer(PointerKind::Pressed, 0.0, 0.0));
    poll.drain();
    assert!(poll.has_focus());

    capture.handle(pointer(PointerKind::Released, 0.0, 0.0));
    poll.drain();
    assert!(poll.has_focus());

    capture.set_root_pressed(true);
    poll.drain();
    assert!(!poll.has_focus());

    capture.handle(RawUiEvent::KeyPressed {
        code: UiKeyCode::A,
        text: Some('a'),
    });
    poll.drain();
    assert!(!poll.is_key_pressed(keys::A));
}

#[test]
fn on_release_policy_drops_focus_with_the_pointer() {
    init_logging();
    let config = InputConfig {
        focus_loss: FocusLossPolicy::OnRelease,
        ..InputConfig::default()
    };
    let (mut poll, capture) = PollInput::new(config, None);

    capture.handle(pointer(PointerKind::Pressed, 0.0, 0.0));
    poll.drain();
    assert!(poll.has_focus());

    capture.handle(pointer(PointerKind::Released, 0.0, 0.0));
    poll.drain();
    assert!(!poll.has_focus());
}

struct FocusSurface {
    focus_requests: usize,
}

impl SurfaceTarget for FocusSurface {
    fn current_size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(1, 1)
    }

    fn is_visible(&self) -> bool {
        true
    }

    fn set_image(&mut self, _image: &PresentationImage) {}

    fn request_focus(&mut self) {
        self.focus_requests += 1;
    }
}

#[test]
fn gaining_focus_asks_presenter_to_focus_surface() {
    init_logging();
    let (mut presenter, link) = Presenter::new(FocusSurface { focus_requests: 0 }, PresenterConfig::default());
    let (mut poll, capture) = PollInput::new(InputConfig::default(), Some(link.focus_requester()));

    capture.handle(pointer(PointerKind::Pressed, 0.0, 0.0));
    poll.drain();
    poll.drain();

    assert_eq!(presenter.run_tasks(), 1);
    assert_eq!(presenter.target().focus_requests, 1);
}

#[test]
fn unsupported_capabilities_report_defaults() {
    init_logging();
    let (mut poll, _capture) = PollInput::new(InputConfig::default(), None);

    assert!(matches!(
        poll.set_on_screen_keyboard_visible(true),
        Err(InputError::Unsupported(_))
    ));
    assert!(matches!(
        poll.request_text_input("name", ""),
        Err(InputError::Unsupported(_))
    ));
    assert!(matches!(
        poll.set_cursor_image(&[0; 16], 2, (0, 0)),
        Err(InputError::Unsupported(_))
    ));

    assert!(poll.is_peripheral_available(Peripheral::HardwareKeyboard));
    assert!(!poll.is_peripheral_available(Peripheral::MultitouchScreen));
    assert!(!poll.supports_multitouch());
    assert_eq!(poll.native_orientation(), Orientation::Landscape);
    assert_eq!(poll.accelerometer(), [0.0; 3]);
    assert_eq!(poll.x_for(1), 0);
    assert!(!poll.is_touched_for(1));
    assert!(!poll.is_cursor_catched());

    let mut matrix = [1.0; 16];
    poll.rotation_matrix(&mut matrix);
    assert_eq!(matrix, [1.0; 16]);
}
