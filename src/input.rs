#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    /// Coordinates are relative to the field's top-left corner.
    PointerDown { button: PointerButton, x: f32, y: f32 },
}

/// Non-blocking event queue, drained once per frame.
pub trait InputSource {
    fn poll(&mut self) -> Vec<InputEvent>;
}
