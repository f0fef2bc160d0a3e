use macroquad::input::{KeyCode, is_key_pressed, is_quit_requested, prevent_quit};

/// Window-side signals the loop consumes.
pub trait EventSource {
    /// Checked at the top of every loop iteration
    fn should_close(&self) -> bool;

    /// Drain pending window events
    fn poll_events(&mut self);
}

/// Event source for the macroquad window.
///
/// Close is requested by the window's close button or by Escape. Events are
/// pumped by macroquad's `next_frame`; `poll_events` latches what arrived.
pub struct MacroquadWindow {
    close_requested: bool,
}

impl MacroquadWindow {
    /// Take over the close button so a shutdown is only observed between ticks
    pub fn new() -> Self {
        prevent_quit();
        Self { close_requested: false }
    }
}

impl Default for MacroquadWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for MacroquadWindow {
    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn poll_events(&mut self) {
        if is_quit_requested() || is_key_pressed(KeyCode::Escape) {
            self.close_requested = true;
        }
    }
}
