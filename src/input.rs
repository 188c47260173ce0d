use winit::keyboard::KeyCode;
use winit_input_helper::WinitInputHelper;

/// Source of the user's request to stop the simulation.
pub trait InputAdapter {
    /// Must not block.
    fn poll_quit(&mut self) -> bool;
}

/// Reads quit requests out of the events `WinitInputHelper` gathered
/// during the last loop step.
pub struct WindowInput<'a> {
    helper: &'a WinitInputHelper,
    quit_key: KeyCode,
}

impl<'a> WindowInput<'a> {
    pub fn new(helper: &'a WinitInputHelper, quit_key: KeyCode) -> Self {
        Self { helper, quit_key }
    }
}

impl InputAdapter for WindowInput<'_> {
    fn poll_quit(&mut self) -> bool {
        self.helper.close_requested()
            || self.helper.destroyed()
            || self.helper.key_pressed(self.quit_key)
    }
}
