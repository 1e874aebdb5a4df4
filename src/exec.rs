//! External program handoff.
//!
//! The toolkit owns the terminal exclusively; to run another program it
//! must fully release raw mode and the cursor, block until the program
//! exits, then take everything back. The release/reacquire pair brackets
//! the call on every path, so terminal state after the call exactly
//! matches the state before it.

use std::process::{Command, ExitStatus};

use crate::backend::Backend;
use crate::error::Result;
use crate::screen::Screen;

/// Run a shell command line with the terminal handed over to it.
///
/// Synchronous: blocks until the child exits. The screen is cleared on
/// both sides of the call; the caller redraws afterwards.
#[cfg(unix)]
pub fn run_external<B: Backend>(screen: &mut Screen<B>, command_line: &str) -> Result<ExitStatus> {
    screen.pause()?;
    log::debug!("running external command: {command_line}");

    let status = Command::new("sh").arg("-c").arg(command_line).status();

    // Reacquire before surfacing any spawn failure.
    screen.restore()?;
    Ok(status?)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::key::KeyMap;

    #[test]
    fn terminal_state_matches_before_and_after() {
        let mut screen =
            Screen::with_backend(TestBackend::new(80, 24), KeyMap::default()).unwrap();
        let raw_before = screen.is_raw();
        let cursor_before = screen.cursor_visible();

        let status = run_external(&mut screen, "true").unwrap();
        assert!(status.success());
        assert_eq!(screen.is_raw(), raw_before);
        assert_eq!(screen.cursor_visible(), cursor_before);
    }

    #[test]
    fn exit_code_is_reported() {
        let mut screen =
            Screen::with_backend(TestBackend::new(80, 24), KeyMap::default()).unwrap();
        let status = run_external(&mut screen, "exit 3").unwrap();
        assert_eq!(status.code(), Some(3));
    }
}
