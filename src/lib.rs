//! emberline — a small terminal UI toolkit.
//!
//! Raw-mode keyboard decoding, a character-cell screen canvas, and a few
//! composable modal widgets (menu, message box, confirm box, edit box) for
//! quick interactive CLI tools. Single-threaded and synchronous: widgets
//! own their event loop, draw through the canvas, and return a result when
//! a terminating key arrives.
//!
//! ```no_run
//! use emberline::{Menu, MenuItem, MenuOptions, MenuOutcome, Screen};
//!
//! fn main() -> emberline::Result<()> {
//!     let mut screen = Screen::new()?;
//!     let mut menu = Menu::new(vec![
//!         MenuItem::label("first"),
//!         MenuItem::label("second"),
//!     ]);
//!     match menu.display(&mut screen, &MenuOptions::default())? {
//!         MenuOutcome::Selected(_index) => { /* act on it */ }
//!         MenuOutcome::Cancelled | MenuOutcome::Passthrough(_) => {}
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The terminal is acquired on [`Screen::new`] (raw mode, hidden cursor,
//! cleared screen) and released on drop, on every exit path. Dimensions
//! are captured once; resizing mid-session is not supported.

pub mod ansi;
pub mod backend;
pub mod color;
pub mod error;
#[cfg(unix)]
pub mod exec;
pub mod key;
pub mod screen;
pub mod widgets;

pub use backend::{Backend, TestBackend};
#[cfg(unix)]
pub use backend::TtyBackend;
pub use color::{Attr, Color, ColorPair};
pub use error::{Error, Result};
#[cfg(unix)]
pub use exec::run_external;
pub use key::{Key, KeyMap};
pub use screen::Screen;
pub use widgets::{
    ConfirmBox, EditBox, EditState, Menu, MenuItem, MenuOptions, MenuOutcome, MessageBox,
};
