//! Composable modal widgets.
//!
//! Every widget borrows the [`crate::screen::Screen`] for one interaction:
//! it draws through the canvas primitives, reads decoded keys in its own
//! loop, and returns a result value synchronously. Cancellation (Escape,
//! Ctrl-C) is encoded in the result, never raised as an error.

pub mod confirm;
pub mod edit;
pub mod menu;
pub mod message;

pub use confirm::ConfirmBox;
pub use edit::{EditBox, EditState};
pub use menu::{Menu, MenuItem, MenuOptions, MenuOutcome};
pub use message::MessageBox;

use crate::screen::text_col_max;

/// Box geometry shared by the dialogs: minimum bounding size around a
/// message unless explicit dimensions were supplied, centered unless an
/// explicit position was supplied.
pub(crate) fn dialog_geometry(
    message: &str,
    extra_rows: u16,
    min_inner_width: usize,
    width: Option<u16>,
    height: Option<u16>,
    x: Option<u16>,
    y: Option<u16>,
    cols: u16,
    rows: u16,
) -> (u16, u16, u16, u16) {
    // A box is never smaller than its own border; explicit degenerate
    // sizes are clamped rather than fed into row arithmetic.
    let width = width
        .unwrap_or_else(|| {
            let body = text_col_max(message).max(min_inner_width);
            (body + 4) as u16
        })
        .max(3);
    let height = height
        .unwrap_or_else(|| message.lines().count().max(1) as u16 + extra_rows)
        .max(2);
    let x = x.unwrap_or_else(|| (cols.saturating_sub(width)) / 2 + 2);
    let y = y.unwrap_or_else(|| (rows.saturating_sub(height)) / 2 + 1);
    (x, y, width, height)
}
