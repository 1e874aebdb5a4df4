//! Edit box: a single-buffer text editor wrapped across a fixed-width field.
//!
//! The buffer renders row-major into the inner rectangle — the character at
//! offset `k` sits at row `k / width`, column `k % width` (flat layout, not
//! word wrap). That arithmetic is the single source of truth for both the
//! visible cursor and the redraw extent: after a mutation only the tail
//! from the edit point is repainted.
//!
//! ENTER commits the trimmed buffer; ESCAPE aborts with no value, which is
//! distinct from committing an empty string.

use crate::backend::Backend;
use crate::color::ColorPair;
use crate::error::Result;
use crate::key::Key;
use crate::screen::{clip_to_width, Screen};

// =============================================================================
// EditState
// =============================================================================

/// Buffer + cursor arithmetic, independent of any terminal.
///
/// Invariants: `cursor <= len()` and `len() <= max` hold after every
/// operation; boundary operations (backspace at 0, delete at the end,
/// insert at capacity) are silent no-ops.
#[derive(Debug, Clone)]
pub struct EditState {
    chars: Vec<char>,
    cursor: usize,
    max: usize,
}

impl EditState {
    /// Seed with a default value, truncated to the size cap; the cursor
    /// starts at the end of the buffer.
    pub fn new(default_value: &str, max: usize) -> Self {
        let chars: Vec<char> = default_value.chars().take(max).collect();
        let cursor = chars.len();
        Self { chars, cursor, max }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn value(&self) -> String {
        self.chars.iter().collect()
    }

    /// The buffer from `offset` onward.
    pub fn tail(&self, offset: usize) -> String {
        self.chars[offset.min(self.chars.len())..].iter().collect()
    }

    /// Insert at the cursor, shifting the remainder right. Rejected
    /// silently at the size cap.
    pub fn insert(&mut self, ch: char) -> bool {
        if self.chars.len() >= self.max {
            return false;
        }
        self.chars.insert(self.cursor, ch);
        self.cursor += 1;
        true
    }

    /// Remove the character before the cursor. No-op at offset 0.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.chars.remove(self.cursor - 1);
        self.cursor -= 1;
        true
    }

    /// Remove the character at the cursor. No-op at the end of the buffer.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.chars.len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.chars.len();
    }
}

// =============================================================================
// Field geometry
// =============================================================================

/// The inner rectangle the buffer wraps into.
#[derive(Debug, Clone, Copy)]
struct Field {
    x: u16,
    y: u16,
    width: usize,
    height: usize,
}

impl Field {
    /// Row-major position of a buffer offset, clamped to the last cell.
    fn rowcol(&self, offset: usize) -> (usize, usize) {
        let last = self.width * self.height - 1;
        let offset = offset.min(last);
        (offset / self.width, offset % self.width)
    }

    /// Terminal coordinates of a buffer offset.
    fn cursor_xy(&self, offset: usize) -> (u16, u16) {
        let (row, col) = self.rowcol(offset);
        (self.x + col as u16, self.y + row as u16)
    }
}

// =============================================================================
// EditBox
// =============================================================================

/// A modal line-wrapped text field inside a box.
pub struct EditBox<'a> {
    title: Option<&'a str>,
    footer: Option<&'a str>,
    /// Second footer, left-aligned on the bottom border.
    footer2: Option<&'a str>,
    default_value: &'a str,
    size: usize,
    width: Option<u16>,
    height: Option<u16>,
    x: Option<u16>,
    y: Option<u16>,
    color: Option<ColorPair>,
}

impl<'a> EditBox<'a> {
    pub fn new(default_value: &'a str) -> Self {
        Self {
            title: None,
            footer: None,
            footer2: None,
            default_value,
            size: 100,
            width: None,
            height: None,
            x: None,
            y: None,
            color: None,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn footer2(mut self, footer2: &'a str) -> Self {
        self.footer2 = Some(footer2);
        self
    }

    /// Maximum number of characters the buffer may hold (default 100).
    pub fn size(mut self, size: usize) -> Self {
        self.size = size.max(1);
        self
    }

    pub fn dimensions(mut self, width: u16, height: u16) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn at(mut self, x: u16, y: u16) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn color(mut self, color: ColorPair) -> Self {
        self.color = Some(color);
        self
    }

    /// Run the interaction. `Some(trimmed value)` on commit, `None` on
    /// abort.
    pub fn show<B: Backend>(&self, screen: &mut Screen<B>) -> Result<Option<String>> {
        let cols = screen.cols();
        let rows = screen.rows();

        let width = self
            .width
            .unwrap_or_else(|| ((self.size + 4).min(cols as usize)) as u16)
            .max(3);
        let height = self
            .height
            .unwrap_or_else(|| {
                let w = width as usize;
                let mut h = 2 + (self.size + 4) / w;
                if self.size % w > 0 {
                    h += 1;
                }
                h as u16
            })
            .max(2);
        let x = self.x.unwrap_or_else(|| cols.saturating_sub(width) / 2 + 1);
        let y = self.y.unwrap_or_else(|| rows.saturating_sub(height) / 2 + 1);

        screen.box_(self.title, self.footer, x, y, width, height, self.color)?;
        if let Some(footer2) = self.footer2 {
            let clipped = clip_to_width(footer2, (width as usize).saturating_sub(2));
            screen.text(&clipped, x + 1, y + height - 1, self.color)?;
        }

        let field = Field {
            x: x + 1,
            y: y + 1,
            width: (width - 2) as usize,
            height: (height.saturating_sub(2)).max(1) as usize,
        };

        let mut state = EditState::new(self.default_value, self.size);
        let was_visible = screen.cursor_visible();

        self.paint_tail(screen, &field, &state, 0, false)?;
        screen.cursor_show()?;
        let (cx, cy) = field.cursor_xy(state.cursor());
        screen.cursor_move(cx, cy)?;

        loop {
            match screen.key()? {
                Key::Enter => {
                    if !was_visible {
                        screen.cursor_hide()?;
                    }
                    return Ok(Some(state.value().trim().to_string()));
                }
                Key::Escape | Key::Ctrl('c') => {
                    if !was_visible {
                        screen.cursor_hide()?;
                    }
                    return Ok(None);
                }
                Key::Backspace => {
                    if state.backspace() {
                        self.paint_tail(screen, &field, &state, state.cursor(), true)?;
                    }
                }
                Key::Delete => {
                    if state.delete() {
                        self.paint_tail(screen, &field, &state, state.cursor(), true)?;
                    }
                }
                Key::Left => state.left(),
                Key::Right => state.right(),
                Key::Home => state.home(),
                Key::End => state.end(),
                Key::Char(ch) => {
                    if state.insert(ch) {
                        // Content only grew; the reprint covers the old tail.
                        self.paint_tail(screen, &field, &state, state.cursor() - 1, false)?;
                    }
                }
                _ => {}
            }

            let (cx, cy) = field.cursor_xy(state.cursor());
            screen.cursor_move(cx, cy)?;
        }
    }

    /// Repaint the buffer from `from` to the end of the field. `clear`
    /// blanks the affected rows first — needed when the content shrank.
    fn paint_tail<B: Backend>(
        &self,
        screen: &mut Screen<B>,
        field: &Field,
        state: &EditState,
        from: usize,
        clear: bool,
    ) -> Result<()> {
        let (row0, col0) = field.rowcol(from);

        if clear {
            screen.text(
                &" ".repeat(field.width - col0),
                field.x + col0 as u16,
                field.y + row0 as u16,
                self.color,
            )?;
            for row in row0 + 1..field.height {
                screen.text(&" ".repeat(field.width), field.x, field.y + row as u16, self.color)?;
            }
        }

        let tail: Vec<char> = state.tail(from).chars().collect();
        let mut offset = 0;
        let mut row = row0;
        let mut col = col0;
        while offset < tail.len() && row < field.height {
            let room = field.width - col;
            let chunk: String = tail[offset..(offset + room).min(tail.len())].iter().collect();
            screen.text(&chunk, field.x + col as u16, field.y + row as u16, self.color)?;
            offset += room;
            row += 1;
            col = 0;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
