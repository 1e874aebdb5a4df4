//! Screen canvas: terminal geometry, cursor state, and draw primitives.
//!
//! A [`Screen`] owns the terminal for its lifetime: construction enters raw
//! mode, hides the cursor and clears; drop restores everything, on every
//! exit path. Dimensions are captured once at startup — resizing during a
//! session is not supported.
//!
//! All coordinates are 1-based (column 1, row 1 is the top-left corner) and
//! every widget assumes that convention. Draw calls write straight through
//! to the terminal; each one batches its own escape bytes and flushes, with
//! no double buffering.

use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::ansi;
use crate::backend::Backend;
#[cfg(unix)]
use crate::backend::TtyBackend;
use crate::color::{Attr, ColorPair};
use crate::error::Result;
use crate::key::{decode, Key, KeyMap};

// =============================================================================
// Screen
// =============================================================================

/// The character-cell canvas over a terminal backend.
pub struct Screen<B: Backend> {
    backend: B,
    keymap: KeyMap,
    cols: u16,
    rows: u16,
    cursor_x: u16,
    cursor_y: u16,
    cursor_visible: bool,
    default_pair: ColorPair,
    /// Cursor visibility remembered across a pause/restore handoff.
    paused_cursor: bool,
    /// Scratch buffer so each draw call flushes in a single write.
    scratch: Vec<u8>,
}

#[cfg(unix)]
impl Screen<TtyBackend> {
    /// Open the real terminal: query its size, enter raw mode, hide the
    /// cursor and clear. Fails before mutating any terminal state if the
    /// tty cannot be acquired.
    pub fn new() -> Result<Self> {
        let backend = TtyBackend::new()?;
        Self::with_backend(backend, KeyMap::from_env())
    }
}

impl<B: Backend> Screen<B> {
    /// Build a screen over an arbitrary backend with a prebuilt key table.
    pub fn with_backend(mut backend: B, keymap: KeyMap) -> Result<Self> {
        let (cols, rows) = backend.size()?;
        backend.enter_raw()?;

        let mut screen = Self {
            backend,
            keymap,
            cols,
            rows,
            cursor_x: 1,
            cursor_y: 1,
            cursor_visible: true,
            default_pair: ColorPair::default(),
            paused_cursor: true,
            scratch: Vec::with_capacity(4096),
        };
        screen.clear()?;
        screen.cursor_hide()?;
        Ok(screen)
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Terminal column count.
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// Terminal row count.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    // -------------------------------------------------------------------------
    // Colors
    // -------------------------------------------------------------------------

    /// Replace the default color pair.
    pub fn set_colors(&mut self, pair: ColorPair) {
        self.default_pair = pair;
    }

    /// Resolve an optional override against the default pair.
    pub fn color(&self, pair: Option<ColorPair>) -> ColorPair {
        pair.unwrap_or(self.default_pair)
    }

    /// The highlight variant of [`Screen::color`].
    pub fn color_reversed(&self, pair: Option<ColorPair>) -> ColorPair {
        self.color(pair).reversed()
    }

    // -------------------------------------------------------------------------
    // Cursor
    // -------------------------------------------------------------------------

    /// Move the terminal cursor. Out-of-range coordinates are ignored.
    pub fn cursor_move(&mut self, x: u16, y: u16) -> Result<()> {
        if x < 1 || y < 1 || x > self.cols || y > self.rows {
            return Ok(());
        }
        ansi::cursor_to(&mut self.scratch, x, y)?;
        self.cursor_x = x;
        self.cursor_y = y;
        self.blit()
    }

    pub fn cursor_show(&mut self) -> Result<()> {
        self.cursor_visible = true;
        ansi::cursor_show(&mut self.scratch)?;
        self.blit()
    }

    pub fn cursor_hide(&mut self) -> Result<()> {
        self.cursor_visible = false;
        ansi::cursor_hide(&mut self.scratch)?;
        self.blit()
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Current cursor position (x, y).
    pub fn cursor(&self) -> (u16, u16) {
        (self.cursor_x, self.cursor_y)
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    /// Clear the whole screen and home the cursor.
    pub fn clear(&mut self) -> Result<()> {
        ansi::clear_screen(&mut self.scratch)?;
        self.cursor_x = 1;
        self.cursor_y = 1;
        self.blit()
    }

    /// Write a string at (x, y), clipped at the right edge. Positions past
    /// the extents are a silent no-op.
    pub fn text(&mut self, content: &str, x: u16, y: u16, color: Option<ColorPair>) -> Result<()> {
        self.text_attr(content, x, y, color, Attr::NONE)
    }

    /// [`Screen::text`] with explicit text attributes.
    pub fn text_attr(
        &mut self,
        content: &str,
        x: u16,
        y: u16,
        color: Option<ColorPair>,
        attr: Attr,
    ) -> Result<()> {
        if x < 1 || y < 1 || x > self.cols || y > self.rows {
            return Ok(());
        }
        let available = (self.cols - x + 1) as usize;
        let clipped = clip_to_width(content, available);

        let pair = self.color(color);
        ansi::cursor_to(&mut self.scratch, x, y)?;
        ansi::color_pair(&mut self.scratch, pair)?;
        ansi::attrs(&mut self.scratch, attr)?;
        self.scratch.extend_from_slice(clipped.as_bytes());
        ansi::reset(&mut self.scratch)?;
        self.blit()
    }

    /// Draw a rectangular border with line glyphs, an optional inset title
    /// (left-aligned, bold, truncated to fit) and an optional right-aligned
    /// inset footer.
    pub fn box_(
        &mut self,
        title: Option<&str>,
        footer: Option<&str>,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Option<ColorPair>,
    ) -> Result<()> {
        let width = width.max(2);
        let height = height.max(2);
        let inner = (width - 2) as usize;

        let top = format!("┌{}┐", "─".repeat(inner));
        let body = format!("│{}│", " ".repeat(inner));
        let bottom = format!("└{}┘", "─".repeat(inner));

        self.text(&top, x, y, color)?;
        for row in 1..height - 1 {
            self.text(&body, x, y + row, color)?;
        }
        self.text(&bottom, x, y + height - 1, color)?;

        if let Some(title) = title.filter(|t| !t.is_empty()) {
            let max = (width as usize).saturating_sub(4);
            let title = clip_to_width(title, max);
            self.text_attr(&format!(" {title} "), x + 1, y, color, Attr::BOLD)?;
        }
        if let Some(footer) = footer.filter(|f| !f.is_empty()) {
            let mut footer = footer.to_string();
            let mut offset = width as isize - 1 - footer.width() as isize;
            if offset <= 0 {
                offset = 1;
                footer = clip_to_width(&footer, (width as usize).saturating_sub(2)).into_owned();
            }
            self.text(&footer, x + offset as u16, y + height - 1, color)?;
        }
        Ok(())
    }

    /// Draw text padded to a fixed size, optionally centered or stretched
    /// across the whole line.
    pub fn label(
        &mut self,
        content: &str,
        size: Option<usize>,
        x: u16,
        y: u16,
        color: Option<ColorPair>,
        centered: bool,
        full_line: bool,
    ) -> Result<()> {
        let text_width = content.width();
        let mut padding = size.map_or(0, |s| s.saturating_sub(text_width));
        if full_line {
            padding = (self.cols as usize).saturating_sub(text_width);
        }
        let (left, right) = if centered {
            (padding / 2, padding - padding / 2)
        } else {
            (0, padding)
        };
        let padded = format!("{}{}{}", " ".repeat(left), content, " ".repeat(right));
        self.text(&padded, x, y, color)
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Block for the next decoded keypress.
    pub fn key(&mut self) -> Result<Key> {
        Ok(decode(&mut self.backend, &self.keymap)?)
    }

    /// Wait for any single keypress, discarding it.
    pub fn key_press(&mut self) -> Result<()> {
        self.key().map(|_| ())
    }

    // -------------------------------------------------------------------------
    // Pause / restore for external-program handoff
    // -------------------------------------------------------------------------

    /// Hand the terminal over: flush pending output, restore the cursor and
    /// cooked mode. Call [`Screen::restore`] afterwards.
    pub fn pause(&mut self) -> Result<()> {
        self.paused_cursor = self.cursor_visible;
        self.clear()?;
        self.cursor_show()?;
        self.backend.flush()?;
        self.backend.leave_raw()?;
        log::trace!("terminal paused for external program");
        Ok(())
    }

    /// Take the terminal back after a pause.
    pub fn restore(&mut self) -> Result<()> {
        self.backend.enter_raw()?;
        self.clear()?;
        if !self.paused_cursor {
            self.cursor_hide()?;
        }
        log::trace!("terminal restored");
        Ok(())
    }

    /// Whether the backend is currently in raw mode.
    pub fn is_raw(&self) -> bool {
        self.backend.is_raw()
    }

    /// Direct access to the backend (test harnesses inspect output here).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn blit(&mut self) -> Result<()> {
        self.backend.write_all(&self.scratch)?;
        self.backend.flush()?;
        self.scratch.clear();
        Ok(())
    }
}

impl<B: Backend> Drop for Screen<B> {
    fn drop(&mut self) {
        // Mirror of init: clear, bring the cursor back, leave raw mode.
        let _ = self.clear();
        let _ = self.cursor_show();
        let _ = self.backend.leave_raw();
    }
}

// =============================================================================
// Text helpers
// =============================================================================

/// Truncate a string to at most `max` display columns.
pub fn clip_to_width(content: &str, max: usize) -> std::borrow::Cow<'_, str> {
    if content.width() <= max {
        return std::borrow::Cow::Borrowed(content);
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in content.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    std::borrow::Cow::Owned(out)
}

/// Word-wrap a one-line string at `max` columns.
pub fn text_wrap(content: &str, max: usize) -> String {
    if content.width() <= max {
        return content.to_string();
    }
    let mut out = String::new();
    let mut line_len = 0;
    for word in content.split_whitespace() {
        let w = word.width();
        if line_len + w > max && line_len != 0 {
            out.push('\n');
            line_len = 0;
        }
        out.push_str(word);
        out.push(' ');
        line_len += w;
    }
    out
}

/// Widest line of a multi-line string, in display columns.
pub fn text_col_max(content: &str) -> usize {
    content.lines().map(|line| line.width()).max().unwrap_or(0)
}

/// Center `content` inside a string of length `size`.
pub fn text_center(content: &str, size: usize) -> String {
    let padding = size.saturating_sub(content.width());
    let left = padding / 2;
    let right = padding - left;
    format!(
        "{}{}{}",
        " ".repeat(left),
        clip_to_width(content, size),
        " ".repeat(right)
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::color::Color;

    fn test_screen(cols: u16, rows: u16) -> Screen<TestBackend> {
        Screen::with_backend(TestBackend::new(cols, rows), KeyMap::default())
            .expect("test backend never fails to open")
    }

    #[test]
    fn init_enters_raw_hides_cursor_and_clears() {
        let mut screen = test_screen(80, 24);
        assert!(screen.is_raw());
        assert!(!screen.cursor_visible());
        let out = screen.backend_mut().output();
        assert!(out.contains("\x1b[2J"));
        assert!(out.contains("\x1b[?25l"));
    }

    #[test]
    fn text_writes_position_and_colors() {
        let mut screen = test_screen(80, 24);
        screen.backend_mut().clear_output();
        screen
            .text("hi", 5, 3, Some(ColorPair::new(Color::White, Color::Blue)))
            .unwrap();
        let out = screen.backend_mut().output();
        assert!(out.contains("\x1b[3;5H"));
        assert!(out.contains("\x1b[97;44m"));
        assert!(out.contains("hi"));
        assert!(out.ends_with("\x1b[0m"));
    }

    #[test]
    fn text_out_of_bounds_is_silent_noop() {
        let mut screen = test_screen(20, 10);
        screen.backend_mut().clear_output();
        screen.text("ignored", 21, 1, None).unwrap();
        screen.text("ignored", 1, 11, None).unwrap();
        screen.text("ignored", 0, 1, None).unwrap();
        assert!(screen.backend_mut().output().is_empty());
    }

    #[test]
    fn text_clips_at_right_edge() {
        let mut screen = test_screen(10, 10);
        screen.backend_mut().clear_output();
        screen.text("abcdefghijKLM", 8, 1, None).unwrap();
        let out = screen.backend_mut().output();
        // Columns 8..=10 leave room for exactly three characters.
        assert!(out.contains("abc"));
        assert!(!out.contains("abcd"));
    }

    #[test]
    fn cursor_move_ignores_out_of_range() {
        let mut screen = test_screen(20, 10);
        screen.cursor_move(5, 5).unwrap();
        assert_eq!(screen.cursor(), (5, 5));
        screen.cursor_move(25, 5).unwrap();
        assert_eq!(screen.cursor(), (5, 5));
        screen.cursor_move(5, 0).unwrap();
        assert_eq!(screen.cursor(), (5, 5));
    }

    #[test]
    fn box_draws_border_title_and_footer() {
        let mut screen = test_screen(40, 12);
        screen.backend_mut().clear_output();
        screen
            .box_(Some("Title"), Some("esc"), 2, 2, 20, 4, None)
            .unwrap();
        let out = screen.backend_mut().output();
        assert!(out.contains('┌'));
        assert!(out.contains('└'));
        assert!(out.contains(" Title "));
        assert!(out.contains("esc"));
    }

    #[test]
    fn label_pads_centered_and_full_line() {
        let mut screen = test_screen(20, 10);
        screen.backend_mut().clear_output();
        screen.label("ok", Some(8), 3, 2, None, true, false).unwrap();
        let out = screen.backend_mut().output();
        assert!(out.contains("   ok   "));

        screen.backend_mut().clear_output();
        // Full-line padding stretches to the screen width regardless of size.
        screen.label("ok", Some(4), 1, 3, None, false, true).unwrap();
        let out = screen.backend_mut().output();
        assert!(out.contains(&format!("ok{}", " ".repeat(18))));
    }

    #[test]
    fn pause_and_restore_round_trip() {
        let mut screen = test_screen(80, 24);
        let was_visible = screen.cursor_visible();
        let was_raw = screen.is_raw();

        screen.pause().unwrap();
        assert!(!screen.is_raw());
        assert!(screen.cursor_visible());

        screen.restore().unwrap();
        assert_eq!(screen.is_raw(), was_raw);
        assert_eq!(screen.cursor_visible(), was_visible);
    }

    #[test]
    fn clip_to_width_handles_wide_chars() {
        assert_eq!(clip_to_width("hello", 10), "hello");
        assert_eq!(clip_to_width("hello", 3), "hel");
        // CJK glyphs take two columns each.
        assert_eq!(clip_to_width("日本語", 4), "日本");
        assert_eq!(clip_to_width("日本語", 3), "日");
    }

    #[test]
    fn text_wrap_splits_on_words() {
        let wrapped = text_wrap("one two three four", 9);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert!(lines.iter().all(|line| line.trim_end().width() <= 9));
        assert!(lines.len() >= 2);
    }

    #[test]
    fn text_center_pads_both_sides() {
        assert_eq!(text_center("ab", 6), "  ab  ");
        assert_eq!(text_center("abc", 6), " abc  ");
        assert_eq!(text_center("abcdef", 4), "abcd");
    }

    #[test]
    fn text_col_max_finds_widest_line() {
        assert_eq!(text_col_max("a\nlonger\nmid"), 6);
        assert_eq!(text_col_max(""), 0);
    }
}
