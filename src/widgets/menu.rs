//! Scrollable list widget with a selection cursor.
//!
//! The menu owns its own event loop: it redraws its window, reads one key,
//! applies the transition and redraws, until ENTER, ESCAPE or a registered
//! passthrough key terminates it. Scrolling moves the window one line at a
//! time, never paging.

use unicode_width::UnicodeWidthStr;

use crate::backend::Backend;
use crate::color::ColorPair;
use crate::error::Result;
use crate::key::Key;
use crate::screen::{clip_to_width, Screen};

// =============================================================================
// MenuItem
// =============================================================================

/// An entry of a menu: a display label plus optional opaque data the caller
/// interprets on selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    /// Just a label.
    Label(String),
    /// A label carrying one associated value.
    Pair { label: String, value: String },
    /// A label with an identifier and any further columns.
    Entry {
        label: String,
        id: String,
        extra: Vec<String>,
    },
}

impl MenuItem {
    pub fn label(text: impl Into<String>) -> Self {
        MenuItem::Label(text.into())
    }

    pub fn pair(label: impl Into<String>, value: impl Into<String>) -> Self {
        MenuItem::Pair {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn entry(label: impl Into<String>, id: impl Into<String>, extra: Vec<String>) -> Self {
        MenuItem::Entry {
            label: label.into(),
            id: id.into(),
            extra,
        }
    }

    /// The uniform display-text extraction rule.
    pub fn display(&self) -> &str {
        match self {
            MenuItem::Label(label) => label,
            MenuItem::Pair { label, .. } => label,
            MenuItem::Entry { label, .. } => label,
        }
    }

    /// The associated value, when the item carries one.
    pub fn value(&self) -> Option<&str> {
        match self {
            MenuItem::Label(_) => None,
            MenuItem::Pair { value, .. } => Some(value),
            MenuItem::Entry { id, .. } => Some(id),
        }
    }
}

// =============================================================================
// Outcome / options
// =============================================================================

/// How a menu interaction ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    /// ENTER on the item at this index.
    Selected(usize),
    /// ESCAPE (or keyboard interrupt), nothing chosen.
    Cancelled,
    /// A caller-registered passthrough key; the index points into the
    /// passthrough list, letting the caller e.g. switch tabs without the
    /// menu knowing about tabs.
    Passthrough(usize),
}

/// Display options for one menu interaction.
pub struct MenuOptions<'a> {
    pub x: u16,
    pub y: u16,
    /// Initial selection (and scroll start).
    pub first_item: usize,
    /// Draw a border with this caption; the item window shrinks inside it.
    pub caption: Option<&'a str>,
    pub footer: Option<&'a str>,
    /// Visible line count; defaults to the item count clamped to the screen.
    pub lines: Option<u16>,
    /// Fixed row width; defaults to the widest label.
    pub item_width: Option<u16>,
    /// Keys that terminate the menu and are reported back to the caller.
    pub passthrough: Vec<Key>,
}

impl Default for MenuOptions<'_> {
    fn default() -> Self {
        Self {
            x: 1,
            y: 1,
            first_item: 0,
            caption: None,
            footer: None,
            lines: None,
            item_width: None,
            passthrough: Vec::new(),
        }
    }
}

// =============================================================================
// Selection state
// =============================================================================

/// Pure selection/scroll arithmetic, kept separate from drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub selected: usize,
    pub first_visible: usize,
}

impl MenuState {
    pub fn new(selected: usize) -> Self {
        Self {
            selected,
            first_visible: selected,
        }
    }

    /// Move the selection by `delta`, clamped to [0, len-1]. No wraparound.
    pub fn navigate(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, len as isize - 1) as usize;
    }

    pub fn home(&mut self) {
        self.selected = 0;
    }

    /// Jump to the last item, snapping the window so it lands on the
    /// bottom visible row.
    pub fn end(&mut self, len: usize, lines: usize) {
        if len == 0 {
            return;
        }
        self.selected = len - 1;
        self.first_visible = self.selected.saturating_sub(lines);
    }

    /// Re-establish the scroll-window invariant before a redraw: snap up to
    /// the selection, or advance exactly one line downward.
    pub fn adjust_scroll(&mut self, lines: usize) {
        if self.first_visible > self.selected {
            self.first_visible = self.selected;
        }
        if self.first_visible + lines <= self.selected {
            self.first_visible += 1;
        }
    }
}

// =============================================================================
// Menu
// =============================================================================

/// The stateful scrollable list.
pub struct Menu {
    items: Vec<MenuItem>,
    color: Option<ColorPair>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items, color: None }
    }

    pub fn color(mut self, color: ColorPair) -> Self {
        self.color = Some(color);
        self
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn item_add(&mut self, item: MenuItem) {
        self.items.push(item);
    }

    fn widest_label(&self) -> usize {
        self.items
            .iter()
            .map(|item| item.display().width())
            .max()
            .unwrap_or(0)
    }

    /// Run the interaction. An empty item list resolves to `Cancelled`
    /// without reading any key.
    pub fn display<B: Backend>(
        &mut self,
        screen: &mut Screen<B>,
        opts: &MenuOptions<'_>,
    ) -> Result<MenuOutcome> {
        if self.items.is_empty() {
            return Ok(MenuOutcome::Cancelled);
        }

        let mut x = opts.x.max(1);
        let mut y = opts.y.max(1);
        let mut item_width = opts.item_width.unwrap_or_else(|| {
            let w = self.widest_label();
            (if opts.caption.is_some() { w + 2 } else { w }) as u16
        });

        let max_lines = screen.rows().saturating_sub(y).max(1);
        let mut lines = match opts.lines {
            Some(lines) => lines.min(max_lines),
            None => {
                let wanted = self.items.len() as u16
                    + if opts.caption.is_some() { 2 } else { 0 };
                wanted.min(max_lines)
            }
        };

        // Boxed mode: the border eats one cell on each side.
        if opts.caption.is_some() {
            screen.box_(opts.caption, opts.footer, x, y, item_width, lines, self.color)?;
            item_width = item_width.saturating_sub(2);
            lines = lines.saturating_sub(2);
            x += 1;
            y += 1;
        }
        let lines = lines.max(1) as usize;

        let mut state = MenuState::new(opts.first_item.min(self.items.len() - 1));

        loop {
            state.adjust_scroll(lines);
            self.draw_items(screen, x, y, lines, item_width as usize, state)?;

            match screen.key()? {
                Key::Enter => return Ok(MenuOutcome::Selected(state.selected)),
                Key::Escape | Key::Ctrl('c') => return Ok(MenuOutcome::Cancelled),
                Key::Up => state.navigate(-1, self.items.len()),
                Key::Down => state.navigate(1, self.items.len()),
                Key::Home => state.home(),
                Key::End => state.end(self.items.len(), lines),
                key => {
                    if let Some(index) = opts.passthrough.iter().position(|p| *p == key) {
                        return Ok(MenuOutcome::Passthrough(index));
                    }
                    // Unrecognized keys are a no-op.
                }
            }
        }
    }

    /// Paint the visible window: fixed-width rows, selection reversed,
    /// filler rows blanked so stale content from a longer list is erased.
    fn draw_items<B: Backend>(
        &self,
        screen: &mut Screen<B>,
        x: u16,
        y: u16,
        lines: usize,
        item_width: usize,
        state: MenuState,
    ) -> Result<()> {
        for row in 0..lines {
            let index = state.first_visible + row;
            if index < self.items.len() {
                let label = clip_to_width(self.items[index].display(), item_width);
                let padded = format!("{:<width$}", label, width = item_width);
                let pair = if index == state.selected {
                    screen.color_reversed(self.color)
                } else {
                    screen.color(self.color)
                };
                screen.text(&padded, x, y + row as u16, Some(pair))?;
            } else {
                screen.text(&" ".repeat(item_width), x, y + row as u16, self.color)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
