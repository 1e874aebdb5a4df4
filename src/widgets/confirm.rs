//! Confirm box: a message with a row of selectable buttons.

use unicode_width::UnicodeWidthStr;

use crate::backend::Backend;
use crate::color::ColorPair;
use crate::error::Result;
use crate::key::Key;
use crate::screen::Screen;

use super::dialog_geometry;

/// A modal question with buttons, returning the chosen button index.
///
/// LEFT/RIGHT move the highlight circularly, ENTER picks. There is no
/// Escape handling here on purpose: callers that want cancel semantics add
/// a Cancel button. Ctrl-C returns the currently highlighted index.
pub struct ConfirmBox<'a> {
    message: &'a str,
    title: Option<&'a str>,
    footer: Option<&'a str>,
    buttons: Vec<&'a str>,
    selected: usize,
    width: Option<u16>,
    height: Option<u16>,
    x: Option<u16>,
    y: Option<u16>,
    color: Option<ColorPair>,
}

impl<'a> ConfirmBox<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            title: None,
            footer: None,
            buttons: vec!["OK", "Cancel"],
            selected: 0,
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

    /// Replace the default `OK` / `Cancel` buttons.
    pub fn buttons(mut self, buttons: Vec<&'a str>) -> Self {
        if !buttons.is_empty() {
            self.buttons = buttons;
        }
        self
    }

    /// Initially highlighted button (clamped to the button count).
    pub fn selected(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    pub fn size(mut self, width: u16, height: u16) -> Self {
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

    /// Run the interaction; resolves to the index of the chosen button.
    pub fn show<B: Backend>(&self, screen: &mut Screen<B>) -> Result<usize> {
        // Each button renders as "<label> " with one trailing gap.
        let buttons_width: usize = self.buttons.iter().map(|b| b.width() + 3).sum();

        let (x, y, width, height) = dialog_geometry(
            self.message,
            3,
            buttons_width,
            self.width,
            self.height,
            self.x,
            self.y,
            screen.cols(),
            screen.rows(),
        );

        screen.box_(self.title, self.footer, x, y, width, height, self.color)?;
        for (row, line) in self.message.lines().enumerate() {
            screen.text(line, x + 2, y + 1 + row as u16, self.color)?;
        }

        let mut selected = self.selected.min(self.buttons.len() - 1);
        let buttons_x = (x + width).saturating_sub(buttons_width as u16);
        let buttons_y = y + height - 2;

        loop {
            let mut pos = 0u16;
            for (index, button) in self.buttons.iter().enumerate() {
                let pair = if index == selected {
                    screen.color_reversed(self.color)
                } else {
                    screen.color(self.color)
                };
                screen.text(&format!("<{button}>"), buttons_x + pos, buttons_y, Some(pair))?;
                pos += button.width() as u16 + 3;
            }

            match screen.key()? {
                Key::Enter => return Ok(selected),
                Key::Left => {
                    selected = if selected > 0 {
                        selected - 1
                    } else {
                        self.buttons.len() - 1
                    };
                }
                Key::Right => {
                    selected = if selected + 1 < self.buttons.len() {
                        selected + 1
                    } else {
                        0
                    };
                }
                // Keyboard interrupt: abort with the current highlight.
                Key::Ctrl('c') => return Ok(selected),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TestBackend;
    use crate::key::KeyMap;

    fn test_screen() -> Screen<TestBackend> {
        Screen::with_backend(TestBackend::new(80, 24), KeyMap::default()).unwrap()
    }

    #[test]
    fn enter_returns_initial_highlight() {
        let mut screen = test_screen();
        screen.backend_mut().feed(b"\r");
        let choice = ConfirmBox::new("sure?")
            .buttons(vec!["Yes", "No"])
            .selected(1)
            .show(&mut screen)
            .unwrap();
        assert_eq!(choice, 1);
    }

    #[test]
    fn left_then_enter_moves_highlight() {
        let mut screen = test_screen();
        screen.backend_mut().feed(b"\x1b[D\r");
        let choice = ConfirmBox::new("sure?")
            .buttons(vec!["Yes", "No"])
            .selected(1)
            .show(&mut screen)
            .unwrap();
        assert_eq!(choice, 0);
    }

    #[test]
    fn highlight_wraps_circularly() {
        let mut screen = test_screen();
        // RIGHT from the last button wraps to the first.
        screen.backend_mut().feed(b"\x1b[C\r");
        let choice = ConfirmBox::new("sure?")
            .buttons(vec!["Yes", "No"])
            .selected(1)
            .show(&mut screen)
            .unwrap();
        assert_eq!(choice, 0);

        // LEFT from the first button wraps to the last.
        let mut screen = test_screen();
        screen.backend_mut().feed(b"\x1b[D\r");
        let choice = ConfirmBox::new("sure?")
            .buttons(vec!["Yes", "No"])
            .show(&mut screen)
            .unwrap();
        assert_eq!(choice, 1);
    }

    #[test]
    fn escape_is_not_a_cancel_here() {
        let mut screen = test_screen();
        // Escape is ignored; the following ENTER resolves.
        screen.backend_mut().feed(b"\x1b\r");
        let choice = ConfirmBox::new("sure?").show(&mut screen).unwrap();
        assert_eq!(choice, 0);
    }

    #[test]
    fn degenerate_explicit_height_still_resolves() {
        let mut screen = test_screen();
        screen.backend_mut().feed(b"\r");
        // Height 0 is clamped to the border minimum instead of
        // underflowing the button-row arithmetic.
        let choice = ConfirmBox::new("m")
            .size(10, 0)
            .at(3, 1)
            .show(&mut screen)
            .unwrap();
        assert_eq!(choice, 0);
    }

    #[test]
    fn buttons_are_rendered() {
        let mut screen = test_screen();
        screen.backend_mut().feed(b"\r");
        ConfirmBox::new("remove item?")
            .buttons(vec!["Yes", "No"])
            .show(&mut screen)
            .unwrap();
        let out = screen.backend_mut().output();
        assert!(out.contains("<Yes>"));
        assert!(out.contains("<No>"));
    }
}
