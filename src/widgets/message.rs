//! Message box: a single-shot bordered message.

use crate::backend::Backend;
use crate::color::ColorPair;
use crate::error::Result;
use crate::screen::Screen;

use super::dialog_geometry;

/// A modal message with optional title and footer.
///
/// Sizing defaults to the minimum bounding box around the message, centered
/// on screen; explicit dimensions and position win. Unless told otherwise,
/// `show` blocks for a single keypress before returning.
pub struct MessageBox<'a> {
    message: &'a str,
    title: Option<&'a str>,
    footer: Option<&'a str>,
    width: Option<u16>,
    height: Option<u16>,
    x: Option<u16>,
    y: Option<u16>,
    color: Option<ColorPair>,
    wait_key: bool,
}

impl<'a> MessageBox<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            title: None,
            footer: None,
            width: None,
            height: None,
            x: None,
            y: None,
            color: None,
            wait_key: true,
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

    /// Whether to block for a keypress after drawing (default true).
    pub fn wait_key(mut self, wait: bool) -> Self {
        self.wait_key = wait;
        self
    }

    /// Draw the box and, unless disabled, wait for one keypress.
    pub fn show<B: Backend>(&self, screen: &mut Screen<B>) -> Result<()> {
        let (x, y, width, height) = dialog_geometry(
            self.message,
            2,
            0,
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

        if self.wait_key {
            screen.key_press()?;
        }
        Ok(())
    }
}
