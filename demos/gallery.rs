//! Widget gallery: a small tour of the toolkit on a real terminal.
//!
//! Run with `cargo run --example gallery`.

use emberline::{
    run_external, Color, ColorPair, ConfirmBox, EditBox, Menu, MenuItem, MenuOptions, MenuOutcome,
    MessageBox, Screen,
};

fn main() -> emberline::Result<()> {
    let mut screen = Screen::new()?;
    screen.set_colors(ColorPair::new(Color::White, Color::Black));

    loop {
        let mut menu = Menu::new(vec![
            MenuItem::label("Message box"),
            MenuItem::label("Confirm box"),
            MenuItem::label("Edit box"),
            MenuItem::label("External command"),
            MenuItem::label("Quit"),
        ])
        .color(ColorPair::new(Color::White, Color::Blue));

        let opts = MenuOptions {
            x: 4,
            y: 2,
            caption: Some("emberline gallery"),
            footer: Some("enter: pick | esc: quit"),
            lines: Some(9),
            item_width: Some(30),
            ..MenuOptions::default()
        };

        screen.clear()?;
        match menu.display(&mut screen, &opts)? {
            MenuOutcome::Selected(0) => {
                MessageBox::new("Hello from the canvas.\nAny key closes this box.")
                    .title("Message")
                    .footer("any key")
                    .show(&mut screen)?;
            }
            MenuOutcome::Selected(1) => {
                let choice = ConfirmBox::new("Proceed with the demo?")
                    .title("Confirm")
                    .buttons(vec!["Yes", "No"])
                    .selected(1)
                    .show(&mut screen)?;
                let text = if choice == 0 { "You picked Yes" } else { "You picked No" };
                MessageBox::new(text).show(&mut screen)?;
            }
            MenuOutcome::Selected(2) => {
                let value = EditBox::new("edit me")
                    .title("Edit")
                    .footer("enter: save | esc: cancel")
                    .size(60)
                    .show(&mut screen)?;
                let text = match value {
                    Some(v) => format!("Committed: {v:?}"),
                    None => "Aborted, no value".to_string(),
                };
                MessageBox::new(&text).show(&mut screen)?;
            }
            MenuOutcome::Selected(3) => {
                run_external(&mut screen, "ls -la | head -20 && echo && echo press enter && read _")?;
            }
            _ => break,
        }
    }
    Ok(())
}
