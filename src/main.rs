use std::{io, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyEventKind,
    },
    execute,
};
use paneldock::{App, ViewPrefs, config_paths, logging, ui};

fn main() -> Result<()> {
    // Logging must be up before the terminal goes into raw mode.
    logging::init();
    tracing::info!("starting paneldock");

    let prefs_path = config_paths::prefs_file();
    let prefs = ViewPrefs::load(prefs_path.as_deref());
    let mut app = App::new(prefs, prefs_path);

    let mut terminal = ratatui::init();
    let result = match execute!(io::stdout(), EnableMouseCapture, EnableFocusChange) {
        Ok(()) => run(&mut terminal, &mut app),
        Err(err) => Err(err.into()),
    };

    app.dispose();
    let _ = execute!(io::stdout(), DisableMouseCapture, DisableFocusChange);
    ratatui::restore();
    result
}

fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        // Deferred work (registry rebuilds) runs between draws, never inside one.
        app.tick();
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        break Ok(());
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::FocusGained => app.on_host_focus_gained(),
                Event::FocusLost => app.on_host_focus_lost(),
                _ => {}
            }
        }
    }
}
