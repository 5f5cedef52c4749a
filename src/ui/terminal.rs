//! Crossterm host for the game loop.

use super::scene::render_runner_scene;
use super::viewport::Viewport;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use trex_run::core::{MonotonicClock, Platform, TickLimiter};
use trex_run::runner::{InputEvent, Key, RenderFrame};

pub struct TerminalPlatform {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    world: (f64, f64),
    /// Play field of the last drawn frame; `None` until something is drawn.
    viewport: Option<Viewport>,
    limiter: TickLimiter,
    clock: MonotonicClock,
}

impl TerminalPlatform {
    /// Switch the terminal into raw, alternate-screen mode with mouse capture.
    pub fn enter(world: (f64, f64), ticks_per_second: u32) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            world,
            viewport: None,
            limiter: TickLimiter::new(ticks_per_second),
            clock: MonotonicClock::new(),
        })
    }

    /// Give the terminal back to the shell.
    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        self.terminal.backend_mut().execute(DisableMouseCapture)?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    fn translate(&self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(translate_key(key)),
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let (x, y) = self.viewport?.to_world(mouse.column, mouse.row)?;
                Some(InputEvent::PointerDown { x, y })
            }
            _ => None,
        }
    }
}

fn translate_key(key: KeyEvent) -> InputEvent {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputEvent::Quit;
    }
    let key = match key.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Up => Key::Up,
        KeyCode::Esc => Key::Esc,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    };
    InputEvent::KeyDown(key)
}

impl Platform for TerminalPlatform {
    fn poll_events(&mut self) -> io::Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(translated) = self.translate(event::read()?) {
                events.push(translated);
            }
        }
        Ok(events)
    }

    fn present(&mut self, frame: &RenderFrame) -> io::Result<()> {
        let world = self.world;
        let mut viewport = None;
        self.terminal.draw(|f| {
            viewport = render_runner_scene(f, f.size(), frame, world);
        })?;
        self.viewport = viewport;
        Ok(())
    }

    fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    fn sleep_until_next_tick(&mut self) {
        self.limiter.wait();
    }
}
