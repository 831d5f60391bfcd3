use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use heartfall_config::Config;
use heartfall_core::{Surface, Viewport};
use heartfall_scene::ParticleScene;
use log::info;
use ratatui::{DefaultTerminal, Frame};

mod canvas;
mod cli;
mod logging;

use canvas::PixelCanvas;
use cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = cli.load_config()?;
    logging::init(&config.log)?;

    let terminal = ratatui::init();
    let result = run(terminal, config, cli.seed);
    ratatui::restore();
    result
}

fn run(terminal: DefaultTerminal, config: Config, seed: Option<u64>) -> color_eyre::Result<()> {
    let size = terminal.size()?;
    App::new(config, seed, size.width, size.height).run(terminal)
}

/// The main application which owns the scene and drives it frame by frame.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Is the scene frozen?
    paused: bool,
    /// Logical units per rendered pixel.
    pixel_scale: f32,
    /// Time between frames.
    frame_budget: Duration,
    scene: ParticleScene,
    canvas: PixelCanvas,
}

impl App {
    /// Construct a new instance of [`App`] for a terminal of `cols` x `rows`.
    pub fn new(config: Config, seed: Option<u64>, cols: u16, rows: u16) -> Self {
        let pixel_scale = config.display.pixel_scale;
        let viewport = Viewport::from_cells(cols, rows, pixel_scale);
        let scene = match seed {
            Some(seed) => ParticleScene::with_seed(viewport, config.scene, seed),
            None => ParticleScene::new(viewport, config.scene),
        };
        Self {
            running: false,
            paused: false,
            pixel_scale,
            frame_budget: Duration::from_secs(1) / config.display.fps.max(1),
            scene,
            canvas: PixelCanvas::new(viewport, pixel_scale),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        info!(
            "Starting with a {}x{} viewport, {:?} per frame",
            self.canvas.width(),
            self.canvas.height(),
            self.frame_budget
        );
        self.running = true;
        while self.running {
            let deadline = Instant::now() + self.frame_budget;
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(deadline)?;
        }
        Ok(())
    }

    /// Advance the scene one tick and present it.
    fn render(&mut self, frame: &mut Frame) {
        if !self.paused {
            self.scene.tick(&mut self.canvas);
        }
        frame.render_widget(&self.canvas, frame.area());
    }

    /// Reads the crossterm events until the next frame is due.
    fn handle_crossterm_events(&mut self, deadline: Instant) -> color_eyre::Result<()> {
        while self.running {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.resize(cols, rows),
                _ => {}
            }
            if timeout.is_zero() {
                break;
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            (_, KeyCode::Char('r')) => self.scene.init(),
            _ => {}
        }
    }

    /// Resize the canvas and rebuild the scene for the new terminal size.
    fn resize(&mut self, cols: u16, rows: u16) {
        let viewport = Viewport::from_cells(cols, rows, self.pixel_scale);
        info!("Resized to {cols}x{rows} cells");
        self.canvas.set_size(viewport.width, viewport.height);
        self.scene.resize(viewport);
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
