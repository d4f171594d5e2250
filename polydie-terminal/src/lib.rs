/// Terminal viewer for numbered dice, wireframe solids, OBJ models and a
/// small orrery
use anyhow::{bail, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::Color,
    terminal::{self},
};
use polydie_core::{LabelCache, RotationState, Solid};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

pub mod config;
pub mod renderer;
pub mod scene;

pub use config::ViewerConfig;
pub use renderer::AsciiRenderer;
pub use scene::{LoadedModel, Scene, SceneKind};

const HELP: &str = "Tab scene | WASD/Arrows rotate | E/R roll | Space pause | Q quit";

/// Main application struct for terminal rendering
pub struct TerminalApp {
    config: ViewerConfig,
    scene: Scene,
    model: Option<LoadedModel>,
    solid: Solid,
    rotation: RotationState,
    cache: LabelCache,
    renderer: AsciiRenderer,
    running: bool,
    paused: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Sizes the frame to the current terminal
    pub fn new(kind: SceneKind, model: Option<LoadedModel>, config: ViewerConfig) -> Result<Self> {
        let (width, height) = terminal::size()?;
        Self::with_size(kind, model, config, width as usize, height as usize)
    }

    pub fn with_size(
        kind: SceneKind,
        model: Option<LoadedModel>,
        config: ViewerConfig,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        let solid = Solid::Cube;
        let Some(scene) = Scene::build(kind, solid, model.as_ref(), &config) else {
            bail!("the {} scene needs an OBJ file", kind.name());
        };

        Ok(Self {
            config,
            scene,
            model,
            solid,
            rotation: RotationState::zero(),
            cache: LabelCache::new(),
            renderer: AsciiRenderer::new(width, height),
            running: true,
            paused: false,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_millis(self.config.frame_millis());
        let dt = target_frame_time.as_secs_f32();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            // Update
            self.update(dt);

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                self.handle_key(code)
            }
            Event::Resize(width, height) => {
                log::debug!("terminal resized to {width}x{height}");
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
            }
            _ => {}
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        let step = self.config.rotation_step;
        let tilt_step = self.config.orrery_tilt_step;
        match code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => {
                self.running = false;
            }
            KeyCode::Tab => self.next_scene(),
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
            }
            KeyCode::Char(c @ '1'..='5') => {
                if let Some(solid) = c.to_digit(10).and_then(Solid::from_digit) {
                    self.select_solid(solid);
                }
            }
            // Up and Down tilt the orrery instead of rotating it
            KeyCode::Up => {
                if !self.scene.tilt_by(tilt_step) {
                    self.rotation.rotate(step, 0.0, 0.0);
                }
            }
            KeyCode::Down => {
                if !self.scene.tilt_by(-tilt_step) {
                    self.rotation.rotate(-step, 0.0, 0.0);
                }
            }
            KeyCode::Char('w') => {
                self.rotation.rotate(step, 0.0, 0.0);
            }
            KeyCode::Char('s') => {
                self.rotation.rotate(-step, 0.0, 0.0);
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.rotation.rotate(0.0, -step, 0.0);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.rotation.rotate(0.0, step, 0.0);
            }
            KeyCode::Char('e') => {
                self.rotation.rotate(0.0, 0.0, step);
            }
            KeyCode::Char('r') => {
                self.rotation.rotate(0.0, 0.0, -step);
            }
            _ => {}
        }
    }

    fn next_scene(&mut self) {
        let kind = self.scene.kind().next(self.model.is_some());
        if let Some(scene) = Scene::build(kind, self.solid, self.model.as_ref(), &self.config) {
            log::info!("switching to the {} scene", kind.name());
            self.scene = scene;
            self.rotation = RotationState::zero();
        }
    }

    fn select_solid(&mut self, solid: Solid) {
        if self.scene.solid().is_some() {
            log::debug!("selected {solid}");
            self.solid = solid;
            self.scene.select_solid(solid);
        }
    }

    fn update(&mut self, dt: f32) {
        if !self.paused {
            self.scene.update(dt, &self.config);
        }
    }

    /// Draws the current scene and status bar into the frame buffer
    pub fn render_frame(&mut self) -> Result<()> {
        self.renderer.clear();
        self.scene.render(
            &mut self.renderer,
            &self.rotation,
            &mut self.cache,
            &self.config,
        )?;

        let pause = if self.paused { " | paused" } else { "" };
        let status = format!("{} | FPS: {:.1}{pause}", self.scene.status(), self.fps);
        self.renderer.overlay_text(0, 0, &status, Color::Yellow);
        let last_row = self.renderer.height().saturating_sub(1);
        self.renderer.overlay_text(0, last_row, HELP, Color::DarkGrey);
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        self.render_frame()?;

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;
        stdout.flush()?;
        Ok(())
    }
}
