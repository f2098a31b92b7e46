mod cli;
mod events;
mod ui;

use std::fs::{self, File};
use std::io::stdout;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{OptionExt, WrapErr};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind},
    execute,
};
use ratatui::{DefaultTerminal, Frame};
use tinsel_config::Config;
use tinsel_core::SceneKind;
use tinsel_scene::{
    AssetStore, Clock, FrameScheduler, InputEvent, InputHandler, Scene, SceneSettings,
    SystemClock, Viewport, spawn_loader, time_seed,
};

use crate::cli::Args;
use crate::events::{Action, MouseTracker, key_action};

/// File name of the log inside the data directory.
const LOG_FILE: &str = "tinsel.log";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging()?;

    let mut config = Config::load(args.config.as_deref())?;
    args.apply(&mut config);
    config.validate()?;

    if args.write_config {
        let path = match args.config.clone() {
            Some(path) => path,
            None => Config::default_path().ok_or_eyre("no config directory available")?,
        };
        config.save(&path)?;
        println!("wrote {}", path.display());
        return Ok(());
    }

    let terminal = ratatui::init();
    execute!(stdout(), EnableMouseCapture)?;
    let result = App::new(config).run(terminal);
    execute!(stdout(), DisableMouseCapture)?;
    ratatui::restore();
    result
}

/// Send log output to a file so it does not draw over the scene.
fn init_logging() -> color_eyre::Result<()> {
    let Some(dir) = tinsel_config::log_dir() else {
        return Ok(());
    };
    fs::create_dir_all(&dir).wrap_err_with(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file =
        File::create(&path).wrap_err_with(|| format!("failed to create {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

/// Scene settings drawn from the config.
fn scene_settings(config: &Config) -> SceneSettings {
    let messages = |kind: SceneKind| -> Vec<String> {
        config
            .photos
            .entries(kind)
            .into_iter()
            .map(|entry| entry.message)
            .collect()
    };
    SceneSettings {
        particles: config.drift.particles,
        stars: config.orbit.stars,
        sprite_slots: config.orbit.sprite_slots,
        photo_chance: config.orbit.photo_chance,
        captions: config.orbit.captions,
        center_z: config.orbit.center_z,
        caption_text: config.caption.text.clone(),
        caption_colors: config.caption.colors.clone(),
        drift_messages: messages(SceneKind::Drift),
        orbit_messages: messages(SceneKind::Orbit),
        message_duration: Duration::from_millis(config.message_duration_ms),
    }
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Decoded photos, filled in by the loader thread.
    assets: AssetStore,
    input: InputHandler,
    mouse: MouseTracker,
    scheduler: FrameScheduler<SystemClock>,
}

impl App {
    /// Construct a new instance of [`App`] and start loading photos.
    pub fn new(config: Config) -> Self {
        let files: Vec<_> = config
            .photos
            .entries(config.scene)
            .into_iter()
            .map(|entry| entry.file)
            .collect();
        let assets = AssetStore::new(files.len());
        log::info!("loading {} photos from {}", files.len(), config.photos.directory.display());
        spawn_loader(files, assets.clone());

        Self {
            running: false,
            mouse: MouseTracker::new(config.cell.width, config.cell.height),
            scheduler: FrameScheduler::new(SystemClock::new(), config.frame_rate),
            input: InputHandler::new(),
            assets,
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        let seed = self.config.seed.unwrap_or_else(time_seed);
        log::info!("starting {} scene with seed {seed}", self.config.scene.label());
        let mut scene = Scene::new(
            self.config.scene,
            scene_settings(&self.config),
            self.viewport(size.width, size.height),
            self.config.theme,
            seed,
        );

        self.running = true;
        while self.running {
            if self.scheduler.poll() {
                scene.tick();
                terminal.draw(|frame| self.render(frame, &mut scene))?;
            }
            self.handle_crossterm_events(&mut scene)?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame, scene: &mut Scene) {
        let area = frame.area();
        scene.resize(self.viewport(area.width, area.height));
        let now = self.scheduler.clock().now();
        let toggle = ui::render(frame, scene, &self.assets, &self.config.cell, now);
        self.input.set_toggle(Some(toggle));
    }

    /// Reads the crossterm events until the next frame is due.
    fn handle_crossterm_events(&mut self, scene: &mut Scene) -> color_eyre::Result<()> {
        let timeout = self.scheduler.time_until_next().max(Duration::from_millis(1));
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key, scene),
                Event::Mouse(mouse) => {
                    for input in self.mouse.translate(mouse) {
                        self.on_input(&input, scene);
                    }
                }
                Event::Resize(width, height) => scene.resize(self.viewport(width, height)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, scene: &mut Scene) {
        match key_action(key) {
            Some(Action::Quit) => self.quit(),
            Some(Action::SwitchScene) => scene.switch(scene.kind().next()),
            Some(Action::Reseed) => scene.reseed(time_seed()),
            Some(Action::Input(input)) => self.on_input(&input, scene),
            None => {}
        }
    }

    fn on_input(&mut self, input: &InputEvent, scene: &mut Scene) {
        let now = self.scheduler.clock().now();
        let reaction = self.input.handle(input, scene, &self.assets, now);
        log::trace!("{input:?} -> {reaction:?}");
    }

    /// Scene size for a terminal of `cols` x `rows` cells.
    fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            cols as f32 * self.config.cell.width,
            rows as f32 * self.config.cell.height,
        )
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
