//! Console runner for the Escape adventure
//!
//! Reads one command per line from stdin, runs one frame per command and
//! prints the text fields. With a font the overlay is also rendered into an
//! in-memory frame that can be written out with `--frame`.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{value_parser, Arg, Command};
use escape::{GameConfig, GameResult, PlayMode};
use escape_engine::foundation::logging;
use escape_engine::prelude::*;

type ConsoleMode = PlayMode<RustybuzzShaper, FontdueRasterizer>;

/// What a line of input asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Key(KeyCode),
    Quit,
}

fn parse_input(line: &str) -> Option<Input> {
    match line.trim().to_ascii_lowercase().as_str() {
        "l" | "left" => Some(Input::Key(KeyCode::Left)),
        "r" | "right" => Some(Input::Key(KeyCode::Right)),
        "reset" => Some(Input::Key(KeyCode::R)),
        "q" | "quit" => Some(Input::Quit),
        _ => None,
    }
}

fn load_text(path: &Path, size_px: f32, color: Vec3) -> GameResult<TextRenderer<RustybuzzShaper, FontdueRasterizer>> {
    let font_data = std::fs::read(path)?;
    let rasterizer = FontdueRasterizer::new(&font_data, size_px)?;
    let shaper = RustybuzzShaper::new(font_data, size_px)?;
    log::info!("Loaded font {} at {}px", path.display(), size_px);
    Ok(TextRenderer::new(shaper, rasterizer, color))
}

fn print_fields(mode: &ConsoleMode) {
    let [message, left, right, result] = mode.state().ui_text();
    println!();
    if !message.is_empty() {
        println!("{}", message);
    }
    if !left.is_empty() {
        println!("  [l] {}", left);
    }
    if !right.is_empty() {
        println!("  [r] {}", right);
    }
    println!("{}", result);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let matches = Command::new("escape")
        .about("A small text adventure: escape the prison")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Game configuration (.toml or .ron)"),
        )
        .arg(
            Arg::new("font")
                .short('f')
                .long("font")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Font used for the text overlay (overrides the config)"),
        )
        .arg(
            Arg::new("frame")
                .long("frame")
                .value_name("PNG")
                .value_parser(value_parser!(PathBuf))
                .help("Write the last rendered frame to this file on exit"),
        )
        .get_matches();

    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::with_default_scene(),
    };

    let font_path = matches
        .get_one::<PathBuf>("font")
        .cloned()
        .or_else(|| config.text.font_path.clone());
    let text = font_path
        .map(|path| load_text(&path, config.text.font_size, config.text.color()))
        .transpose()?;

    let viewport = Viewport::new(config.window.width, config.window.height);
    let mut surface = SoftwareSurface::new(viewport);
    let mut mode: ConsoleMode = PlayMode::new(&config, text)?;
    let mut clock = FrameClock::new();

    println!("Commands: l/left, r/right, reset, q/quit");
    mode.draw(&mut surface, viewport)?;
    print_fields(&mode);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let key = match parse_input(&line) {
            Some(Input::Key(key)) => key,
            Some(Input::Quit) => break,
            None => {
                if !line.trim().is_empty() {
                    println!("Unknown command '{}'", line.trim());
                }
                continue;
            }
        };

        let elapsed = clock.tick();
        mode.handle_event(&AppEvent::KeyPressed(key));
        mode.update(elapsed);
        mode.draw(&mut surface, viewport)?;
        print_fields(&mode);
        io::stdout().flush()?;
    }

    log::info!(
        "Session over after {} frames ({:.1}s)",
        clock.frames(),
        clock.total()
    );

    if let Some(path) = matches.get_one::<PathBuf>("frame") {
        if mode.text().is_none() {
            log::warn!("No font loaded, the saved frame has no text");
        }
        surface.save(path)?;
    }

    Ok(())
}
