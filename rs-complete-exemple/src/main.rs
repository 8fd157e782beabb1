use std::path::Path;
use std::time::{Duration, Instant};

use log::info;
use rs_complete_core::config::EngineConfig;
use rs_complete_core::session::{InputSurface, Key, KeyPress, Session};
use rs_complete_core::store::FileStore;

/// Text surface backed by a plain string, echoing every change.
struct ConsoleSurface {
    value: String,
}

impl InputSurface for ConsoleSurface {
    fn id(&self) -> &str {
        "console"
    }

    fn text(&self) -> String {
        self.value.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.value = text.to_owned();
    }

    fn move_caret_to_end(&mut self) {
        println!("> {}|", self.value);
    }
}

type App = Session<FileStore, ConsoleSurface>;

/// Types `text` one character at a time, as a user would.
fn type_text(app: &mut App, text: &str, now: Instant) {
    for c in text.chars() {
        if let Some(surface) = app.surface_mut() {
            surface.value.push(c);
        }
        app.on_input(now);
    }
}

/// Prints the indicator, if visible.
fn show_indicator(app: &App) {
    match app.indicator().and_then(|i| i.text()) {
        Some(text) => println!("  [{}]", text),
        None => println!("  [no suggestion]"),
    }
}

/// Submits the current text and clears the surface, like a chat box does.
fn press_enter(app: &mut App, now: Instant) {
    app.on_key(KeyPress::new(Key::Enter), now);
    if let Some(surface) = app.surface_mut() {
        surface.set_text("");
    }
    app.on_input(now);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Optional configuration, defaults otherwise
    let config_path = Path::new("./data/complete.toml");
    let config = if config_path.exists() {
        EngineConfig::load(config_path)?
    } else {
        EngineConfig::default()
    };

    // History is stored in ./data/<store_key>.bin
    let store = FileStore::new("./data")?;
    let mut app: App = Session::new(config, store)?;
    app.load();
    info!("{} previous prompts loaded", app.corpus().len());

    app.attach(ConsoleSurface { value: String::new() });
    let mut now = Instant::now();

    // Teach the model a few prompts
    for prompt in [
        "explain the borrow checker in simple terms",
        "explain the difference between traits and generics",
        "write a unit test for the parser",
        "write a unit test for the tokenizer",
    ] {
        type_text(&mut app, prompt, now);
        press_enter(&mut app, now);
    }
    // Writes complete
    println!("Saved {} prompts", app.flush_pending());

    // Type a partial prompt and accept suggestions with Tab
    type_text(&mut app, "write a", now);
    show_indicator(&app);
    for _ in 0..4 {
        app.on_key(KeyPress::new(Key::Tab), now);
        show_indicator(&app);
    }

    // Walk through history and come back to the draft
    app.on_key(KeyPress::new(Key::ArrowUp), now);
    app.on_key(KeyPress::new(Key::ArrowUp), now);
    app.on_key(KeyPress::new(Key::ArrowDown), now);
    app.on_key(KeyPress::new(Key::ArrowDown), now);

    // Unknown context: the indicator fades out after the delay
    if let Some(surface) = app.surface_mut() {
        surface.set_text("");
    }
    type_text(&mut app, "zzz", now);
    show_indicator(&app);
    now += Duration::from_millis(app.config().hide_delay_ms);
    app.tick(now);
    show_indicator(&app);

    for (index, prompt) in app.corpus().entries().iter().enumerate() {
        println!("{}: {}", index, prompt);
    }

    Ok(())
}
