//! Headless driver: loads config and the saved scene (or seeds a demo
//! scene), then runs a short scripted session against the index worker.
//! Edits to the settings file during the session are picked up.

use anyhow::{Context, Result};
use arrowboard::constants::DEMO_BOX_COUNT;
use arrowboard::persistence::SceneDatabase;
use arrowboard::seed::{Linking, SeedArea, seed_scene};
use arrowboard::settings::{ConfigWatcher, EditorConfig, default_settings_path};
use arrowboard::types::{Alignment, Point, Rect};
use arrowboard::{Editor, Event, Scene, logging};
use tracing::{info, warn};

fn main() -> Result<()> {
    let settings_path = default_settings_path();
    let config = settings_path
        .as_deref()
        .map(EditorConfig::load_or_default)
        .unwrap_or_default();
    logging::init(Some(config.log_filter.as_str()));
    let mut watcher = settings_path.and_then(|path| match ConfigWatcher::new(path) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!(error = %e, "settings hot reload unavailable");
            None
        }
    });

    let database = match &config.database_path {
        Some(path) => SceneDatabase::at(path),
        None => SceneDatabase::open_default().context("no data directory for the scene database")?,
    };
    let snapshot = match database.load() {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => seed_scene(&mut rand::thread_rng(), DEMO_BOX_COUNT, SeedArea::DEMO, Linking::Chain),
        Err(e) => {
            warn!(error = %e, "saved scene unreadable, seeding a new one");
            seed_scene(&mut rand::thread_rng(), DEMO_BOX_COUNT, SeedArea::DEMO, Linking::Chain)
        }
    };

    let mut editor = Editor::new(Scene::from_snapshot(snapshot), config.clone())
        .context("failed to start index worker")?;
    if config.autosave {
        editor = editor.with_database(database);
    }

    editor.send(Event::UpdatedViewBox(Rect::new(0.0, 0.0, 1280.0, 800.0)));
    let settle = config.worker_timeout();
    editor.tick_now();
    editor.settle(settle);

    // Drag-select the whole demo area, line the boxes up, then undo it.
    editor.pointer_move(Point::new(10.0, 10.0));
    editor.tick_now();
    editor.settle(settle);
    editor.pointer_down();
    for step in 1..=20 {
        let t = f64::from(step) / 20.0;
        editor.pointer_move(Point::new(10.0 + 900.0 * t, 10.0 + 600.0 * t));
        editor.tick_now();
        editor.settle(settle);
    }
    editor.pointer_up();
    info!(
        selected = editor.scene().selected_box_ids.len(),
        state = %editor.state().name(),
        "brush selection finished"
    );

    if let Some(watcher) = watcher.as_mut() {
        editor.poll_config(watcher);
    }

    editor.send(Event::Aligned(Alignment::Left));
    editor.send(Event::Undo);
    editor.tick_now();
    editor.settle(settle);

    info!(
        boxes = editor.scene().boxes.len(),
        arrows = editor.scene().arrows.len(),
        undo_depth = editor.history().undo_depth(),
        cursor = ?editor.cursor(),
        "session finished"
    );
    Ok(())
}
