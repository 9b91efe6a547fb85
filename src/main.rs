// Load the modules
mod key_bindings;
mod render;

use ast_core::{Gamestate, Settings, TICKS};
use env_logger::Env;
use key_bindings::{Action, KeyBindings};
use log::{error, info, warn};
use macroquad::prelude::{get_frame_time, next_frame, screen_height, screen_width, vec2, Vec2};

const SETTINGS_FILE: &str = "settings.json";
const KEYBINDINGS_FILE: &str = "keybindings.json";

/// Longest stretch of time simulated in one rendered frame
const MAX_FRAME_TIME: f64 = 0.25;

fn window_conf() -> macroquad::window::Conf {
    macroquad::window::Conf {
        window_title: "Asteroids".to_owned(),
        window_resizable: true,
        window_height: 900,
        window_width: 1600,
        ..Default::default()
    }
}

fn bounds() -> Vec2 {
    vec2(screen_width(), screen_height())
}

/// The main entry point of the Asteroids game.
///
/// Loads the optional settings and key bindings, then runs the frame loop:
/// the simulation advances in fixed 1/60 s frames through an accumulator,
/// so movement speeds do not depend on the display refresh rate, and the
/// playfield follows the window size.
#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = match Settings::load(SETTINGS_FILE) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Using default settings ({}): {}", SETTINGS_FILE, e);
            Settings::default()
        }
    };

    // Initialize keybindings
    let keybindings = match KeyBindings::load(KEYBINDINGS_FILE) {
        Ok(kb) => kb,
        Err(e) => {
            warn!("Using default keybindings ({}): {}", KEYBINDINGS_FILE, e);
            key_bindings::default_keybindings()
        }
    };
    keybindings.start_listening();

    let mut gamestate = match Gamestate::new(settings, bounds()) {
        Ok(gamestate) => gamestate,
        Err(e) => {
            error!("Cannot start the game: {}", e);
            return;
        }
    };
    info!(
        "Game started on a {}x{} playfield",
        gamestate.bounds.x, gamestate.bounds.y
    );

    let mut accumulator = 0.0;
    loop {
        if keybindings.is_action_held(Action::Exit) {
            break;
        }

        gamestate.resize(bounds());
        let controls = keybindings.controls();

        // Update simulation
        accumulator += (get_frame_time() as f64).min(MAX_FRAME_TIME);
        while accumulator >= TICKS {
            let report = gamestate.step(&controls);
            if report.reset {
                info!("Ship destroyed, starting over");
            } else if report.ship_destroyed {
                info!("Ship destroyed, score {}", gamestate.score);
            }
            accumulator -= TICKS;
        }

        render::draw_all(&gamestate);
        next_frame().await;
    }

    info!("Exiting with score {}", gamestate.score);

    // Save keybindings on exit
    if let Err(e) = keybindings.save(KEYBINDINGS_FILE) {
        error!("Failed to save keybindings: {}", e);
    }
}
