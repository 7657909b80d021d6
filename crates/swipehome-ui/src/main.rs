//! SwipeHome headless driver.
//!
//! Mounts one home screen, runs a scripted gesture sequence against it with
//! a real frame clock, and prints a JSON snapshot after each settled step.
//!
//! Usage: `swipehome [home|favorites|search|favorites_search]`

use std::sync::Arc;

use swipehome_core::{GestureConfig, HomeScreen, Viewport};
use swipehome_ui::{FrameClock, HomeSession, HomeSnapshot, ObservableHome};
use tokio::sync::watch;

/// Viewport used by the driver: a phone-sized screen.
const VIEWPORT: Viewport = Viewport {
    width: 400.0,
    height: 800.0,
    toolbar_height: 240.0,
};

// =============================================================================
// Script
// =============================================================================

enum Step {
    ToggleMenu,
    Scroll(f32),
    Fling(f32),
}

impl Step {
    fn label(&self) -> String {
        match self {
            Step::ToggleMenu => "toggle_menu".to_string(),
            Step::Scroll(delta) => format!("scroll({})", delta),
            Step::Fling(velocity) => format!("fling({})", velocity),
        }
    }

    fn apply(&self, home: &ObservableHome) {
        match *self {
            Step::ToggleMenu => home.toggle_menu(),
            Step::Scroll(delta) => {
                let outcome = home.scroll(delta);
                tracing::info!(card = outcome.card, list = outcome.list, "Scrolled");
            }
            Step::Fling(velocity) => {
                let outcome = home.fling(velocity);
                tracing::info!(card = outcome.card, list = outcome.list, "Flung");
            }
        }
    }
}

const SCRIPT: &[Step] = &[
    Step::ToggleMenu,
    Step::ToggleMenu,
    Step::Scroll(-200.0),
    Step::Fling(800.0),
    Step::Fling(-800.0),
    Step::ToggleMenu,
    Step::ToggleMenu,
];

fn print_snapshot(step: &str, snapshot: &HomeSnapshot) {
    let line = serde_json::json!({ "step": step, "snapshot": snapshot });
    println!("{}", line);
}

async fn settle(rx: &mut watch::Receiver<HomeSnapshot>) -> Option<HomeSnapshot> {
    match rx.wait_for(|s| !s.animating).await {
        Ok(snapshot) => Some(snapshot.clone()),
        Err(e) => {
            tracing::error!("Snapshot channel closed: {}", e);
            None
        }
    }
}

async fn run(home: Arc<ObservableHome>, config: &GestureConfig) {
    let mut rx = home.subscribe();
    let clock = FrameClock::spawn(home.clone(), config.frame_interval());

    if let Some(snapshot) = settle(&mut rx).await {
        print_snapshot("mount", &snapshot);
    }

    for step in SCRIPT {
        let label = step.label();
        tracing::debug!("Step: {}", label);
        step.apply(&home);
        match settle(&mut rx).await {
            Some(snapshot) => print_snapshot(&label, &snapshot),
            None => break,
        }
    }

    home.dispose();
    clock.stop().await;
}

// =============================================================================
// Entry Point
// =============================================================================

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let screen = match std::env::args().nth(1) {
        Some(arg) => match HomeScreen::from_name(&arg) {
            Some(screen) => screen,
            None => {
                eprintln!("Error: unknown screen '{}'", arg);
                std::process::exit(2);
            }
        },
        None => HomeScreen::default(),
    };

    let config = match GestureConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load config: {} - using defaults", e);
            GestureConfig::default()
        }
    };

    tracing::info!(screen = screen.name(), "SwipeHome starting...");

    let session = match HomeSession::new(screen, VIEWPORT, &config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to mount home screen: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let home = Arc::new(ObservableHome::new(session));

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(run(home, &config));
    tracing::info!("SwipeHome finished");
}
