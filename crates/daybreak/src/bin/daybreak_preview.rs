//! # Daybreak Preview
//!
//! Headless run of the sunrise scene. Replays a scripted session (key presses,
//! swipes, a resize) through the frame loop at 60 FPS and prints what the
//! scene looked like along the way.
//!
//! ```bash
//! # Defaults
//! ./daybreak_preview
//!
//! # With a host config file
//! ./daybreak_preview daybreak.toml
//! ```

use std::process::ExitCode;

use daybreak::{FrameLoop, HostConfig, HostResult, InputEvent};
use daybreak_shared::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH, FRAME_TIME_MS};

/// Frames in the scripted session (10 seconds).
const SESSION_FRAMES: u64 = 600;

/// Scripted input: (frame, event).
const SCRIPT: &[(u64, InputEvent)] = &[
    (10, InputEvent::Key('r')),
    (120, InputEvent::Key('f')),
    (200, InputEvent::SwipeLeft),
    (260, InputEvent::SwipeLeft),
    (400, InputEvent::SwipeLeft),
    (
        450,
        InputEvent::Resize {
            width: 800.0,
            height: 600.0,
        },
    ),
    (500, InputEvent::SwipeRight),
    (560, InputEvent::Key('c')),
];

fn main() -> ExitCode {
    println!("═══════════════════════════════════════════════════════════════════");
    println!("                     DAYBREAK PREVIEW v0.1.0");
    println!("                          HEADLESS MODE");
    println!("═══════════════════════════════════════════════════════════════════");
    println!();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[PREVIEW] failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> HostResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            println!("[PREVIEW] Loading config from {path}");
            HostConfig::from_toml_file(path)?
        }
        None => HostConfig {
            ambient_weather: false,
            ..HostConfig::default()
        },
    };

    let mut frame_loop = FrameLoop::new(config, DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)?;
    let input = frame_loop.input_sender();
    let start_ms = wall_clock_ms();

    for frame in 0..SESSION_FRAMES {
        for (_, event) in SCRIPT.iter().filter(|(at, _)| *at == frame) {
            input.send(event.clone());
        }

        #[allow(clippy::cast_precision_loss)]
        let now = start_ms + frame as f64 * FRAME_TIME_MS;
        let stats = frame_loop.frame(now)?;

        for note in frame_loop.take_notifications() {
            println!("[PREVIEW] frame {frame:>4}: {note}");
        }
        if frame % 60 == 0 {
            println!(
                "[PREVIEW] frame {frame:>4}: {} particles, {} draws | {}",
                stats.alive_particles,
                stats.draw_calls,
                frame_loop.active_effects_label()
            );
        }
    }

    let summary = frame_loop.stats().clone();
    frame_loop.shutdown();

    println!();
    println!("═══════════════════════════════════════════════════════════════════");
    println!("  Frames:          {}", summary.frames_recorded);
    println!("  Avg frame:       {:.3} ms", summary.avg_frame_ms());
    #[allow(clippy::cast_precision_loss)]
    let max_ms = summary.max_frame_us as f64 / 1000.0;
    println!("  Max frame:       {max_ms:.3} ms");
    println!("  Over budget:     {}", summary.frames_over_budget);
    println!("  Peak particles:  {}", summary.peak_particles);
    println!("═══════════════════════════════════════════════════════════════════");
    Ok(())
}

fn wall_clock_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
}
