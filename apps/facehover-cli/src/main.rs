use clap::{Parser, Subcommand};
use facehover_input::{InputEvent, slider};
use facehover_kernel::{HighlightTransition, Message, Stage, StageConfig, StageEvent, Variant};
use facehover_render::{DebugTextRenderer, Renderer};
use facehover_scene::{FACE_NAMES, PickOutcome};
use facehover_tools::StageInspector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "facehover-cli", about = "Headless driver for the hover cube")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// JSON stage configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured variant (basic, lit or trail)
    #[arg(long, global = true)]
    variant: Option<Variant>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and stage defaults
    Info,
    /// Sweep a scripted pointer across the viewport and report highlight changes
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Viewport width in pixels
        #[arg(long, default_value = "1280")]
        width: f32,
        /// Viewport height in pixels
        #[arg(long, default_value = "720")]
        height: f32,
        /// Print a debug frame every N frames (0 disables)
        #[arg(long, default_value = "0")]
        every: u64,
    },
    /// Hold the pointer at one pixel and report what it picks
    Pick {
        #[arg(short, long)]
        x: f32,
        #[arg(short, long)]
        y: f32,
        /// Frames to run before reporting
        #[arg(short, long, default_value = "1")]
        frames: u64,
        /// Viewport width in pixels
        #[arg(long, default_value = "1280")]
        width: f32,
        /// Viewport height in pixels
        #[arg(long, default_value = "720")]
        height: f32,
    },
    /// Print the effective configuration as JSON
    Config,
}

fn face_name(index: usize) -> &'static str {
    FACE_NAMES.get(index).copied().unwrap_or("?")
}

fn describe(transition: HighlightTransition) -> String {
    match transition {
        HighlightTransition::Entered(i) => format!("highlight {}", face_name(i)),
        HighlightTransition::Moved { from, to } => {
            format!("highlight {} -> {}", face_name(from), face_name(to))
        }
        HighlightTransition::Cleared(i) => format!("clear {}", face_name(i)),
    }
}

/// Pointer path for `simulate`: left to right just below the middle, then back along the diagonal.
fn sweep(frame: u64, frames: u64, width: f32, height: f32) -> InputEvent {
    let half = (frames / 2).max(1);
    let (x, y) = if frame < half {
        let t = frame as f32 / half as f32;
        (t * width, height * 0.52)
    } else {
        let t = (frame - half) as f32 / (frames - half).max(1) as f32;
        ((1.0 - t) * width, (1.0 - t) * height)
    };
    InputEvent::PointerMoved { x, y }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = StageConfig::resolve(cli.config.as_deref(), cli.variant)?;
    tracing::info!("facehover-cli starting, variant={}", config.variant);

    match cli.command {
        Commands::Info => {
            println!("facehover-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("variant: {} (available: basic, lit, trail)", config.variant);
            println!("faces: {}", FACE_NAMES.join(" "));
            println!(
                "rotation speed: {} in [{}, {}]",
                config.rotation_speed,
                slider::ROTATION_SPEED.min,
                slider::ROTATION_SPEED.max
            );
            println!(
                "zoom: {} in [{}, {}]",
                config.zoom,
                slider::ZOOM.min,
                slider::ZOOM.max
            );
            println!("{}", StageInspector::summary(&Stage::new(config)));
        }
        Commands::Simulate {
            frames,
            width,
            height,
            every,
        } => {
            println!("Simulating {frames} frames at {width}x{height}, variant={}", config.variant);

            let mut messages = vec![Message::Input(InputEvent::Resized { width, height })];
            let mut stage = Stage::new(config.clone());
            stage.dispatch(messages[0]);
            let renderer = DebugTextRenderer::new();

            for i in 0..frames {
                let pointer = Message::Input(sweep(i, frames, width, height));
                stage.dispatch(pointer);
                messages.extend([pointer, Message::Tick]);

                let Some(stats) = stage.dispatch(Message::Tick) else {
                    continue;
                };
                if let Some(transition) = stats.transition {
                    println!("frame {:>4}: {}", stats.frame, describe(transition));
                }
                if every > 0 && stats.frame % every == 0 {
                    print!("{}", renderer.render(&stage));
                }
            }

            let inconsistent = stage
                .events()
                .iter()
                .filter(|e| matches!(e, StageEvent::InconsistentPick { .. }))
                .count();
            if inconsistent > 0 {
                println!("inconsistent picks: {inconsistent}");
            }
            println!("{}", StageInspector::summary(&stage));

            let replayed = Stage::replay(config, &messages);
            let matches = replayed.hovered() == stage.hovered()
                && replayed.rotation() == stage.rotation()
                && replayed.camera() == stage.camera();
            println!("Replay: {}", if matches { "OK" } else { "MISMATCH" });
        }
        Commands::Pick {
            x,
            y,
            frames,
            width,
            height,
        } => {
            let mut stage = Stage::new(config);
            stage.handle(InputEvent::Resized { width, height });
            stage.handle(InputEvent::PointerMoved { x, y });
            for _ in 0..frames.max(1) {
                stage.step();
            }

            let ndc = stage.interaction().pointer.ndc;
            println!("pointer ({x}, {y}) -> ndc ({:.3}, {:.3})", ndc.x, ndc.y);
            match stage.last_outcome() {
                PickOutcome::Hit {
                    material_index,
                    triangle,
                    distance,
                } => println!(
                    "hit face {} (slot {material_index}, triangle {triangle}) at distance {distance:.3}",
                    face_name(material_index)
                ),
                PickOutcome::Miss => println!("miss"),
                PickOutcome::InconsistentGeometry { triangle } => {
                    println!("triangle {triangle} belongs to no face group")
                }
            }
            for face in StageInspector::list_faces(&stage) {
                println!("  {face}");
            }
        }
        Commands::Config => {
            println!("{}", config.to_json_pretty()?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_starts_left_and_returns_to_origin() {
        let InputEvent::PointerMoved { x, y } = sweep(0, 100, 1000.0, 500.0) else {
            panic!("expected a pointer move");
        };
        assert_eq!(x, 0.0);
        assert!((y - 260.0).abs() < 1e-3);

        let InputEvent::PointerMoved { x, y } = sweep(50, 100, 1000.0, 500.0) else {
            panic!("expected a pointer move");
        };
        assert_eq!((x, y), (1000.0, 500.0));

        let InputEvent::PointerMoved { x, y } = sweep(99, 100, 1000.0, 500.0) else {
            panic!("expected a pointer move");
        };
        assert!(x < 50.0 && y < 25.0);
    }

    #[test]
    fn transitions_are_described_by_face_name() {
        assert_eq!(describe(HighlightTransition::Entered(4)), "highlight +Z");
        assert_eq!(
            describe(HighlightTransition::Moved { from: 0, to: 3 }),
            "highlight +X -> -Y"
        );
        assert_eq!(describe(HighlightTransition::Cleared(5)), "clear -Z");
    }

    #[test]
    fn pick_accepts_long_and_short_coordinates() {
        for args in [
            ["facehover-cli", "pick", "--x", "640", "--y", "360"],
            ["facehover-cli", "pick", "-x", "640", "-y", "360"],
        ] {
            let cli = Cli::try_parse_from(args).unwrap();
            let Commands::Pick { x, y, frames, .. } = cli.command else {
                panic!("expected the pick command");
            };
            assert_eq!((x, y, frames), (640.0, 360.0, 1));
        }
    }
}
