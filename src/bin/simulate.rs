//! Headless orrery run against a recording renderer.
//! Plays a short scripted session and prints where every body ends up.

use clap::Parser;
use orrery::cli::{SimulateArgs, init_logging};
use orrery_core::{BodyId, OrreryError};
use orrery_sim::{ControlEvent, ControlQueue, RecordingRenderer, SimulationContext};

/// Events queued at the start of the given second of the run
fn script(second: u32) -> Vec<ControlEvent> {
    match second {
        10 => vec![ControlEvent::SetSpeed {
            body: BodyId::Earth,
            value: 1.0,
        }],
        20 => vec![ControlEvent::TogglePause],
        // Queued while paused, lands on resume
        25 => vec![ControlEvent::SetSpeed {
            body: BodyId::Neptune,
            value: 100.0,
        }],
        30 => vec![ControlEvent::TogglePause],
        // Out of range, clamped with a warning
        40 => vec![ControlEvent::SetSpeed {
            body: BodyId::Mercury,
            value: 250.0,
        }],
        _ => Vec::new(),
    }
}

fn print_table(frame: u32, context: &SimulationContext) {
    println!(
        "\n--- frame {frame:>5} | elapsed {:>7.3}s{} ---",
        context.clock().elapsed(),
        if context.is_paused() { " (paused)" } else { "" }
    );
    println!(
        "{:<8} {:>8} {:>10} {:>10} {:>8} {:>8}",
        "body", "speed", "x", "z", "rot.x", "rot.y"
    );
    for body in BodyId::ALL {
        let t = context.transform_of(body);
        let speed = context
            .speeds()
            .get_speed(body)
            .map(|s| format!("{s:.2}"))
            .unwrap_or_else(|_| "-".to_string());
        println!(
            "{:<8} {:>8} {:>10.3} {:>10.3} {:>8.3} {:>8.3}",
            body.name(),
            speed,
            t.translation.x,
            t.translation.z,
            t.rotation.x,
            t.rotation.y
        );
    }
}

fn main() -> Result<(), OrreryError> {
    let args = SimulateArgs::parse();
    if let Err(e) = init_logging(args.common.log_level.as_deref()) {
        eprintln!("simulate: logging disabled: {e}");
    }

    let config = args.common.load_config()?;

    let mut renderer = RecordingRenderer::default();
    let mut context = SimulationContext::assemble(&config, &mut renderer)?;
    let mut queue = ControlQueue::default();

    println!(
        "Orrery headless run: {} meshes, {} stars, {}s at {} fps",
        renderer.mesh_count(),
        context.starfield().len(),
        args.seconds,
        args.fps
    );

    let total = args.fps * args.seconds;
    let dt = 1.0 / f64::from(args.fps);
    for frame in 0..total {
        if frame % args.fps == 0 {
            for event in script(frame / args.fps) {
                queue.push(event);
            }
        }
        context.tick(queue.drain(), dt);
        context.write_transforms(&mut renderer);

        if frame % (args.fps * 10) == 0 {
            print_table(frame, &context);
        }
    }
    print_table(total, &context);

    let ring = context.ring_world_transform().translation;
    println!(
        "\nring at ({:.3}, {:.3}, {:.3}), {} transform writes",
        ring.x, ring.y, ring.z, renderer.writes
    );
    Ok(())
}
