//! Spin Fling entry point
//!
//! Runs a scripted, headless session: taps to spawn tokens, lets them bounce,
//! drags and flings one, resizes the viewport, then prints the final tokens
//! as JSON.
//!
//! Usage: `spin-fling [config.json] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use spin_fling::sim::{PointerEvent, SimulationState, Simulator, TickInput, TickReport};
    use spin_fling::{AssetStatus, ShapeId, ShapeSet, SimConfig};

    env_logger::init();
    log::info!("Spin Fling (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SimConfig::load(path),
        None => SimConfig::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    // Six shape slots, one of which fails to load
    let mut shapes = ShapeSet::new(6);
    for slot in 0..5 {
        shapes.record_loaded(slot, ShapeId(slot as u32 + 1));
    }
    shapes.record_failed("assets/6.svg");
    match shapes.status() {
        AssetStatus::Ready { usable } => log::info!("{} shapes ready", usable),
        other => log::warn!("Shapes not ready: {:?}", other),
    }
    if !shapes.failed().is_empty() {
        log::warn!("Missing shapes: {}", shapes.failed().join(", "));
    }

    let state = match SimulationState::new(config, 1280.0, 720.0, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start simulation: {}", e);
            std::process::exit(1);
        }
    };
    let mut sim = Simulator::new(state, shapes);
    let mut totals = TickReport::default();
    let mut run = |sim: &mut Simulator<ShapeSet>, input: &TickInput| {
        let report = sim.step(input);
        totals.wall_hits += report.wall_hits;
        totals.contacts += report.contacts;
        totals.impulses += report.impulses;
    };

    // Tap to spawn
    for i in 0..5 {
        let pos = Vec2::new(200.0 + i as f32 * 220.0, 200.0 + (i % 2) as f32 * 300.0);
        run(
            &mut sim,
            &TickInput {
                pointer: Some(pos),
                events: vec![PointerEvent::Down { id: 0, pos }, PointerEvent::Up { id: 0 }],
            },
        );
    }
    for _ in 0..120 {
        run(&mut sim, &TickInput::default());
    }

    // Grab the first token and sweep it to the right before letting go
    let mut pointer = sim.state.tokens.first().map(|t| t.pos).unwrap_or(Vec2::new(640.0, 360.0));
    run(
        &mut sim,
        &TickInput {
            pointer: Some(pointer),
            events: vec![PointerEvent::Down { id: 0, pos: pointer }],
        },
    );
    for _ in 0..20 {
        pointer += Vec2::new(9.0, -3.0);
        run(&mut sim, &TickInput::at(pointer));
    }
    run(
        &mut sim,
        &TickInput {
            pointer: Some(pointer),
            events: vec![PointerEvent::Up { id: 0 }],
        },
    );

    for _ in 0..240 {
        run(&mut sim, &TickInput::default());
    }

    sim.resize(800.0, 600.0);
    for _ in 0..120 {
        run(&mut sim, &TickInput::default());
    }

    log::info!(
        "Done after {} ticks: {} tokens, {} wall hits, {} contacts, {} impulses",
        sim.state.time_ticks,
        sim.state.tokens.len(),
        totals.wall_hits,
        totals.contacts,
        totals.impulses
    );

    match serde_json::to_string_pretty(&sim.state.tokens) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize tokens: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on the web; the host page drives `Simulator::step`
}
