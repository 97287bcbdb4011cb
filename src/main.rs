use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thoughtfield::prelude::*;

/// Synthetic field-activity signal: a slow baseline oscillation with a
/// faster ripple and a little noise, kept inside [70, 100].
fn activity_signal() -> impl FnMut(f32) -> f32 {
    let mut rng = SmallRng::from_entropy();
    move |t: f32| {
        let base = 85.0 + (t * 0.1).sin() * 10.0 + (t * 0.3).sin() * 5.0;
        let noise = (rng.gen::<f32>() - 0.5) * 8.0;
        (base + noise).clamp(70.0, 100.0)
    }
}

fn build(preset: &str) -> Simulation {
    match preset {
        // Grid-backed field view: fixed particles fading out over one second
        "field" => Simulation::new()
            .with_title("thoughtfield - field")
            .with_visuals(|v| v.grid(GridStyle::default()).particle_radius(0.0, 10.0))
            .with_lifecycle(|l| l.lifetime(1000.0).age_step(16.0)),
        // Linked view: drifting particles with proximity connections
        _ => Simulation::new()
            .with_title("thoughtfield - linked")
            .with_connections(80.0)
            .with_lifecycle(|l| {
                l.lifetime(200.0)
                    .age_step(1.0)
                    .fade_floor(0.3)
                    .drift(Drift::default())
            }),
    }
}

fn main() {
    let preset = std::env::args().nth(1).unwrap_or_default();
    let result = build(&preset)
        .with_activity_signal(activity_signal())
        .run();

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
