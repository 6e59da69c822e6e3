/*
 * Atom Ensemble Animation
 *
 * A box of bouncing, colliding atoms driven by a periodic timer. Each tick
 * publishes a redraw on the command bus; the render surface advances and
 * paints every atom, and the control panel shows paint time, atom count,
 * collision rate and mean velocity.
 *
 * Set RUST_LOG to change the log level (default: atoms=info).
 */

use log::info;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("atoms=info"))
        .init();
    info!("starting atom ensemble");

    nannou::app(atoms::app::model)
        .update(atoms::app::update)
        .run();
}
