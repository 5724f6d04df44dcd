//! Walk-through of the add / edit / recompute loop a map front end runs:
//! place waypoints with distance circles, move one, widen another, and
//! recompute the estimate after every change.

use weighted_positioning::{Beacon, PositionEngine, TextFormatter};

fn print_estimate(engine: &PositionEngine, beacons: &[Beacon], label: &str) {
    println!("--- {} ---", label);
    match engine.compute(beacons) {
        Ok(estimate) => {
            let formatter = TextFormatter {
                compact: true,
                precision: 6,
            };
            println!("{}", formatter.format(&estimate));
            if !estimate.is_trustworthy() {
                println!("(estimate not yet trustworthy)");
            }
        }
        Err(error) => println!("error: {}", error),
    }
    println!();
}

fn main() {
    let engine = PositionEngine::new();
    let mut beacons: Vec<Beacon> = Vec::new();

    // Two waypoints: underdetermined, the engine answers with a flagged
    // centroid instead of refusing.
    beacons.push(Beacon::new("1", 47.2690, 11.4040, 55.0));
    beacons.push(Beacon::new("2", 47.2698, 11.4052, 70.0));
    print_estimate(&engine, &beacons, "two waypoints");

    // Third waypoint makes the fix well-posed.
    beacons.push(Beacon::new("3", 47.2685, 11.4060, 60.0));
    print_estimate(&engine, &beacons, "three waypoints");

    // Drag waypoint 2 and recompute from the fresh snapshot.
    beacons[1].lat = 47.2701;
    beacons[1].lng = 11.4049;
    print_estimate(&engine, &beacons, "after dragging waypoint 2");

    // Widen the radius slider on waypoint 3.
    beacons[2].distance = 85.0;
    print_estimate(&engine, &beacons, "after widening waypoint 3");

    // A fourth waypoint switches the solver to least squares.
    beacons.push(Beacon::new("4", 47.2694, 11.4031, 45.0));
    print_estimate(&engine, &beacons, "four waypoints");
}
