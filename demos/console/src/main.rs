//! Interactive console for the lift simulator.
//!
//! Runs the engine on a worker thread and reads commands from stdin:
//! hall calls, car calls, a burst of synthetic traffic, and status dumps of
//! the published fleet snapshot.  Set `RUST_LOG=debug` to watch dispatch
//! decisions.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{bail, Result};

use lift_core::{CarId, Direction, SimConfig, SimRng};
use lift_engine::{EngineBuilder, EngineHandle, TrafficGenerator};

const USAGE: &str = "\
Usage: lift-console [options]

Options:
  -f, --floors <n>      Number of floors (1-12, default: 10)
  -e, --elevators <n>   Number of elevators (1-3, default: 3)
  -c, --capacity <n>    Car capacity (1-10, default: 6)
  -m, --mode <type>     Controller mode: master|distributed (default: master)
  -t, --tick <ms>       Tick duration in ms (100-2000, default: 500)
  -s, --seed <n>        Traffic seed (default: 0)
  -h, --help            Show this help

Example:
  lift-console -f 12 -e 3 -m distributed
";

const COMMANDS: &str = "\
Commands:
  hall <floor> <u|d>  - Hall call (e.g. 'hall 5 u')
  car <elev> <floor>  - Car call (e.g. 'car 0 8')
  traffic <n>         - Issue n random requests
  status              - Print current fleet status
  help                - Show this help
  quit                - Exit
";

fn parse_args() -> Result<Option<SimConfig>> {
    let mut config = SimConfig::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let mut value = |name: &str| -> Result<String> {
            args.next()
                .ok_or_else(|| anyhow::anyhow!("missing value for {name}"))
        };
        match arg.as_str() {
            "-h" | "--help" => {
                print!("{USAGE}");
                return Ok(None);
            }
            "-f" | "--floors" => config.num_floors = value("--floors")?.parse()?,
            "-e" | "--elevators" => config.num_elevators = value("--elevators")?.parse()?,
            "-c" | "--capacity" => config.capacity = value("--capacity")?.parse()?,
            "-m" | "--mode" => config.controller = value("--mode")?.parse()?,
            "-t" | "--tick" => config.tick_duration_ms = value("--tick")?.parse()?,
            "-s" | "--seed" => config.seed = value("--seed")?.parse()?,
            other => bail!("unknown option: {other}\n{USAGE}"),
        }
    }

    Ok(Some(config))
}

fn print_status(handle: &EngineHandle) {
    let snapshot = handle.snapshot();
    println!("========== Status at {} ==========", snapshot.tick);
    for car in &snapshot.cars {
        println!("  {car}");
    }
    if !snapshot.hall_calls.is_empty() {
        let calls: Vec<String> = snapshot.hall_calls.iter().map(|c| c.to_string()).collect();
        println!("  Hall calls: {}", calls.join(" "));
    }
    println!("==================================");
}

fn run_command(handle: &EngineHandle, seed: &mut u64, line: &str) -> Result<bool> {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(true);
    };

    match command {
        "hall" => {
            let (Some(floor), Some(dir)) = (parts.next(), parts.next()) else {
                println!("Usage: hall <floor> <u|d>");
                return Ok(true);
            };
            let direction = match dir {
                "u" | "U" => Direction::Up,
                "d" | "D" => Direction::Down,
                _ => {
                    println!("Usage: hall <floor> <u|d>");
                    return Ok(true);
                }
            };
            match handle.request_hall_call(floor.parse()?, direction) {
                Ok(()) => println!("ok"),
                Err(e) => println!("rejected: {e}"),
            }
        }
        "car" => {
            let (Some(car), Some(floor)) = (parts.next(), parts.next()) else {
                println!("Usage: car <elevator_id> <floor>");
                return Ok(true);
            };
            match handle.request_car_call(CarId(car.parse()?), floor.parse()?) {
                Ok(()) => println!("ok"),
                Err(e) => println!("rejected: {e}"),
            }
        }
        "traffic" => {
            let count: usize = parts.next().unwrap_or("10").parse()?;
            *seed += 1;
            let generator = TrafficGenerator::new(handle.clone(), SimRng::new(*seed));
            let _producer = generator.spawn(count, Duration::from_millis(50));
            println!("issuing {count} random requests");
        }
        "status" => print_status(handle),
        "help" => print!("{COMMANDS}"),
        "quit" | "exit" | "q" => return Ok(false),
        other => println!("Unknown command: {other}. Type 'help' for usage."),
    }
    Ok(true)
}

fn main() -> Result<()> {
    env_logger::init();

    let Some(config) = parse_args()? else {
        return Ok(());
    };

    println!("========================================");
    println!("            Lift Simulator              ");
    println!("========================================");
    println!("  Floors:     {}", config.num_floors);
    println!("  Elevators:  {}", config.num_elevators);
    println!("  Capacity:   {}", config.capacity);
    println!("  Controller: {}", config.controller);
    println!("  Tick:       {} ms", config.tick_duration_ms);
    println!("========================================");
    print!("{COMMANDS}");

    let mut seed = config.seed;
    let engine = EngineBuilder::new(config).build()?;
    let thread = engine.spawn();
    let handle = thread.handle().clone();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match run_command(&handle, &mut seed, &line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("error: {e}"),
        }
        io::stdout().flush()?;
    }

    handle.stop();
    if thread.join().is_err() {
        bail!("engine thread panicked");
    }
    println!("Simulation ended.");
    Ok(())
}
