//! game-runner: scheduler + presentation shell for Cascade.
//!
//! Usage:
//!   game-runner --db cascade.db --ticks 120        headless fast-forward
//!   game-runner --db cascade.db --play             1s-cadence interactive loop
//!   game-runner --ipc-mode                         JSON line protocol on stdin

use anyhow::Result;
use cascade_core::{
    clock::GameSpeed,
    command::PlayerCommand,
    config::GameConfig,
    engine::GameEngine,
    store::GameStore,
    types::Tick,
    unit::display_round,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Tick { count: u64 },
    Click { unit: String },
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    tick: Tick,
    paused: bool,
    units: Vec<UnitView>,
}

#[derive(serde::Serialize)]
struct UnitView {
    name: String,
    description: String,
    value: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ticks = parse_arg(&args, "--ticks", 60u64);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let play_mode = args.iter().any(|a| a == "--play");
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or("cascade.db");
    let config_path = args
        .windows(2)
        .find(|w| w[0] == "--config")
        .map(|w| w[1].as_str());

    let config = match config_path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let store = GameStore::open(db)?;
    store.migrate()?;
    let mut engine = GameEngine::build(store, &config)?;
    log::info!("session {} started on {db}", engine.session_id);

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else if play_mode {
        println!("Cascade — type 'click <unit>', 'pause', 'resume', 'speed normal|fast|turbo', 'quit'");
        render(&engine);
        run_play_loop(&mut engine, &config)?;
    } else {
        println!("Cascade — game-runner");
        println!("  db:    {db}");
        println!("  ticks: {ticks}");
        println!();
        engine.run_ticks(ticks)?;
        print_summary(&engine, ticks);
    }

    Ok(())
}

/// JSON line protocol for an external presentation layer.
fn run_ipc_loop(engine: &mut GameEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Tick { count } => {
                engine.run_ticks(count)?;
                writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(engine))?)?;
            }
            IpcCommand::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(engine))?)?;
            }
            IpcCommand::Click { unit } => {
                engine.apply(PlayerCommand::Click { unit })?;
                writeln!(stdout, "{}", serde_json::to_string(&build_ui_state(engine))?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

/// Interactive scheduler loop: one tick per second at normal speed,
/// stdin lines forwarded as commands between ticks.
fn run_play_loop(engine: &mut GameEngine, config: &GameConfig) -> Result<()> {
    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    engine.clock.resume();
    loop {
        // Drain pending commands first; clicks re-render immediately.
        loop {
            match rx.try_recv() {
                Ok(line) => {
                    if !handle_play_line(engine, line.trim())? {
                        return Ok(());
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return Ok(()),
            }
        }

        if engine.clock.paused {
            thread::sleep(Duration::from_millis(100));
            continue;
        }

        engine.tick()?;
        render(engine);

        let cadence = config.tick_interval_ms / engine.clock.ticks_per_real_second() as u64;
        thread::sleep(Duration::from_millis(cadence.max(1)));
    }
}

/// Apply one line of player input. Returns false to quit.
fn handle_play_line(engine: &mut GameEngine, line: &str) -> Result<bool> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        Some("quit") => return Ok(false),
        Some("pause") => {
            engine.apply(PlayerCommand::Pause)?;
            println!("(paused)");
        }
        Some("resume") => {
            engine.apply(PlayerCommand::Resume)?;
            println!("(resumed)");
        }
        Some("speed") => {
            let speed = match parts.next() {
                Some("fast") => GameSpeed::Fast,
                Some("turbo") => GameSpeed::Turbo,
                _ => GameSpeed::Normal,
            };
            engine.apply(PlayerCommand::SetSpeed { speed })?;
        }
        Some("click") => {
            if let Some(unit) = parts.next() {
                let events = engine.apply(PlayerCommand::Click {
                    unit: unit.to_string(),
                })?;
                if events.is_empty() {
                    println!("(nothing happened)");
                }
                render(engine);
            }
        }
        Some(other) => println!("unknown command: {other}"),
        None => {}
    }
    Ok(true)
}

fn build_ui_state(engine: &GameEngine) -> UiState {
    UiState {
        tick: engine.clock.current_tick,
        paused: engine.clock.paused,
        units: engine
            .ledger()
            .units()
            .iter()
            .map(|u| UnitView {
                name: u.name.clone(),
                description: u.description.clone(),
                value: display_round(u.value),
            })
            .collect(),
    }
}

fn render(engine: &GameEngine) {
    println!("--- tick {} ---", engine.clock.current_tick);
    for unit in engine.ledger().units() {
        println!(
            "  {:<4} {:<16} {}",
            unit.name,
            unit.description,
            display_round(unit.value)
        );
    }
}

fn print_summary(engine: &GameEngine, ticks: u64) {
    println!("=== RUN SUMMARY ===");
    println!("  session:    {}", engine.session_id);
    println!("  ticks run:  {ticks}");
    println!("  final tick: {}", engine.clock.current_tick);
    for unit in engine.ledger().units() {
        println!("  {:<4} {}", unit.name, display_round(unit.value));
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
