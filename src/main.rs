//! Meltdown Manager - Entry Point
//!
//! Three ways to play: an interactive console that advances only when told
//! to, a real-time session driven by the tokio actor, or a headless batch
//! run that prints a JSON summary.

use clap::Parser;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Runtime;

use meltdown_manager::command::parser::HELP;
use meltdown_manager::command::{parse_input, CommandOutcome, ConsoleInput};
use meltdown_manager::core::config::SimulationConfig;
use meltdown_manager::core::error::Result;
use meltdown_manager::core::types::Difficulty;
use meltdown_manager::llm::{Advisor, AdvisoryContext};
use meltdown_manager::scenario::ScenarioData;
use meltdown_manager::session::Session;
use meltdown_manager::simulation::{Engine, NotableEvent, SimulationState};
use meltdown_manager::ui::{EventHook, TracingHook};

/// Meltdown Manager - run a power company into the ground, profitably
#[derive(Parser, Debug)]
#[command(name = "meltdown-manager")]
#[command(about = "Reactor, grid and accounting-fraud simulation")]
struct Args {
    /// Difficulty 1-4 (Ethical, Aggressive, Skilling, Fastow)
    #[arg(long, default_value_t = 1)]
    difficulty: u8,

    /// Random seed; overrides the config file
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with tuning overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML scenario replacing the built-in timeline
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Run this many ticks without interaction and print a JSON summary
    #[arg(long)]
    headless: Option<u64>,

    /// Run the real-time session (20 Hz) reading commands from stdin
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

#[derive(Serialize)]
struct HeadlessSummary<'a> {
    ticks: u64,
    date: &'a str,
    chapter: &'a str,
    failure_reason: Option<&'static str>,
    stock_score: f64,
    operating_cash: f64,
    offshore_holdings: f64,
    audit_risk_percent: f64,
    meltdown_progress: f64,
    events: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meltdown_manager=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let scenario = match &args.scenario {
        Some(path) => ScenarioData::load(path)?,
        None => ScenarioData::builtin(),
    };
    let difficulty = Difficulty::from_level(args.difficulty);
    let engine = Engine::new(config, Arc::new(scenario), difficulty);

    if let Some(ticks) = args.headless {
        return run_headless(engine, ticks);
    }

    let rt = Runtime::new()?;
    if args.realtime {
        rt.block_on(run_realtime(engine))
    } else {
        run_console(engine, &rt)
    }
}

fn run_headless(mut engine: Engine, ticks: u64) -> Result<()> {
    let events = engine.run(ticks);
    let state = engine.state();
    let summary = HeadlessSummary {
        ticks: engine.current_tick(),
        date: &state.timeline.calendar_date,
        chapter: &engine.current_chapter().title,
        failure_reason: state.failure_reason().map(|r| r.headline()),
        stock_score: state.finance.stock_score,
        operating_cash: state.finance.operating_cash,
        offshore_holdings: state.finance.offshore_holdings,
        audit_risk_percent: state.finance.audit_risk_percent,
        meltdown_progress: state.reactor.meltdown_progress,
        events: events.len(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn run_realtime(engine: Engine) -> Result<()> {
    let session = Session::new(engine, Advisor::from_env()).with_hook(Box::new(TracingHook));
    let (handle, task) = session.spawn();

    println!("\n=== MELTDOWN MANAGER (real time) ===");
    println!("{}", HELP);
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_input(line) {
            Ok(ConsoleInput::Quit) => break,
            Ok(ConsoleInput::Command(command)) => {
                if let CommandOutcome::Rejected(reason) = handle.send(command).await? {
                    println!("Rejected: {}", reason);
                }
            }
            Ok(ConsoleInput::Advise(topic)) => handle.advise(topic).await?,
            Ok(ConsoleInput::Status) => {
                let frame = handle.latest();
                print_board(&frame.snapshot.state, frame.snapshot.tick);
                if !frame.headline.is_empty() {
                    println!("  TICKER: {}", frame.headline);
                }
            }
            Ok(ConsoleInput::Help) => println!("{}", HELP),
            Ok(ConsoleInput::Tick) | Ok(ConsoleInput::Run(_)) => {
                println!("The clock runs by itself in real-time mode.");
            }
            Err(e) => println!("{}", e),
        }
    }

    handle.shutdown().await?;
    let engine = task
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    print_farewell(&engine);
    Ok(())
}

fn run_console(mut engine: Engine, rt: &Runtime) -> Result<()> {
    let advisor = Advisor::from_env();
    let mut hook = TracingHook;
    let mut announced = false;

    println!("\n=== MELTDOWN MANAGER ===");
    println!("Chapter: {}", engine.current_chapter().title);
    println!();
    println!("{}", HELP);
    println!();

    loop {
        print_status_line(engine.state(), engine.current_tick());

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match parse_input(input) {
            Ok(ConsoleInput::Quit) => break,
            Ok(ConsoleInput::Tick) => {
                let report = engine.tick();
                show_events(&report.events, &mut hook);
            }
            Ok(ConsoleInput::Run(n)) => {
                println!("Running {} ticks...", n);
                let events = engine.run(n);
                show_events(&events, &mut hook);
                println!("Now at tick {}.", engine.current_tick());
            }
            Ok(ConsoleInput::Status) => print_board(engine.state(), engine.current_tick()),
            Ok(ConsoleInput::Help) => println!("{}", HELP),
            Ok(ConsoleInput::Advise(topic)) => {
                let context = AdvisoryContext::from_snapshot(&engine.snapshot());
                let text = rt.block_on(advisor.headline(&context, topic));
                println!("  \"{}\"", text);
            }
            Ok(ConsoleInput::Command(command)) => {
                engine.apply(command);
                show_events(&engine.take_events(), &mut hook);
            }
            Err(e) => println!("{}", e),
        }

        if engine.is_game_over() && !announced {
            announced = true;
            println!("Session over. Type 'status' to inspect or 'quit' to leave.");
        }
    }

    print_farewell(&engine);
    Ok(())
}

fn show_events(events: &[NotableEvent], hook: &mut TracingHook) {
    for event in events {
        hook.on_event(event);
        println!("  [{:?}] {}", event.severity, event);
    }
}

fn print_status_line(state: &SimulationState, tick: u64) {
    println!();
    println!(
        "--- Tick {} | {} | {:.0}°C | {:.0} MW / {:.1} Hz | Stock {:.1} | Cash ${:.0} | Audit {:.0}% ---",
        tick,
        state.timeline.calendar_date,
        state.reactor.core_temperature,
        state.grid.electrical_power_output,
        state.grid.grid_frequency_hz,
        state.finance.stock_score,
        state.finance.operating_cash,
        state.finance.audit_risk_percent,
    );
}

fn print_board(state: &SimulationState, tick: u64) {
    let r = &state.reactor;
    let g = &state.grid;
    let f = &state.finance;
    let pump = if r.coolant_pump_on { "ON" } else { "OFF" };
    let brownout = if g.brownout_active { "  BROWNOUT" } else { "" };

    println!();
    println!(
        "=== {} | tick {} | {} ===",
        state.timeline.calendar_date,
        tick,
        state.timeline.current_weather.name()
    );
    println!("REACTOR  phase {:?}", r.phase);
    println!(
        "  core {:.0}°C  pressure {:.0} PSI  radiation {:.1}",
        r.core_temperature, r.pressure, r.radiation_level
    );
    println!(
        "  rods {:.0}%  valve {:.0}%  pump {} (level {})  flow {:.0}",
        r.control_rod_insertion, r.steam_valve_opening, pump, r.pump_level, r.coolant_flow_rate
    );
    println!(
        "  reactivity {:+.3}  xenon {:.1}  fuel {:.1}%  meltdown {:.1}%",
        r.net_reactivity, r.xenon_poison_level, r.fuel_remaining, r.meltdown_progress
    );
    println!(
        "  health: pump {:.0}  turbine {:.0}  condenser {:.0}  auto-scram {}",
        r.pump_health, r.turbine_health, r.condenser_health, r.has_auto_scram
    );
    println!(
        "GRID     {:.0} MW of {:.0} MW demand at {:.2} Hz{}",
        g.electrical_power_output, g.grid_demand, g.grid_frequency_hz, brownout
    );
    println!(
        "FINANCE  stock {:.2}  cash ${:.0}  loans ${:.0}  credit {:.0}",
        f.stock_score, f.operating_cash, f.outstanding_loan, f.credit_score
    );
    println!(
        "  offshore ${:.0}  audit risk {:.1}%  political capital {:.1}  shield {} ticks",
        f.offshore_holdings,
        f.audit_risk_percent,
        f.political_capital,
        f.lobbying_shield_ticks_remaining
    );
    println!(
        "FRAUD    {} active SPEs, ${:.0} hidden in total",
        state.fraud.active_count(),
        state.fraud.total_hidden_debt
    );
    for spe in &state.fraud.special_purpose_entities {
        println!(
            "  {} {}  debt ${:.0}  trigger {:.1}  {:?}",
            spe.id,
            spe.name,
            spe.hidden_debt_amount,
            spe.trigger_stock_price,
            spe.status()
        );
    }
    if let Some(reason) = state.failure_reason() {
        println!("GAME OVER: {}", reason);
    }
}

fn print_farewell(engine: &Engine) {
    let state = engine.state();
    println!(
        "\nGoodbye! {} ticks, stock {:.1}, offshore ${:.0}{}",
        engine.current_tick(),
        state.finance.stock_score,
        state.finance.offshore_holdings,
        state
            .failure_reason()
            .map(|r| format!(" ({})", r))
            .unwrap_or_default()
    );
}
