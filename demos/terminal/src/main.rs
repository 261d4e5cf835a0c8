//! terminal — headless airport terminal passenger-flow demo.
//!
//! Runs one scenario in simulated time as fast as possible, writes the tick
//! summaries and flow samples to `output/terminal/`, and prints the metrics
//! table.  With `--live SECS` it then replays the scenario in real time
//! through `FlowController`, printing a status line every simulated 5 s.
//!
//! ```text
//! terminal [SCENARIO] [--minutes N] [--config FILE.json] [--live SECS]
//!
//!   SCENARIO   normal | peak | low      (default: normal)
//!   --config   FlowConfig as JSON; missing fields take the defaults
//! ```
//!
//! `RUST_LOG=debug` shows lifecycle and flow-sample logging.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use log::info;

use pf_core::{FlowConfig, Scenario, Tick, Zone};
use pf_output::{CsvWriter, OutputWriter, SimOutputObserver};
use pf_sim::{FlowController, FlowSample, MetricsSnapshot, SimBuilder, SimObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_MINUTES: u64  = 30;
const OUTPUT_DIR:      &str = "output/terminal";
const BAR_WIDTH:       usize = 40;

// ── Command line ──────────────────────────────────────────────────────────────

struct Args {
    scenario:    Scenario,
    minutes:     u64,
    config_path: Option<String>,
    live_secs:   Option<u64>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        scenario:    Scenario::NormalDay,
        minutes:     DEFAULT_MINUTES,
        config_path: None,
        live_secs:   None,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--minutes" => {
                let v = it.next().context("--minutes needs a value")?;
                args.minutes = v.parse().with_context(|| format!("bad --minutes value {v:?}"))?;
            }
            "--config" => {
                args.config_path = Some(it.next().context("--config needs a file")?);
            }
            "--live" => {
                let v = it.next().context("--live needs a number of seconds")?;
                args.live_secs = Some(v.parse().with_context(|| format!("bad --live value {v:?}"))?);
            }
            other if other.starts_with("--") => bail!("unknown option {other}"),
            name => {
                args.scenario = Scenario::parse(name)
                    .with_context(|| format!("unknown scenario {name:?} (normal, peak, low)"))?;
            }
        }
    }
    Ok(args)
}

fn load_config(args: &Args) -> Result<FlowConfig> {
    let mut config: FlowConfig = match &args.config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => FlowConfig::default(),
    };
    if args.config_path.is_none() {
        config.arrival_rate_per_min = args.scenario.arrival_rate_per_min();
    }
    config.validate()?;
    Ok(config)
}

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:        SimOutputObserver<W>,
    summary_rows: usize,
    sample_rows:  usize,
    peak_active:  usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, summary_rows: 0, sample_rows: 0, peak_active: 0 }
    }
}

impl<W: OutputWriter> SimObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, snapshot: &MetricsSnapshot) {
        self.summary_rows += 1;
        self.peak_active = self.peak_active.max(snapshot.active);
        self.inner.on_tick_end(tick, snapshot);
    }

    fn on_flow_sample(&mut self, sample: &FlowSample) {
        self.sample_rows += 1;
        self.inner.on_flow_sample(sample);
    }

    fn on_sim_end(&mut self, final_snapshot: &MetricsSnapshot) {
        self.inner.on_sim_end(final_snapshot);
    }
}

// ── Printing ──────────────────────────────────────────────────────────────────

fn print_table(snapshot: &MetricsSnapshot) {
    println!("{:<18} {:>12}", "Metric", "Value");
    println!("{}", "-".repeat(31));
    for row in snapshot.rows() {
        println!("{:<18} {:>12}", row.name, row.value);
    }
}

fn print_zone_bars(snapshot: &MetricsSnapshot) {
    let max = snapshot.count_by_zone.iter().copied().max().unwrap_or(0).max(1);
    for zone in Zone::PROCESSING {
        let n = snapshot.count(zone);
        let len = n * BAR_WIDTH / max;
        println!("{:<10} {:>4} {}", zone.label(), n, "#".repeat(len));
    }
}

// ── Runs ──────────────────────────────────────────────────────────────────────

fn run_headless(config: &FlowConfig, minutes: u64) -> Result<()> {
    let mut sim = SimBuilder::new(config.clone()).build()?;

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(SimOutputObserver::new(writer));

    let t0 = Instant::now();
    let last = sim.run_for(Duration::from_secs(minutes * 60), &mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    println!("Simulated {minutes} min in {:.3} s", elapsed.as_secs_f64());
    println!("  tick_summaries.csv : {} rows", obs.summary_rows);
    println!("  flow_samples.csv   : {} rows", obs.sample_rows);
    println!("  peak active        : {}", obs.peak_active);
    println!();
    print_table(&last);
    println!();
    print_zone_bars(&last);
    Ok(())
}

fn run_live(config: &FlowConfig, secs: u64) -> Result<()> {
    let ctl = FlowController::new(config.clone());

    let ticks_per_line = (5_000 / config.tick_interval_ms).max(1);
    let lines = Arc::new(AtomicU64::new(0));
    let l = Arc::clone(&lines);
    ctl.subscribe(move |s| {
        if s.tick.0.is_multiple_of(ticks_per_line) {
            l.fetch_add(1, Ordering::Relaxed);
            println!(
                "[{}] check-in {:>3}  security {:>3}  gate {:>3}  boarding {:>3}  processed {:>4}  ({:.1} /min)",
                s.elapsed_label(),
                s.count(Zone::CheckIn),
                s.count(Zone::Security),
                s.count(Zone::Gate),
                s.count(Zone::Boarding),
                s.total_processed,
                s.throughput_per_minute,
            );
        }
    });

    info!("live run for {secs} s");
    ctl.start()?;
    thread::sleep(Duration::from_secs(secs));
    ctl.stop()?;

    println!();
    println!("Live run stopped after {} status lines", lines.load(Ordering::Relaxed));
    print_table(&ctl.snapshot());
    ctl.reset();
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    let args = parse_args()?;
    let config = load_config(&args)?;

    println!("=== terminal — rust_pflow passenger flow ===");
    if args.config_path.is_none() {
        println!("Scenario: {}", args.scenario.label());
    }
    println!(
        "Arrivals: {} /min ({:?})  |  Tick: {} ms  |  Seed: {}",
        config.arrival_rate_per_min, config.arrival, config.tick_interval_ms, config.seed
    );
    println!(
        "Dwell ticks: check-in {}, security {}, gate {}, boarding {}",
        config.dwell.check_in, config.dwell.security, config.dwell.gate, config.dwell.boarding
    );
    println!();

    run_headless(&config, args.minutes)?;

    if let Some(secs) = args.live_secs {
        println!();
        run_live(&config, secs)?;
    }
    Ok(())
}
