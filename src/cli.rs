//! Command-line surface for the routing engine (spec §6, external
//! interfaces).
//!
//! The teacher has no CLI at all — its `main.rs` is a single hardcoded
//! demo run. This module is grounded on `examples/nsg-ethz-Chameleon`'s
//! `clap` derive layout (a top-level struct with global options plus a
//! `#[derive(Subcommand)]` enum per mode), which is the idiomatic shape
//! the wider pack converges on for multi-mode CLIs.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use crate::dijkstra::shortest_path;
use crate::error::CgrError;
use crate::ingest::{from_reader, IngestReport};
use crate::k_consume::k_routes_by_consumption;
use crate::k_yen::k_routes_by_diversification;
use crate::live_loop::{self, LiveLoopConfig};
use crate::plan::ContactPlan;
use crate::report::{multi_route_to_json, multi_route_to_text, route_to_json, route_to_text, snapshot_to_json};
use crate::route::{Filters, RouteRequest};
use crate::synth::{leo_ring, LeoRingConfig};

#[derive(Debug, Parser)]
#[command(name = "cgr", about = "Contact Graph Routing engine for DTN contact plans")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Emit JSON instead of the default text rendering.
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the single best route.
    Route(RouteArgs),
    /// Compute up to K routes by capacity consumption (spec §4.E).
    KConsume(KConsumeArgs),
    /// Compute up to K diverse routes (spec §4.F).
    KYen(KYenArgs),
    /// Run the live re-planning loop (spec §4.I).
    Live(LiveArgs),
    /// Generate a synthetic LEO-ring contact plan (demo/benchmark input).
    Gen(GenArgs),
}

#[derive(Debug, Args)]
pub struct PlanSource {
    /// Path to a contact-plan CSV file. Mutually exclusive with `--url`.
    #[arg(long)]
    pub plan: Option<PathBuf>,

    /// URL to fetch a contact-plan CSV from (requires the `http` feature).
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(Debug, Args)]
pub struct RequestArgs {
    #[arg(long)]
    pub src: u32,
    #[arg(long)]
    pub dst: u32,
    #[arg(long, default_value_t = 0.0)]
    pub t0: f64,
    #[arg(long)]
    pub bundle_bytes: f64,
    /// Relative TTL; 0 means no expiry.
    #[arg(long, default_value_t = 0.0)]
    pub expiry_rel: f64,
}

impl RequestArgs {
    fn into_request(self) -> RouteRequest {
        RouteRequest::new(self.src, self.dst, self.t0, self.bundle_bytes).with_expiry(self.expiry_rel)
    }
}

#[derive(Debug, Args)]
pub struct RouteArgs {
    #[command(flatten)]
    pub source: PlanSource,
    #[command(flatten)]
    pub request: RequestArgs,
}

#[derive(Debug, Args)]
pub struct KConsumeArgs {
    #[command(flatten)]
    pub source: PlanSource,
    #[command(flatten)]
    pub request: RequestArgs,
    #[arg(long, default_value_t = 3)]
    pub k: usize,
}

#[derive(Debug, Args)]
pub struct KYenArgs {
    #[command(flatten)]
    pub source: PlanSource,
    #[command(flatten)]
    pub request: RequestArgs,
    #[arg(long, default_value_t = 3)]
    pub k: usize,
}

#[derive(Debug, Args)]
pub struct LiveArgs {
    #[command(flatten)]
    pub source: PlanSource,
    #[arg(long)]
    pub src: u32,
    #[arg(long)]
    pub dst: u32,
    #[arg(long, default_value_t = 60.0)]
    pub tick: f64,
    #[arg(long)]
    pub period: Option<f64>,
    #[arg(long, default_value_t = 3)]
    pub k: usize,
    #[arg(long, default_value_t = 1e6)]
    pub bundle_bytes: f64,
    #[arg(long)]
    pub enable_consume: bool,
    #[arg(long)]
    pub enable_ewma: bool,
    #[arg(long, default_value_t = 0.2)]
    pub alpha: f64,
    #[arg(long, default_value_t = 1.0)]
    pub lambda: f64,
    /// Run a fixed number of cycles instead of until interrupted.
    #[arg(long)]
    pub cycles: Option<usize>,
}

#[derive(Debug, Args)]
pub struct GenArgs {
    #[arg(long, default_value_t = 6)]
    pub satellites: u32,
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    #[arg(long)]
    pub out: Option<PathBuf>,
}

fn load_plan(source: &PlanSource) -> Result<IngestReport, CgrError> {
    match (&source.plan, &source.url) {
        (Some(_), Some(_)) => Err(CgrError::InvalidArgument("--plan and --url are mutually exclusive".to_string())),
        (Some(path), None) => {
            let file = File::open(path).map_err(|source| CgrError::PlanIo { path: path.display().to_string(), source })?;
            Ok(from_reader(BufReader::new(file)))
        }
        (None, Some(url)) => fetch_plan(url),
        (None, None) => Err(CgrError::InvalidArgument("one of --plan or --url is required".to_string())),
    }
}

#[cfg(feature = "http")]
fn fetch_plan(url: &str) -> Result<IngestReport, CgrError> {
    crate::fetch::fetch_plan(url)
}

#[cfg(not(feature = "http"))]
fn fetch_plan(_url: &str) -> Result<IngestReport, CgrError> {
    Err(CgrError::InvalidArgument("--url requires the `http` feature".to_string()))
}

/// Validates a loaded plan and the node ids of a request against it before
/// handing either to the routing kernel, which has no `Err` path of its own
/// (spec §7) and would otherwise just report `found: false` for a typo'd
/// node id indistinguishable from a genuinely unreachable one.
fn validate_request(plan: &ContactPlan, src: u32, dst: u32) -> Result<(), CgrError> {
    let max_node = plan.max_node().ok_or(CgrError::EmptyPlan)?;
    if src > max_node {
        return Err(CgrError::InvalidNode(src));
    }
    if dst > max_node {
        return Err(CgrError::InvalidNode(dst));
    }
    Ok(())
}

/// Dispatches a parsed [`Cli`] invocation. Returns the rendered output as
/// a string for the caller to print, so the binary entry point stays a
/// thin wrapper.
pub fn run(cli: Cli) -> Result<String, CgrError> {
    match cli.command {
        Command::Route(args) => {
            let report = load_plan(&args.source)?;
            let plan = ContactPlan::new(report.contacts);
            validate_request(&plan, args.request.src, args.request.dst)?;
            let req = args.request.into_request();
            let route = shortest_path(&plan, &req, &Filters::none());
            Ok(if cli.json { route_to_json(&route).unwrap_or_default() } else { route_to_text(&route) })
        }
        Command::KConsume(args) => {
            let report = load_plan(&args.source)?;
            let plan = ContactPlan::new(report.contacts);
            validate_request(&plan, args.request.src, args.request.dst)?;
            let req = args.request.into_request();
            let result = k_routes_by_consumption(&plan, &req, &Filters::none(), args.k);
            Ok(if cli.json { multi_route_to_json(&result).unwrap_or_default() } else { multi_route_to_text(&result) })
        }
        Command::KYen(args) => {
            let report = load_plan(&args.source)?;
            let plan = ContactPlan::new(report.contacts);
            validate_request(&plan, args.request.src, args.request.dst)?;
            let req = args.request.into_request();
            let result = k_routes_by_diversification(&plan, &req, &Filters::none(), args.k);
            Ok(if cli.json { multi_route_to_json(&result).unwrap_or_default() } else { multi_route_to_text(&result) })
        }
        Command::Live(args) => run_live(cli.json, args),
        Command::Gen(args) => run_gen(args),
    }
}

fn run_live(json: bool, args: LiveArgs) -> Result<String, CgrError> {
    let report = load_plan(&args.source)?;
    let mut plan = ContactPlan::new(report.contacts);
    validate_request(&plan, args.src, args.dst)?;
    let cfg = LiveLoopConfig {
        src_node: args.src,
        dst_node: args.dst,
        tick: args.tick,
        period: args.period,
        k: args.k,
        bundle_bytes: args.bundle_bytes,
        enable_consume: args.enable_consume,
        enable_ewma: args.enable_ewma,
        alpha: args.alpha,
        lambda: args.lambda,
        max_cycles: args.cycles,
    };
    let stop = Arc::new(AtomicBool::new(false));
    if cfg.max_cycles.is_none() {
        live_loop::install_interrupt_handler(stop.clone())
            .map_err(|e| CgrError::InvalidArgument(format!("failed to install interrupt handler: {e}")))?;
    }

    let mut lines = Vec::new();
    live_loop::run(&mut plan, &cfg, &stop, 0.0, |snapshot| {
        lines.push(if json {
            snapshot_to_json(snapshot).unwrap_or_default()
        } else {
            format!("t={:.6} {}", snapshot.now, route_to_text(&snapshot.best))
        });
    });
    Ok(lines.join("\n"))
}

fn run_gen(args: GenArgs) -> Result<String, CgrError> {
    let cfg = LeoRingConfig { satellites: args.satellites, seed: args.seed, ..LeoRingConfig::default() };
    let plan = leo_ring(&cfg);
    let csv_text = plan_to_csv(&plan);
    if let Some(path) = args.out {
        std::fs::write(&path, &csv_text).map_err(|source| CgrError::PlanIo { path: path.display().to_string(), source })?;
        Ok(format!("wrote {} contacts to {}", plan.len(), path.display()))
    } else {
        Ok(csv_text)
    }
}

fn plan_to_csv(plan: &ContactPlan) -> String {
    let mut out = String::from("# id,from,to,t_start,t_end,owlt,rate_bps,setup_s,residual_bytes\n");
    for c in &plan.contacts {
        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            c.id, c.from, c.to, c.t_start, c.t_end, c.owlt, c.rate_bps, c.setup_s, c.residual_bytes
        ));
    }
    out
}
