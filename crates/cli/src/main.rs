use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use maxrect::prelude::*;
use serde_json::json;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod io;
mod provenance;

use io::{read_polygon, write_json, PolygonFile, RectangleReport};
use provenance::{current_git_rev, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "maxrect")]
#[command(about = "Largest inscribed rectangle of a simple polygon")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Find the rectangle for a polygon JSON file and write it as JSON
    Solve(SolveArgs),
    /// Write a reproducible random polygon as JSON
    Random(RandomArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Auto,
    Convex,
    General,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Auto => Variant::Auto,
            VariantArg::Convex => Variant::Convex,
            VariantArg::General => Variant::General,
        }
    }
}

#[derive(Args, Debug)]
struct SolveArgs {
    /// Polygon JSON: `[[x, y], ...]` or `{"vertices": [[x, y], ...]}`
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    #[arg(long, value_enum, default_value_t = VariantArg::Auto)]
    variant: VariantArg,
    /// Boundary sample spacing; defaults to the variant's reference value
    #[arg(long)]
    point_gap: Option<f64>,
    #[arg(long, default_value_t = 1)]
    step_back: u32,
    #[arg(long, default_value_t = 12)]
    refine_bisections: u32,
    /// Disable the parallel outer loop
    #[arg(long)]
    serial: bool,
}

#[derive(Args, Debug)]
struct RandomArgs {
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 0)]
    index: u64,
    #[arg(long, default_value_t = 12)]
    vertices: usize,
    /// Emit the convex hull of the jittered ring
    #[arg(long)]
    convex: bool,
    #[arg(long)]
    out: PathBuf,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve(args) => solve(&args).map(|_| ()),
        Action::Random(args) => random(&args),
        Action::Report => report(),
    }
}

fn search_cfg(args: &SolveArgs) -> SearchCfg {
    let variant = Variant::from(args.variant);
    let mut cfg = SearchCfg::for_variant(variant);
    if let Some(gap) = args.point_gap {
        cfg.point_gap = gap;
    }
    cfg.step_back = args.step_back;
    cfg.refine_bisections = args.refine_bisections;
    cfg.parallel = !args.serial;
    cfg
}

fn solve(args: &SolveArgs) -> Result<RectangleReport> {
    let cfg = search_cfg(args);
    tracing::info!(
        input = %args.input.display(),
        out = %args.out.display(),
        variant = cfg.variant.name(),
        point_gap = cfg.point_gap,
        "solve"
    );
    let polygon = read_polygon(&args.input)?;
    let oracle = GeoOracle::with_cfg(&polygon, cfg.geom);
    let t0 = Instant::now();
    let sol = find_rectangle_with(&polygon, &oracle, &cfg, &CancelToken::new())
        .with_context(|| format!("searching rectangle in {}", args.input.display()))?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;
    tracing::info!(
        area = sol.area,
        variant = sol.variant.name(),
        samples = sol.samples,
        elapsed_ms,
        "solved"
    );

    let report = RectangleReport::new(&sol, elapsed_ms);
    write_json(&args.out, &report)?;
    write_sidecar(
        &args.out,
        Payload::new(json!({
            "command": "solve",
            "input": args.input.to_string_lossy(),
            "variant": cfg.variant.name(),
            "resolved_variant": sol.variant.name(),
            "point_gap": cfg.point_gap,
            "step_back": cfg.step_back,
            "refine_bisections": cfg.refine_bisections,
            "parallel": cfg.parallel
        })),
    )?;
    Ok(report)
}

fn random(args: &RandomArgs) -> Result<()> {
    tracing::info!(seed = args.seed, index = args.index, vertices = args.vertices, "random");
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(args.vertices),
        convex: args.convex,
        ..RadialCfg::default()
    };
    let tok = ReplayToken {
        seed: args.seed,
        index: args.index,
    };
    let polygon = draw_polygon_radial(cfg, tok).context("drawing random polygon")?;
    write_json(&args.out, &PolygonFile::from_polygon(&polygon))?;
    write_sidecar(
        &args.out,
        Payload::new(json!({
            "command": "random",
            "seed": args.seed,
            "index": args.index,
            "vertices": args.vertices,
            "convex": args.convex
        })),
    )?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": current_git_rev(),
        "maxrect_version": maxrect::VERSION,
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
