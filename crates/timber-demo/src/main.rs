//! Demo binary: plants a tree, breaks its lowest log, and fells the rest.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p timber-demo -- --species spruce --height 9`.
//! Run with `cargo run -p timber-demo -- --scene my_tree.ron` for a hand-built world.
//! Pass `--sneak` to see the sneaking opt-out.

mod scene;
mod tree;

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use timber_config::{CliArgs, Config, default_config_dir};
use timber_fell::{
    AgentId, BlockBrokenEvent, BlockKind, FellScheduler, GridWorld, Posture, StopReason,
    VoxelCoord,
};
use tracing::{error, info, warn};

use crate::scene::Scene;
use crate::tree::{TreeKinds, plant_tree};

const DEMO_PLAYER: AgentId = AgentId(1);

/// CLI arguments for the demo binary.
#[derive(Parser, Debug)]
#[command(name = "timber-demo", about = "Fell a tree from a single broken log")]
struct DemoArgs {
    #[command(flatten)]
    common: CliArgs,

    /// Tree species for the generated tree (oak, birch, spruce, crimson, ...).
    #[arg(long, default_value = "oak")]
    species: String,

    /// Trunk height of the generated tree.
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..=64))]
    height: u32,

    /// Canopy radius of the generated tree.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(0..=8))]
    canopy_radius: u32,

    /// Seed for canopy variation.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Load the world from a RON scene instead of generating a tree.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Break the log while sneaking.
    #[arg(long)]
    sneak: bool,
}

fn main() {
    let args = DemoArgs::parse();

    // Resolve config directory
    let config_dir = args
        .common
        .config
        .clone()
        .or_else(default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args.common);

    let log_dir = config_dir.join("logs");
    timber_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = config.validate() {
        error!("{e}");
        std::process::exit(2);
    }

    let (mut world, origin, origin_kind) = match &args.scene {
        Some(path) => match Scene::load(path) {
            Ok(scene) => {
                info!("Loaded scene {}", path.display());
                (scene.build_world(), scene.origin, scene.origin_kind)
            }
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        },
        None => generated_world(&args),
    };

    let before = world.voxel_count();
    info!(
        "World ready: {} voxels, breaking {} at {}",
        before, origin_kind, origin
    );

    let posture = if args.sneak {
        Posture::Sneaking
    } else {
        Posture::Standing
    };
    let event = BlockBrokenEvent::new(origin_kind, origin, DEMO_PLAYER, posture);

    // Accept on this tick, run on the next.
    let mut scheduler = FellScheduler::new();
    if !scheduler.on_trunk_broken(event, config.fell.settings()) {
        info!("Break ignored (sneaking or not a trunk); nothing felled");
        return;
    }

    for report in scheduler.run_pending(&mut world) {
        info!(
            "Felled {} voxel(s) from {} | unloaded skips: {} | destroy failures: {} | gather misses: {}",
            report.break_count(),
            report.origin,
            report.unloaded_skips,
            report.destroy_failures,
            report.gather_failures,
        );
        if report.stop_reason == StopReason::BudgetExhausted {
            warn!(
                "Stopped at max_break_count = {}; part of the tree is still standing",
                config.fell.max_break_count
            );
        }
    }

    info!(
        "Inventory: {} item(s), {} drop(s) left on the ground, {} voxel(s) remaining",
        world.inventory(DEMO_PLAYER).len(),
        world.drops().len(),
        world.voxel_count(),
    );
}

fn generated_world(args: &DemoArgs) -> (GridWorld, VoxelCoord, BlockKind) {
    let mut world = GridWorld::new();
    let mut rng = Xoshiro256StarStar::seed_from_u64(args.seed);
    let base = VoxelCoord::new(0, 64, 0);
    let kinds = TreeKinds::for_species(&args.species);

    let summary = plant_tree(
        &mut world,
        base,
        &kinds,
        args.height,
        args.canopy_radius,
        &mut rng,
    );
    info!(
        "Planted {}: {} voxels ({} trunk + {} canopy)",
        args.species,
        summary.total(),
        summary.trunk,
        summary.canopy
    );

    (world, base, kinds.trunk)
}
