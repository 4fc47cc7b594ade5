//! Procedural test trees for the demo world.

use rand::Rng;
use timber_fell::{BlockKind, GridWorld, VoxelCoord};

/// Species whose trunks are stems and whose canopies are wart blocks.
const NETHER_SPECIES: [&str; 2] = ["crimson", "warped"];

/// Chance of a shroomlight replacing a canopy voxel in nether trees.
const SHROOMLIGHT_CHANCE: f64 = 0.1;

/// Block kinds making up one species of tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeKinds {
    pub trunk: BlockKind,
    pub canopy: BlockKind,
    pub accent: Option<BlockKind>,
}

impl TreeKinds {
    pub fn for_species(species: &str) -> Self {
        let species = species.trim().to_ascii_lowercase();
        if NETHER_SPECIES.contains(&species.as_str()) {
            let canopy = if species == "crimson" {
                "nether_wart_block".to_string()
            } else {
                format!("{species}_wart_block")
            };
            Self {
                trunk: BlockKind::new(format!("{species}_stem")),
                canopy: BlockKind::new(canopy),
                accent: Some(BlockKind::new("shroomlight")),
            }
        } else {
            Self {
                trunk: BlockKind::new(format!("{species}_log")),
                canopy: BlockKind::new(format!("{species}_leaves")),
                accent: None,
            }
        }
    }
}

/// Counts of what [`plant_tree`] placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeSummary {
    pub trunk: usize,
    pub canopy: usize,
}

impl TreeSummary {
    pub fn total(&self) -> usize {
        self.trunk + self.canopy
    }
}

/// Plants a tree whose trunk starts directly above `base`, on a dirt floor.
///
/// `base` itself is left empty: it stands for the trunk voxel the player
/// just broke. The canopy spans the top three trunk levels and the level
/// above; its corners are randomly trimmed.
pub fn plant_tree<R: Rng>(
    world: &mut GridWorld,
    base: VoxelCoord,
    kinds: &TreeKinds,
    height: u32,
    canopy_radius: u32,
    rng: &mut R,
) -> TreeSummary {
    let height = height as i32;
    let r = canopy_radius as i32;
    let mut summary = TreeSummary::default();

    world.fill_box(
        base.offset(-r - 2, -1, -r - 2),
        base.offset(r + 2, -1, r + 2),
        "dirt",
    );

    for y in (height - 2).max(1)..=height + 1 {
        for x in -r..=r {
            for z in -r..=r {
                let corner = x.abs() == r && z.abs() == r;
                if corner && r > 0 && rng.gen_bool(0.5) {
                    continue;
                }
                let kind = match &kinds.accent {
                    Some(accent) if rng.gen_bool(SHROOMLIGHT_CHANCE) => accent.clone(),
                    _ => kinds.canopy.clone(),
                };
                world.set(base.offset(x, y, z), kind);
                summary.canopy += 1;
            }
        }
    }

    for y in 1..=height {
        let at = base.offset(0, y, 0);
        if world.get(at).is_some() {
            summary.canopy -= 1;
        }
        world.set(at, kinds.trunk.clone());
        summary.trunk += 1;
    }

    summary
}
