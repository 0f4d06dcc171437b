//! Seeded battlefield generation
//!
//! Layers are laid in a fixed order: open sea, islands, reefs, shallows,
//! the two bases with their island rings, then neutral forts. Reefs,
//! shallows and forts only ever replace open water.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::MapConfig;
use crate::core::error::{GameError, Result};
use crate::naval::battlefield::Battlefield;
use crate::naval::hex::HexCoord;
use crate::naval::terrain::TerrainKind;

/// Build a battlefield from `config.terrain_seed`
///
/// Grids below the minimum size are rejected with `GameError::Config`.
pub fn generate_battlefield(config: &MapConfig) -> Result<Battlefield> {
    config.validate().map_err(GameError::Config)?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.terrain_seed);
    let mut map = Battlefield::new(config.width, config.height);
    let (w, h) = (config.width, config.height);

    for _ in 0..config.island_clusters {
        let center = HexCoord::new(rng.gen_range(2..w - 3), rng.gen_range(2..h - 3));
        scatter(&mut map, center, 1, 0.7, TerrainKind::Island, false, &mut rng);
    }

    for _ in 0..config.reef_clusters {
        let center = HexCoord::new(rng.gen_range(0..w), rng.gen_range(0..h));
        if is_water(&map, center) {
            scatter(&mut map, center, 1, 0.5, TerrainKind::Reef, true, &mut rng);
        }
    }

    for _ in 0..config.shallow_patches {
        let center = HexCoord::new(rng.gen_range(0..w), rng.gen_range(0..h));
        if is_water(&map, center) {
            scatter(&mut map, center, 2, 0.6, TerrainKind::Shallow, true, &mut rng);
        }
    }

    let player_base = HexCoord::new(rng.gen_range(w / 4..w * 3 / 4), h - 2);
    place_base(&mut map, player_base, TerrainKind::PlayerBase, config.base_defense);
    let enemy_base = HexCoord::new(rng.gen_range(w / 4..w * 3 / 4), 1);
    place_base(&mut map, enemy_base, TerrainKind::EnemyBase, config.base_defense);

    let mut forts = 0;
    for _ in 0..config.forts {
        let coord = HexCoord::new(rng.gen_range(2..w - 3), rng.gen_range(h / 4..h * 3 / 4));
        if !is_water(&map, coord) {
            continue;
        }
        map.set_terrain(coord, TerrainKind::Fort);
        if let Some(tile) = map.tile_mut(coord) {
            tile.defense = config.fort_defense;
        }
        forts += 1;
    }

    tracing::debug!(
        seed = config.terrain_seed,
        forts,
        islands = map.count_terrain(TerrainKind::Island),
        reefs = map.count_terrain(TerrainKind::Reef),
        shallows = map.count_terrain(TerrainKind::Shallow),
        "Generated battlefield"
    );
    Ok(map)
}

fn is_water(map: &Battlefield, coord: HexCoord) -> bool {
    map.tile_at(coord)
        .is_some_and(|tile| tile.terrain == TerrainKind::Water)
}

/// Fill the square block of offset cells around `center`, each with probability `chance`
fn scatter(
    map: &mut Battlefield,
    center: HexCoord,
    half_size: i32,
    chance: f32,
    terrain: TerrainKind,
    water_only: bool,
    rng: &mut ChaCha8Rng,
) {
    for dx in -half_size..=half_size {
        for dy in -half_size..=half_size {
            // Roll for every cell, even off-map ones, so layouts depend only on the seed
            if rng.gen::<f32>() >= chance {
                continue;
            }
            let coord = HexCoord::new(center.col + dx, center.row + dy);
            if water_only && !is_water(map, coord) {
                continue;
            }
            map.set_terrain(coord, terrain);
        }
    }
}

fn place_base(map: &mut Battlefield, coord: HexCoord, terrain: TerrainKind, defense: i32) {
    map.set_terrain(coord, terrain);
    if let Some(tile) = map.tile_mut(coord) {
        tile.defense = defense;
    }
    for dx in -1..=1 {
        for dy in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let ring = HexCoord::new(coord.col + dx, coord.row + dy);
            // Never bury the other base
            if map
                .tile_at(ring)
                .is_some_and(|tile| tile.terrain.is_capture_site())
            {
                continue;
            }
            map.set_terrain(ring, TerrainKind::Island);
        }
    }
}
