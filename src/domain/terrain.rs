// Height-field synthesis for a new match.

use rand::Rng;

/// Number of land base points along each axis. A base point is a randomly
/// determined height; base points also sit on the edges of the land.
pub const BASE_POINTS: usize = 11;
/// The base points divide the land into sectors of this side length.
pub const SECTOR_SIZE: usize = 250;
/// Side length of the land, derived from the base point layout.
pub const LAND_SIZE: usize = (BASE_POINTS - 1) * SECTOR_SIZE;

/// Minimum height (depth) of a land point.
pub const LAND_MIN: f32 = -800.0;
/// Maximum height of a land point.
pub const LAND_MAX: f32 = 2000.0;

/// Half-width of the per-cell roughness jitter added after interpolation.
const JITTER: f32 = 15.0;

/// Generation parameters. Kept injectable so tests can shrink the grid and
/// disable jitter.
#[derive(Debug, Clone, Copy)]
pub struct TerrainParams {
    /// Base points per axis (at least 2).
    pub base_points: usize,
    /// Grid cells between adjacent base points.
    pub sector_size: usize,
    /// Lower bound of every height.
    pub min_height: f32,
    /// Upper bound of every height.
    pub max_height: f32,
    /// Half-width of the uniform roughness jitter (0 disables it).
    pub jitter: f32,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            base_points: BASE_POINTS,
            sector_size: SECTOR_SIZE,
            min_height: LAND_MIN,
            max_height: LAND_MAX,
            jitter: JITTER,
        }
    }
}

impl TerrainParams {
    /// Side length of the land described by these parameters.
    pub fn land_size(&self) -> usize {
        (self.base_points - 1) * self.sector_size
    }
}

/// A square grid of heights, immutable once generated. The grid side is
/// `land_size + 1`: the extra row/column holds the outermost base points.
pub struct Terrain {
    size: usize,
    heights: Vec<f32>,
}

impl Terrain {
    /// Generates a random land.
    ///
    /// Base points get independent uniform heights. Each sector interior is
    /// filled by applying the quartic ease along one axis to produce the two
    /// edge profiles, then along the other axis between those profiles.
    /// Linear interpolation left visible break lines at sector borders; the
    /// ease has zero slope at both ends, so adjacent sectors join smoothly.
    pub fn generate(params: TerrainParams, rng: &mut impl Rng) -> Terrain {
        let size = params.land_size();
        let side = size + 1;
        let mut heights = vec![0.0f32; side * side];

        // Heights of the base points.
        for i in 0..params.base_points {
            for j in 0..params.base_points {
                let h = rng.gen_range(params.min_height..params.max_height);
                heights[i * params.sector_size * side + j * params.sector_size] = h;
            }
        }

        // Fill each sector by interpolating between its four corner points.
        let sector = params.sector_size;
        for i in 0..params.base_points - 1 {
            for j in 0..params.base_points - 1 {
                let y0 = i * sector;
                let x0 = j * sector;
                let corner_nw = heights[y0 * side + x0];
                let corner_ne = heights[y0 * side + x0 + sector];
                let corner_se = heights[(y0 + sector) * side + x0 + sector];
                let corner_sw = heights[(y0 + sector) * side + x0];

                for dy in 0..sector {
                    let y = y0 + dy;
                    let r = dy as f32 / sector as f32;
                    let west = interpolate(corner_nw, corner_sw, r);
                    let east = interpolate(corner_ne, corner_se, r);
                    heights[y * side + x0 + sector] = east;
                    for dx in 0..sector {
                        let x = x0 + dx;
                        heights[y * side + x] =
                            interpolate(west, east, dx as f32 / sector as f32);
                    }
                }
            }
        }

        // The last grid row lies outside every sector's dy loop; fill it by
        // easing between the bottom base points so the border never holds
        // extrapolated values.
        for j in 0..params.base_points - 1 {
            let x0 = j * sector;
            let sw = heights[size * side + x0];
            let se = heights[size * side + x0 + sector];
            for dx in 1..sector {
                heights[size * side + x0 + dx] = interpolate(sw, se, dx as f32 / sector as f32);
            }
        }

        // Roughness pass: independent jitter per interior cell, then clamp
        // everything back into range. The outermost row/column keeps the pure
        // base-point profile.
        for y in 0..size {
            for x in 0..size {
                let h = &mut heights[y * side + x];
                if params.jitter > 0.0 {
                    *h += rng.gen_range(-params.jitter..params.jitter);
                }
                *h = h.clamp(params.min_height, params.max_height);
            }
        }

        Terrain { size, heights }
    }

    /// Side length of the land.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Height of the land under a world-space point. Coordinates are floored
    /// to grid cells; out-of-range coordinates clamp to the border cell.
    pub fn height_at(&self, x: f32, y: f32) -> f32 {
        let xi = (x.max(0.0) as usize).min(self.size);
        let yi = (y.max(0.0) as usize).min(self.size);
        self.heights[yi * (self.size + 1) + xi]
    }
}

/// The quartic ease `f(r) = 2r^4 - 6r^3 + 5r^2`, satisfying f(0)=0, f(1)=1
/// and f'(0)=f'(1)=0, applied between two boundary values.
fn interpolate(value1: f32, value2: f32, ratio: f32) -> f32 {
    let r2 = ratio * ratio;
    value1 + (value2 - value1) * (2.0 * r2 * r2 - 6.0 * r2 * ratio + 5.0 * r2)
}
