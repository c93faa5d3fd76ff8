// Outline polygons used for crash and hit decisions.
//
// Outlines translate with their owner's position but never rotate: rotation
// is a visual concern, collision uses the unrotated silhouette.

/// Axis-aligned bounding rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Rect {
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min_x <= other.max_x
            && other.min_x <= self.max_x
            && self.min_y <= other.max_y
            && other.min_y <= self.max_y
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    fn corners(&self) -> [[f32; 2]; 4] {
        [
            [self.min_x, self.min_y],
            [self.max_x, self.min_y],
            [self.max_x, self.max_y],
            [self.min_x, self.max_y],
        ]
    }
}

// Silhouette vertices in a 1000-unit design square, facing direction 0 (+x).
const AIRCRAFT_XS: [f32; 15] = [
    1000.0, 800.0, 600.0, 466.0, 333.0, 400.0, 160.0, 0.0, 0.0, 160.0, 400.0, 333.0, 466.0, 600.0,
    800.0,
];
const AIRCRAFT_YS: [f32; 15] = [
    500.0, 433.0, 433.0, 33.0, 0.0, 433.0, 440.0, 233.0, 766.0, 560.0, 566.0, 1000.0, 966.0, 566.0,
    566.0,
];
const ROCKET_XS: [f32; 13] = [
    1000.0, 875.0, 625.0, 500.0, 500.0, 125.0, 0.0, 0.0, 125.0, 500.0, 500.0, 625.0, 875.0,
];
const ROCKET_YS: [f32; 13] = [
    500.0, 438.0, 438.0, 313.0, 438.0, 438.0, 313.0, 687.0, 562.0, 562.0, 687.0, 562.0, 562.0,
];

const AIRCRAFT_SIZE: f32 = 70.0;
const ROCKET_SIZE: f32 = 40.0;

/// A closed outline polygon, stored relative to the owner's position.
#[derive(Debug, Clone)]
pub struct Hull {
    local: Vec<[f32; 2]>,
}

impl Hull {
    /// Aircraft silhouette. The design square is scaled to 90% and shifted
    /// so the rotation center sits slightly behind the geometric center.
    pub fn aircraft() -> Hull {
        const DELTA: f32 = 100.0;
        const SCALE: f32 = 0.9;
        Hull {
            local: AIRCRAFT_XS
                .iter()
                .zip(AIRCRAFT_YS.iter())
                .map(|(x, y)| {
                    [
                        scale_point(DELTA + SCALE * x, AIRCRAFT_SIZE),
                        scale_point(DELTA / 2.0 + SCALE * y, AIRCRAFT_SIZE),
                    ]
                })
                .collect(),
        }
    }

    /// Rocket silhouette.
    pub fn rocket() -> Hull {
        Hull {
            local: ROCKET_XS
                .iter()
                .zip(ROCKET_YS.iter())
                .map(|(x, y)| [scale_point(*x, ROCKET_SIZE), scale_point(*y, ROCKET_SIZE)])
                .collect(),
        }
    }

    /// World-space bounding rectangle of the hull placed at `pos`.
    pub fn bounds(&self, pos: [f32; 2]) -> Rect {
        let mut rect = Rect {
            min_x: f32::MAX,
            min_y: f32::MAX,
            max_x: f32::MIN,
            max_y: f32::MIN,
        };
        for p in &self.local {
            rect.min_x = rect.min_x.min(p[0] + pos[0]);
            rect.min_y = rect.min_y.min(p[1] + pos[1]);
            rect.max_x = rect.max_x.max(p[0] + pos[0]);
            rect.max_y = rect.max_y.max(p[1] + pos[1]);
        }
        rect
    }

    /// Even-odd containment test for a world-space point against the hull
    /// placed at `pos`.
    pub fn contains(&self, pos: [f32; 2], x: f32, y: f32) -> bool {
        let mut inside = false;
        let mut j = self.local.len() - 1;
        for i in 0..self.local.len() {
            let (xi, yi) = (self.local[i][0] + pos[0], self.local[i][1] + pos[1]);
            let (xj, yj) = (self.local[j][0] + pos[0], self.local[j][1] + pos[1]);
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// True if the hull placed at `pos` intersects the rectangle. Exact for
    /// simple polygons: vertex-in-rect, corner-in-polygon, and edge crossing
    /// are each sufficient.
    pub fn intersects(&self, pos: [f32; 2], rect: &Rect) -> bool {
        if !self.bounds(pos).overlaps(rect) {
            return false;
        }
        for p in &self.local {
            if rect.contains(p[0] + pos[0], p[1] + pos[1]) {
                return true;
            }
        }
        for [cx, cy] in rect.corners() {
            if self.contains(pos, cx, cy) {
                return true;
            }
        }
        let corners = rect.corners();
        let mut j = self.local.len() - 1;
        for i in 0..self.local.len() {
            let a = [self.local[i][0] + pos[0], self.local[i][1] + pos[1]];
            let b = [self.local[j][0] + pos[0], self.local[j][1] + pos[1]];
            for k in 0..4 {
                if segments_cross(a, b, corners[k], corners[(k + 1) % 4]) {
                    return true;
                }
            }
            j = i;
        }
        false
    }
}

fn scale_point(design: f32, size: f32) -> f32 {
    design * size / 1000.0 - size / 2.0
}

fn segments_cross(a: [f32; 2], b: [f32; 2], c: [f32; 2], d: [f32; 2]) -> bool {
    let orient = |p: [f32; 2], q: [f32; 2], r: [f32; 2]| {
        (q[0] - p[0]) * (r[1] - p[1]) - (q[1] - p[1]) * (r[0] - p[0])
    };
    let d1 = orient(c, d, a);
    let d2 = orient(c, d, b);
    let d3 = orient(a, b, c);
    let d4 = orient(a, b, d);
    ((d1 > 0.0) != (d2 > 0.0)) && ((d3 > 0.0) != (d4 > 0.0))
}
