//! Swept-circle collision queries
//!
//! The narrow-phase primitive the player kinematics rest on: sweep a circle
//! along a segment against static geometry and report the nearest surface
//! contact. The trait keeps the provider injectable; [`CellCaster`] is the
//! concrete provider over the streamed platform run.

use glam::Vec2;

use super::world::PlatformCell;

/// Contacts closer to the surface than this count as resting, not
/// penetrating, so a grounded circle slides along faces it is touching.
const CONTACT_SKIN: f32 = 1e-4;

/// Bit set of collision layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Mask selecting a single layer index
    pub fn layer(index: u32) -> Self {
        Self(1 << index)
    }

    pub fn contains(&self, index: u32) -> bool {
        self.0 & (1 << index) != 0
    }
}

/// Nearest contact found by a cast; `point` lies on the geometry surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastHit {
    pub point: Vec2,
}

/// Narrow-phase query against static geometry. Must be a pure read: casts
/// never mutate the geometry they sweep against.
pub trait ShapeCast {
    fn cast(
        &self,
        origin: Vec2,
        radius: f32,
        dir: Vec2,
        max_dist: f32,
        mask: LayerMask,
    ) -> Option<CastHit>;
}

/// Cast provider over the live platform-cell run.
///
/// Cells are axis-aligned squares on a single collision layer, sorted
/// ascending by x, which lets the contact probe window the slice instead of
/// scanning it.
pub struct CellCaster<'a> {
    cells: &'a [PlatformCell],
    half: Vec2,
    layer: u32,
}

impl<'a> CellCaster<'a> {
    pub fn new(cells: &'a [PlatformCell], cell_size: f32, layer: u32) -> Self {
        Self {
            cells,
            half: Vec2::splat(cell_size * 0.5),
            layer,
        }
    }

    /// Deepest penetrating contact of a circle resting at `center`, if any.
    /// Tangent contact (distance == radius) is not a hit.
    fn probe(&self, center: Vec2, radius: f32) -> Option<Vec2> {
        let min_x = center.x - radius - self.half.x;
        let max_x = center.x + radius + self.half.x;
        let start = self.cells.partition_point(|c| c.pos.x < min_x);

        let mut best: Option<(f32, Vec2)> = None;
        for cell in &self.cells[start..] {
            if cell.pos.x > max_x {
                break;
            }
            let lo = cell.pos - self.half;
            let hi = cell.pos + self.half;
            let closest = center.clamp(lo, hi);
            let dist = center.distance(closest);
            if dist + CONTACT_SKIN >= radius {
                continue;
            }
            let point = if dist > CONTACT_SKIN {
                closest
            } else {
                // Center is inside the cell; report the nearest face.
                nearest_face_point(center, lo, hi)
            };
            if best.is_none_or(|(d, _)| dist < d) {
                best = Some((dist, point));
            }
        }
        best.map(|(_, point)| point)
    }
}

impl ShapeCast for CellCaster<'_> {
    fn cast(
        &self,
        origin: Vec2,
        radius: f32,
        dir: Vec2,
        max_dist: f32,
        mask: LayerMask,
    ) -> Option<CastHit> {
        if !mask.contains(self.layer) {
            return None;
        }
        let dir = dir.normalize_or_zero();
        if dir == Vec2::ZERO || max_dist <= 0.0 {
            // Degenerate sweep: report start overlap only
            return self.probe(origin, radius).map(|point| CastHit { point });
        }
        // March the circle along the segment in sub-radius steps; the first
        // penetrating position yields the contact. Includes both endpoints.
        let step = (radius * 0.25).max(CONTACT_SKIN);
        let steps = (max_dist / step).ceil() as usize;
        for i in 0..=steps {
            let t = (i as f32 * step).min(max_dist);
            if let Some(point) = self.probe(origin + dir * t, radius) {
                return Some(CastHit { point });
            }
        }
        None
    }
}

/// Nearest point on the box surface to a center inside the box. Ties prefer
/// the top face, which is where a penetrating faller wants to surface.
fn nearest_face_point(center: Vec2, lo: Vec2, hi: Vec2) -> Vec2 {
    let to_left = center.x - lo.x;
    let to_right = hi.x - center.x;
    let to_bottom = center.y - lo.y;
    let to_top = hi.y - center.y;
    let nearest = to_top.min(to_bottom).min(to_left).min(to_right);
    if nearest == to_top {
        Vec2::new(center.x, hi.y)
    } else if nearest == to_bottom {
        Vec2::new(center.x, lo.y)
    } else if nearest == to_right {
        Vec2::new(hi.x, center.y)
    } else {
        Vec2::new(lo.x, center.y)
    }
}
