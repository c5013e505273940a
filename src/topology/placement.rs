//! Randomized node placement with a minimum spacing rule.
//!
//! Candidates are drawn uniformly inside a region and rejected when they land
//! closer than the minimum distance to an already placed point. The number of
//! draws is capped; when the cap is hit (or the region is too small to sample
//! from) the whole cluster is laid out on a deterministic grid instead, so
//! placement always terminates.

use rand::Rng;

use super::types::Point;

/// Upper bound on candidate draws for a single cluster.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Region {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Shrink the region by `padding` on every side.
    ///
    /// Each axis gives up at most half of its extent, so a region with area
    /// keeps some.
    pub fn padded(&self, padding: f32) -> Self {
        let pad_x = padding.min(self.width().max(0.0) / 4.0);
        let pad_y = padding.min(self.height().max(0.0) / 4.0);
        Self {
            left: self.left + pad_x,
            top: self.top + pad_y,
            right: self.right - pad_x,
            bottom: self.bottom - pad_y,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// True when uniform sampling is possible (non-empty on both axes).
    pub fn is_samplable(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }
}

/// Place `count` points in `region`, keeping every pair at least `min_distance` apart.
///
/// Falls back to [`grid_placement`] after [`MAX_PLACEMENT_ATTEMPTS`] draws.
pub fn scatter<R: Rng + ?Sized>(rng: &mut R, region: Region, count: usize, min_distance: f32) -> Vec<Point> {
    if !region.is_samplable() {
        log::debug!("Placement region {:?} is empty, using grid placement", region);
        return grid_placement(region, count);
    }

    let mut placed: Vec<Point> = Vec::with_capacity(count);
    let mut attempts = 0;
    while placed.len() < count {
        if attempts >= MAX_PLACEMENT_ATTEMPTS {
            log::warn!(
                "Gave up random placement after {} attempts ({} of {} placed), using grid placement",
                attempts,
                placed.len(),
                count
            );
            return grid_placement(region, count);
        }
        attempts += 1;

        let candidate = Point::new(
            rng.gen_range(region.left..region.right),
            rng.gen_range(region.top..region.bottom),
        );
        if placed.iter().all(|p| p.distance(&candidate) >= min_distance) {
            placed.push(candidate);
        }
    }
    placed
}

/// Deterministic placement at the centres of a near-square grid of cells.
///
/// Spacing is whatever the region allows; on tiny regions points may end up
/// closer than the random placement's minimum distance.
pub fn grid_placement(region: Region, count: usize) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }
    // A collapsed axis gets a single line of cells so points stay distinct
    let columns = if region.width() <= 0.0 {
        1
    } else if region.height() <= 0.0 {
        count
    } else {
        (count as f32).sqrt().ceil() as usize
    };
    let rows = count.div_ceil(columns);
    let cell_width = region.width() / columns as f32;
    let cell_height = region.height() / rows as f32;

    (0..count)
        .map(|i| {
            let column = i % columns;
            let row = i / columns;
            Point::new(
                region.left + cell_width * (column as f32 + 0.5),
                region.top + cell_height * (row as f32 + 0.5),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_spacing(points: &[Point], min_distance: f32) {
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.distance(b) >= min_distance, "{:?} and {:?} closer than {}", a, b, min_distance);
            }
        }
    }

    #[test]
    fn scatter_respects_spacing_and_bounds() {
        let region = Region::new(30.0, 30.0, 370.0, 270.0);
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let points = scatter(&mut rng, region, 5, 60.0);
            assert_eq!(points.len(), 5);
            assert_spacing(&points, 60.0);
            for p in &points {
                assert!(p.x >= region.left && p.x <= region.right);
                assert!(p.y >= region.top && p.y <= region.bottom);
            }
        }
    }

    #[test]
    fn impossible_spacing_falls_back_to_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        let region = Region::new(0.0, 0.0, 50.0, 50.0);
        let points = scatter(&mut rng, region, 5, 1000.0);
        assert_eq!(points, grid_placement(region, 5));
    }

    #[test]
    fn empty_region_uses_grid_without_sampling() {
        let mut rng = StdRng::seed_from_u64(1);
        let region = Region::new(10.0, 10.0, 10.0, 40.0);
        let points = scatter(&mut rng, region, 3, 5.0);
        assert_eq!(points.len(), 3);
        assert!(points.iter().all(|p| p.x == 10.0));
        assert_spacing(&points, 10.0);
    }

    #[test]
    fn grid_on_flat_region_keeps_points_apart() {
        let points = grid_placement(Region::new(0.0, 50.0, 300.0, 50.0), 5);
        assert!(points.iter().all(|p| p.y == 50.0));
        assert_spacing(&points, 60.0);
    }

    #[test]
    fn padding_never_consumes_the_region() {
        let region = Region::new(0.0, 0.0, 60.0, 300.0).padded(30.0);
        assert_eq!(region, Region::new(15.0, 30.0, 45.0, 270.0));
        assert!(region.is_samplable());

        let roomy = Region::new(0.0, 0.0, 400.0, 300.0).padded(30.0);
        assert_eq!(roomy, Region::new(30.0, 30.0, 370.0, 270.0));
    }

    #[test]
    fn grid_placement_fills_rows_first() {
        let points = grid_placement(Region::new(0.0, 0.0, 300.0, 200.0), 5);
        // 3 columns x 2 rows
        assert_eq!(points[0], Point::new(50.0, 50.0));
        assert_eq!(points[2], Point::new(250.0, 50.0));
        assert_eq!(points[3], Point::new(50.0, 150.0));
        assert_spacing(&points, 100.0);
    }
}
