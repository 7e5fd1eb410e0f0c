// ABOUTME: Pixel geometry for a container's cross-shaped region grid.
// ABOUTME: Computes region and resizer rectangles and hit-tests pointer positions.

use dock_core::{Axis, Region, RegionSizes};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Coordinate along the axis a resizer drags on
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// Rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Half-open on the far edges so neighbouring rects never both claim a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Resolved placement of every visible region and its resizer.
///
/// The grid is a cross: top and bottom span the full width, left, center
/// and right share the middle row, and center takes whatever is left over.
/// Resizers sit on the inner edge of their region and stack above regions.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFrame {
    bounds: Rect,
    regions: Vec<(Region, Rect)>,
    resizers: Vec<(Region, Rect)>,
}

impl LayoutFrame {
    pub fn compute(
        bounds: Rect,
        sizes: &RegionSizes,
        visible: impl Fn(Region) -> bool,
        resizer_thickness: f32,
    ) -> Self {
        let extent = |region: Region, available: f32| -> f32 {
            if !visible(region) {
                return 0.0;
            }
            sizes
                .get(region)
                .map_or(0.0, |size| size.get().min(available).max(0.0))
        };

        let top_h = extent(Region::Top, bounds.height);
        let bottom_h = extent(Region::Bottom, bounds.height - top_h);
        let middle_h = (bounds.height - top_h - bottom_h).max(0.0);
        let left_w = extent(Region::Left, bounds.width);
        let right_w = extent(Region::Right, bounds.width - left_w);
        let center_w = (bounds.width - left_w - right_w).max(0.0);
        let middle_y = bounds.y + top_h;

        let mut regions = Vec::with_capacity(5);
        for region in Region::ALL {
            if !visible(region) {
                continue;
            }
            let rect = match region {
                Region::Top => Rect::new(bounds.x, bounds.y, bounds.width, top_h),
                Region::Left => Rect::new(bounds.x, middle_y, left_w, middle_h),
                Region::Center => Rect::new(bounds.x + left_w, middle_y, center_w, middle_h),
                Region::Right => {
                    Rect::new(bounds.right() - right_w, middle_y, right_w, middle_h)
                }
                Region::Bottom => {
                    Rect::new(bounds.x, bounds.bottom() - bottom_h, bounds.width, bottom_h)
                }
            };
            regions.push((region, rect));
        }

        let half = resizer_thickness / 2.0;
        let resizers = regions
            .iter()
            .filter_map(|&(region, rect)| {
                let handle = match region {
                    Region::Top => Rect::new(rect.x, rect.bottom() - half, rect.width, resizer_thickness),
                    Region::Bottom => Rect::new(rect.x, rect.y - half, rect.width, resizer_thickness),
                    Region::Left => Rect::new(rect.right() - half, rect.y, resizer_thickness, rect.height),
                    Region::Right => Rect::new(rect.x - half, rect.y, resizer_thickness, rect.height),
                    Region::Center => return None,
                };
                Some((region, handle))
            })
            .collect();

        Self {
            bounds,
            regions,
            resizers,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn regions(&self) -> &[(Region, Rect)] {
        &self.regions
    }

    pub fn resizers(&self) -> &[(Region, Rect)] {
        &self.resizers
    }

    pub fn region(&self, region: Region) -> Option<Rect> {
        lookup(&self.regions, region)
    }

    pub fn resizer(&self, region: Region) -> Option<Rect> {
        lookup(&self.resizers, region)
    }

    /// Edge whose resizer is under `point`
    pub fn hit_resizer(&self, point: Point) -> Option<Region> {
        self.resizers
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(region, _)| *region)
    }

    /// Region under `point`, ignoring resizers
    pub fn hit_region(&self, point: Point) -> Option<Region> {
        self.regions
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(region, _)| *region)
    }
}

fn lookup(entries: &[(Region, Rect)], region: Region) -> Option<Rect> {
    entries
        .iter()
        .find(|(r, _)| *r == region)
        .map(|(_, rect)| *rect)
}
