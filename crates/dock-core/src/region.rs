// ABOUTME: Dock regions and the pixel sizes attached to them.
// ABOUTME: Parses region names and "Npx" size strings used by persisted layouts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One of the five fixed slots of a container, arranged as a cross
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Top,
    Left,
    Center,
    Right,
    Bottom,
}

/// Axis a resizer drags along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Pointer x drives the size (left/right)
    Horizontal,
    /// Pointer y drives the size (top/bottom)
    Vertical,
}

impl Region {
    /// Declaration order, also the order `panels()` reports in
    pub const ALL: [Region; 5] = [
        Region::Top,
        Region::Left,
        Region::Center,
        Region::Right,
        Region::Bottom,
    ];

    /// Regions that carry a size and a resizer
    pub const EDGES: [Region; 4] = [Region::Top, Region::Left, Region::Right, Region::Bottom];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Top => "top",
            Region::Left => "left",
            Region::Center => "center",
            Region::Right => "right",
            Region::Bottom => "bottom",
        }
    }

    /// Position in `Region::ALL`
    pub fn index(self) -> usize {
        match self {
            Region::Top => 0,
            Region::Left => 1,
            Region::Center => 2,
            Region::Right => 3,
            Region::Bottom => 4,
        }
    }

    pub fn is_edge(self) -> bool {
        self != Region::Center
    }

    pub fn axis(self) -> Option<Axis> {
        match self {
            Region::Top | Region::Bottom => Some(Axis::Vertical),
            Region::Left | Region::Right => Some(Axis::Horizontal),
            Region::Center => None,
        }
    }

    /// +1 when dragging away from center grows the region (top, left),
    /// -1 when dragging toward center grows it (bottom, right)
    pub fn drag_sign(self) -> f32 {
        match self {
            Region::Top | Region::Left => 1.0,
            Region::Right | Region::Bottom => -1.0,
            Region::Center => 0.0,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid region: {0}")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Region::Top),
            "left" => Ok(Region::Left),
            "center" => Ok(Region::Center),
            "right" => Ok(Region::Right),
            "bottom" => Ok(Region::Bottom),
            other => Err(UnknownRegion(other.to_string())),
        }
    }
}

/// Anything a caller may name a region with.
///
/// Typed call sites pass a `Region`; collaborators that deal in names pass
/// a string and get an `UnknownRegion` back when it does not parse.
pub trait RegionName {
    fn to_region(&self) -> Result<Region, UnknownRegion>;
}

impl RegionName for Region {
    fn to_region(&self) -> Result<Region, UnknownRegion> {
        Ok(*self)
    }
}

impl RegionName for str {
    fn to_region(&self) -> Result<Region, UnknownRegion> {
        self.parse()
    }
}

impl RegionName for String {
    fn to_region(&self) -> Result<Region, UnknownRegion> {
        self.parse()
    }
}

impl<T: RegionName + ?Sized> RegionName for &T {
    fn to_region(&self) -> Result<Region, UnknownRegion> {
        (**self).to_region()
    }
}

/// A length in CSS-style pixels, persisted as `"Npx"`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "RawPixels", into = "String")]
pub struct Pixels(pub f32);

impl Pixels {
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Accepts `"200px"`, `"200"` and surrounding whitespace
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
        let value: f32 = number.parse().ok()?;
        value.is_finite().then_some(Self(value))
    }

    /// Floor at `min`, and cap at `max` when one is configured
    pub fn clamp(self, min: f32, max: Option<f32>) -> Self {
        let mut value = self.0.max(min);
        if let Some(max) = max {
            value = value.min(max.max(min));
        }
        Self(value)
    }
}

impl fmt::Display for Pixels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

impl From<Pixels> for String {
    fn from(px: Pixels) -> Self {
        px.to_string()
    }
}

/// Wire form of a size: either a JSON number or a string
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPixels {
    Number(f64),
    Text(String),
}

impl TryFrom<RawPixels> for Pixels {
    type Error = String;

    fn try_from(raw: RawPixels) -> Result<Self, Self::Error> {
        match raw {
            RawPixels::Number(n) => {
                let value = n as f32;
                if value.is_finite() {
                    Ok(Pixels(value))
                } else {
                    Err(format!("size out of range: {n}"))
                }
            }
            RawPixels::Text(text) => {
                Pixels::parse(&text).ok_or_else(|| format!("not a pixel size: {text:?}"))
            }
        }
    }
}

/// Declared sizes of the four edge regions. Center has none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionSizes {
    pub top: Pixels,
    pub left: Pixels,
    pub right: Pixels,
    pub bottom: Pixels,
}

impl RegionSizes {
    pub const DEFAULT_SIZE: f32 = 200.0;

    pub fn uniform(size: Pixels) -> Self {
        Self {
            top: size,
            left: size,
            right: size,
            bottom: size,
        }
    }

    pub fn get(&self, region: Region) -> Option<Pixels> {
        match region {
            Region::Top => Some(self.top),
            Region::Left => Some(self.left),
            Region::Right => Some(self.right),
            Region::Bottom => Some(self.bottom),
            Region::Center => None,
        }
    }

    /// Returns false for center, which has no size
    pub fn set(&mut self, region: Region, size: Pixels) -> bool {
        let slot = match region {
            Region::Top => &mut self.top,
            Region::Left => &mut self.left,
            Region::Right => &mut self.right,
            Region::Bottom => &mut self.bottom,
            Region::Center => return false,
        };
        *slot = size;
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (Region, Pixels)> + '_ {
        Region::EDGES
            .into_iter()
            .filter_map(|region| self.get(region).map(|size| (region, size)))
    }

    /// Overlay persisted values onto these sizes, clamping every entry.
    /// Unknown names and `center` are skipped. Returns how many were applied.
    pub fn merge(&mut self, saved: &BTreeMap<String, Pixels>, min: f32, max: Option<f32>) -> usize {
        let mut applied = 0;
        for (name, size) in saved {
            match name.parse::<Region>() {
                Ok(region) if self.set(region, size.clamp(min, max)) => applied += 1,
                Ok(_) => tracing::debug!("Ignoring saved size for center region"),
                Err(e) => tracing::debug!("Ignoring saved size: {}", e),
            }
        }
        applied
    }

    /// Clamp every entry into `[min, max]`
    pub fn clamp_all(&mut self, min: f32, max: Option<f32>) {
        for region in Region::EDGES {
            if let Some(size) = self.get(region) {
                self.set(region, size.clamp(min, max));
            }
        }
    }

    pub fn to_map(&self) -> BTreeMap<String, Pixels> {
        self.iter()
            .map(|(region, size)| (region.as_str().to_string(), size))
            .collect()
    }
}

impl Default for RegionSizes {
    fn default() -> Self {
        Self::uniform(Pixels(Self::DEFAULT_SIZE))
    }
}
