//! Shape and volume definitions.
//!
//! Each 2D shape carries a power-of-two weight, and each 3D volume is the sum
//! of exactly two shape weights. Volumes are stored as raw weights so that
//! dissection arithmetic can pass through values outside the closed set.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Numeric weight of a shape or volume.
pub type Weight = i32;

/// Number of statue positions (left, middle, right).
pub const POSITIONS: usize = 3;

/// One shape per statue position.
pub type ShapeAssignment = [ShapeKind; POSITIONS];

/// One volume weight per statue position, aligned with [`ShapeAssignment`].
pub type VolumeAssignment = [Weight; POSITIONS];

/// A base 2D shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Circle,
    Triangle,
    Square,
}

impl ShapeKind {
    /// Every shape, in weight order.
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Circle, ShapeKind::Triangle, ShapeKind::Square];

    #[inline]
    pub const fn weight(self) -> Weight {
        match self {
            ShapeKind::Circle => 1,
            ShapeKind::Triangle => 2,
            ShapeKind::Square => 4,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            ShapeKind::Circle => 'C',
            ShapeKind::Triangle => 'T',
            ShapeKind::Square => 'S',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Square => "square",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "circle" => Ok(ShapeKind::Circle),
            "t" | "triangle" => Ok(ShapeKind::Triangle),
            "s" | "square" => Ok(ShapeKind::Square),
            _ => Err(ParseError::Shape(s.to_string())),
        }
    }
}

/// A 3D volume: the sum of two shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VolumeKind {
    Sphere,
    Tetrahedron,
    Cube,
    Cone,
    Cylinder,
    Prism,
}

impl VolumeKind {
    pub const ALL: [VolumeKind; 6] = [
        VolumeKind::Sphere,
        VolumeKind::Tetrahedron,
        VolumeKind::Cube,
        VolumeKind::Cone,
        VolumeKind::Cylinder,
        VolumeKind::Prism,
    ];

    #[inline]
    pub const fn weight(self) -> Weight {
        match self {
            VolumeKind::Sphere => 2,
            VolumeKind::Tetrahedron => 4,
            VolumeKind::Cube => 8,
            VolumeKind::Cone => 3,
            VolumeKind::Cylinder => 5,
            VolumeKind::Prism => 6,
        }
    }

    /// Looks up the volume with the given weight.
    ///
    /// Returns `None` for weights that no pair of shapes can produce.
    pub const fn from_weight(weight: Weight) -> Option<Self> {
        match weight {
            2 => Some(VolumeKind::Sphere),
            4 => Some(VolumeKind::Tetrahedron),
            8 => Some(VolumeKind::Cube),
            3 => Some(VolumeKind::Cone),
            5 => Some(VolumeKind::Cylinder),
            6 => Some(VolumeKind::Prism),
            _ => None,
        }
    }

    /// The volume built from two shapes. Order does not matter.
    pub const fn from_pair(a: ShapeKind, b: ShapeKind) -> Self {
        use ShapeKind::*;
        match (a, b) {
            (Circle, Circle) => VolumeKind::Sphere,
            (Triangle, Triangle) => VolumeKind::Tetrahedron,
            (Square, Square) => VolumeKind::Cube,
            (Circle, Triangle) | (Triangle, Circle) => VolumeKind::Cone,
            (Circle, Square) | (Square, Circle) => VolumeKind::Cylinder,
            (Triangle, Square) | (Square, Triangle) => VolumeKind::Prism,
        }
    }

    /// The two shapes this volume is made of, lightest first.
    pub const fn components(self) -> (ShapeKind, ShapeKind) {
        use ShapeKind::*;
        match self {
            VolumeKind::Sphere => (Circle, Circle),
            VolumeKind::Tetrahedron => (Triangle, Triangle),
            VolumeKind::Cube => (Square, Square),
            VolumeKind::Cone => (Circle, Triangle),
            VolumeKind::Cylinder => (Circle, Square),
            VolumeKind::Prism => (Triangle, Square),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            VolumeKind::Sphere => "sphere",
            VolumeKind::Tetrahedron => "tetrahedron",
            VolumeKind::Cube => "cube",
            VolumeKind::Cone => "cone",
            VolumeKind::Cylinder => "cylinder",
            VolumeKind::Prism => "prism",
        }
    }
}

impl fmt::Display for VolumeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shapes used by the paired generator when no assignment is given yet.
pub const CANONICAL_SHAPES: ShapeAssignment =
    [ShapeKind::Circle, ShapeKind::Triangle, ShapeKind::Square];

/// Parses a comma-separated shape triple such as `C,T,S`.
pub fn parse_shapes(s: &str) -> Result<ShapeAssignment, ParseError> {
    let parsed = s
        .split(',')
        .map(str::parse::<ShapeKind>)
        .collect::<Result<Vec<_>, _>>()?;
    <ShapeAssignment>::try_from(parsed).map_err(|_| ParseError::Arity(s.to_string()))
}

/// Parses a comma-separated volume triple. Accepts names or raw weights.
pub fn parse_volumes(s: &str) -> Result<VolumeAssignment, ParseError> {
    let parsed = s
        .split(',')
        .map(|part| {
            let part = part.trim();
            if let Ok(weight) = part.parse::<Weight>() {
                return Ok(weight);
            }
            VolumeKind::ALL
                .iter()
                .find(|kind| kind.name().eq_ignore_ascii_case(part))
                .map(|kind| kind.weight())
                .ok_or_else(|| ParseError::Volume(part.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    <VolumeAssignment>::try_from(parsed).map_err(|_| ParseError::Arity(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_pair_maps_to_its_weight_sum() {
        for a in ShapeKind::ALL {
            for b in ShapeKind::ALL {
                let volume = VolumeKind::from_pair(a, b);
                assert_eq!(volume.weight(), a.weight() + b.weight());
                assert_eq!(VolumeKind::from_weight(a.weight() + b.weight()), Some(volume));
            }
        }
    }

    #[test]
    fn test_components_rebuild_the_volume() {
        for volume in VolumeKind::ALL {
            let (a, b) = volume.components();
            assert_eq!(VolumeKind::from_pair(a, b), volume);
            assert!(a <= b, "{volume} components should be lightest first");
        }
    }

    #[test]
    fn test_unreachable_weights_have_no_volume() {
        for weight in [-3, 0, 1, 7, 9, 12] {
            assert_eq!(VolumeKind::from_weight(weight), None);
        }
    }

    #[test]
    fn test_parse_shapes_accepts_letters_and_names() {
        assert_eq!(
            parse_shapes("C, triangle,S"),
            Ok([ShapeKind::Circle, ShapeKind::Triangle, ShapeKind::Square])
        );
        assert!(matches!(parse_shapes("C,T"), Err(ParseError::Arity(_))));
        assert!(matches!(parse_shapes("C,T,X"), Err(ParseError::Shape(_))));
    }

    #[test]
    fn test_parse_volumes_accepts_names_and_weights() {
        assert_eq!(parse_volumes("cone,8,Sphere"), Ok([3, 8, 2]));
        assert!(matches!(parse_volumes("cone,blob,2"), Err(ParseError::Volume(_))));
    }
}
