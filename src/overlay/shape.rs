use crate::foundation::core::{Line, Point};

/// What a shape means in the step illustration. Surfaces pick colors by role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeRole {
    /// Left end `a` of the bisection bracket.
    BracketLow,
    /// Right end `b` of the bisection bracket.
    BracketHigh,
    /// Bisection midpoint `c` on the axis.
    Midpoint,
    Tangent,
    /// Dotted drop from the Newton iterate up to the curve.
    Projection,
    IterationPath,
    PreviousPoint,
    NextPoint,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dash {
    Solid,
    Dashed,
    Dotted,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayShape {
    Line { role: ShapeRole, line: Line, dash: Dash },
    Marker { role: ShapeRole, at: Point },
}

impl OverlayShape {
    pub fn role(&self) -> ShapeRole {
        match self {
            OverlayShape::Line { role, .. } | OverlayShape::Marker { role, .. } => *role,
        }
    }
}

/// Shapes drawn over the base curve for one step, in painter's order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct Overlay {
    pub shapes: Vec<OverlayShape>,
}

impl Overlay {
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = (ShapeRole, Line, Dash)> + '_ {
        self.shapes.iter().filter_map(|s| match s {
            OverlayShape::Line { role, line, dash } => Some((*role, *line, *dash)),
            OverlayShape::Marker { .. } => None,
        })
    }

    pub fn markers(&self) -> impl Iterator<Item = (ShapeRole, Point)> + '_ {
        self.shapes.iter().filter_map(|s| match s {
            OverlayShape::Marker { role, at } => Some((*role, *at)),
            OverlayShape::Line { .. } => None,
        })
    }

    pub(crate) fn push_line(&mut self, role: ShapeRole, p0: Point, p1: Point, dash: Dash) {
        self.shapes.push(OverlayShape::Line {
            role,
            line: Line::new(p0, p1),
            dash,
        });
    }

    pub(crate) fn push_marker(&mut self, role: ShapeRole, at: Point) {
        self.shapes.push(OverlayShape::Marker { role, at });
    }
}
