//! Element node types - the building blocks of the formula tree
//!
//! Every node is an [`Element`]: a kind plus the geometry fields written by
//! the layout pass. Parent links are non-owning [`ElementId`] handles; the
//! tree's storage map owns the nodes themselves.

use crate::element_id::ElementId;
use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};

/// The four optional corner slots of an index element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexCorner {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl IndexCorner {
    /// All corners, reading order
    pub const ALL: [IndexCorner; 4] = [
        IndexCorner::UpperLeft,
        IndexCorner::UpperRight,
        IndexCorner::LowerLeft,
        IndexCorner::LowerRight,
    ];

    /// Whether this corner sits to the left of the content
    pub fn is_left(&self) -> bool {
        matches!(self, IndexCorner::UpperLeft | IndexCorner::LowerLeft)
    }

    /// Whether this corner sits above the content midline
    pub fn is_upper(&self) -> bool {
        matches!(self, IndexCorner::UpperLeft | IndexCorner::UpperRight)
    }
}

impl std::fmt::Display for IndexCorner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IndexCorner::UpperLeft => "upper-left",
            IndexCorner::UpperRight => "upper-right",
            IndexCorner::LowerLeft => "lower-left",
            IndexCorner::LowerRight => "lower-right",
        };
        write!(f, "{name}")
    }
}

/// The closed set of element variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ElementKind {
    /// A single glyph (one grapheme cluster); a terminal node
    Glyph { text: String },
    /// An ordered run of children sharing one baseline
    Sequence { children: Vec<ElementId> },
    /// A content sequence plus up to four corner index sequences
    Index {
        content: ElementId,
        upper_left: Option<ElementId>,
        upper_right: Option<ElementId>,
        lower_left: Option<ElementId>,
        lower_right: Option<ElementId>,
    },
}

impl ElementKind {
    /// The ids of every child this kind currently owns
    pub fn child_ids(&self) -> Vec<ElementId> {
        match self {
            ElementKind::Glyph { .. } => Vec::new(),
            ElementKind::Sequence { children } => children.clone(),
            ElementKind::Index {
                content,
                upper_left,
                upper_right,
                lower_left,
                lower_right,
            } => {
                let mut ids = vec![*content];
                ids.extend(upper_left.iter());
                ids.extend(upper_right.iter());
                ids.extend(lower_left.iter());
                ids.extend(lower_right.iter());
                ids
            }
        }
    }

    /// The id stored in a corner slot, if populated
    pub fn corner(&self, corner: IndexCorner) -> Option<ElementId> {
        match self {
            ElementKind::Index {
                upper_left,
                upper_right,
                lower_left,
                lower_right,
                ..
            } => match corner {
                IndexCorner::UpperLeft => *upper_left,
                IndexCorner::UpperRight => *upper_right,
                IndexCorner::LowerLeft => *lower_left,
                IndexCorner::LowerRight => *lower_right,
            },
            _ => None,
        }
    }
}

/// A node in the formula tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Back-reference to the owning element; `None` only for the root
    pub parent: Option<ElementId>,
    /// Offset relative to the parent's origin, assigned by the parent
    /// during layout
    pub position: Point,
    /// Extent computed by the layout pass
    pub size: Size,
    /// Vertical offset from the top edge to the baseline-alignment line
    pub midline: f32,
    /// The variant payload
    pub kind: ElementKind,
}

impl Element {
    fn with_kind(kind: ElementKind) -> Self {
        Self {
            parent: None,
            position: Point::origin(),
            size: Size::zero(),
            midline: 0.0,
            kind,
        }
    }

    /// A glyph leaf
    pub fn glyph(text: impl Into<String>) -> Self {
        Self::with_kind(ElementKind::Glyph { text: text.into() })
    }

    /// An empty sequence
    pub fn sequence() -> Self {
        Self::with_kind(ElementKind::Sequence {
            children: Vec::new(),
        })
    }

    /// An index node around the given content sequence
    pub fn index(content: ElementId) -> Self {
        Self::with_kind(ElementKind::Index {
            content,
            upper_left: None,
            upper_right: None,
            lower_left: None,
            lower_right: None,
        })
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.kind, ElementKind::Sequence { .. })
    }

    pub fn is_index(&self) -> bool {
        matches!(self.kind, ElementKind::Index { .. })
    }

    pub fn is_glyph(&self) -> bool {
        matches!(self.kind, ElementKind::Glyph { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_has_no_children() {
        let g = Element::glyph("x");
        assert!(g.is_glyph());
        assert!(g.kind.child_ids().is_empty());
    }

    #[test]
    fn test_index_child_ids_include_populated_slots() {
        let content = ElementId::new();
        let upper = ElementId::new();
        let mut el = Element::index(content);
        if let ElementKind::Index { upper_right, .. } = &mut el.kind {
            *upper_right = Some(upper);
        }
        let ids = el.kind.child_ids();
        assert_eq!(ids, vec![content, upper]);
        assert_eq!(el.kind.corner(IndexCorner::UpperRight), Some(upper));
        assert_eq!(el.kind.corner(IndexCorner::LowerLeft), None);
    }

    #[test]
    fn test_corner_sides() {
        assert!(IndexCorner::UpperLeft.is_left());
        assert!(IndexCorner::UpperLeft.is_upper());
        assert!(!IndexCorner::LowerRight.is_left());
        assert!(!IndexCorner::LowerRight.is_upper());
    }
}
