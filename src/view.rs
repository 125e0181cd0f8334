use std::fmt;
use std::str::FromStr;

use crate::error::IllusionError;
use crate::suggest::closest_match;

/// A viewing direction.
///
/// `Direct` looks straight down with no parallax. The other four tilt the
/// view one cell along an axis, which lets a raised neighbor in that
/// direction hide the lower cell behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewDirection {
    Direct,
    Up,
    Down,
    Left,
    Right,
}

impl ViewDirection {
    pub const ALL: [ViewDirection; 5] = [
        ViewDirection::Direct,
        ViewDirection::Up,
        ViewDirection::Down,
        ViewDirection::Left,
        ViewDirection::Right,
    ];

    /// Row/column delta to the occluding neighbor, `None` for `Direct`.
    pub fn offset(self) -> Option<(isize, isize)> {
        match self {
            ViewDirection::Direct => None,
            ViewDirection::Up => Some((-1, 0)),
            ViewDirection::Down => Some((1, 0)),
            ViewDirection::Left => Some((0, -1)),
            ViewDirection::Right => Some((0, 1)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ViewDirection::Direct => "direct",
            ViewDirection::Up => "up",
            ViewDirection::Down => "down",
            ViewDirection::Left => "left",
            ViewDirection::Right => "right",
        }
    }

    /// The neighbor of `(row, col)` in this direction, if it lies inside a
    /// `height x width` grid.
    pub fn neighbor(
        self,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    ) -> Option<(usize, usize)> {
        let (dy, dx) = self.offset()?;
        let r = row.checked_add_signed(dy)?;
        let c = col.checked_add_signed(dx)?;
        if r < height && c < width {
            Some((r, c))
        } else {
            None
        }
    }
}

impl fmt::Display for ViewDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewDirection {
    type Err = IllusionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        ViewDirection::ALL
            .iter()
            .copied()
            .find(|view| view.name() == normalized)
            .ok_or_else(|| IllusionError::UnknownView {
                name: s.to_string(),
                suggestion: closest_match(&normalized, &ViewDirection::ALL.map(ViewDirection::name)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_unit_steps() {
        assert_eq!(ViewDirection::Direct.offset(), None);
        assert_eq!(ViewDirection::Up.offset(), Some((-1, 0)));
        assert_eq!(ViewDirection::Down.offset(), Some((1, 0)));
        assert_eq!(ViewDirection::Left.offset(), Some((0, -1)));
        assert_eq!(ViewDirection::Right.offset(), Some((0, 1)));
    }

    #[test]
    fn test_neighbor_respects_grid_edges() {
        assert_eq!(ViewDirection::Up.neighbor(0, 0, 3, 3), None);
        assert_eq!(ViewDirection::Left.neighbor(1, 0, 3, 3), None);
        assert_eq!(ViewDirection::Down.neighbor(2, 1, 3, 3), None);
        assert_eq!(ViewDirection::Right.neighbor(1, 2, 3, 3), None);

        assert_eq!(ViewDirection::Up.neighbor(1, 1, 3, 3), Some((0, 1)));
        assert_eq!(ViewDirection::Down.neighbor(1, 1, 3, 3), Some((2, 1)));
        assert_eq!(ViewDirection::Left.neighbor(1, 1, 3, 3), Some((1, 0)));
        assert_eq!(ViewDirection::Right.neighbor(1, 1, 3, 3), Some((1, 2)));
        assert_eq!(ViewDirection::Direct.neighbor(1, 1, 3, 3), None);
    }

    #[test]
    fn test_names_round_trip() {
        for view in ViewDirection::ALL {
            assert_eq!(view.to_string().parse::<ViewDirection>().unwrap(), view);
        }
        assert_eq!("  DOWN ".parse::<ViewDirection>().unwrap(), ViewDirection::Down);
    }

    #[test]
    fn test_unknown_view_suggests_closest() {
        match "rigth".parse::<ViewDirection>() {
            Err(IllusionError::UnknownView { suggestion, .. }) => {
                assert_eq!(suggestion, Some("right"));
            }
            other => panic!("expected UnknownView, got {:?}", other),
        }
    }
}
