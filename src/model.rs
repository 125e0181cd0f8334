use crate::error::{IllusionError, Result};
use crate::expr::Unknown;
use crate::pattern::Pattern;

/// The unknowns of one illusion: an elevation field and a color field over
/// a fixed `height x width` grid.
///
/// Unknowns are numbered densely. Elevation occupies `0..h*w`, color
/// `h*w..2*h*w`, both row-major.
#[derive(Debug, Clone)]
pub struct IllusionModel {
    height: usize,
    width: usize,
    elevation: Vec<Unknown>,
    color: Vec<Unknown>,
}

impl IllusionModel {
    pub fn new(height: usize, width: usize) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(IllusionError::EmptyGrid { height, width });
        }

        let cells = height * width;
        let elevation = (0..cells).map(Unknown::new).collect();
        let color = (cells..2 * cells).map(Unknown::new).collect();

        Ok(IllusionModel {
            height,
            width,
            elevation,
            color,
        })
    }

    /// A model with the same grid as `pattern`.
    pub fn for_pattern(pattern: &Pattern) -> Self {
        let (height, width) = pattern.dimensions();
        IllusionModel::new(height, width).expect("patterns are never empty")
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn num_unknowns(&self) -> usize {
        self.elevation.len() + self.color.len()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Whether the cell is raised.
    pub fn elevation_at(&self, row: usize, col: usize) -> Unknown {
        self.elevation[self.cell_index(row, col)]
    }

    /// Whether the cell is painted.
    pub fn color_at(&self, row: usize, col: usize) -> Unknown {
        self.color[self.cell_index(row, col)]
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| (row, col)))
    }

    fn cell_index(&self, row: usize, col: usize) -> usize {
        assert!(
            self.contains(row, col),
            "cell ({}, {}) outside {}x{} grid",
            row,
            col,
            self.height,
            self.width
        );
        row * self.width + col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocates_two_unknowns_per_cell() {
        let model = IllusionModel::new(3, 4).unwrap();
        assert_eq!(model.num_unknowns(), 24);
        assert_eq!(model.cells().count(), 12);
    }

    #[test]
    fn test_unknowns_are_distinct_and_dense() {
        let model = IllusionModel::new(2, 3).unwrap();
        let mut seen: Vec<usize> = model
            .cells()
            .flat_map(|(r, c)| [model.elevation_at(r, c).index(), model.color_at(r, c).index()])
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..12).collect::<Vec<_>>());

        assert_eq!(model.elevation_at(1, 2).index(), 5);
        assert_eq!(model.color_at(0, 0).index(), 6);
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert!(matches!(
            IllusionModel::new(0, 5),
            Err(IllusionError::EmptyGrid { height: 0, width: 5 })
        ));
        assert!(IllusionModel::new(5, 0).is_err());
    }

    #[test]
    fn test_for_pattern_copies_dimensions() {
        let pattern = Pattern::parse("O..\n.O.").unwrap();
        assert_eq!(IllusionModel::for_pattern(&pattern).dimensions(), (2, 3));
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn test_out_of_bounds_access_panics() {
        let model = IllusionModel::new(2, 2).unwrap();
        model.color_at(2, 0);
    }
}
