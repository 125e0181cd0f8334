// Turns a solved assignment back into text.

use crate::expr::Valuation;
use crate::model::IllusionModel;
use crate::pattern::Pattern;
use crate::project::observed_color;
use crate::view::ViewDirection;

/// What the direct view shows at one cell: both fields at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectCell {
    ElevatedColored,
    FlatColored,
    ElevatedUncolored,
    Background,
}

impl DirectCell {
    pub fn from_values(color: bool, elevation: bool) -> Self {
        match (color, elevation) {
            (true, true) => DirectCell::ElevatedColored,
            (true, false) => DirectCell::FlatColored,
            (false, true) => DirectCell::ElevatedUncolored,
            (false, false) => DirectCell::Background,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            DirectCell::ElevatedColored => 'O',
            DirectCell::FlatColored => 'o',
            DirectCell::ElevatedUncolored => '*',
            DirectCell::Background => '.',
        }
    }
}

pub fn direct_cell<V: Valuation + ?Sized>(
    model: &IllusionModel,
    valuation: &V,
    row: usize,
    col: usize,
) -> DirectCell {
    DirectCell::from_values(
        valuation.value(model.color_at(row, col)),
        valuation.value(model.elevation_at(row, col)),
    )
}

/// Four-symbol rendering of both fields, one line per row.
pub fn render_direct<V: Valuation + ?Sized>(model: &IllusionModel, valuation: &V) -> String {
    let (height, width) = model.dimensions();
    let mut output = String::with_capacity(height * (width + 1));
    for row in 0..height {
        for col in 0..width {
            output.push(direct_cell(model, valuation, row, col).symbol());
        }
        output.push('\n');
    }
    output
}

/// What a viewer looking from `view` perceives.
pub fn observed_pattern<V: Valuation + ?Sized>(
    model: &IllusionModel,
    valuation: &V,
    view: ViewDirection,
) -> Pattern {
    let (height, width) = model.dimensions();
    Pattern::from_fn(height, width, |row, col| {
        observed_color(model, row, col, view).eval(valuation)
    })
}

pub fn render_view<V: Valuation + ?Sized>(
    model: &IllusionModel,
    valuation: &V,
    view: ViewDirection,
) -> String {
    observed_pattern(model, valuation, view).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Build a value vector from separate elevation and color grids.
    fn values(elevation: &str, color: &str) -> Vec<bool> {
        let elevation = Pattern::parse(elevation).unwrap();
        let color = Pattern::parse(color).unwrap();
        elevation
            .rows()
            .flatten()
            .chain(color.rows().flatten())
            .copied()
            .collect()
    }

    #[test]
    fn test_direct_symbols() {
        assert_eq!(DirectCell::from_values(true, true).symbol(), 'O');
        assert_eq!(DirectCell::from_values(true, false).symbol(), 'o');
        assert_eq!(DirectCell::from_values(false, true).symbol(), '*');
        assert_eq!(DirectCell::from_values(false, false).symbol(), '.');
    }

    #[test]
    fn test_render_direct_shows_both_fields() {
        let model = IllusionModel::new(2, 2).unwrap();
        let v = values("O.\nO.", "OO\n..");
        assert_eq!(render_direct(&model, &v), "Oo\n*.\n");
    }

    #[test]
    fn test_render_view_direct_is_color_field() {
        let model = IllusionModel::new(2, 3).unwrap();
        let v = values("OOO\n...", ".O.\nO.O");
        assert_eq!(render_view(&model, &v, ViewDirection::Direct), ".O.\nO.O\n");
    }

    #[test]
    fn test_elevated_neighbor_hides_lower_cell() {
        // 2x1: row 1 raised and uncolored, row 0 flat and colored
        let model = IllusionModel::new(2, 1).unwrap();
        let v = values(".\nO", "O\n.");

        // Looking down, row 0 sees row 1's face
        assert_eq!(render_view(&model, &v, ViewDirection::Down), ".\n.\n");
        // Looking up, row 1 is raised itself so nothing hides it
        assert_eq!(render_view(&model, &v, ViewDirection::Up), "O\n.\n");
    }

    #[test]
    fn test_toggling_elevation_flips_which_color_is_seen() {
        let model = IllusionModel::new(2, 1).unwrap();
        let color = "O\n.";

        let row1_raised = values(".\nO", color);
        let row0_raised = values("O\n.", color);
        let both_raised = values("O\nO", color);

        let seen = |v: &Vec<bool>| observed_pattern(&model, v, ViewDirection::Down).get(0, 0);
        assert!(!seen(&row1_raised));
        assert!(seen(&row0_raised));
        assert!(seen(&both_raised));
    }

    #[test]
    fn test_render_view_edge_fallback_on_single_cell() {
        let model = IllusionModel::new(1, 1).unwrap();
        for (elevation, color) in [(".", "O"), ("O", "O"), (".", "."), ("O", ".")] {
            let v = values(elevation, color);
            for view in ViewDirection::ALL {
                assert_eq!(render_view(&model, &v, view), format!("{}\n", color));
            }
        }
    }
}
