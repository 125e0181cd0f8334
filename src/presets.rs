// Built-in 6x20 target silhouettes.

use crate::error::{IllusionError, Result};
use crate::pattern::Pattern;
use crate::suggest::closest_match;

pub const STRIPES: &str = "
OOOOOOOOOOOOOOOOOOOO
....................
OOOOOOOOOOOOOOOOOOOO
....................
OOOOOOOOOOOOOOOOOOOO
....................
";

pub const CIRCLE: &str = "
.......OOOOOO.......
.....OOOOOOOOOO.....
...OOOOOOOOOOOOOO...
...OOOOOOOOOOOOOO...
.....OOOOOOOOOO.....
.......OOOOOO.......
";

pub const DOT: &str = "
....................
....................
........OOOO........
........OOOO........
....................
....................
";

pub const STAR: &str = "
.........OO.........
........OOOO........
...OOOOOOOOOOOOOO...
......OOOOOOOO......
.....OO......OO.....
....................
";

pub const NAMES: [&str; 4] = ["stripes", "circle", "dot", "star"];

fn text_for(name: &str) -> Option<&'static str> {
    match name {
        "stripes" => Some(STRIPES),
        "circle" => Some(CIRCLE),
        "dot" => Some(DOT),
        "star" => Some(STAR),
        _ => None,
    }
}

/// Look up a built-in pattern by (case-insensitive) name.
pub fn preset(name: &str) -> Result<Pattern> {
    let normalized = name.trim().to_lowercase();
    match text_for(&normalized) {
        Some(text) => Ok(Pattern::parse(text)?),
        None => Err(IllusionError::UnknownPreset {
            name: name.to_string(),
            suggestion: closest_match(&normalized, &NAMES),
        }),
    }
}
