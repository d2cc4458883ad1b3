//! ASCII rendering of a generated floor
//!
//! North is up. Cells are category symbols; connectors between them show
//! the realized doorways: `-`/`|` for one, `=`/`"` for two.

use hr_core::floor::{Direction, FloorConfig, GeneratedFloorLayout, GridPos};

/// Symbol for an occupied cell; `?` when it has no template
fn cell_symbol(layout: &GeneratedFloorLayout, config: &FloorConfig, pos: GridPos) -> char {
    layout
        .template(pos)
        .and_then(|id| config.template(id))
        .map_or('?', |t| t.category.symbol())
}

pub fn render_map(layout: &GeneratedFloorLayout, config: &FloorConfig) -> String {
    let Some((min, max)) = layout.bounds() else {
        return String::new();
    };

    let mut out = String::new();
    for y in (min.y..=max.y).rev() {
        let mut cells = String::new();
        let mut below = String::new();
        for x in min.x..=max.x {
            let pos = GridPos::new(x, y);
            let mask = layout.door_mask(pos);

            cells.push(if layout.is_occupied(pos) {
                cell_symbol(layout, config, pos)
            } else {
                ' '
            });
            if x < max.x {
                cells.push(match mask.door_count(Direction::East) {
                    0 => ' ',
                    1 => '-',
                    _ => '=',
                });
            }

            below.push(match mask.door_count(Direction::South) {
                0 => ' ',
                1 => '|',
                _ => '"',
            });
            if x < max.x {
                below.push(' ');
            }
        }

        out.push_str(cells.trim_end());
        out.push('\n');
        if y > min.y {
            out.push_str(below.trim_end());
            out.push('\n');
        }
    }
    out
}

pub const LEGEND: &str = "@ start  # room  $ treasure  % shop  B boss  ? unassigned";
