//! Text bar graph of the duty cycle across the boom

use sprayer_core::DutyCycle;

/// Cells above the base marker in one column
const COLUMN_HEIGHT: usize = 10;

/// One column per nozzle, read bottom to top
///
/// A nozzle whose requested duty is under half a cell is drawn as `X`;
/// otherwise `A` followed by one `#` per 10% duty (capped at 100%). Half
/// cells round to the even count.
fn column(duty: f64) -> String {
    let cells = duty * COLUMN_HEIGHT as f64;

    if cells < 0.5 {
        return format!("X{}", ".".repeat(COLUMN_HEIGHT));
    }

    let filled = if cells > COLUMN_HEIGHT as f64 {
        COLUMN_HEIGHT
    } else {
        cells.round_ties_even() as usize
    };
    format!(
        "A{}{}",
        "#".repeat(filled),
        ".".repeat(COLUMN_HEIGHT - filled)
    )
}

/// Render `ratio × baseline` for every nozzle as rows from 100% down to the base
///
/// The last line is a rule of `=` as wide as the boom.
pub fn render_duty_graph(baseline: DutyCycle, ratios: &[f64]) -> String {
    let columns: Vec<Vec<char>> = ratios
        .iter()
        .map(|&ratio| column(baseline * ratio).chars().collect())
        .collect();

    let mut out = String::with_capacity((ratios.len() + 1) * (COLUMN_HEIGHT + 2));
    for row in (0..=COLUMN_HEIGHT).rev() {
        out.extend(columns.iter().map(|c| c[row]));
        out.push('\n');
    }
    out.push_str(&"=".repeat(ratios.len()));
    out.push('\n');
    out
}
