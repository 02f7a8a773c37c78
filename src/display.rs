//! Plain-text rendering of a session.
//!
//! Shapes and volumes are shown by name, or by letter once the player toggles
//! letter mode: `C`, `T`, `S` for shapes and two letters per volume (`CT` for
//! a cone). Weights outside the closed volume set render as `?<weight>`.

use crate::session::PuzzleSession;
use crate::shapes::{ShapeKind, VolumeKind, Weight, POSITIONS};

/// Width of each statue column.
const COLUMN_WIDTH: usize = 12;

/// Width of the row label column.
const LABEL_WIDTH: usize = 8;

const POSITION_NAMES: [&str; POSITIONS] = ["left", "middle", "right"];

pub fn shape_label(shape: ShapeKind, letters: bool) -> String {
    if letters {
        shape.letter().to_string()
    } else {
        shape.name().to_string()
    }
}

pub fn volume_label(weight: Weight, letters: bool) -> String {
    match VolumeKind::from_weight(weight) {
        Some(volume) if letters => {
            let (a, b) = volume.components();
            format!("{}{}", a.letter(), b.letter())
        }
        Some(volume) => volume.name().to_string(),
        None => format!("?{weight}"),
    }
}

/// One table row, trailing padding trimmed.
fn row(label: &str, cells: [String; POSITIONS]) -> String {
    let mut line = format!("{:<width$}", label, width = LABEL_WIDTH);
    for cell in cells {
        line.push_str(&format!("{:<width$}", cell, width = COLUMN_WIDTH));
    }
    let mut line = line.trim_end().to_string();
    line.push('\n');
    line
}

/// Renders everything the player can see.
pub fn render(session: &PuzzleSession) -> String {
    let letters = session.show_letters();
    let mut output = String::new();

    let status = if session.is_solved() {
        "Correct!"
    } else {
        "Incorrect"
    };
    output.push_str(&format!("strategy: {} ({})\n", session.strategy(), status));

    output.push_str(&row("", POSITION_NAMES.map(str::to_string)));
    output.push_str(&row(
        "shape",
        session.shapes().map(|shape| shape_label(shape, letters)),
    ));
    output.push_str(&row(
        "volume",
        session.volumes().map(|weight| volume_label(weight, letters)),
    ));

    let marked = session.dissection().map(|mark| mark.position);
    let dissect_cells: [String; POSITIONS] = std::array::from_fn(|position| {
        if marked == Some(position) {
            "marked".to_string()
        } else if session.can_dissect(position) {
            "ready".to_string()
        } else {
            "-".to_string()
        }
    });
    output.push_str(&row("dissect", dissect_cells));

    let held = session
        .held()
        .map_or_else(|| "-".to_string(), |shape| shape_label(shape, letters));
    output.push_str(&format!("held: {held}\n"));

    let dissecting = session.dissection().map_or_else(
        || "-".to_string(),
        |mark| {
            format!(
                "{} from {}",
                shape_label(mark.shape, letters),
                POSITION_NAMES[mark.position]
            )
        },
    );
    output.push_str(&format!("dissecting: {dissecting}\n"));

    let dropped = if session.dropped().is_empty() {
        "-".to_string()
    } else {
        session
            .dropped()
            .iter()
            .enumerate()
            .map(|(index, dropped)| format!("[{index}] {}", shape_label(dropped.shape, letters)))
            .collect::<Vec<_>>()
            .join(", ")
    };
    output.push_str(&format!("dropped: {dropped}\n"));

    let knights = if session.undropped().is_empty() {
        "-".to_string()
    } else {
        session
            .undropped()
            .iter()
            .map(|&shape| shape_label(shape, letters))
            .collect::<Vec<_>>()
            .join(", ")
    };
    output.push_str(&format!("knights: {knights}\n"));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::shapes::ShapeKind::{Circle, Square, Triangle};

    fn session_holding_circle() -> PuzzleSession {
        let mut session = PuzzleSession::with_puzzle(
            GameConfig::default().with_seed(1),
            [Circle, Triangle, Square],
            [3, 8, 2],
        );
        for shape in ShapeKind::ALL {
            session.drop_shape(shape).unwrap();
        }
        session.pick_up(0).unwrap();
        session
    }

    #[test]
    fn test_render_names() {
        let session = session_holding_circle();
        insta::assert_snapshot!(render(&session), @r"
        strategy: mixed (Incorrect)
                left        middle      right
        shape   circle      triangle    square
        volume  cone        cube        sphere
        dissect ready       -           ready
        held: circle
        dissecting: -
        dropped: [0] triangle, [1] square
        knights: -
        ");
    }

    #[test]
    fn test_render_letters_mid_dissection() {
        let mut session = session_holding_circle();
        session.dissect(0).unwrap();
        session.toggle_letters();
        insta::assert_snapshot!(render(&session), @r"
        strategy: mixed (Incorrect)
                left        middle      right
        shape   C           T           S
        volume  CT          SS          CC
        dissect marked      -           -
        held: -
        dissecting: C from left
        dropped: [0] T, [1] S
        knights: -
        ");
    }

    #[test]
    fn test_volume_labels_outside_the_closed_set() {
        assert_eq!(volume_label(7, true), "?7");
        assert_eq!(volume_label(-1, false), "?-1");
        assert_eq!(volume_label(6, true), "TS");
        assert_eq!(volume_label(5, false), "cylinder");
    }

    #[test]
    fn test_render_reports_solved() {
        let mut session = PuzzleSession::with_puzzle(
            GameConfig::default().with_seed(1),
            [Circle, Triangle, Square],
            [6, 5, 3],
        );
        assert!(render(&session).starts_with("strategy: mixed (Correct!)\n"));
        session.set_strategy(crate::rules::Strategy::IdealRight);
        assert!(render(&session).starts_with("strategy: ideal-right (Incorrect)\n"));
    }
}
