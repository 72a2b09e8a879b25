/// Built-in seed patterns, addressable by name from the command line.
///
/// Coordinates follow the engine's convention: x grows eastward, y
/// southward.
pub(super) fn builtin(name: &str) -> Option<Vec<(i64, i64)>> {
    let cells: &[(i64, i64)] = match name {
        "blinker" => &[(0, 0), (1, 0), (2, 0)],
        "block" => &[(0, 0), (1, 0), (0, 1), (1, 1)],
        "glider" => &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
        "r-pentomino" => &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
        "weekender" => &[
            (2, 0),
            (15, 0),
            (2, 1),
            (15, 1),
            (1, 2),
            (3, 2),
            (14, 2),
            (16, 2),
            (2, 3),
            (15, 3),
            (2, 4),
            (15, 4),
            (3, 5),
            (7, 5),
            (8, 5),
            (9, 5),
            (10, 5),
            (14, 5),
            (7, 6),
            (8, 6),
            (9, 6),
            (10, 6),
            (3, 7),
            (4, 7),
            (5, 7),
            (6, 7),
            (11, 7),
            (12, 7),
            (13, 7),
            (14, 7),
            (5, 9),
            (12, 9),
            (6, 10),
            (7, 10),
            (10, 10),
            (11, 10),
        ],
        "siesta" => &[
            (13, 0),
            (14, 0),
            (5, 1),
            (6, 1),
            (12, 1),
            (14, 1),
            (5, 2),
            (7, 2),
            (12, 2),
            (7, 3),
            (11, 3),
            (12, 3),
            (14, 3),
            (5, 4),
            (7, 4),
            (8, 4),
            (14, 4),
            (15, 4),
            (16, 4),
            (3, 5),
            (4, 5),
            (5, 5),
            (11, 5),
            (13, 5),
            (17, 5),
            (2, 6),
            (6, 6),
            (8, 6),
            (14, 6),
            (15, 6),
            (16, 6),
            (3, 7),
            (4, 7),
            (5, 7),
            (11, 7),
            (12, 7),
            (14, 7),
            (5, 8),
            (7, 8),
            (8, 8),
            (12, 8),
            (7, 9),
            (12, 9),
            (14, 9),
            (5, 10),
            (7, 10),
            (13, 10),
            (14, 10),
            (5, 11),
            (6, 11),
        ],
        _ => return None,
    };
    Some(cells.to_vec())
}

pub(super) const BUILTIN_NAMES: &str = "blinker, block, glider, r-pentomino, weekender, siesta";
