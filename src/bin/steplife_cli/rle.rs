use anyhow::{anyhow, Context, Result};

/// Reads a Run Length Encoded pattern file into live-cell coordinates,
/// with the pattern's top-left corner at (origin_x, origin_y).
///
/// Format reference: https://conwaylife.com/wiki/Run_Length_Encoded
pub(super) fn read_file(path: &str, origin_x: i64, origin_y: i64) -> Result<Vec<(i64, i64)>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pattern file {}", path))?;
    parse(&text, origin_x, origin_y).with_context(|| format!("failed to parse {}", path))
}

pub(super) fn parse(text: &str, origin_x: i64, origin_y: i64) -> Result<Vec<(i64, i64)>> {
    let mut cells = vec![];
    let mut x = origin_x;
    let mut y = origin_y;
    let mut run = 0u32;

    for line in text.lines() {
        let line = line.trim();
        // comment and header lines; the header's declared extent is not
        // needed, runs and row terminators carry all the information
        if line.is_empty() || line.starts_with('#') || line.starts_with('x') {
            continue;
        }
        for c in line.chars() {
            match c {
                '0'..='9' => {
                    run = run * 10 + (c as u32 - '0' as u32);
                }
                'b' | '.' => {
                    x += i64::from(run.max(1));
                    run = 0;
                }
                'o' | 'A' => {
                    for _ in 0..run.max(1) {
                        cells.push((x, y));
                        x += 1;
                    }
                    run = 0;
                }
                '$' => {
                    y += i64::from(run.max(1));
                    x = origin_x;
                    run = 0;
                }
                '!' => return Ok(cells),
                c if c.is_whitespace() => {}
                c => return Err(anyhow!("unexpected character {:?} in RLE body", c)),
            }
        }
    }
    Err(anyhow!("RLE body is not terminated with '!'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_glider() {
        let text = "#C a glider\nx = 3, y = 3, rule = B3/S23\nbob$2bo$3o!";
        let cells = parse(text, 0, 0).unwrap();
        assert_eq!(cells, vec![(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);
    }

    #[test]
    fn applies_the_origin_offset() {
        let cells = parse("o!", 7, -3).unwrap();
        assert_eq!(cells, vec![(7, -3)]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("ooq!", 0, 0).is_err());
        assert!(parse("oo", 0, 0).is_err());
    }
}
