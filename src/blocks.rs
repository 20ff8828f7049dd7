use crate::std::string::String;
use crate::std::vec::Vec;

use crate::{Bitstream, Error};

/// Quadrant block glyphs, indexed by `(top << 2) | bottom` where each row
/// value is `left * 2 + right` darkness.
const QUADRANTS: [char; 16] = [
    ' ', '▗', '▖', '▄', '▝', '▐', '▞', '▟', '▘', '▚', '▌', '▙', '▀', '▜', '▛', '█',
];

/// Sextant block glyphs, indexed by `(top << 4) | (middle << 2) | bottom`.
///
/// Covers all 64 two-by-three pixel combinations: the Unicode 13 sextants
/// from the Symbols for Legacy Computing block, with the four combinations
/// that predate it (empty, left half, right half, full) taken from the
/// Block Elements block.
const SEXTANTS: [char; 64] = [
    ' ', '🬞', '🬏', '🬭', '🬇', '🬦', '🬖', '🬵', '🬃', '🬢', '🬓', '🬱', '🬋', '🬩', '🬚', '🬹',
    '🬁', '🬠', '🬑', '🬯', '🬉', '▐', '🬘', '🬷', '🬅', '🬤', '🬔', '🬳', '🬍', '🬫', '🬜', '🬻',
    '🬀', '🬟', '🬐', '🬮', '🬈', '🬧', '🬗', '🬶', '🬄', '🬣', '▌', '🬲', '🬌', '🬪', '🬛', '🬺',
    '🬂', '🬡', '🬒', '🬰', '🬊', '🬨', '🬙', '🬸', '🬆', '🬥', '🬕', '🬴', '🬎', '🬬', '🬝', '█',
];

/// Options for [render_box_art](crate::render_box_art) and
/// [render_box_line](crate::render_box_line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Spend a whole glyph column on every pixel instead of packing two
    /// pixels per column.
    pub wide: bool,
    /// How many pixel rows one line of glyphs covers, 2 or 3.
    pub lines_per_char: u8,
    /// String emitted after each line of glyphs, or `None` for no separator.
    pub newline: Option<String>,
    /// Swap dark and light.
    pub inverse: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            wide: false,
            lines_per_char: 3,
            newline: Some(String::from("\n")),
            inverse: false,
        }
    }
}

impl RenderConfig {
    fn validate(&self) -> Result<(), Error> {
        match self.lines_per_char {
            2 | 3 => Ok(()),
            n => Err(Error::InvalidConfiguration(n)),
        }
    }
}

enum Pixel {
    Shade(u8),
    End,
}

/// Darkness values of one pixel row, consumed column by column.
///
/// An absent row is band padding: it shades every column zero and never
/// ends, the band stops when a real row runs out.
struct RowShades<'a> {
    row: Option<&'a Bitstream>,
    pos: usize,
    wide: bool,
}

impl RowShades<'_> {
    fn new(row: Option<&Bitstream>, wide: bool) -> RowShades<'_> {
        RowShades { row, pos: 0, wide }
    }

    fn next(&mut self) -> Pixel {
        let Some(row) = self.row else {
            return Pixel::Shade(0);
        };
        if self.pos >= row.len() {
            return Pixel::End;
        }
        let shade = if self.wide {
            self.pos += 1;
            if row.get(self.pos - 1) == Some(true) {
                3
            } else {
                0
            }
        } else {
            let left = row.get(self.pos) == Some(true);
            let right = row.get(self.pos + 1) == Some(true);
            self.pos += 2;
            (left as u8) << 1 | right as u8
        };
        Pixel::Shade(shade)
    }
}

fn render_band(rows: &[Option<&Bitstream>], config: &RenderConfig, out: &mut String) {
    debug_assert!(rows.iter().any(Option::is_some));
    let mut shades: Vec<RowShades> = rows
        .iter()
        .map(|row| RowShades::new(*row, config.wide))
        .collect();
    'columns: loop {
        let mut key = 0usize;
        for row in shades.iter_mut() {
            match row.next() {
                Pixel::End => break 'columns,
                Pixel::Shade(shade) => {
                    let shade = if config.inverse { 3 - shade } else { shade };
                    key = key << 2 | shade as usize;
                }
            }
        }
        out.push(match rows.len() {
            2 => QUADRANTS[key],
            _ => SEXTANTS[key],
        });
    }
    if let Some(newline) = &config.newline {
        out.push_str(newline);
    }
}

/// Render pixel rows as lines of Unicode block glyphs.
///
/// The rows are grouped top to bottom into bands of
/// [`lines_per_char`](RenderConfig::lines_per_char) rows, and each band
/// becomes one line of glyphs. A final band short on rows is padded with
/// all-zero rows.
pub fn render_box_art(rows: &[Bitstream], config: &RenderConfig) -> Result<String, Error> {
    config.validate()?;
    let lines = config.lines_per_char as usize;
    let mut out = String::new();
    for band in rows.chunks(lines) {
        let mut slots: Vec<Option<&Bitstream>> = band.iter().map(Some).collect();
        slots.resize(lines, None);
        render_band(&slots, config, &mut out);
    }
    Ok(out)
}

/// Render a single pixel row as one line of glyphs.
///
/// The row is paired with itself and drawn through the quadrant table, so
/// every column comes out visually doubled. `lines_per_char` does not apply
/// but the configuration is still validated.
pub fn render_box_line(row: &Bitstream, config: &RenderConfig) -> Result<String, Error> {
    config.validate()?;
    let mut out = String::new();
    render_band(&[Some(row), Some(row)], config, &mut out);
    Ok(out)
}

#[test]
fn test_tables_are_bijections() {
    let mut seen: Vec<char> = QUADRANTS.to_vec();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 16);

    let mut seen: Vec<char> = SEXTANTS.to_vec();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 64);
}

#[test]
fn test_solid_columns() {
    // equal shades in all rows of a band reduce to the four column glyphs
    assert_eq!(QUADRANTS[0b0000], ' ');
    assert_eq!(QUADRANTS[0b0101], '▐');
    assert_eq!(QUADRANTS[0b1010], '▌');
    assert_eq!(QUADRANTS[0b1111], '█');
    assert_eq!(SEXTANTS[0b000000], ' ');
    assert_eq!(SEXTANTS[0b010101], '▐');
    assert_eq!(SEXTANTS[0b101010], '▌');
    assert_eq!(SEXTANTS[0b111111], '█');
}

#[test]
fn test_zero_row_renders_spaces() {
    let row = Bitstream::zeros(20);
    let out = render_box_art(core::slice::from_ref(&row), &RenderConfig::default()).unwrap();
    assert_eq!(out, "          \n");
}

#[test]
fn test_final_band_padding() {
    // four rows with three lines per glyph: two bands, no error
    let rows = [
        Bitstream::zeros(6),
        Bitstream::zeros(6),
        Bitstream::zeros(6),
        Bitstream::zeros(6),
    ];
    let out = render_box_art(&rows, &RenderConfig::default()).unwrap();
    assert_eq!(out, "   \n   \n");
}

#[test]
fn test_invalid_lines_per_char() {
    for lines_per_char in [0, 1, 4] {
        let config = RenderConfig {
            lines_per_char,
            ..RenderConfig::default()
        };
        assert_eq!(
            render_box_art(&[Bitstream::zeros(4)], &config),
            Err(Error::InvalidConfiguration(lines_per_char)),
        );
        assert_eq!(
            render_box_line(&Bitstream::zeros(4), &config),
            Err(Error::InvalidConfiguration(lines_per_char)),
        );
    }
}

#[test]
fn test_two_row_grouping() {
    let mut top = Bitstream::new();
    top.push(0b1100, 4);
    let mut bottom = Bitstream::new();
    bottom.push(0b0110, 4);
    let config = RenderConfig {
        lines_per_char: 2,
        ..RenderConfig::default()
    };
    // columns: (3, 1) and (0, 2)
    let out = render_box_art(&[top, bottom], &config).unwrap();
    assert_eq!(out, "▜▖\n");
}

#[test]
fn test_render_line_self_pairs() {
    let mut row = Bitstream::new();
    row.push(0b11_01_10_00, 8);
    let out = render_box_line(&row, &RenderConfig::default()).unwrap();
    assert_eq!(out, "█▐▌ \n");
}

#[test]
fn test_wide_mode() {
    let mut row = Bitstream::new();
    row.push(0b10, 2);
    let config = RenderConfig {
        wide: true,
        ..RenderConfig::default()
    };
    let out = render_box_art(core::slice::from_ref(&row), &config).unwrap();
    assert_eq!(out, "🬂 \n");
    let out = render_box_line(&row, &config).unwrap();
    assert_eq!(out, "█ \n");
}

#[test]
fn test_inversion_involution() {
    let mut row = Bitstream::new();
    row.push(0b1011_0010_0101, 12);
    let mut complement = Bitstream::new();
    for i in 0..row.len() {
        complement.push_bit(row.get(i) == Some(false));
    }

    let inverted = RenderConfig {
        inverse: true,
        ..RenderConfig::default()
    };
    let rows = [row.clone(), row.clone(), row.clone()];
    let complements = [complement.clone(), complement.clone(), complement.clone()];
    assert_eq!(
        render_box_art(&rows, &inverted).unwrap(),
        render_box_art(&complements, &RenderConfig::default()).unwrap(),
    );
    assert_eq!(
        render_box_line(&row, &inverted).unwrap(),
        render_box_line(&complement, &RenderConfig::default()).unwrap(),
    );
}

#[test]
fn test_newline_variants() {
    let row = Bitstream::zeros(4);
    let config = RenderConfig {
        newline: None,
        ..RenderConfig::default()
    };
    assert_eq!(render_box_art(core::slice::from_ref(&row), &config).unwrap(), "  ");

    let config = RenderConfig {
        newline: Some(String::from("\r\n")),
        ..RenderConfig::default()
    };
    assert_eq!(
        render_box_art(core::slice::from_ref(&row), &config).unwrap(),
        "  \r\n",
    );
}
