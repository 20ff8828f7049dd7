//! This crate turns text into Code 128 linear barcodes (ISO/IEC 15417)
//! and renders them as Unicode block-element "box art" for terminal or
//! other text-based display.
//!
//! Encoding covers the printable ASCII planes of Code Set A and Code Set B.
//! Code Set C (numeric pairs), the shift symbols, and the Latin 1 extension
//! are deliberately not supported; characters outside the selected code set
//! fail with [`Error::UnsupportedCharacter`] instead of being silently
//! substituted, since a substituted symbol still checksums correctly and
//! corrupts the barcode without notice.
//!
//! ## Example
//!
//! ```rust
//! use code128_blocks::{printable_barcode, CodeSet};
//!
//! let art = printable_barcode("Hello!", CodeSet::B, 3, false).unwrap();
//! print!("{art}");
//! ```
//!
//! To control rendering, encode and render separately:
//!
//! ```rust
//! use code128_blocks::{encode_symbols, render_box_line, CodeSet, RenderConfig};
//!
//! let bits = encode_symbols("<3", CodeSet::B).unwrap();
//! assert_eq!(
//!     render_box_line(&bits, &RenderConfig::default()).unwrap(),
//!     "█▐ ▌ ▐█ █▐ █ ▌█▌▐  ▌█ █ ▐█▐▐▌\n",
//! );
//! ```
//!
//! [render_box_art] also accepts arbitrary bit matrices, so it can draw any
//! monochrome bitmap, not just barcodes.
#![no_std]

#[cfg(not(feature = "std"))]
extern crate alloc as std;
#[cfg(feature = "std")]
extern crate std;

use std::string::String;
use std::vec;
#[cfg(test)]
use std::vec::Vec;

#[cfg(feature = "std")]
use thiserror::Error as ThisError;

mod bits;
mod blocks;
mod encode;

pub use bits::{Bitstream, Chunks};
pub use blocks::{render_box_art, render_box_line, RenderConfig};

const START_A: u8 = 103;
const START_B: u8 = 104;
const STOP: u8 = 108;

/// Modules of quiet zone on each side of the code, the minimum the
/// standard demands.
const QUIET_ZONE: usize = 10;

fn checksum(symbols: impl Iterator<Item = u8>) -> u8 {
    (symbols
        .enumerate()
        .map(|(i, idx)| (i.max(1) as u64) * idx as u64)
        .sum::<u64>()
        % 103) as u8
}

/// The character-to-symbol mapping to encode with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeSet {
    /// Control characters and uppercase, `0x00` to `0x5F`.
    A,
    /// Printable ASCII, `0x20` (space) to `0x7F`.
    B,
}

impl CodeSet {
    fn start(self) -> u8 {
        match self {
            CodeSet::A => START_A,
            CodeSet::B => START_B,
        }
    }

    /// The symbol value for `character`, or `None` if this code set can
    /// not encode it.
    pub fn symbol_value(self, character: char) -> Option<u8> {
        match self {
            CodeSet::A => encode::symbol_a(character),
            CodeSet::B => encode::symbol_b(character),
        }
    }
}

/// Errors that can occur while encoding or rendering.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(ThisError))]
pub enum Error {
    /// A character has no symbol in the selected code set.
    #[cfg_attr(
        feature = "std",
        error("character {character:?} at position {position} has no symbol in this code set")
    )]
    UnsupportedCharacter {
        /// The offending character.
        character: char,
        /// Its zero-based position in the input.
        position: usize,
    },
    /// A render option is outside the recognized variants.
    #[cfg_attr(feature = "std", error("lines_per_char must be 2 or 3, got {0}"))]
    InvalidConfiguration(u8),
}

/// Encode `text` as a Code 128 bitstream.
///
/// The bitstream holds the start symbol, one symbol per character, the
/// mod-103 checksum symbol, and the stop pattern with its termination bar;
/// every symbol is 11 bits wide and the termination bar adds 2. Quiet
/// zones are not included.
///
/// Empty input is valid and produces a structurally complete code of just
/// start, checksum, and stop.
pub fn encode_symbols(text: &str, code_set: CodeSet) -> Result<Bitstream, Error> {
    encode::encode_as_bits(text, code_set)
}

/// Encode `text` and render it as a multi-line string of block glyphs.
///
/// The code is surrounded by a 10-module quiet zone on the left and right
/// and one blank band above and below. The bars are `height` pixel rows
/// tall, drawn three rows per output line. With `inverse` the output is
/// light-on-dark.
pub fn printable_barcode(
    text: &str,
    code_set: CodeSet,
    height: usize,
    inverse: bool,
) -> Result<String, Error> {
    let code = encode_symbols(text, code_set)?;
    let mut row = Bitstream::with_capacity(code.len() + 2 * QUIET_ZONE);
    row.push(0, QUIET_ZONE);
    row.extend_from(&code);
    row.push(0, QUIET_ZONE);
    let blank = Bitstream::zeros(row.len());

    let config = RenderConfig {
        inverse,
        ..RenderConfig::default()
    };
    let rows = vec![row; height];
    let mut out = render_box_art(core::slice::from_ref(&blank), &config)?;
    out.push_str(&render_box_art(&rows, &config)?);
    out.push_str(&render_box_art(core::slice::from_ref(&blank), &config)?);
    Ok(out)
}

#[test]
fn test_checksum() {
    // "Wikipedia" in Code Set B, checksum symbol 88
    let symbols = [START_B, 55, 73, 75, 73, 80, 69, 68, 73, 65];
    assert_eq!(checksum(symbols.iter().cloned()), 88);
    assert_eq!(checksum([START_A].iter().cloned()), 0);
    assert_eq!(checksum([START_B].iter().cloned()), 1);
}

#[test]
fn test_printable_barcode_golden() {
    let art = printable_barcode("Wikipedia", CodeSet::B, 3, false).unwrap();
    let quiet = " ".repeat(77);
    let bars = "     █▐ ▌ ▐█▐ ▐▌▌ ▐▌▌▐▌ ▐ ▌▌ ▐▌▌▐▐ ██ ▌█ ▌ ▐  ▌▐▌▌ ▐▌▌▐ ▌█  ██ ▌▐▐▌ █▌▌█     ";
    assert_eq!(art, std::format!("{quiet}\n{bars}\n{quiet}\n"));
}

#[test]
fn test_printable_barcode_inverse() {
    let art = printable_barcode("Wikipedia", CodeSet::B, 3, true).unwrap();
    let lines: Vec<&str> = art.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "█".repeat(77));
    assert_eq!(lines[2], "█".repeat(77));
    assert!(lines[1].starts_with("█████ ▌█"));
}

#[test]
fn test_printable_barcode_ragged_height() {
    // 4 pixel rows at 3 rows per line: the last band is zero-padded
    let art = printable_barcode("x", CodeSet::B, 4, false).unwrap();
    let lines: Vec<&str> = art.lines().collect();
    assert_eq!(lines.len(), 4);
    // the lone fourth row only darkens the top third of its band
    assert!(lines[2].contains('🬂'));
    assert!(!lines[2].contains('█'));
}

#[test]
fn test_printable_barcode_empty_text() {
    let art = printable_barcode("", CodeSet::A, 2, false).unwrap();
    // 35 code bits plus two 10-module quiet zones, two bits per column
    assert_eq!(art.lines().next().unwrap().chars().count(), 28);
}

#[test]
fn test_printable_barcode_bad_character() {
    assert_eq!(
        printable_barcode("über", CodeSet::B, 3, false),
        Err(Error::UnsupportedCharacter {
            character: 'ü',
            position: 0,
        }),
    );
}
