use crate::std::vec::Vec;

use crate::{Bitstream, CodeSet, Error, STOP};

/// Bar-space patterns for symbol values 0 to 102, the three start symbols,
/// the stop symbol in both orientations, and the stop symbol with its
/// two-module termination bar (13 bits, index 108).
pub(crate) const PATTERNS: [u16; 109] = [
    0x6cc, 0x66c, 0x666, 0x498, 0x48c, 0x44c, 0x4c8, 0x4c4, 0x464, 0x648, 0x644, 0x624, 0x59c,
    0x4dc, 0x4ce, 0x5cc, 0x4ec, 0x4e6, 0x672, 0x65c, 0x64e, 0x6e4, 0x674, 0x76e, 0x74c, 0x72c,
    0x726, 0x764, 0x734, 0x732, 0x6d8, 0x6c6, 0x636, 0x518, 0x458, 0x446, 0x588, 0x468, 0x462,
    0x688, 0x628, 0x622, 0x5b8, 0x58e, 0x46e, 0x5d8, 0x5c6, 0x476, 0x776, 0x68e, 0x62e, 0x6e8,
    0x6e2, 0x6ee, 0x758, 0x746, 0x716, 0x768, 0x762, 0x71a, 0x77a, 0x642, 0x78a, 0x530, 0x50c,
    0x4b0, 0x486, 0x42c, 0x426, 0x590, 0x584, 0x4d0, 0x4c2, 0x434, 0x432, 0x612, 0x650, 0x7ba,
    0x614, 0x47a, 0x53c, 0x4bc, 0x49e, 0x5e4, 0x4f4, 0x4f2, 0x7a4, 0x794, 0x792, 0x6de, 0x6f6,
    0x7b6, 0x578, 0x51e, 0x45e, 0x5e8, 0x5e2, 0x7a8, 0x7a2, 0x5de, 0x5ee, 0x75e, 0x7ae, 0x684,
    0x690, 0x69c, 0x63a, 0x6b8, 0x18eb,
];

pub(super) fn symbol_a(ch: char) -> Option<u8> {
    match ch {
        ' '..='_' => Some(ch as u8 - b' '),
        '\0'..='\x1f' => Some(ch as u8 + 0x40),
        _ => None,
    }
}

pub(super) fn symbol_b(ch: char) -> Option<u8> {
    match ch {
        ' '..='\x7f' => Some(ch as u8 - b' '),
        _ => None,
    }
}

/// Encode `text` as start symbol, data symbols, checksum symbol, and the
/// terminated stop pattern, 11 bits per symbol.
pub(super) fn encode_as_bits(text: &str, code_set: CodeSet) -> Result<Bitstream, Error> {
    let mut symbols = Vec::with_capacity(text.len() + 2);
    symbols.push(code_set.start());
    for (position, character) in text.chars().enumerate() {
        let value = code_set
            .symbol_value(character)
            .ok_or(Error::UnsupportedCharacter {
                character,
                position,
            })?;
        symbols.push(value);
    }
    symbols.push(crate::checksum(symbols.iter().cloned()));

    let mut bits = Bitstream::with_capacity(symbols.len() * 11 + 13);
    for value in symbols {
        bits.push(PATTERNS[value as usize], 11);
    }
    bits.push(PATTERNS[STOP as usize], 13);
    Ok(bits)
}

#[cfg(test)]
fn lookup(pattern: u16) -> u8 {
    PATTERNS
        .iter()
        .position(|p| *p == pattern)
        .expect("unknown pattern") as u8
}

#[test]
fn test_symbol_values() {
    assert_eq!(symbol_a(' '), Some(0));
    assert_eq!(symbol_a('A'), Some(33));
    assert_eq!(symbol_a('_'), Some(63));
    assert_eq!(symbol_a('\n'), Some(74));
    assert_eq!(symbol_a('a'), None);
    assert_eq!(symbol_b(' '), Some(0));
    assert_eq!(symbol_b('a'), Some(65));
    assert_eq!(symbol_b('\x7f'), Some(95));
    assert_eq!(symbol_b('\n'), None);
    assert_eq!(symbol_b('ß'), None);
}

#[test]
fn test_pattern_widths() {
    for pattern in &PATTERNS[0..108] {
        assert_eq!(16 - pattern.leading_zeros(), 11);
    }
    assert_eq!(16 - PATTERNS[STOP as usize].leading_zeros(), 13);
}

#[test]
fn test_wikipedia_golden() {
    let bits = encode_as_bits("Wikipedia", CodeSet::B).unwrap();
    assert_eq!(bits.len(), 134);
    assert_eq!(
        bits.into_bytes(),
        crate::std::vec![
            210, 29, 26, 26, 97, 40, 105, 79, 44, 132, 38, 134, 146, 195, 201, 99, 172
        ],
    );
}

#[test]
fn test_length_invariant() {
    for (text, code_set) in [
        ("A", CodeSet::B),
        ("Wikipedia", CodeSet::B),
        ("RUST", CodeSet::A),
        ("", CodeSet::A),
    ] {
        let bits = encode_as_bits(text, code_set).unwrap();
        assert_eq!(bits.len(), 11 * (text.len() + 3) + 2);
    }
    assert_eq!(encode_as_bits("A", CodeSet::B).unwrap().len(), 46);
}

#[test]
fn test_empty_input() {
    // start + checksum + stop; the empty weighted sum leaves start mod 103
    let bits = encode_as_bits("", CodeSet::A).unwrap();
    assert_eq!(bits.len(), 35);
    let chunks: Vec<u16> = bits.chunks(11).collect();
    assert_eq!(chunks[0], PATTERNS[crate::START_A as usize]);
    assert_eq!(chunks[1], PATTERNS[0]);

    let bits = encode_as_bits("", CodeSet::B).unwrap();
    let chunks: Vec<u16> = bits.chunks(11).collect();
    assert_eq!(chunks[1], PATTERNS[1]);
}

#[test]
fn test_checksum_round_trip() {
    for (text, code_set) in [
        ("Rust <3", CodeSet::B),
        ("CODE 128", CodeSet::A),
        ("Wikipedia", CodeSet::B),
        ("~", CodeSet::B),
    ] {
        let bits = encode_as_bits(text, code_set).unwrap();
        let symbols: Vec<u8> = bits.chunks(11).take(text.len() + 2).map(lookup).collect();
        let (embedded, data) = symbols.split_last().unwrap();
        assert_eq!(*embedded, crate::checksum(data.iter().cloned()));
    }
}

#[test]
fn test_unsupported_character() {
    assert_eq!(
        encode_as_bits("ab", CodeSet::A),
        Err(Error::UnsupportedCharacter {
            character: 'a',
            position: 0,
        }),
    );
    assert_eq!(
        encode_as_bits("na\u{ef}ve", CodeSet::B),
        Err(Error::UnsupportedCharacter {
            character: '\u{ef}',
            position: 2,
        }),
    );
}
