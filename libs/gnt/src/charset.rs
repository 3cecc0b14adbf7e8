//! Decoding of GB2312 tag codes and the dataset character filter.

use encoding_rs::GBK;

/// The inclusive range of the CJK Unified Ideographs block.
pub const CJK_UNIFIED_IDEOGRAPHS: core::ops::RangeInclusive<char> = '\u{4E00}'..='\u{9FFF}';

/// Characters that cannot appear in a file name on common filesystems.
pub const FILESYSTEM_UNSAFE: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// The assigned trail byte ranges of the GB2312 symbol rows `0xA1..=0xA9`.
///
/// Cells outside these ranges are unassigned in GB2312 even though GBK maps some of them.
const SYMBOL_ROWS: [&[core::ops::RangeInclusive<u8>]; 9] = [
    &[0xA1..=0xFE],
    &[0xB1..=0xE2, 0xE5..=0xEE, 0xF1..=0xFC],
    &[0xA1..=0xFE],
    &[0xA1..=0xF3],
    &[0xA1..=0xF6],
    &[0xA1..=0xB8, 0xC1..=0xD8],
    &[0xA1..=0xC1, 0xD1..=0xF1],
    &[0xA1..=0xBA, 0xC5..=0xE9],
    &[0xA4..=0xEF],
];

/// The last assigned trail byte of row `0xD7`, which ends the level 1 hanzi.
const LEVEL_1_LAST_TRAIL: u8 = 0xF9;

/// Returns `true` if `lead` and `trail` form an assigned GB2312 code.
fn is_gb2312(lead: u8, trail: u8) -> bool {
    if !(0xA1..=0xFE).contains(&trail) {
        return false;
    }

    match lead {
        0xA1..=0xA9 => SYMBOL_ROWS[usize::from(lead - 0xA1)]
            .iter()
            .any(|range| range.contains(&trail)),
        0xD7 => trail <= LEVEL_1_LAST_TRAIL,
        0xB0..=0xF7 => true,
        _ => false,
    }
}

/// Decodes a big-endian tag code as EUC-CN encoded GB2312 text.
///
/// Bytes below `0x80` decode to ASCII. All other bytes must form an assigned double-byte GB2312
/// code. Trailing NUL characters are removed from the result.
///
/// Returns `None` if the tag code is not valid GB2312.
pub fn decode_tag(tag_code: u16) -> Option<String> {
    let [lead, trail] = tag_code.to_be_bytes();

    let is_ascii = lead < 0x80 && trail < 0x80;
    if !(is_ascii || is_gb2312(lead, trail)) {
        return None;
    }

    // GBK agrees with GB2312 on every assigned code.
    let bytes = [lead, trail];
    let text = GBK.decode_without_bom_handling_and_without_replacement(&bytes)?;
    Some(text.trim_end_matches('\0').to_owned())
}

/// Returns `true` if `character` may be used as a dataset character.
///
/// A dataset character is a printable CJK unified ideograph that is safe to embed in a file
/// name.
pub fn is_target_character(character: char) -> bool {
    CJK_UNIFIED_IDEOGRAPHS.contains(&character)
        && !character.is_control()
        && !character.is_whitespace()
        && !FILESYSTEM_UNSAFE.contains(&character)
}

/// Decodes `tag_code` and returns the resulting character if it passes
/// [`is_target_character`].
pub fn target_character(tag_code: u16) -> Option<char> {
    let text = decode_tag(tag_code)?;

    let mut chars = text.chars();
    let character = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    is_target_character(character).then_some(character)
}
