/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */
use crate::error::ParseError;

// Token positions after splitting on '.' and '-'
const TOKEN_MAJOR: usize = 0;
const TOKEN_MINOR: usize = 1;
// After re-splitting the minor token on 'r' and 'p' (release format)
const TOKEN_MINOR_REL: usize = 1;
const TOKEN_MINOR_PATCH: usize = 2;
// Git hash search starts here for the non-release formats
const TOKEN_HASH: usize = 3;

// Release and hash land in the upper 24 bits of the AUX revision info
const AUX_RELEASE_SHIFT: u32 = 8;
const AUX_HASH_SHIFT: u32 = AUX_RELEASE_SHIFT;

pub const AUX_MAX_RELEASE: i32 = 0x999999; // 6 BCD digits
const AUX_HASH_LEN: usize = 6; // 6 hex digits

// Patch level occupies bits 7..1 of AUX byte 3
const AUX_REL_PATCH_BYTE: usize = 3;
const AUX_REL_PATCH_SHIFT: u32 = 1;
const AUX_MAX_PATCH: i32 = 127; // 7 bits

// The least significant bit of byte 3 is the dirty flag
const AUX_DIRTY_BYTE: usize = 3;

/// Parsed firmware revision.
///
/// `major` holds the BCD-via-hex reading of the decimal major digits,
/// truncated to one byte. `minor` is the intermediate hex reading of the
/// minor token; clamping and BCD repacking into the wire byte happen when
/// the Device ID record is assembled. `aux` carries either a 24-bit release
/// number plus patch level or a 24-bit git hash fragment in bytes 0..3, and
/// the dirty flag in bit 0 of byte 3.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Revision {
    pub major: u8,
    pub minor: i32,
    pub aux: [u8; 4],
}

// std::stoi-style split: empty tokens appear between back-to-back
// separators, a trailing separator yields no trailing empty token.
fn tokenize<'a>(s: &'a str, seps: &[char]) -> Vec<&'a str> {
    let mut tokens = Vec::new();
    let mut j = 0;
    while j < s.len() {
        let k = s[j..]
            .find(|c: char| seps.contains(&c))
            .map_or(s.len(), |off| j + off);
        tokens.push(&s[j..k]);
        j = k + 1;
    }
    tokens
}

// std::stoi-style greedy prefix parse: consume leading digits of the given
// base, stop at the first other character, fail when there are none at all
// or the value overflows an int.
fn parse_prefix(tok: &str, radix: u32) -> Result<i32, ParseError> {
    let end = tok
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(tok.len());
    if end == 0 {
        return Err(ParseError::Malformed(tok.to_string()));
    }
    i32::from_str_radix(&tok[..end], radix).map_err(|_| ParseError::Malformed(tok.to_string()))
}

/// Parse a build version string into a `Revision`.
///
/// Supports the vx.x-x-[-x] and v1.x.x-x-[-x] tag conventions. Three
/// formats are recognized, distinguished purely by token shape:
///
/// Format 1:
/// version = v0.6-19-gf363f61-dirty
///            ^ ^     ^^^^^^^ ^^^^^
///            | |     |       |
///            | |     |       `-- AUX dirty flag
///            | |     `---------- AUX commit hash
///            | `---------------- Minor
///            `------------------ Major
///
/// Format 2:
/// version = v1.99.10-113-g65edf7d-r3-0-g9e4f715-dirty
///            ^ ^^         ^^^^^^^  -------------^^^^^
///            | |          |   .---'
///            | |          |   `- AUX dirty flag
///            | |          `----- AUX commit hash
///            | `---------------- Minor
///            `------------------ Major
///
/// Format 3 (release tags):
/// version = v2.2r180608p10-g65edf7d-dirty
///            ^ ^ ^^^^^^ ^^    .-----^^^^^
///            | | |      |     `- AUX dirty flag
///            | | |      `------- AUX patch level (1-127), optional
///            | | `-------------- AUX release number
///            | `---------------- Minor
///            `------------------ Major
///
/// If the word 'dirty' appears anywhere, bit 0 of AUX byte 3 is set to
/// indicate the build carries edits beyond the recorded hash. For format 3,
/// AUX bytes 0-2 hold the release number and the upper 7 bits of byte 3 the
/// patch level. For formats 1 and 2, bytes 0-2 hold 6 digits of git hash
/// and bits 7..1 of byte 3 stay 0. Decimal digit strings are read base-16,
/// so their nibbles still show the original digits when treated as BCD.
pub fn parse_version(version: &str) -> Result<Revision, ParseError> {
    let mut rev = Revision::default();
    let mut has_release = false;

    // Cut off everything through the first 'v', wherever it sits
    let s = match version.find('v') {
        Some(pos) => &version[pos + 1..],
        None => version,
    };
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    let dirty = s.contains("dirty");

    let tokens = tokenize(s, &['.', '-']);

    if let Some(tok) = tokens.get(TOKEN_MAJOR) {
        rev.major = parse_prefix(tok, 16)? as u8;
    }

    if tokens.len() > TOKEN_MINOR {
        rev.minor = parse_prefix(tokens[TOKEN_MINOR], 16)?;

        // The minor token may also carry release/patchlevel info
        let minortok = tokenize(tokens[TOKEN_MINOR], &['r', 'p']);

        if minortok.len() > TOKEN_MINOR_REL {
            let rel = parse_prefix(minortok[TOKEN_MINOR_REL], 16)?;
            let release = rel.min(AUX_MAX_RELEASE) as u32;

            rev.aux = (release << AUX_RELEASE_SHIFT).to_be_bytes();
            has_release = true;
        }

        if minortok.len() > TOKEN_MINOR_PATCH {
            // Patch level is encoded as binary, not BCD, for a wider range
            let pl = parse_prefix(minortok[TOKEN_MINOR_PATCH], 10)?;
            let patchlevel = pl.min(AUX_MAX_PATCH) as u8;

            rev.aux[AUX_REL_PATCH_BYTE] = patchlevel << AUX_REL_PATCH_SHIFT;
        }
    }

    // Only encode a git hash in AUX for the non-release formats
    if !has_release && tokens.len() > TOKEN_HASH {
        // Anything starting with a 'g' counts as the hash token; keep only
        // the first 6 digits after the 'g'
        let hashstr: String = tokens[TOKEN_HASH..]
            .iter()
            .find(|tok| tok.starts_with('g'))
            .map(|tok| tok.chars().skip(1).take(AUX_HASH_LEN).collect())
            .unwrap_or_default();

        let hash = parse_prefix(&hashstr, 16)?;
        rev.aux = ((hash as u32) << AUX_HASH_SHIFT).to_be_bytes();
    }

    if dirty {
        rev.aux[AUX_DIRTY_BYTE] |= 1;
    }

    Ok(rev)
}
