//! Canonical text encoding of a single share.
//!
//! ```text
//! FORMAT=2
//! INDEX=1
//! THRESHOLD=3
//! TOTAL=5
//! DATA=<standard base64, padded>
//! ```
//!
//! One field per line, fixed order, newline terminated. There are no optional
//! fields and the version is never inferred: a record that is not exactly
//! `FORMAT=2` is rejected outright.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

use super::share::Share;

/// The only record version this crate reads or writes.
pub const FORMAT_VERSION: u32 = 2;

const FORMAT: &str = "FORMAT";
const INDEX: &str = "INDEX";
const THRESHOLD: &str = "THRESHOLD";
const TOTAL: &str = "TOTAL";
const DATA: &str = "DATA";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("unsupported format version {found}")]
    UnsupportedFormatVersion { found: u32 },

    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("field {0} is not a number")]
    InvalidField(&'static str),

    #[error("field DATA is not valid base64")]
    InvalidEncoding,

    #[error("field {field} is out of range: {reason}")]
    InvalidFieldValue {
        field: &'static str,
        reason: &'static str,
    },

    #[error("line {line} is not a KEY=VALUE pair")]
    MalformedLine { line: usize },

    #[error("line {line} holds an unknown field")]
    UnknownField { line: usize },

    #[error("field {0} appears more than once")]
    DuplicateField(&'static str),
}

/// Renders one share as a canonical record.
///
/// Refuses to produce a record that [`decode`] would reject.
pub fn encode(index: u8, threshold: u8, total: u8, payload: &[u8]) -> Result<String, FormatError> {
    validate(index, threshold, total, payload)?;

    let mut record = format!(
        "{FORMAT}={FORMAT_VERSION}\n\
         {INDEX}={index}\n\
         {THRESHOLD}={threshold}\n\
         {TOTAL}={total}\n\
         {DATA}="
    );
    record.reserve(payload.len() * 4 / 3 + 4);
    STANDARD.encode_string(payload, &mut record);
    record.push('\n');

    Ok(record)
}

pub fn encode_share(share: &Share) -> Result<String, FormatError> {
    encode(share.index, share.threshold, share.total, &share.payload)
}

/// Parses a canonical record back into a [`Share`].
pub fn decode(text: &str) -> Result<Share, FormatError> {
    let mut fields: [Option<&str>; 5] = [None; 5];

    for (i, line) in text.lines().enumerate() {
        let (key, value) = line
            .split_once('=')
            .ok_or(FormatError::MalformedLine { line: i + 1 })?;
        let slot = match key {
            FORMAT => 0,
            INDEX => 1,
            THRESHOLD => 2,
            TOTAL => 3,
            DATA => 4,
            _ => return Err(FormatError::UnknownField { line: i + 1 }),
        };
        if fields[slot].replace(value).is_some() {
            return Err(FormatError::DuplicateField(key_name(slot)));
        }
    }

    let field = |slot: usize| fields[slot].ok_or(FormatError::MissingField(key_name(slot)));

    // The version gates everything else: a record of another version may not
    // even carry the fields below.
    let version = parse_version(field(0)?)?;
    if version != FORMAT_VERSION {
        return Err(FormatError::UnsupportedFormatVersion { found: version });
    }

    let index = parse_number(INDEX, field(1)?)?;
    let threshold = parse_number(THRESHOLD, field(2)?)?;
    let total = parse_number(TOTAL, field(3)?)?;
    let data = field(4)?;

    let index = to_u8(INDEX, index)?;
    let threshold = to_u8(THRESHOLD, threshold)?;
    let total = to_u8(TOTAL, total)?;

    let payload: Vec<u8> = STANDARD
        .decode(data)
        .map_err(|_| FormatError::InvalidEncoding)?;

    validate(index, threshold, total, &payload)?;

    Ok(Share {
        index,
        threshold,
        total,
        payload,
    })
}

fn validate(index: u8, threshold: u8, total: u8, payload: &[u8]) -> Result<(), FormatError> {
    let invalid = |field, reason| Err(FormatError::InvalidFieldValue { field, reason });

    if threshold < 2 {
        return invalid(THRESHOLD, "must be at least 2");
    }
    if total < threshold {
        return invalid(TOTAL, "must be at least THRESHOLD");
    }
    if index < 1 {
        return invalid(INDEX, "must be at least 1");
    }
    if index > total {
        return invalid(INDEX, "must not exceed TOTAL");
    }
    if payload.is_empty() {
        return invalid(DATA, "must not be empty");
    }
    Ok(())
}

fn key_name(slot: usize) -> &'static str {
    [FORMAT, INDEX, THRESHOLD, TOTAL, DATA][slot]
}

// Accepts plain ASCII decimal only: no sign, no whitespace, no empty value.
fn parse_number(field: &'static str, value: &str) -> Result<u32, FormatError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::InvalidField(field));
    }
    value.parse().map_err(|_| FormatError::InvalidFieldValue {
        field,
        reason: "too large",
    })
}

// Any well-formed version other than ours is unsupported, however large.
// Values past `u32::MAX` are reported as `u32::MAX`.
fn parse_version(value: &str) -> Result<u32, FormatError> {
    match parse_number(FORMAT, value) {
        Err(FormatError::InvalidFieldValue { .. }) => Ok(u32::MAX),
        parsed => parsed,
    }
}

fn to_u8(field: &'static str, value: u32) -> Result<u8, FormatError> {
    u8::try_from(value).map_err(|_| FormatError::InvalidFieldValue {
        field,
        reason: "must not exceed 255",
    })
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, encode_share, FormatError};
    use crate::share::Share;
    use alloc::{string::String, vec};
    use rstest::rstest;

    const RECORD: &str = "FORMAT=2\nINDEX=1\nTHRESHOLD=3\nTOTAL=5\nDATA=AQIDBA==\n";

    #[test]
    fn encode_is_canonical() {
        assert_eq!(encode(1, 3, 5, &[1, 2, 3, 4]).unwrap(), RECORD);
    }

    #[test]
    fn decode_canonical_record() {
        let share = decode(RECORD).unwrap();
        assert_eq!(share.index, 1);
        assert_eq!(share.threshold, 3);
        assert_eq!(share.total, 5);
        assert_eq!(share.payload, vec![1, 2, 3, 4]);
        assert!(!share.is_empty());
    }

    #[test]
    fn decode_inverts_encode() {
        let share = Share {
            index: 255,
            threshold: 2,
            total: 255,
            payload: (0..=255u8).collect(),
        };
        let record = encode_share(&share).unwrap();
        assert!(record.ends_with('\n'));
        assert_eq!(decode(&record).unwrap(), share);
    }

    #[test]
    fn decode_tolerates_field_order_and_missing_final_newline() {
        let record = "DATA=AQIDBA==\nTOTAL=5\nTHRESHOLD=3\nINDEX=1\nFORMAT=2";
        assert_eq!(decode(record).unwrap(), decode(RECORD).unwrap());
    }

    fn with_line(key: &str, value: &str) -> String {
        RECORD
            .lines()
            .map(|line| {
                if line.split_once('=').map(|(k, _)| k) == Some(key) {
                    alloc::format!("{key}={value}\n")
                } else {
                    alloc::format!("{line}\n")
                }
            })
            .collect()
    }

    fn without_line(key: &str) -> String {
        RECORD
            .lines()
            .filter(|line| !line.starts_with(key))
            .map(|line| alloc::format!("{line}\n"))
            .collect()
    }

    #[rstest]
    #[case("1", 1)]
    #[case("3", 3)]
    #[case("20", 20)]
    #[case("4294967295", u32::MAX)]
    #[case("4294967296", u32::MAX)]
    #[case("99999999999", u32::MAX)]
    fn rejects_other_versions(#[case] version: &str, #[case] found: u32) {
        assert_eq!(
            decode(&with_line("FORMAT", version)),
            Err(FormatError::UnsupportedFormatVersion { found })
        );
    }

    #[rstest]
    #[case("FORMAT")]
    #[case("INDEX")]
    #[case("THRESHOLD")]
    #[case("TOTAL")]
    #[case("DATA")]
    fn rejects_missing_fields(#[case] key: &'static str) {
        assert_eq!(
            decode(&without_line(key)),
            Err(FormatError::MissingField(key))
        );
    }

    #[rstest]
    #[case("FORMAT", "two")]
    #[case("INDEX", "one")]
    #[case("INDEX", "-1")]
    #[case("INDEX", "+1")]
    #[case("THRESHOLD", "")]
    #[case("THRESHOLD", " 3")]
    #[case("TOTAL", "5.0")]
    fn rejects_non_numeric_fields(#[case] key: &'static str, #[case] value: &str) {
        assert_eq!(
            decode(&with_line(key, value)),
            Err(FormatError::InvalidField(key))
        );
    }

    #[rstest]
    #[case("AQIDBA=")]
    #[case("AQID BA==")]
    #[case("AQIDB!==")]
    #[case("AQIDBA===")]
    fn rejects_invalid_base64(#[case] data: &str) {
        assert_eq!(
            decode(&with_line("DATA", data)),
            Err(FormatError::InvalidEncoding)
        );
    }

    #[rstest]
    #[case("INDEX", "0")]
    #[case("INDEX", "6")]
    #[case("INDEX", "256")]
    #[case("THRESHOLD", "1")]
    #[case("THRESHOLD", "6")]
    #[case("TOTAL", "2")]
    #[case("TOTAL", "99999999999")]
    #[case("DATA", "")]
    fn rejects_out_of_range_values(#[case] key: &str, #[case] value: &str) {
        assert!(matches!(
            decode(&with_line(key, value)),
            Err(FormatError::InvalidFieldValue { .. })
        ));
    }

    #[test]
    fn rejects_unknown_and_duplicate_fields() {
        let unknown = alloc::format!("{RECORD}FIELD=GF256\n");
        assert_eq!(
            decode(&unknown),
            Err(FormatError::UnknownField { line: 6 })
        );

        let duplicate = alloc::format!("{RECORD}INDEX=2\n");
        assert_eq!(
            decode(&duplicate),
            Err(FormatError::DuplicateField("INDEX"))
        );
    }

    #[test]
    fn rejects_lines_without_separator() {
        let record = RECORD.replace("INDEX=1", "INDEX 1");
        assert_eq!(
            decode(&record),
            Err(FormatError::MalformedLine { line: 2 })
        );
        assert!(matches!(
            decode("FORMAT=2\n\nINDEX=1\n"),
            Err(FormatError::MalformedLine { line: 2 })
        ));
    }

    #[test]
    fn version_is_checked_before_missing_fields() {
        assert_eq!(
            decode("FORMAT=3\n"),
            Err(FormatError::UnsupportedFormatVersion { found: 3 })
        );
        assert_eq!(decode(""), Err(FormatError::MissingField("FORMAT")));
    }

    #[rstest]
    #[case(0, 2, 3)]
    #[case(1, 1, 3)]
    #[case(4, 2, 3)]
    #[case(1, 4, 3)]
    fn encode_refuses_invalid_parameters(
        #[case] index: u8,
        #[case] threshold: u8,
        #[case] total: u8,
    ) {
        assert!(matches!(
            encode(index, threshold, total, &[1]),
            Err(FormatError::InvalidFieldValue { .. })
        ));
    }

    #[test]
    fn encode_refuses_empty_payload() {
        assert!(matches!(
            encode(1, 2, 3, &[]),
            Err(FormatError::InvalidFieldValue { field: "DATA", .. })
        ));
    }
}
