//! Parsing of the free-text "sets x reps x weight" log field.
//!
//! The notation is entered by hand and inconsistently formatted, so the
//! parser is deliberately lenient: segments that cannot be understood are
//! dropped instead of failing the whole entry.

/// One homogeneous block of sets. `reps == 0` denotes a to-failure set with
/// an unknown rep count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetRecord {
    pub sets: u32,
    pub reps: u32,
    pub weight: f32,
}

/// Parses a set-notation string like `"3x10x135; 1x8x155; failure"` into a
/// sequence of [`SetRecord`]s.
///
/// Segments are separated by `;`. A segment containing `x` is read as
/// `sets x reps [x weight]`, where the weight is the first numeric substring
/// of the third part (0 if absent). A segment containing `failure` yields a
/// single record with zero reps. Anything else is ignored.
#[must_use]
pub fn parse(notation: &str) -> Vec<SetRecord> {
    let mut records = Vec::new();

    for segment in notation.split(';') {
        let segment = segment.trim();

        if segment.contains('x') {
            if let Some(record) = parse_counted_segment(segment) {
                records.push(record);
            }
        } else if segment.to_lowercase().contains("failure") {
            records.push(parse_failure_segment(segment));
        }
    }

    records
}

fn parse_counted_segment(segment: &str) -> Option<SetRecord> {
    let parts = segment.split('x').collect::<Vec<_>>();

    if parts.len() < 2 {
        return None;
    }

    let sets = parts[0].trim().parse::<u32>().ok()?;
    let reps = parts[1].trim().parse::<u32>().ok()?;
    let weight = parts
        .get(2)
        .and_then(|part| first_number(part))
        .unwrap_or(0.0);

    Some(SetRecord { sets, reps, weight })
}

fn parse_failure_segment(segment: &str) -> SetRecord {
    SetRecord {
        sets: set_count_prefix(segment).unwrap_or(1),
        reps: 0,
        weight: 0.0,
    }
}

/// Extracts the first decimal or integer numeric substring, e.g. `135` from
/// `"135 lbs"` or `62.5` from `"@62.5kg"`.
fn first_number(text: &str) -> Option<f32> {
    let bytes = text.as_bytes();
    let start = bytes.iter().position(u8::is_ascii_digit)?;
    let mut end = start;

    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }

    if end < bytes.len()
        && bytes[end] == b'.'
        && bytes.get(end + 1).is_some_and(u8::is_ascii_digit)
    {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    text[start..end].parse().ok()
}

/// Extracts a set count written as a digit run directly followed by `x`,
/// e.g. `2` from `"2x failure"`.
fn set_count_prefix(segment: &str) -> Option<u32> {
    let bytes = segment.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if bytes.get(i) == Some(&b'x') {
                return segment[start..i].parse().ok();
            }
        } else {
            i += 1;
        }
    }

    None
}
