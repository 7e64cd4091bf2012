// Copyright (c) 2025 Firmwatch Contributors
//
// This file is part of Firmwatch.
//
// Licensed under the MIT License. See the LICENSE file in the repository root
// for the full license text.
//
// This software is provided "AS IS", without warranty of any kind.

//! Firmware version string comparison.
//!
//! Fleet firmware strings are only loosely semver-shaped: vendors prepend
//! `v`, append `-beta` suffixes or embed build letters. Comparison strips
//! everything that is not a digit or a dot, splits on dots and compares the
//! segments numerically, padding the shorter side with zeros. A segment that
//! does not parse counts as 0, so comparison is total and never fails.

use std::cmp::Ordering;

/// Numeric dot-segments of a version string after stripping non `[0-9.]`
/// characters. `"v1.2.3-beta"` becomes `[1, 2, 3]`; a string with no digits
/// collapses to all-zero segments.
fn numeric_segments(version: &str) -> Vec<u64> {
    let cleaned: String = version
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned
        .split('.')
        .map(|segment| segment.parse::<u64>().unwrap_or(0))
        .collect()
}

/// Three-way comparison of two version strings.
///
/// Trailing zero segments are insignificant: `"1.2"` and `"1.2.0"` compare
/// equal. Total for arbitrary input, including empty strings.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = numeric_segments(a);
    let right = numeric_segments(b);

    let len = left.len().max(right.len());
    for i in 0..len {
        let x = left.get(i).copied().unwrap_or(0);
        let y = right.get(i).copied().unwrap_or(0);
        match x.cmp(&y) {
            Ordering::Less => return Ordering::Less,
            Ordering::Greater => return Ordering::Greater,
            Ordering::Equal => {}
        }
    }

    Ordering::Equal
}

/// Returns true if `current` is strictly below `expected`.
///
/// An empty string on either side is never reported as lower: a device that
/// has not reported a firmware version yet must not be flagged outdated.
#[must_use]
pub fn is_lower(current: &str, expected: &str) -> bool {
    if current.is_empty() || expected.is_empty() {
        return false;
    }
    compare_versions(current, expected) == Ordering::Less
}
