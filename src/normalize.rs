// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Model response cleanup.
//!
//! The prompt asks for raw CSV, yet models love to wrap their answer in a markdown code fence,
//! sometimes with a language tag, sometimes with a polite sentence around it. This module peels
//! that wrapping off without attempting to be a markdown parser. It assumes at most one fenced
//! block per response and hands anything deeper to the CSV parser to reject.

use tracing::debug;

const FENCE: &str = "```";

/// Strip markdown fencing from model response text.
///
/// Trims surrounding whitespace first. When a fence marker is present, extracts only the span
/// between the first fence line and the last fence marker, discarding any prose outside the
/// fence along with an optional language tag on the opening fence line. Text without any fence
/// marker passes through untouched apart from the trim.
///
/// # Invariants
///
/// - Idempotent: normalizing already normalized text changes nothing.
/// - Enclosed content is never altered, only the fencing around it is removed.
pub fn normalize(text: &str) -> String {
    let text = text.trim();
    let Some(first) = text.find(FENCE) else {
        return text.to_string();
    };

    debug!("Response contains markdown fencing, extracting enclosed span");

    // Opening fence may carry a language tag, so the enclosed span starts on the next line.
    let after_fence = &text[first + FENCE.len()..];
    let body_start = after_fence.find('\n').map(|index| index + 1).unwrap_or(after_fence.len());
    let body = &after_fence[body_start..];

    let enclosed = match body.rfind(FENCE) {
        Some(last) => &body[..last],
        None => body,
    };

    enclosed.trim().to_string()
}
