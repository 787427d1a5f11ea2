// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Prompt construction.
//!
//! Pure string templating with no branching. A [`TestRequest`] goes in, a [`PromptPayload`] with
//! a fixed system instruction and a filled-in user instruction comes out. The template always
//! demands the same four test categories and a raw CSV answer under the fixed header. That
//! demand is advisory only. The model is free to ignore it, which is exactly why the normalizer
//! and parser downstream treat the response with suspicion.

use crate::model::{TestRequest, CSV_HEADER};

/// Fixed persona instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are a Principal SDET and Security Researcher. \
    Your goal is to break software by finding edge cases, security vulnerabilities, and logic gaps. \
    You do not write \"happy path\" tests. You write destructive tests.";

/// Prompt pair derived deterministically from one test request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptPayload {
    /// Fixed persona instruction.
    pub system_instruction: String,

    /// Per-request instruction with the three input fields substituted in.
    pub user_instruction: String,
}

impl PromptPayload {
    /// Build prompt payload from given test request.
    pub fn new(request: &TestRequest) -> Self {
        let user_instruction = format!(
            "Generate a comprehensive test data table for the following feature:\n\
             \n\
             **Feature:** {feature}\n\
             **Platform:** {platform}\n\
             **Context:** {context}\n\
             \n\
             **Testing Requirements:**\n\
             1. **Security:** Include SQL Injection, XSS, and Input Sanitization checks.\n\
             2. **Boundary:** Test Minimum-1, Maximum+1, and Overflow values.\n\
             3. **Data Types:** Test Mismatched types (Strings in Integer fields).\n\
             4. **Localization:** Include Chinese/Arabic characters and Unicode/Emoji inputs.\n\
             \n\
             **Output Format:**\n\
             Return ONLY a raw CSV string with headers: {header}.\n\
             No conversational text, no markdown code blocks.",
            feature = request.feature_name,
            platform = request.platform.label(),
            context = request.context,
            header = CSV_HEADER.join(", "),
        );

        Self { system_instruction: SYSTEM_INSTRUCTION.into(), user_instruction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::Platform;

    use simple_test_case::test_case;

    fn request() -> TestRequest {
        TestRequest::new("Login Form", Platform::WebApplication, "max 20 chars").unwrap()
    }

    #[test]
    fn prompt_embeds_all_three_fields() {
        let payload = PromptPayload::new(&request());
        assert!(payload.user_instruction.contains("**Feature:** Login Form"));
        assert!(payload.user_instruction.contains("**Platform:** Web Application"));
        assert!(payload.user_instruction.contains("**Context:** max 20 chars"));
    }

    #[test_case("SQL Injection"; "security category")]
    #[test_case("Minimum-1, Maximum+1, and Overflow"; "boundary category")]
    #[test_case("Mismatched types"; "type mismatch category")]
    #[test_case("Unicode/Emoji"; "localization category")]
    #[test]
    fn smoke_prompt_requests_required_categories(expect: &str) {
        let payload = PromptPayload::new(&request());
        assert!(payload.user_instruction.contains(expect));
    }

    #[test]
    fn prompt_requests_fixed_csv_header() {
        let payload = PromptPayload::new(&request());
        assert!(payload
            .user_instruction
            .contains("Category, Test Case Description, Test Data / Input, Expected Result"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let first = PromptPayload::new(&request());
        let second = PromptPayload::new(&request());
        assert_eq!(first, second);
    }

    #[test]
    fn system_instruction_is_fixed() {
        let payload = PromptPayload::new(&request());
        assert_eq!(payload.system_instruction, SYSTEM_INSTRUCTION);
        assert!(payload.system_instruction.contains("destructive tests"));
    }
}
