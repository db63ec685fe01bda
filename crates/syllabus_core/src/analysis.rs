//! crates/syllabus_core/src/analysis.rs
//!
//! The prompt/response contract with the analysis model, independent of which
//! provider carries it. Adapters build the prompt with [`build_analysis_prompt`]
//! and turn the model's raw reply into a [`CourseAnalysis`] with
//! [`parse_analysis_reply`].

use crate::domain::CourseAnalysis;
use crate::ports::AnalysisError;
use regex::Regex;
use std::sync::LazyLock;

/// Only this many characters of syllabus text are sent to the model.
pub const MAX_PROMPT_TEXT_CHARS: usize = 8_000;

pub const MAX_DIFFICULTY: f64 = 10.0;

const PROMPT_TEMPLATE: &str = r#"Analyze this college course syllabus and provide:
1. Course name
2. Estimated hours per week (consider assignments, readings, projects, exams)
3. Difficulty rating out of 10 (consider course level, prerequisites, workload, grading)

Respond ONLY with a JSON object in this exact format:
{
  "courseName": "Course Name",
  "hoursPerWeek": 12,
  "difficulty": 7.5,
  "reasoning": "Brief explanation of the estimates"
}

Syllabus text:
{syllabus}"#;

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json|```").expect("code fence pattern is valid"));

/// Builds the instruction sent to the model, embedding at most
/// [`MAX_PROMPT_TEXT_CHARS`] characters of `text`.
pub fn build_analysis_prompt(text: &str) -> String {
    PROMPT_TEMPLATE.replace("{syllabus}", truncate_chars(text, MAX_PROMPT_TEXT_CHARS))
}

/// Returns the longest prefix of `text` holding at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Strips Markdown code fences from the model's reply and parses the JSON object inside.
///
/// Values outside the requested ranges are rejected rather than passed through.
pub fn parse_analysis_reply(reply: &str) -> Result<CourseAnalysis, AnalysisError> {
    let cleaned = CODE_FENCE.replace_all(reply, "");
    let analysis: CourseAnalysis = serde_json::from_str(cleaned.trim())
        .map_err(|e| AnalysisError::new(format!("model reply is not valid JSON: {}", e)))?;

    validate_analysis(&analysis)?;
    Ok(analysis)
}

fn validate_analysis(analysis: &CourseAnalysis) -> Result<(), AnalysisError> {
    if !analysis.hours_per_week.is_finite() || analysis.hours_per_week < 0.0 {
        return Err(AnalysisError::new(format!(
            "hoursPerWeek must be a non-negative number, got {}",
            analysis.hours_per_week
        )));
    }
    if !analysis.difficulty.is_finite() || !(0.0..=MAX_DIFFICULTY).contains(&analysis.difficulty) {
        return Err(AnalysisError::new(format!(
            "difficulty must be between 0 and {}, got {}",
            MAX_DIFFICULTY, analysis.difficulty
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_truncated_text() {
        let text = "#".repeat(MAX_PROMPT_TEXT_CHARS + 500);
        let prompt = build_analysis_prompt(&text);

        assert!(prompt.starts_with("Analyze this college course syllabus"));
        assert!(prompt.contains("\"hoursPerWeek\": 12"));
        assert_eq!(prompt.matches('#').count(), MAX_PROMPT_TEXT_CHARS);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn parses_fenced_reply() {
        let reply = "```json\n{\"courseName\":\"Algo\",\"hoursPerWeek\":10,\"difficulty\":6,\"reasoning\":\"ok\"}\n```";
        let analysis = parse_analysis_reply(reply).unwrap();

        assert_eq!(analysis.course_name, "Algo");
        assert_eq!(analysis.hours_per_week, 10.0);
        assert_eq!(analysis.difficulty, 6.0);
        assert_eq!(analysis.reasoning, "ok");
    }

    #[test]
    fn parses_bare_reply_without_reasoning() {
        let analysis =
            parse_analysis_reply(r#"  {"courseName":"Physics I","hoursPerWeek":8.5,"difficulty":7.5}  "#)
                .unwrap();
        assert_eq!(analysis.course_name, "Physics I");
        assert_eq!(analysis.reasoning, "");
    }

    #[test]
    fn rejects_non_json_reply() {
        let err = parse_analysis_reply("I could not read this syllabus.").unwrap_err();
        assert!(err.to_string().starts_with("Failed to analyze: model reply is not valid JSON"));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let too_hard = r#"{"courseName":"X","hoursPerWeek":5,"difficulty":11,"reasoning":""}"#;
        assert!(parse_analysis_reply(too_hard).is_err());

        let negative = r#"{"courseName":"X","hoursPerWeek":-1,"difficulty":3,"reasoning":""}"#;
        assert!(parse_analysis_reply(negative).is_err());
    }
}
