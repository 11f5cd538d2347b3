// Quiz attempts and the points leaderboard.
//
// An attempt is scored on the server from the submitted answer records and
// written once; points on the leaderboard are the sum of a user's scores.

pub mod attempts;
pub mod handlers;

use crate::errors::AppError;
use crate::models::quiz::AnswerRecord;

pub const DEFAULT_LEADERBOARD_SIZE: i64 = 10;
pub const MAX_LEADERBOARD_SIZE: i64 = 100;

/// Score and question count for a set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: i32,
    pub total: i32,
}

/// Scores by comparing each selected answer with the correct one; the
/// client's `is_correct` flag is ignored.
pub fn score_answers(answers: &[AnswerRecord]) -> Result<Score, AppError> {
    if answers.is_empty() {
        return Err(AppError::Validation(
            "answers must contain at least one entry".to_string(),
        ));
    }
    let total = i32::try_from(answers.len())
        .map_err(|_| AppError::Validation("too many answers".to_string()))?;
    let correct = answers.iter().filter(|a| a.is_answer_correct()).count() as i32;
    Ok(Score { correct, total })
}

pub fn leaderboard_size(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_LEADERBOARD_SIZE)
        .clamp(1, MAX_LEADERBOARD_SIZE)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn answer(question: &str, correct: bool) -> AnswerRecord {
        AnswerRecord {
            question: question.to_string(),
            selected_answer: if correct { "B" } else { "A" }.to_string(),
            correct_answer: "B".to_string(),
            is_correct: correct,
        }
    }

    #[test]
    fn test_score_counts_correct_answers() {
        let answers = vec![
            answer("What does chlorophyll absorb?", true),
            answer("Where does the Calvin cycle occur?", false),
            answer("What gas is released?", true),
        ];
        assert_eq!(
            score_answers(&answers).unwrap(),
            Score { correct: 2, total: 3 }
        );
    }

    #[test]
    fn test_forged_correct_flag_is_not_counted() {
        let forged = AnswerRecord {
            question: "Where does the Calvin cycle occur?".to_string(),
            selected_answer: "A".to_string(),
            correct_answer: "B".to_string(),
            is_correct: true,
        };
        assert_eq!(
            score_answers(&[forged.clone()]).unwrap(),
            Score { correct: 0, total: 1 }
        );
        assert!(!forged.graded().is_correct);
    }

    #[test]
    fn test_grading_ignores_surrounding_whitespace() {
        let answer = AnswerRecord {
            question: "What gas is released?".to_string(),
            selected_answer: " Oxygen ".to_string(),
            correct_answer: "Oxygen".to_string(),
            is_correct: false,
        };
        assert!(answer.graded().is_correct);
    }

    #[test]
    fn test_empty_attempt_is_rejected() {
        assert!(matches!(score_answers(&[]), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_answer_records_use_client_field_names() {
        let json = serde_json::to_value(answer("Q1", false)).unwrap();
        assert_eq!(json["selectedAnswer"], "A");
        assert_eq!(json["correctAnswer"], "B");
        assert_eq!(json["isCorrect"], false);
    }

    #[test]
    fn test_leaderboard_size_is_clamped() {
        assert_eq!(leaderboard_size(None), DEFAULT_LEADERBOARD_SIZE);
        assert_eq!(leaderboard_size(Some(-3)), 1);
        assert_eq!(leaderboard_size(Some(1_000)), MAX_LEADERBOARD_SIZE);
    }
}
