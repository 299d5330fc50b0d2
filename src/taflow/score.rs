use super::Score;
use crate::{Assignment, Preferences};

/// Calculate the score of a given assignment: the sum over all students of the preference weight
/// they put on their assigned topic (0 for an unvoted topic).
pub fn assignment_score(preferences: &Preferences, assignment: &Assignment) -> Score {
    assignment
        .iter()
        .enumerate()
        .map(|(student, topic)| preferences.weight(student, *topic))
        .sum()
}

/// Calculate a simple upper bound for the solution score of the given problem, assuming every
/// student can be assigned to their highest-weighted topic.
pub fn theoretical_max_score(preferences: &Preferences) -> Score {
    preferences
        .students
        .iter()
        .map(|student| student.votes.iter().map(|v| v.weight).max().unwrap_or(0))
        .sum()
}

/// Calculate a comparable solution quality in `0.0..=1.0`: the achieved score relative to the
/// theoretical maximum. A quality of 1.0 means every student got their highest-weighted topic.
pub fn solution_quality(score: Score, preferences: &Preferences) -> f32 {
    let max_score = theoretical_max_score(preferences);
    if max_score == 0 {
        return 1.0;
    }
    score as f32 / max_score as f32
}
