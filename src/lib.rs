pub mod flow;
pub mod io;
pub mod taflow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of preference points each student must distribute over their votes
pub const DEFAULT_BUDGET: u32 = 9;
/// Default maximum number of students assignable to a single topic
pub const DEFAULT_CAPACITY: u32 = 2;

/// A single weighted vote of a student for a topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Index of the voted topic
    pub topic: usize,
    /// Number of preference points the student put on this topic
    pub weight: u32,
}

/// Representation of a student's data
#[derive(Debug, Clone)]
pub struct Student {
    /// id/index of the Student in the list of students
    pub index: usize,
    /// Student's name. Mainly used for info/debug output
    pub name: String,
    /// Weighted topic votes of the student
    pub votes: Vec<Vote>,
}

/// A validated topic assignment problem: the list of students with their votes, the number of
/// available topics and the per-student preference point budget.
///
/// `Preferences` objects are only created through [Preferences::new], which checks all input
/// invariants, so every other part of the crate can rely on them: each student's vote weights sum
/// up to `budget`, no student votes for the same topic twice and all voted topic indexes are
/// within `0..topic_count`.
#[derive(Debug, Clone)]
pub struct Preferences {
    /// List of all students. Each student's `index` equals its position in this list.
    pub students: Vec<Student>,
    /// Number of available topics. Topics are identified by their index in `0..topic_count`.
    pub topic_count: usize,
    /// Number of preference points each student distributes over their votes
    pub budget: u32,
}

impl Preferences {
    /// Construct a validated `Preferences` object from raw input data.
    ///
    /// Checks all vote invariants (see struct documentation) and returns the matching [Error] for
    /// the first violated one. No optimization work happens here.
    pub fn new(students: Vec<Student>, topic_count: usize, budget: u32) -> Result<Self, Error> {
        if topic_count == 0 {
            return Err(Error::InvalidTopicCount);
        }
        for student in students.iter() {
            let mut voted = vec![false; topic_count];
            let mut sum: u32 = 0;
            for vote in student.votes.iter() {
                if vote.topic >= topic_count {
                    return Err(Error::TopicOutOfRange {
                        student: student.name.clone(),
                        topic: vote.topic,
                        topic_count,
                    });
                }
                if voted[vote.topic] {
                    return Err(Error::DuplicateVote {
                        student: student.name.clone(),
                        topic: vote.topic,
                    });
                }
                voted[vote.topic] = true;
                sum += vote.weight;
            }
            if sum != budget {
                return Err(Error::InvalidPreferenceSum {
                    student: student.name.clone(),
                    sum,
                    budget,
                });
            }
        }
        Ok(Preferences {
            students,
            topic_count,
            budget,
        })
    }

    /// The preference weight the given student put on the given topic (0 for unvoted topics)
    pub fn weight(&self, student: usize, topic: usize) -> u32 {
        self.students[student]
            .votes
            .iter()
            .find(|v| v.topic == topic)
            .map(|v| v.weight)
            .unwrap_or(0)
    }
}

/// Result of a successful solve: the assigned topic index for each student, indexed by the
/// student's index.
pub type Assignment = Vec<usize>;

/// Errors reported by [Preferences::new] and [taflow::solve].
///
/// The input validation errors (`InvalidPreferenceSum`, `DuplicateVote`, `TopicOutOfRange`,
/// `InvalidTopicCount`) mean the raw preference data is malformed. `CapacityInfeasible` and
/// `Infeasible` are legitimate outcomes of well-formed problems: no assignment respecting the
/// capacity constraints exists. `MalformedFlow` indicates a defect in the optimizer itself and
/// should never occur.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("preference points of student '{student}' sum up to {sum} instead of {budget}")]
    InvalidPreferenceSum {
        student: String,
        sum: u32,
        budget: u32,
    },
    #[error("student '{student}' voted for topic {topic} more than once")]
    DuplicateVote { student: String, topic: usize },
    #[error("student '{student}' voted for topic {topic}, which is not within 0..{topic_count}")]
    TopicOutOfRange {
        student: String,
        topic: usize,
        topic_count: usize,
    },
    #[error("the number of topics must be positive")]
    InvalidTopicCount,
    #[error("{students} students cannot fit into {places} available topic places")]
    CapacityInfeasible { students: usize, places: usize },
    #[error("no feasible assignment exists with the given topic capacities")]
    Infeasible,
    #[error("optimizer produced an invalid flow for student '{student}'")]
    MalformedFlow { student: String },
}
