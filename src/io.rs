pub mod simple;

use crate::{Assignment, Preferences};
use std::fmt::Write;

/// Format the calculated topic assignment into a human readable String (e.g. to print it to
/// stdout).
///
/// The output format will look like
/// ```text
/// ===== Topic 0 =====
/// Anton Administrator (9 points)
///
/// ===== Topic 1 =====
/// Bertalotta Beispiel (4 points)
/// ```
/// listing the realized preference weight of every student next to their name.
pub fn format_assignment(assignment: &Assignment, preferences: &Preferences) -> String {
    let mut result = String::new();
    for topic in 0..preferences.topic_count {
        write!(result, "\n===== Topic {} =====\n", topic).unwrap();
        for (student, assigned_topic) in assignment.iter().enumerate() {
            if *assigned_topic == topic {
                write!(
                    result,
                    "{} ({} points)\n",
                    preferences.students[student].name,
                    preferences.weight(student, topic)
                )
                .unwrap();
            }
        }
    }
    result
}
