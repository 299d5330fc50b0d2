use crate::{Assignment, Preferences, Student, Vote};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::collections::BTreeMap;

/// Read the list of students and the topic count from the simple JSON representation: an object
/// mapping each student's name to their vote list (canonical serde_json serialization of `Vote`
/// objects), plus the number of available topics:
///
/// ```json
/// {
///     "students": {
///         "Anton Administrator": [{"topic": 0, "weight": 9}],
///         "Bertalotta Beispiel": [{"topic": 0, "weight": 5}, {"topic": 1, "weight": 4}]
///     },
///     "topic_count": 4
/// }
/// ```
///
/// Students are indexed in alphabetical order of their names, so the same input file always
/// produces the same student list. The returned data is *not* validated; pass it to
/// `Preferences::new()` for that.
pub fn read<R: std::io::Read>(reader: R) -> Result<(Vec<Student>, usize), String> {
    let mut data: serde_json::Value =
        serde_json::from_reader(reader).map_err(|err| err.to_string())?;

    let votes: BTreeMap<String, Vec<Vote>> =
        serde_json::from_value(data["students"].take()).map_err(|e| format!("{}", e))?;
    let topic_count = data["topic_count"]
        .as_u64()
        .ok_or("No 'topic_count' number found in data.")? as usize;

    let students = votes
        .into_iter()
        .enumerate()
        .map(|(index, (name, votes))| Student { index, name, votes })
        .collect();

    Ok((students, topic_count))
}

/// Write the calculated topic assignment as simple JSON representation (an object mapping each
/// student's name to the index of their assigned topic) to a Writer (e.g. an output file).
pub fn write<W: std::io::Write>(
    writer: W,
    assignment: &Assignment,
    preferences: &Preferences,
) -> Result<(), String> {
    let mut assigned = serde_json::Map::new();
    for (student, topic) in preferences.students.iter().zip(assignment.iter()) {
        assigned.insert(student.name.clone(), json!(topic));
    }
    let data = json!({
        "format": "X-topicassignment-simple",
        "version": "1.0",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, false),
        "assignment": assigned,
    });
    serde_json::to_writer(writer, &data).map_err(|e| format!("{}", e))?;

    Ok(())
}
