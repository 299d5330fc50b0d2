//! A specialization of the generic minimum cost flow algorithm from `flow` for the topic
//! assignment problem.
//!
//! The module provides the `build_network()` function to translate a `Preferences` object into a
//! flow network encoding the assignment constraints, the `solve()` function to run the
//! optimization and the extraction of the resulting assignment from the saturated network. All
//! the conversion from Student/Vote objects into nodes and arcs of the `flow::Graph` happens
//! here.

pub mod score;

use crate::flow::{EdgeId, Graph, NodeId};
use crate::{Assignment, Error, Preferences};
use log::debug;

/// Type of the result score (total realized preference weight) of a solve
pub type Score = u32;

/// Type to use as arc costs in the assignment network.
///
/// Costs are "regret" values `budget - weight`, so a single arc cost fits easily into any integer
/// type. The path search sums costs over paths and the optimizer sums them over all students, so
/// with hundreds of students and a budget of 9 the totals stay far below even the i32 range; i64
/// leaves room for absurd budgets without making the arc vector noticeably larger.
pub type Cost = i64;

/// Cost of assigning a student to a topic they gave `weight` preference points: the points they
/// miss out on compared to the full budget. Minimizing the sum of missed points is equivalent to
/// maximizing the sum of realized points, since every student is assigned exactly once.
fn arc_cost(budget: u32, weight: u32) -> Cost {
    Cost::from(budget - weight)
}

/// The flow network of one assignment problem, together with the node and arc bookkeeping
/// required to decode the optimized flow back into an assignment.
///
/// Node layout: node 0 is the source, followed by one node per student, one node per topic and
/// the sink as the last node.
struct AssignmentNetwork {
    graph: Graph<Cost>,
    source: NodeId,
    sink: NodeId,
    /// Arc id of every student-to-topic arc. Each row represents one student, each column one topic.
    choice_edges: ndarray::Array2<EdgeId>,
}

/// Main method of the module to solve a topic assignment problem using the minimum cost flow
/// method.
///
/// It takes a validated `Preferences` object and the per-topic capacity and produces an optimal
/// assignment of students to topics together with its score, the total number of realized
/// preference points. `CapacityInfeasible` and `Infeasible` results signal that no assignment
/// fits the capacity constraints; they are expected outcomes of well-formed problems, not input
/// errors.
pub fn solve(preferences: &Preferences, capacity: u32) -> Result<(Assignment, Score), Error> {
    let num_students = preferences.students.len();
    let places = preferences.topic_count * capacity as usize;
    if num_students > places {
        return Err(Error::CapacityInfeasible {
            students: num_students,
            places,
        });
    }

    debug!(
        "Building assignment network for {} students and {} topics with capacity {}",
        num_students, preferences.topic_count, capacity
    );
    let mut network = build_network(preferences, capacity);
    let (flow_value, total_cost) = network.graph.min_cost_flow(network.source, network.sink);
    debug!(
        "Optimizer routed {} units of flow with total cost {}",
        flow_value, total_cost
    );

    // Every student's unit of flow must have reached the sink. With the dense student-to-topic arcs
    // this can only fail if the capacity pre-check above would have failed as well, but the
    // optimizer's result is what actually proves (in)feasibility.
    if (flow_value as usize) != num_students {
        return Err(Error::Infeasible);
    }

    let assignment = extract_assignment(&network, preferences)?;
    let score = (num_students as i64 * i64::from(preferences.budget) - total_cost) as Score;
    debug!("Found an optimal assignment with score {}", score);
    Ok((assignment, score))
}

/// Translate a `Preferences` object into the assignment network.
///
/// The network contains `2 + |students| + topic_count` nodes and a forward arc per student (from
/// the source), per student-topic pair and per topic (to the sink). Every student is connected to
/// *every* topic, not only the voted ones; unvoted topics get the maximum cost `budget`, which
/// corresponds to zero realized preference points. This keeps the flow problem feasible whenever
/// the capacity pre-check passes and makes the cost of any complete assignment differ from
/// `|students| * budget` exactly by its total realized weight.
///
/// The student-to-topic arcs are added in ascending topic id order, which fixes the tie-break
/// between equally good assignments (see `flow::Graph::add_edge()`).
fn build_network(preferences: &Preferences, capacity: u32) -> AssignmentNetwork {
    let num_students = preferences.students.len();
    let num_topics = preferences.topic_count;
    let num_nodes = 2 + num_students + num_topics;
    let source: NodeId = 0;
    let sink: NodeId = num_nodes - 1;
    let student_node = |x: usize| -> NodeId { 1 + x };
    let topic_node = |y: usize| -> NodeId { 1 + num_students + y };

    // Collect the vote weights into a dense matrix. Each row represents one student, each column
    // one topic; unvoted topics stay at weight 0.
    let mut weights = ndarray::Array2::<u32>::zeros([num_students, num_topics]);
    for (x, student) in preferences.students.iter().enumerate() {
        for vote in student.votes.iter() {
            weights[[x, vote.topic]] = vote.weight;
        }
    }

    let mut graph = Graph::<Cost>::new(num_nodes);
    for x in 0..num_students {
        graph.add_edge(source, student_node(x), 1, 0);
    }
    let mut choice_edges = ndarray::Array2::<EdgeId>::zeros([num_students, num_topics]);
    for x in 0..num_students {
        for y in 0..num_topics {
            choice_edges[[x, y]] = graph.add_edge(
                student_node(x),
                topic_node(y),
                1,
                arc_cost(preferences.budget, weights[[x, y]]),
            );
        }
    }
    for y in 0..num_topics {
        graph.add_edge(topic_node(y), sink, capacity, 0);
    }

    AssignmentNetwork {
        graph,
        source,
        sink,
        choice_edges,
    }
}

/// Decode the saturated network into an assignment by finding the single saturated student-to-topic
/// arc of every student.
///
/// A student with no or more than one saturated arc means the optimizer violated its contract
/// (unit source arcs and integral augmentations make anything else impossible), so this is
/// reported as the fatal `MalformedFlow` error instead of being silently repaired.
fn extract_assignment(
    network: &AssignmentNetwork,
    preferences: &Preferences,
) -> Result<Assignment, Error> {
    let mut assignment = Assignment::with_capacity(preferences.students.len());
    for (x, student) in preferences.students.iter().enumerate() {
        let mut assigned_topic: Option<usize> = None;
        for y in 0..preferences.topic_count {
            if network.graph.flow(network.choice_edges[[x, y]]) > 0 {
                if assigned_topic.replace(y).is_some() {
                    return Err(Error::MalformedFlow {
                        student: student.name.clone(),
                    });
                }
            }
        }
        match assigned_topic {
            Some(topic) => assignment.push(topic),
            None => {
                return Err(Error::MalformedFlow {
                    student: student.name.clone(),
                })
            }
        }
    }
    Ok(assignment)
}
