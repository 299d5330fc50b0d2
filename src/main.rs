use std::fs::File;

use clap::{arg, command, value_parser};
use log::{error, info};

use topicao::{io, taflow, Error, Preferences, DEFAULT_BUDGET, DEFAULT_CAPACITY};

fn main() {
    env_logger::init();

    let args = command!()
        .arg(arg!(<INPUT> "Input file with the students' votes (JSON)"))
        .arg(
            arg!(-o --output <FILE> "Write the calculated assignment as JSON to this file")
                .required(false),
        )
        .arg(arg!(-p --print "Print the calculated assignment to stdout"))
        .arg(
            arg!(-b --budget <POINTS> "Number of preference points each student must distribute")
                .value_parser(value_parser!(u32))
                .default_value(&*Box::leak(DEFAULT_BUDGET.to_string().into_boxed_str())),
        )
        .arg(
            arg!(-c --capacity <NUM> "Maximum number of students assignable to a single topic")
                .value_parser(value_parser!(u32))
                .default_value(&*Box::leak(DEFAULT_CAPACITY.to_string().into_boxed_str())),
        )
        .get_matches();
    let input_path = args.get_one::<String>("INPUT").unwrap();
    let budget = *args.get_one::<u32>("budget").unwrap();
    let capacity = *args.get_one::<u32>("capacity").unwrap();

    let file = match File::open(input_path) {
        Ok(file) => file,
        Err(e) => {
            error!("Could not open input file '{}': {}", input_path, e);
            std::process::exit(exitcode::NOINPUT);
        }
    };
    let (students, topic_count) = match io::simple::read(file) {
        Ok(data) => data,
        Err(e) => {
            error!("Could not read input file '{}': {}", input_path, e);
            std::process::exit(exitcode::DATAERR);
        }
    };
    info!(
        "Read {} students voting for {} topics",
        students.len(),
        topic_count
    );

    let preferences = match Preferences::new(students, topic_count, budget) {
        Ok(preferences) => preferences,
        Err(e) => {
            error!("Invalid preference data: {}", e);
            std::process::exit(exitcode::DATAERR);
        }
    };

    let (assignment, score) = match taflow::solve(&preferences, capacity) {
        Ok(result) => result,
        Err(e @ Error::CapacityInfeasible { .. }) | Err(e @ Error::Infeasible) => {
            error!("No assignment found: {}", e);
            std::process::exit(exitcode::UNAVAILABLE);
        }
        Err(e) => {
            error!("Solver failed: {}", e);
            std::process::exit(exitcode::SOFTWARE);
        }
    };
    info!(
        "Found an optimal assignment with score {} ({:.1}% of the theoretical maximum)",
        score,
        100.0 * taflow::score::solution_quality(score, &preferences)
    );

    if args.get_flag("print") {
        print!("{}", io::format_assignment(&assignment, &preferences));
    }

    if let Some(output_path) = args.get_one::<String>("output") {
        let file = match File::create(output_path) {
            Ok(file) => file,
            Err(e) => {
                error!("Could not create output file '{}': {}", output_path, e);
                std::process::exit(exitcode::CANTCREAT);
            }
        };
        if let Err(e) = io::simple::write(file, &assignment, &preferences) {
            error!("Could not write output file '{}': {}", output_path, e);
            std::process::exit(exitcode::IOERR);
        }
        info!("Assignment written to '{}'", output_path);
    }
}
