use std::{
    env::{args, var},
    fs::read_to_string,
    path::Path,
    process::ExitCode,
};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wafer::{
    STD_LIBRARY, STD_LIBRARY_PATH, build_std_dictionary, new_script_interpreter,
    runtime::interpreter::{CodeManagement, Interpreter},
};

/// Send log events to stderr, filtered by the WAFER_LOG environment variable.  Only warnings are
/// shown when it isn't set.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("WAFER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

/// Get the standard library's path and source.  Either the file named by the environment
/// variable WAFER_STDLIB or the copy built into the executable.
fn std_library() -> Result<(String, String), String> {
    match var("WAFER_STDLIB") {
        Ok(path) => {
            debug!(path = path.as_str(), "using standard library from WAFER_STDLIB");

            read_to_string(&path)
                .map(|source| (path.clone(), source))
                .map_err(|error| format!("failed to read file: {}: {}", path, error))
        }

        Err(_) => Ok((STD_LIBRARY_PATH.to_string(), STD_LIBRARY.to_string())),
    }
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = args().collect();

    if args.len() < 2 {
        let exe_name = args
            .first()
            .and_then(|exe| Path::new(exe).file_name())
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "wafer".to_string());

        println!("Usage: {} <filename>", exe_name);
        return ExitCode::SUCCESS;
    }

    let path = &args[1];

    let source = match read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("failed to read file: {}", error);
            return ExitCode::FAILURE;
        }
    };

    let (std_path, std_source) = match std_library() {
        Ok(library) => library,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };

    // Words the library defined before an error are still made available to the script.
    let (std_library, std_result) = build_std_dictionary(&std_path, &std_source);

    if !std_library.last_printed_was_newline {
        println!();
    }

    if let Err(error) = std_result {
        eprintln!("{}", error);
    }

    let mut interpreter = new_script_interpreter(std_library.dictionary);
    let result = interpreter.process_source(path, &source);

    if !interpreter.last_printed_was_newline() {
        println!();
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
