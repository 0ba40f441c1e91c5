use std::io::{self, BufRead, Write};

use components::model::grade::Grade;
use components::repl::{OutputFormat, REPL};
use components::service::form::TeacherManager;
use components::store::file_store::FileStore;

mod components;
#[cfg(test)]
mod tests;

fn main() {
    env_logger::init();

    let data_dir = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());

    let teachers = match TeacherManager::open(&data_dir) {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("Failed to open teacher store: {}", e);
            std::process::exit(1);
        }
    };
    let grades = match FileStore::<Grade>::open(&data_dir) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open grade store: {}", e);
            std::process::exit(1);
        }
    };

    let mut repl = REPL::new(&teachers, &grades);
    let mut format: Option<OutputFormat> = None;

    println!("Examination System ({})", data_dir);
    println!("Type HELP for commands, FORMAT <standard|json|table> to switch output, EXIT to quit.");

    let stdin = io::stdin();
    loop {
        prompt(repl.session());

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        match tokens.next().map(str::to_uppercase).as_deref() {
            Some("EXIT") | Some("QUIT") => break,
            Some("FORMAT") => {
                format = match tokens.next().map(str::to_lowercase).as_deref() {
                    Some("json") => Some(OutputFormat::Json),
                    Some("table") => Some(OutputFormat::Table),
                    _ => Some(OutputFormat::Standard),
                };
                continue;
            }
            _ => {}
        }

        match repl.execute(line, format) {
            Ok(output) => println!("{}", output),
            Err(e) => println!("Error: {}", e),
        }
    }
}

fn prompt(session: Option<&str>) {
    match session {
        Some(username) => print!("{}> ", username),
        None => print!("> "),
    }
    let _ = io::stdout().flush();
}
