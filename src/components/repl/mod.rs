use std::collections::HashMap;

use serde::Serialize;
use serde_json::json;
use tabled::{settings::Style, Table, Tabled};

use crate::components::{
    model::{grade::Grade, teacher::Teacher},
    service::{
        auth,
        filter::TeacherFilter,
        form::{PendingChange, Proposal, TeacherFormInput, TeacherManager},
    },
    store::file_store::FileStore,
};

mod help;
use help::{get_general_help, COMMAND_HELP};

/// Output format options for command results.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Standard, // Plain text, human-readable
    Json,     // Structured JSON for programmatic consumption
    Table,    // ASCII table for aligned columnar display
}

/// All REPL commands with their parameters. Each maps onto one user action
/// of the management screens.
#[derive(Debug, Clone)]
pub enum Command {
    Login {
        username: String,
        password: String,
    },
    Register {
        input: TeacherFormInput,
    },

    // Teacher management (mutations go through CONFIRM)
    AddTeacher {
        input: TeacherFormInput,
    },
    UpdateTeacher {
        id: u64,
        input: TeacherFormInput,
    },
    DeleteTeacher {
        id: u64,
    },
    GetTeachers,
    FilterTeachers {
        filter: TeacherFilter,
    },
    Confirm,
    Cancel,

    // Grades (applied directly, no confirmation step)
    AddGrade {
        student_id: u64,
        question_id: u64,
        score: i64,
    },
    SetGrade {
        id: u64,
        student_id: u64,
        question_id: u64,
        score: i64,
    },
    GetGrades,

    Help {
        command: Option<String>,
    },
}

/// Command tags used for output formatting decisions.
#[derive(Serialize, Debug, PartialEq)]
enum CommandBasic {
    Login,
    Register,
    AddTeacher,
    UpdateTeacher,
    DeleteTeacher,
    GetTeachers,
    FilterTeachers,
    Confirm,
    Cancel,
    AddGrade,
    SetGrade,
    GetGrades,
    Help,
}

/// Result of one command execution, including metadata.
#[derive(Serialize, Debug)]
struct CommandResult {
    executed_command: CommandBasic,
    success: bool,
    message: String,
    data: Option<serde_json::Value>,
    timestamp: String, // ISO 8601
}

#[derive(Tabled)]
struct StatusTable {
    status: String,
    message: String,
    timestamp: String,
}

#[derive(Tabled)]
struct TeacherRow {
    id: u64,
    username: String,
    name: String,
    age: u32,
    gender: String,
    department: String,
    password: String,
    position: String,
}

impl From<&Teacher> for TeacherRow {
    fn from(t: &Teacher) -> Self {
        TeacherRow {
            id: t.id,
            username: t.username.clone(),
            name: t.name.clone(),
            age: t.age,
            gender: t.gender.to_string(),
            department: t.department.to_string(),
            password: t.password.clone(),
            position: t.position.to_string(),
        }
    }
}

#[derive(Tabled)]
struct GradeRow {
    id: u64,
    student: u64,
    question: u64,
    score: i64,
}

/// Interactive front-end for the examination-management core. Stands in for
/// the desktop screens: commands gather form input, proposals are held until
/// CONFIRM, and every listing re-queries the store.
pub struct REPL<'a> {
    teachers: &'a TeacherManager,
    grades: &'a FileStore<Grade>,
    pending: Option<PendingChange>,
    session: Option<String>,
}

const CONFIRM_HINT: &str = "Use CONFIRM to apply or CANCEL to discard";

impl<'a> REPL<'a> {
    pub fn new(teachers: &'a TeacherManager, grades: &'a FileStore<Grade>) -> Self {
        REPL {
            teachers,
            grades,
            pending: None,
            session: None,
        }
    }

    /// Username of the logged-in teacher, if any.
    pub fn session(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Executes a command string (commands chained with AND) and returns
    /// formatted output. Parse failures surface as `Err`; user-correctable
    /// outcomes (validation, stale selection, bad credentials) come back as
    /// unsuccessful results with their message.
    pub fn execute(&mut self, input: &str, format: Option<OutputFormat>) -> Result<String, String> {
        let format = format.unwrap_or(OutputFormat::Standard);

        let result = (|| {
            let commands = parse_commands(input)?;
            let mut results = Vec::new();

            for cmd in commands {
                results.push(self.run_command(cmd));
            }

            format_results(&results, format)
        })();

        match result {
            Ok(output) => Ok(output),
            Err(e) => match format {
                OutputFormat::Standard => Err(e),
                OutputFormat::Json => Ok(json!({
                    "success": false,
                    "error": e,
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                })
                .to_string()),
                OutputFormat::Table => {
                    let results = vec![StatusTable {
                        status: String::from("ERROR"),
                        message: e,
                        timestamp: chrono::Utc::now().to_rfc3339(),
                    }];

                    Ok(Table::new(results).with(Style::ascii()).to_string())
                }
            },
        }
    }

    fn run_command(&mut self, cmd: Command) -> CommandResult {
        match cmd {
            Command::Login { username, password } => {
                match auth::login(self.teachers, &username, &password) {
                    Ok(teacher) => {
                        self.session = Some(teacher.username.clone());
                        self.result(CommandBasic::Login, true, "Login successful".into(), None)
                    }
                    Err(e) => self.result(CommandBasic::Login, false, e.to_string(), None),
                }
            }
            Command::Register { input } => match self.teachers.register(&input) {
                Ok(teacher) => self.result(
                    CommandBasic::Register,
                    true,
                    format!("Registered teacher '{}' with id {}", teacher.username, teacher.id),
                    None,
                ),
                Err(e) => self.result(CommandBasic::Register, false, e.to_string(), None),
            },
            Command::AddTeacher { input } => match self.teachers.propose_add(&input) {
                Ok(change) => {
                    let message = format!("{}\n{}", change.describe(), CONFIRM_HINT);
                    self.pending = Some(change);
                    self.result(CommandBasic::AddTeacher, true, message, None)
                }
                Err(e) => self.result(CommandBasic::AddTeacher, false, e.to_string(), None),
            },
            Command::UpdateTeacher { id, input } => {
                match self.teachers.propose_update(id, &input) {
                    Ok(Proposal::NoChanges) => self.result(
                        CommandBasic::UpdateTeacher,
                        true,
                        "No changes detected".into(),
                        None,
                    ),
                    Ok(Proposal::Change(change)) => {
                        let message = format!("{}\n{}", change.describe(), CONFIRM_HINT);
                        self.pending = Some(change);
                        self.result(CommandBasic::UpdateTeacher, true, message, None)
                    }
                    Err(e) => self.result(CommandBasic::UpdateTeacher, false, e.to_string(), None),
                }
            }
            Command::DeleteTeacher { id } => match self.teachers.propose_delete(id) {
                Ok(change) => {
                    let message = format!("{}\n{}", change.describe(), CONFIRM_HINT);
                    self.pending = Some(change);
                    self.result(CommandBasic::DeleteTeacher, true, message, None)
                }
                Err(e) => self.result(CommandBasic::DeleteTeacher, false, e.to_string(), None),
            },
            Command::Confirm => match self.pending.take() {
                Some(change) => match self.teachers.commit(change) {
                    Ok(message) => self.result(CommandBasic::Confirm, true, message, None),
                    Err(e) => self.result(CommandBasic::Confirm, false, e.to_string(), None),
                },
                None => self.result(
                    CommandBasic::Confirm,
                    false,
                    "No pending change to confirm".into(),
                    None,
                ),
            },
            Command::Cancel => match self.pending.take() {
                Some(_) => self.result(
                    CommandBasic::Cancel,
                    true,
                    "Pending change discarded".into(),
                    None,
                ),
                None => self.result(
                    CommandBasic::Cancel,
                    false,
                    "No pending change to cancel".into(),
                    None,
                ),
            },
            Command::GetTeachers => self.list_teachers(CommandBasic::GetTeachers, &TeacherFilter::default()),
            Command::FilterTeachers { filter } => {
                self.list_teachers(CommandBasic::FilterTeachers, &filter)
            }
            Command::AddGrade {
                student_id,
                question_id,
                score,
            } => match self.grades.add(Grade::new(student_id, question_id, score)) {
                Ok(grade) => self.result(
                    CommandBasic::AddGrade,
                    true,
                    format!(
                        "Recorded grade {} (student {}, question {}, score {})",
                        grade.id, grade.student_id, grade.question_id, grade.score
                    ),
                    None,
                ),
                Err(e) => self.result(CommandBasic::AddGrade, false, e.to_string(), None),
            },
            Command::SetGrade {
                id,
                student_id,
                question_id,
                score,
            } => {
                let found = match self.grades.get(id) {
                    Ok(found) => found,
                    Err(e) => return self.result(CommandBasic::SetGrade, false, e.to_string(), None),
                };

                match found {
                    Some(mut grade) => {
                        grade.set_score(student_id, question_id, score);
                        match self.grades.update(grade) {
                            Ok(()) => self.result(
                                CommandBasic::SetGrade,
                                true,
                                format!("Grade {} updated", id),
                                None,
                            ),
                            Err(e) => {
                                self.result(CommandBasic::SetGrade, false, e.to_string(), None)
                            }
                        }
                    }
                    None => self.result(
                        CommandBasic::SetGrade,
                        false,
                        format!("Grade {} not found", id),
                        None,
                    ),
                }
            }
            Command::GetGrades => match self.grades.get_all() {
                Ok(grades) => {
                    let message = if grades.is_empty() {
                        "No grades recorded".to_string()
                    } else {
                        grades
                            .iter()
                            .map(|g| {
                                format!(
                                    "Grade {}: student {}, question {}, score {}",
                                    g.id, g.student_id, g.question_id, g.score
                                )
                            })
                            .collect::<Vec<_>>()
                            .join("\n")
                    };
                    self.result(CommandBasic::GetGrades, true, message, Some(json!(grades)))
                }
                Err(e) => self.result(CommandBasic::GetGrades, false, e.to_string(), None),
            },
            Command::Help { command } => {
                let help_text = match command {
                    Some(cmd) => COMMAND_HELP
                        .get(cmd.to_uppercase().as_str())
                        .map(format_command_help)
                        .unwrap_or_else(|| {
                            format!("Unknown command: {}. Use HELP to see available commands.", cmd)
                        }),
                    None => get_general_help(),
                };
                self.result(CommandBasic::Help, true, help_text, None)
            }
        }
    }

    fn list_teachers(&mut self, tag: CommandBasic, filter: &TeacherFilter) -> CommandResult {
        match self.teachers.list(filter) {
            Ok(teachers) => {
                let message = if teachers.is_empty() {
                    "No matching teachers".to_string()
                } else {
                    teachers
                        .iter()
                        .map(|t| {
                            format!(
                                "ID {}: {} - {} ({}, age {}, {}, {})",
                                t.id, t.username, t.name, t.department, t.age, t.gender, t.position
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                };
                self.result(tag, true, message, Some(json!(teachers)))
            }
            Err(e) => self.result(tag, false, e.to_string(), None),
        }
    }

    fn result(
        &self,
        executed_command: CommandBasic,
        success: bool,
        message: String,
        data: Option<serde_json::Value>,
    ) -> CommandResult {
        CommandResult {
            executed_command,
            success,
            message,
            data,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// ========== Parsing ==========

fn parse_commands(input: &str) -> Result<Vec<Command>, String> {
    let commands = input.split("AND").collect::<Vec<_>>();
    let mut parsed_commands = Vec::new();

    for cmd_str in commands {
        let tokens: Vec<&str> = cmd_str.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let command = match tokens[0].to_uppercase().as_str() {
            "LOGIN" => parse_login(&tokens[1..])?,
            "REGISTER" => Command::Register {
                input: input_from_fields(&parse_fields(&tokens[1..])?),
            },
            "ADD" => parse_add(&tokens[1..])?,
            "UPDATE" => parse_update(&tokens[1..])?,
            "DELETE" => parse_delete(&tokens[1..])?,
            "GET" => parse_get(&tokens[1..])?,
            "FILTER" => parse_filter(&tokens[1..])?,
            "CONFIRM" => Command::Confirm,
            "CANCEL" => Command::Cancel,
            "HELP" => Command::Help {
                command: tokens.get(1).map(|s| s.to_string()),
            },
            _ => return Err(format!("Unknown command: {}", tokens[0])),
        };

        parsed_commands.push(command);
    }

    Ok(parsed_commands)
}

fn parse_login(args: &[&str]) -> Result<Command, String> {
    // Missing credentials are a validation outcome, not a parse error, so
    // absent tokens become empty fields.
    Ok(Command::Login {
        username: args.first().unwrap_or(&"").to_string(),
        password: args.get(1).unwrap_or(&"").to_string(),
    })
}

fn parse_add(args: &[&str]) -> Result<Command, String> {
    match args.first().map(|s| s.to_uppercase()).as_deref() {
        Some("TEACHER") => Ok(Command::AddTeacher {
            input: input_from_fields(&parse_fields(&args[1..])?),
        }),
        Some("GRADE") => {
            let fields = parse_fields(&args[1..])?;
            let (student_id, question_id, score) = grade_fields(&fields)?;
            Ok(Command::AddGrade {
                student_id,
                question_id,
                score,
            })
        }
        _ => Err("Invalid ADD syntax. Expected: ADD TEACHER SET <field = value ...> or ADD GRADE SET <field = value ...>".to_string()),
    }
}

fn parse_update(args: &[&str]) -> Result<Command, String> {
    if args.len() < 3 || args.get(1).map(|s| s.to_uppercase()).as_deref() != Some("ID") {
        return Err(
            "Invalid UPDATE syntax. Expected: UPDATE <TEACHER|GRADE> ID <id> SET <field = value ...>"
                .to_string(),
        );
    }

    let id = args[2]
        .parse::<u64>()
        .map_err(|_| format!("Invalid id: {}", args[2]))?;

    match args[0].to_uppercase().as_str() {
        "TEACHER" => Ok(Command::UpdateTeacher {
            id,
            input: input_from_fields(&parse_fields(&args[3..])?),
        }),
        "GRADE" => {
            let fields = parse_fields(&args[3..])?;
            let (student_id, question_id, score) = grade_fields(&fields)?;
            Ok(Command::SetGrade {
                id,
                student_id,
                question_id,
                score,
            })
        }
        other => Err(format!("Unknown UPDATE target: {}", other)),
    }
}

fn parse_delete(args: &[&str]) -> Result<Command, String> {
    if args.len() < 2 || args[0].to_uppercase() != "TEACHER" {
        return Err("Invalid DELETE syntax. Expected: DELETE TEACHER <id>".to_string());
    }

    let id = args[1]
        .parse::<u64>()
        .map_err(|_| format!("Invalid id: {}", args[1]))?;
    Ok(Command::DeleteTeacher { id })
}

fn parse_get(args: &[&str]) -> Result<Command, String> {
    match args.first().map(|s| s.to_uppercase()).as_deref() {
        Some("TEACHERS") => Ok(Command::GetTeachers),
        Some("GRADES") => Ok(Command::GetGrades),
        _ => Err("Invalid GET syntax. Expected: GET TEACHERS or GET GRADES".to_string()),
    }
}

fn parse_filter(args: &[&str]) -> Result<Command, String> {
    if args.first().map(|s| s.to_uppercase()).as_deref() != Some("TEACHERS") {
        return Err(
            "Invalid FILTER syntax. Expected: FILTER TEACHERS [field = value ...]".to_string(),
        );
    }

    let fields = parse_fields(&args[1..])?;
    Ok(Command::FilterTeachers {
        filter: TeacherFilter {
            username: fields.get("username").cloned().unwrap_or_default(),
            name: fields.get("name").cloned().unwrap_or_default(),
            department: fields.get("department").cloned().unwrap_or_default(),
        },
    })
}

/// Parses `field = value` pairs. A leading SET token is skipped; quoted
/// values may contain spaces.
fn parse_fields(args: &[&str]) -> Result<HashMap<String, String>, String> {
    let mut fields = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        if args[i].to_uppercase() == "SET" {
            i += 1;
            continue;
        }

        let field = args[i].to_lowercase();
        i += 1;

        if i >= args.len() || args[i] != "=" {
            return Err(format!("Expected '=' after field '{}'", field));
        }
        i += 1;

        if i >= args.len() {
            return Err(format!("Missing value for field '{}'", field));
        }

        // Quoted values may span several tokens
        let value = if args[i].starts_with('"') {
            let mut full_value = args[i].to_string();
            while !(full_value.len() > 1 && full_value.ends_with('"')) && i + 1 < args.len() {
                i += 1;
                full_value.push(' ');
                full_value.push_str(args[i]);
            }
            full_value.trim_matches('"').to_string()
        } else {
            args[i].to_string()
        };
        i += 1;

        fields.insert(field, value);
    }

    Ok(fields)
}

fn input_from_fields(fields: &HashMap<String, String>) -> TeacherFormInput {
    TeacherFormInput {
        username: fields.get("username").cloned().unwrap_or_default(),
        name: fields.get("name").cloned().unwrap_or_default(),
        age: fields.get("age").cloned().unwrap_or_default(),
        department: fields.get("department").cloned().unwrap_or_default(),
        password: fields.get("password").cloned().unwrap_or_default(),
        gender: fields.get("gender").cloned().unwrap_or_default(),
        position: fields.get("position").cloned().unwrap_or_default(),
    }
}

fn grade_fields(fields: &HashMap<String, String>) -> Result<(u64, u64, i64), String> {
    let numeric = |name: &str| -> Result<i64, String> {
        fields
            .get(name)
            .ok_or_else(|| format!("Missing field '{}'", name))?
            .parse::<i64>()
            .map_err(|_| format!("Field '{}' must be a number", name))
    };

    let student = numeric("student")?;
    let question = numeric("question")?;
    let score = numeric("score")?;

    if student < 0 || question < 0 {
        return Err("Fields 'student' and 'question' must be non-negative".to_string());
    }

    Ok((student as u64, question as u64, score))
}

// ========== Formatting ==========

fn format_results(results: &[CommandResult], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Standard => Ok(results
            .iter()
            .map(|r| r.message.clone())
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&json!({
            "results": results,
            "count": results.len(),
            "success": results.iter().all(|r| r.success),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
        .unwrap()),
        OutputFormat::Table => match results.first() {
            Some(first) => match (&first.executed_command, &first.data) {
                (CommandBasic::Help, _) => Ok(first.message.clone()),
                (CommandBasic::GetTeachers | CommandBasic::FilterTeachers, Some(data)) => {
                    format_teacher_table(data)
                }
                (CommandBasic::GetGrades, Some(data)) => format_grade_table(data),
                _ => Ok(format_status_table(results)),
            },
            None => Ok("No results".to_string()),
        },
    }
}

fn format_status_table(results: &[CommandResult]) -> String {
    let status_results: Vec<StatusTable> = results
        .iter()
        .map(|result| StatusTable {
            status: if result.success { "SUCCESS" } else { "ERROR" }.to_string(),
            message: result.message.clone(),
            timestamp: result.timestamp.clone(),
        })
        .collect();

    Table::new(status_results).with(Style::ascii()).to_string()
}

fn format_teacher_table(data: &serde_json::Value) -> Result<String, String> {
    let teachers: Vec<Teacher> = serde_json::from_value(data.clone())
        .map_err(|e| format!("Failed to render teacher table: {}", e))?;

    let rows: Vec<TeacherRow> = teachers.iter().map(TeacherRow::from).collect();
    Ok(Table::new(rows).with(Style::ascii()).to_string())
}

fn format_grade_table(data: &serde_json::Value) -> Result<String, String> {
    let grades: Vec<Grade> = serde_json::from_value(data.clone())
        .map_err(|e| format!("Failed to render grade table: {}", e))?;

    let rows: Vec<GradeRow> = grades
        .iter()
        .map(|g| GradeRow {
            id: g.id,
            student: g.student_id,
            question: g.question_id,
            score: g.score,
        })
        .collect();
    Ok(Table::new(rows).with(Style::ascii()).to_string())
}

fn format_command_help(help: &help::CommandHelp) -> String {
    format!(
        "Syntax: {}\n\nDescription:\n{}\n\nExamples:\n{}\n",
        help.syntax,
        help.description,
        help.examples
            .iter()
            .map(|ex| format!("  {}", ex))
            .collect::<Vec<_>>()
            .join("\n")
    )
}
