use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CommandHelp {
    pub syntax: String,
    pub description: String,
    pub examples: Vec<String>,
}

lazy_static! {
    pub static ref COMMAND_HELP: HashMap<&'static str, CommandHelp> = {
        let mut m = HashMap::new();

        m.insert(
            "LOGIN",
            CommandHelp {
                syntax: "LOGIN <username> <password>".to_string(),
                description: "Checks teacher credentials against the record set".to_string(),
                examples: vec!["LOGIN jdoe secret".to_string()],
            },
        );

        m.insert(
            "REGISTER",
            CommandHelp {
                syntax: "REGISTER SET username = <u> name = <n> age = <a> department = <d> password = <p> gender = <g> position = <pos>".to_string(),
                description: "Creates a teacher account immediately (no confirmation step)"
                    .to_string(),
                examples: vec![
                    r#"REGISTER SET username = jdoe name = John age = 45 department = cse password = x gender = Male position = Lecturer"#
                        .to_string(),
                ],
            },
        );

        m.insert(
            "ADD",
            CommandHelp {
                syntax: "ADD TEACHER SET <field = value ...> | ADD GRADE SET student = <id> question = <id> score = <n>".to_string(),
                description: "Proposes a new teacher (apply with CONFIRM) or records a grade"
                    .to_string(),
                examples: vec![
                    r#"ADD TEACHER SET username = jdoe name = John age = 45 department = cse password = x gender = Male position = Lecturer"#
                        .to_string(),
                    "ADD GRADE SET student = 7 question = 3 score = 85".to_string(),
                ],
            },
        );

        m.insert(
            "UPDATE",
            CommandHelp {
                syntax: "UPDATE TEACHER ID <id> SET <field = value ...> | UPDATE GRADE ID <id> SET student = <id> question = <id> score = <n>".to_string(),
                description: "Proposes changes to a teacher (username must stay the same) or overwrites a grade".to_string(),
                examples: vec![
                    r#"UPDATE TEACHER ID 1 SET username = jdoe name = John age = 46 department = CSE password = x gender = Male position = "Senior Lecturer""#
                        .to_string(),
                    "UPDATE GRADE ID 1 SET student = 7 question = 3 score = 90".to_string(),
                ],
            },
        );

        m.insert(
            "DELETE",
            CommandHelp {
                syntax: "DELETE TEACHER <id>".to_string(),
                description: "Proposes deleting a teacher; apply with CONFIRM".to_string(),
                examples: vec!["DELETE TEACHER 1".to_string()],
            },
        );

        m.insert(
            "GET",
            CommandHelp {
                syntax: "GET TEACHERS | GET GRADES".to_string(),
                description: "Lists a full snapshot of the collection".to_string(),
                examples: vec!["GET TEACHERS".to_string(), "GET GRADES".to_string()],
            },
        );

        m.insert(
            "FILTER",
            CommandHelp {
                syntax: "FILTER TEACHERS [username = <u>] [name = <n>] [department = <d>]"
                    .to_string(),
                description:
                    "Exact-match filter; omitted fields are wildcards, department is case-insensitive"
                        .to_string(),
                examples: vec![
                    "FILTER TEACHERS department = cse".to_string(),
                    "FILTER TEACHERS username = jdoe name = John".to_string(),
                ],
            },
        );

        m.insert(
            "CONFIRM",
            CommandHelp {
                syntax: "CONFIRM".to_string(),
                description: "Applies the pending add/update/delete".to_string(),
                examples: vec!["CONFIRM".to_string()],
            },
        );

        m.insert(
            "CANCEL",
            CommandHelp {
                syntax: "CANCEL".to_string(),
                description: "Discards the pending change".to_string(),
                examples: vec!["CANCEL".to_string()],
            },
        );

        m.insert(
            "HELP",
            CommandHelp {
                syntax: "HELP [command]".to_string(),
                description: "Shows general help or help for one command".to_string(),
                examples: vec!["HELP".to_string(), "HELP UPDATE".to_string()],
            },
        );

        m
    };
}

pub fn get_general_help() -> String {
    let mut commands: Vec<(&&str, &CommandHelp)> = COMMAND_HELP.iter().collect();
    commands.sort_by_key(|(name, _)| **name);

    let body = commands
        .iter()
        .map(|(name, help)| format!("  {:<8} {}", name, help.syntax))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Available commands (chain multiple with AND):\n{}\n\nUse HELP <command> for details.",
        body
    )
}
