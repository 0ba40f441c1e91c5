use crate::components::model::grade::Grade;
use crate::components::repl::{OutputFormat, REPL};
use crate::components::service::form::TeacherManager;
use crate::components::store::file_store::FileStore;
use crate::tests::scratch_dir;

fn setup(dir: &tempfile::TempDir) -> (TeacherManager, FileStore<Grade>) {
    let teachers = TeacherManager::open(dir.path()).unwrap();
    let grades = FileStore::<Grade>::open(dir.path()).unwrap();
    (teachers, grades)
}

const REGISTER_JDOE: &str = "REGISTER SET username = jdoe name = John age = 45 \
    department = cse password = x gender = Male position = Lecturer";

#[test]
fn test_repl_comprehensive() {
    let dir = scratch_dir();
    let (teachers, grades) = setup(&dir);
    let mut repl = REPL::new(&teachers, &grades);

    // Registration creates the account immediately
    let result = repl.execute(REGISTER_JDOE, None).unwrap();
    assert!(result.contains("Registered teacher 'jdoe' with id 1"));

    // Login against the stored credentials
    let result = repl.execute("LOGIN jdoe x", None).unwrap();
    assert!(result.contains("Login successful"));
    assert_eq!(repl.session(), Some("jdoe"));

    let result = repl.execute("LOGIN jdoe wrong", None).unwrap();
    assert!(result.contains("Login failed, please try again"));

    let result = repl.execute("LOGIN jdoe", None).unwrap();
    assert!(result.contains("Please enter both username and password."));

    // Adding goes through the confirmation step
    let result = repl
        .execute(
            r#"ADD TEACHER SET username = asmith name = Anna age = 30 department = math password = pw gender = Female position = "Associate Professor""#,
            None,
        )
        .unwrap();
    assert!(result.contains("Add Teacher: asmith"));
    assert!(result.contains("CONFIRM"));

    // Nothing written until confirmed
    let result = repl.execute("GET TEACHERS", None).unwrap();
    assert!(!result.contains("asmith"));

    let result = repl.execute("CONFIRM", None).unwrap();
    assert!(result.contains("Teacher added successfully"));

    let result = repl.execute("GET TEACHERS", None).unwrap();
    assert!(result.contains("asmith"));
    assert!(result.contains("jdoe"));

    // Identical resubmission is a no-op
    let result = repl
        .execute(
            "UPDATE TEACHER ID 1 SET username = jdoe name = John age = 45 \
             department = CSE password = x gender = Male position = Lecturer",
            None,
        )
        .unwrap();
    assert!(result.contains("No changes detected"));

    // A real change lists the changed fields and waits for confirmation
    let result = repl
        .execute(
            "UPDATE TEACHER ID 1 SET username = jdoe name = John age = 46 \
             department = CSE password = x gender = Male position = Lecturer",
            None,
        )
        .unwrap();
    assert!(result.contains("Update Teacher: jdoe"));
    assert!(result.contains("Age: 46"));

    let result = repl.execute("CANCEL", None).unwrap();
    assert!(result.contains("Pending change discarded"));

    let result = repl.execute("GET TEACHERS", None).unwrap();
    assert!(result.contains("age 45")); // unchanged after cancel

    // Renaming the username is rejected outright
    let result = repl
        .execute(
            "UPDATE TEACHER ID 1 SET username = jdoe2 name = John age = 45 \
             department = CSE password = x gender = Male position = Lecturer",
            None,
        )
        .unwrap();
    assert!(result.contains("Username must be the same!"));

    // Filtering is an exact-match conjunction
    let result = repl.execute("FILTER TEACHERS department = math", None).unwrap();
    assert!(result.contains("asmith"));
    assert!(!result.contains("jdoe"));

    let result = repl
        .execute("FILTER TEACHERS username = jdoe department = math", None)
        .unwrap();
    assert!(result.contains("No matching teachers"));

    // Deletion: propose, then confirm
    let result = repl.execute("DELETE TEACHER 2", None).unwrap();
    assert!(result.contains("delete teacher with username: asmith"));

    let result = repl.execute("CONFIRM", None).unwrap();
    assert!(result.contains("Teacher deleted successfully"));

    let result = repl.execute("GET TEACHERS", None).unwrap();
    assert!(!result.contains("asmith"));

    // Stale selection surfaces as not found, no panic
    let result = repl.execute("DELETE TEACHER 99", None).unwrap();
    assert!(result.contains("record 99 not found"));

    // Confirm with nothing pending
    let result = repl.execute("CONFIRM", None).unwrap();
    assert!(result.contains("No pending change to confirm"));

    // Unknown commands are parse errors
    assert!(repl.execute("INVALID_COMMAND", None).is_err());
}

#[test]
fn pending_changes_chain_with_and() {
    let dir = scratch_dir();
    let (teachers, grades) = setup(&dir);
    let mut repl = REPL::new(&teachers, &grades);

    let result = repl
        .execute(&format!("{} AND GET TEACHERS", REGISTER_JDOE), None)
        .unwrap();
    assert!(result.contains("Registered teacher 'jdoe'"));
    assert!(result.contains("ID 1: jdoe"));
}

#[test]
fn a_new_proposal_replaces_the_pending_one() {
    let dir = scratch_dir();
    let (teachers, grades) = setup(&dir);
    let mut repl = REPL::new(&teachers, &grades);
    repl.execute(REGISTER_JDOE, None).unwrap();

    repl.execute(
        "UPDATE TEACHER ID 1 SET username = jdoe name = John age = 46 \
         department = CSE password = x gender = Male position = Lecturer",
        None,
    )
    .unwrap();
    repl.execute("DELETE TEACHER 1", None).unwrap();

    // Confirm applies the delete, not the earlier age edit
    let result = repl.execute("CONFIRM", None).unwrap();
    assert!(result.contains("Teacher deleted successfully"));
    assert!(teachers.get(1).unwrap().is_none());
}

#[test]
fn grade_commands_apply_directly() {
    let dir = scratch_dir();
    let (teachers, grades) = setup(&dir);
    let mut repl = REPL::new(&teachers, &grades);

    let result = repl
        .execute("ADD GRADE SET student = 7 question = 3 score = 85", None)
        .unwrap();
    assert!(result.contains("Recorded grade 1"));

    let result = repl
        .execute("UPDATE GRADE ID 1 SET student = 7 question = 3 score = 90", None)
        .unwrap();
    assert!(result.contains("Grade 1 updated"));

    let result = repl.execute("GET GRADES", None).unwrap();
    assert!(result.contains("score 90"));

    let result = repl
        .execute("UPDATE GRADE ID 9 SET student = 1 question = 1 score = 0", None)
        .unwrap();
    assert!(result.contains("Grade 9 not found"));
}

#[test]
fn output_formats_render_the_same_snapshot() {
    let dir = scratch_dir();
    let (teachers, grades) = setup(&dir);
    let mut repl = REPL::new(&teachers, &grades);
    repl.execute(REGISTER_JDOE, None).unwrap();

    let json = repl
        .execute("GET TEACHERS", Some(OutputFormat::Json))
        .unwrap();
    assert!(json.contains("\"results\""));
    assert!(json.contains("\"jdoe\""));
    assert!(json.contains("\"success\": true"));

    let table = repl
        .execute("GET TEACHERS", Some(OutputFormat::Table))
        .unwrap();
    assert!(table.contains("jdoe"));
    assert!(table.contains("username"));
    assert!(table.contains("+")); // ascii table borders

    // Errors still come back as output in JSON mode
    let json_err = repl
        .execute("INVALID_COMMAND", Some(OutputFormat::Json))
        .unwrap();
    assert!(json_err.contains("\"success\":false"));
}

#[test]
fn help_lists_commands() {
    let dir = scratch_dir();
    let (teachers, grades) = setup(&dir);
    let mut repl = REPL::new(&teachers, &grades);

    let general = repl.execute("HELP", None).unwrap();
    assert!(general.contains("Available commands"));
    assert!(general.contains("FILTER"));

    let update = repl.execute("HELP update", None).unwrap();
    assert!(update.contains("Syntax: UPDATE"));

    let unknown = repl.execute("HELP bogus", None).unwrap();
    assert!(unknown.contains("Unknown command"));
}
