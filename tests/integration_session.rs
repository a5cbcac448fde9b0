//! Session integration tests
//!
//! Drives the interactive loop with scripted input against a real task file.

use std::fs;
use std::io::{self, BufReader, Cursor, Read};

use tasktrack::domain::{Priority, Task};
use tasktrack::error::{Result, TaskError};
use tasktrack::render::{EMPTY_MESSAGE, Screen, ScreenOptions};
use tasktrack::session::Session;
use tasktrack::storage::{TASKFILE_NAME, TaskFile};
use tempfile::TempDir;

/// Run a session over `script` and return its output
fn run_script(store: &TaskFile, script: &str) -> Result<String> {
    let mut session = Session::open(store.clone())?;
    let mut screen = Screen::new(Vec::new(), ScreenOptions::plain());
    session.run(Cursor::new(script.to_string()), &mut screen)?;
    Ok(String::from_utf8(screen.into_inner()).expect("utf8 output"))
}

/// Integration test: the end-to-end scenario from an empty store
#[test]
fn test_end_to_end_scenario() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = TaskFile::ensure_in(temp_dir.path())?;

    run_script(
        &store,
        "create Write report\ncreate Ship code\ntoggle 1\nremove 2\nsave\nexit\n",
    )?;

    let reloaded = TaskFile::ensure_in(temp_dir.path())?.load()?;
    assert_eq!(reloaded, vec![Task::with_state("Write report", true, Priority::Low)]);
    Ok(())
}

/// Integration test: end of input persists like `exit`
#[test]
fn test_eof_saves() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = TaskFile::ensure_in(temp_dir.path())?;

    run_script(&store, "create Buy milk\npriority 1 high")?;

    let tasks = store.load()?;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].priority, Priority::High);
    assert_eq!(
        fs::read_to_string(temp_dir.path().join(TASKFILE_NAME))?,
        "Buy milk,0,3\n"
    );
    Ok(())
}

/// Integration test: bad input never ends the session or changes tasks
#[test]
fn test_bad_input_is_survivable() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = TaskFile::ensure_in(temp_dir.path())?;
    store.save(&[Task::with_state("Keep", false, Priority::Medium)])?;

    let output = run_script(
        &store,
        "toggle 99\nremove abc\npriority 1 urgent\npriority\ncreate\nwhat\n\ncreate a,b\nexit\n",
    )?;

    assert_eq!(store.load()?, vec![Task::with_state("Keep", false, Priority::Medium)]);
    assert!(output.contains("Invalid index: 99"));
    assert!(output.contains("Invalid index: 'abc'"));
    assert!(output.contains("Unknown priority: 'urgent'"));
    assert!(output.contains("Unknown command: what"));
    Ok(())
}

/// Integration test: listing an empty store shows the empty message
#[test]
fn test_empty_listing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = TaskFile::ensure_in(temp_dir.path())?;

    let output = run_script(&store, "exit\n")?;
    assert!(output.starts_with(EMPTY_MESSAGE));
    assert!(output.ends_with("> "));
    Ok(())
}

/// Integration test: every command redraws the list
#[test]
fn test_redraw_after_each_command() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = TaskFile::ensure_in(temp_dir.path())?;

    let output = run_script(&store, "create First\ncreate Second\ntoggle 2\nexit\n")?;
    assert_eq!(
        output,
        format!(
            "{}\n> 1: [ ] First\n> 1: [ ] First\n2: [ ] Second\n> 1: [ ] First\n2: [X] Second\n> ",
            EMPTY_MESSAGE
        )
    );
    Ok(())
}

/// Integration test: a corrupt store refuses to load
#[test]
fn test_malformed_store_aborts() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = TaskFile::ensure_in(temp_dir.path())?;
    fs::write(store.path(), "ok,0,1\nbroken\n")?;

    match Session::open(store.clone()) {
        Err(TaskError::MalformedRecord { line, .. }) => assert_eq!(line, 2),
        other => panic!("Expected malformed record error, got {:?}", other.map(|s| s.tasks().len())),
    }
    // The store is left as it was
    assert_eq!(fs::read_to_string(store.path())?, "ok,0,1\nbroken\n");
    Ok(())
}

/// Integration test: a failed `save` is reported and the session continues
#[test]
fn test_save_failure_is_reported() -> Result<()> {
    let temp_dir = TempDir::new()?;
    // A store path inside a directory that does not exist cannot be written
    let store = TaskFile::at(temp_dir.path().join("missing").join(TASKFILE_NAME));

    let mut session = Session::open(store)?;
    let mut screen = Screen::new(Vec::new(), ScreenOptions::plain());
    let result = session.run(Cursor::new("create x\nsave\nexit\n"), &mut screen);
    let output = String::from_utf8(screen.into_inner()).expect("utf8 output");

    assert!(output.contains("Save failed"));
    assert!(output.contains("1: [ ] x"));
    assert!(result.is_err());
    Ok(())
}

/// Integration test: non-UTF-8 input is a bad command, not a lost session
#[test]
fn test_invalid_utf8_input_keeps_session() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = TaskFile::ensure_in(temp_dir.path())?;

    let mut session = Session::open(store.clone())?;
    let mut screen = Screen::new(Vec::new(), ScreenOptions::plain());
    session.run(
        Cursor::new(&b"create Keep me\n\xff\xfe\ncreate caf\xe9\ntoggle 1\nexit\n"[..]),
        &mut screen,
    )?;

    let tasks = store.load()?;
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0], Task::with_state("Keep me", true, Priority::Low));
    assert_eq!(tasks[1].label, "caf\u{fffd}");
    Ok(())
}

/// Reader that fails on every call
struct BrokenPipe;

impl Read for BrokenPipe {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "input closed abruptly"))
    }
}

/// Integration test: a failing input stream still saves before returning
#[test]
fn test_input_failure_saves_first() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = TaskFile::ensure_in(temp_dir.path())?;

    let input = BufReader::new(Cursor::new(&b"create Survivor\n"[..]).chain(BrokenPipe));
    let mut session = Session::open(store.clone())?;
    let mut screen = Screen::new(Vec::new(), ScreenOptions::plain());
    let result = session.run(input, &mut screen);

    assert!(matches!(result, Err(TaskError::Io(_))));
    assert_eq!(store.load()?, vec![Task::with_state("Survivor", false, Priority::Low)]);
    Ok(())
}
