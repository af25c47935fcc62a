//! Tests for CLI functionality.

use std::fs;

use assert_cmd::Command;
use predicates::str::{contains, starts_with};
use tempfile::TempDir;

fn corpus_index() -> Command {
    Command::cargo_bin("corpus-index").expect("binary under test")
}

#[test]
fn version() {
    let assert = corpus_index().arg("-V").assert();
    assert.success().stdout(starts_with("corpus-index "));
}

#[test]
fn help() {
    let assert = corpus_index().arg("--help").assert();
    assert.success().stdout(contains("Usage"));
}

#[test]
fn tally_help_lists_positionals() {
    let assert = corpus_index().args(["tally", "--help"]).assert();
    assert
        .success()
        .stdout(contains("INPUT"))
        .stdout(contains("MEMORY_LIMIT"));
}

#[test]
fn tally_writes_sorted_counts() {
    let dir = TempDir::new().expect("create test dir");
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "Hola, mundo! hola MUNDO.").expect("write input");

    corpus_index()
        .arg("tally")
        .arg(&input)
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "hola 2\nmundo 2\n"
    );
}

#[test]
fn tally_accepts_positional_tuning() {
    let dir = TempDir::new().expect("create test dir");
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "a b c a b a").expect("write input");

    corpus_index()
        .args(["tally"])
        .arg(&input)
        .arg(&output)
        .args(["1", "2", "5", "--quiet"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "a 3\nb 2\nc 1\n"
    );
}

#[test]
fn tally_chunk_size_env_override_forces_boundary_repair() {
    let dir = TempDir::new().expect("create test dir");
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "a b c a b a").expect("write input");

    corpus_index()
        .env("CORPUS_INDEX_CHUNK_BYTES", "3")
        .arg("tally")
        .arg(&input)
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "a 3\nb 2\nc 1\n"
    );
}

#[test]
fn tally_missing_input_exits_one() {
    let dir = TempDir::new().expect("create test dir");
    let output = dir.path().join("out.txt");

    corpus_index()
        .arg("tally")
        .arg(dir.path().join("absent.txt"))
        .arg(&output)
        .arg("--quiet")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("does not exist"));
}

#[test]
fn invert_writes_doc_sets() {
    let dir = TempDir::new().expect("create test dir");
    let corpus = dir.path().join("corpus");
    fs::create_dir(&corpus).expect("create corpus dir");
    fs::write(corpus.join("f1"), "foo bar").expect("write f1");
    fs::write(corpus.join("f2"), "bar baz").expect("write f2");
    let output = dir.path().join("out.txt");

    corpus_index()
        .arg("invert")
        .arg(&corpus)
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).expect("read output"),
        "bar f1_chunk_0 f2_chunk_0\nbaz f2_chunk_0\nfoo f1_chunk_0\n"
    );
}

#[test]
fn invert_on_empty_directory_succeeds_with_empty_output() {
    let dir = TempDir::new().expect("create test dir");
    let corpus = dir.path().join("corpus");
    fs::create_dir(&corpus).expect("create corpus dir");
    let output = dir.path().join("out.txt");

    corpus_index()
        .arg("invert")
        .arg(&corpus)
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).expect("read output"), "");
}

#[test]
fn invert_on_a_file_exits_one() {
    let dir = TempDir::new().expect("create test dir");
    let file = dir.path().join("plain.txt");
    fs::write(&file, "text").expect("write file");

    corpus_index()
        .arg("invert")
        .arg(&file)
        .arg(dir.path().join("out.txt"))
        .arg("--quiet")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("expected a directory"));
}

#[test]
fn missing_subcommand_exits_one() {
    corpus_index().assert().failure().code(1);
}

#[test]
fn generate_writes_part_files_from_dictionary() {
    let dir = TempDir::new().expect("create test dir");
    let dictionary = dir.path().join("words.txt");
    fs::write(&dictionary, "uno\ndos\ntres\n").expect("write dictionary");
    let corpus = dir.path().join("corpus");

    corpus_index()
        .arg("generate")
        .arg(&dictionary)
        .arg(&corpus)
        .args(["1", "1"])
        .assert()
        .success();

    let part = corpus.join("part_0.txt");
    let contents = fs::read_to_string(&part).expect("read part file");
    assert!(!contents.is_empty());
    assert!(
        contents
            .split_whitespace()
            .all(|word| ["uno", "dos", "tres"].contains(&word))
    );
}

#[test]
fn generate_with_missing_dictionary_exits_one() {
    let dir = TempDir::new().expect("create test dir");

    corpus_index()
        .arg("generate")
        .arg(dir.path().join("absent.txt"))
        .arg(dir.path().join("corpus"))
        .assert()
        .failure()
        .code(1);
}
