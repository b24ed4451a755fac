//! Tests for normalize, profiles, imports, delete-import, origin, stats, completions, manpage.

use super::{parse, parse_err};
use crate::cli::{Cli, CliCommand};
use clap::error::ErrorKind;
use clap::CommandFactory;

#[test]
fn cli_parse_normalize_many() {
    match parse(&["urlsift", "normalize", "https://a.com/?utm_source=x", "https://b.com/y/"]) {
        CliCommand::Normalize { urls } => assert_eq!(urls.len(), 2),
        _ => panic!("expected Normalize"),
    }
}

#[test]
fn cli_normalize_needs_a_url() {
    assert_eq!(
        parse_err(&["urlsift", "normalize"]),
        ErrorKind::MissingRequiredArgument
    );
}

#[test]
fn cli_parse_profiles() {
    match parse(&["urlsift", "profiles"]) {
        CliCommand::Profiles => {}
        _ => panic!("expected Profiles"),
    }
}

#[test]
fn cli_parse_create_profile() {
    match parse(&["urlsift", "create-profile", "job hunt"]) {
        CliCommand::CreateProfile { name } => assert_eq!(name, "job hunt"),
        _ => panic!("expected CreateProfile"),
    }
}

#[test]
fn cli_parse_imports() {
    match parse(&["urlsift", "imports", "jobs"]) {
        CliCommand::Imports { profile } => assert_eq!(profile, "jobs"),
        _ => panic!("expected Imports"),
    }
}

#[test]
fn cli_parse_delete_import() {
    match parse(&["urlsift", "delete-import", "42"]) {
        CliCommand::DeleteImport { id } => assert_eq!(id, 42),
        _ => panic!("expected DeleteImport"),
    }
}

#[test]
fn cli_delete_import_rejects_non_numeric_id() {
    assert_eq!(
        parse_err(&["urlsift", "delete-import", "abc"]),
        ErrorKind::ValueValidation
    );
}

#[test]
fn cli_parse_origin() {
    match parse(&["urlsift", "origin", "9"]) {
        CliCommand::Origin { id } => assert_eq!(id, 9),
        _ => panic!("expected Origin"),
    }
}

#[test]
fn cli_parse_stats() {
    match parse(&["urlsift", "stats", "jobs"]) {
        CliCommand::Stats { profile } => assert_eq!(profile, "jobs"),
        _ => panic!("expected Stats"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["urlsift", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_manpage() {
    match parse(&["urlsift", "manpage"]) {
        CliCommand::Manpage => {}
        _ => panic!("expected Manpage"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}
