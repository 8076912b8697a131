//! Unit tests for the invocation model and argument construction.

use rstest::rstest;

use super::*;

#[rstest]
fn full_argument_list_has_the_fixed_order() {
    let request = InvocationRequest::with_payload(Operation::Transpile, "SELECT 1")
        .with_read_dialect("Postgres")
        .with_write_dialect("DuckDB")
        .with_identify();

    assert_eq!(
        request.to_args(),
        vec![
            String::from("transpile"),
            String::from("--read"),
            String::from("Postgres"),
            String::from("--write"),
            String::from("DuckDB"),
            String::from("--identify"),
        ],
    );
}

#[rstest]
fn absent_flags_are_omitted_entirely() {
    let request = InvocationRequest::with_payload(Operation::Format, "SELECT 1");
    assert_eq!(request.to_args(), vec![String::from("format")]);
}

#[rstest]
fn write_only_request_skips_the_read_flag() {
    let request = InvocationRequest::with_payload(Operation::Transpile, "SELECT 1")
        .with_write_dialect("DuckDB");
    assert_eq!(
        request.to_args(),
        vec![
            String::from("transpile"),
            String::from("--write"),
            String::from("DuckDB"),
        ],
    );
}

#[rstest]
#[case::transpile(Operation::Transpile, true)]
#[case::format(Operation::Format, true)]
#[case::dialects(Operation::Dialects, false)]
#[case::version(Operation::Version, false)]
fn payload_expectation_per_operation(#[case] operation: Operation, #[case] takes: bool) {
    assert_eq!(operation.takes_payload(), takes);
}

#[rstest]
fn metadata_requests_carry_no_payload() {
    let request = InvocationRequest::new(Operation::Dialects);
    assert!(request.payload().is_none());
    assert_eq!(request.to_args(), vec![String::from("dialects")]);
}

#[rstest]
fn payload_is_preserved_verbatim() {
    let sql = "SELECT *\nFROM t -- trailing comment\n";
    let request = InvocationRequest::with_payload(Operation::Format, sql);
    assert_eq!(request.payload(), Some(sql));
}

#[rstest]
fn result_success_follows_exit_status() {
    assert!(InvocationResult::new(0, "ok").is_success());
    assert!(!InvocationResult::new(1, "Error: bad SQL").is_success());
}

#[rstest]
fn result_exposes_output_unchanged() {
    let result = InvocationResult::new(0, "SELECT 1\n");
    assert_eq!(result.output_text(), "SELECT 1\n");
    assert_eq!(result.into_output(), "SELECT 1\n");
}

#[rstest]
fn operation_displays_as_its_subcommand() {
    assert_eq!(Operation::Version.to_string(), "version");
    assert_eq!(Operation::Dialects.to_string(), "dialects");
}
