// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use crate::{FailingClient, StubClient};

use qagen::{
    cmd::run_pipeline,
    model::{Platform, TestRequest},
    table::write_csv_file,
    Error,
};

use anyhow::Result;
use pretty_assertions::assert_eq as pretty_assert_eq;
use sealed_test::prelude::*;

const CANNED_REPLY: &str = "\
    Category,Test Case Description,Test Data / Input,Expected Result\n\
    Boundary,Max length check,21 character string,Rejected with validation error";

fn login_form_request() -> TestRequest {
    TestRequest::new("Login Form", Platform::WebApplication, "max 20 chars").unwrap()
}

#[tokio::test]
async fn pipeline_turns_canned_reply_into_one_row_table() -> Result<()> {
    let client = StubClient::new(CANNED_REPLY);
    let table = run_pipeline(&client, &login_form_request()).await?;

    pretty_assert_eq!(client.calls(), 1);
    pretty_assert_eq!(table.len(), 1);
    pretty_assert_eq!(table.rows[0].category, "Boundary");
    pretty_assert_eq!(table.rows[0].description, "Max length check");
    pretty_assert_eq!(table.rows[0].test_data, "21 character string");
    pretty_assert_eq!(table.rows[0].expected_result, "Rejected with validation error");

    Ok(())
}

#[tokio::test]
async fn pipeline_strips_markdown_fencing_before_parsing() -> Result<()> {
    let client = StubClient::new(format!("Here is your table:\n```csv\n{CANNED_REPLY}\n```"));
    let table = run_pipeline(&client, &login_form_request()).await?;

    pretty_assert_eq!(table.len(), 1);
    pretty_assert_eq!(table.rows[0].category, "Boundary");

    Ok(())
}

#[tokio::test]
async fn pipeline_surfaces_model_call_failure() {
    let result = run_pipeline(&FailingClient, &login_form_request()).await;

    match result {
        Err(Error::ModelCall { message }) => assert!(message.contains("429")),
        other => panic!("Expected model call failure, got {other:?}"),
    }
}

#[tokio::test]
async fn pipeline_rejects_reply_with_wrong_header() {
    let client = StubClient::new("Severity,Description,Input,Result\nHigh,check,data,result");
    let result = run_pipeline(&client, &login_form_request()).await;

    assert!(matches!(result, Err(Error::HeaderMismatch { .. })));
}

#[sealed_test]
fn generated_table_is_saved_as_csv_file() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let request = login_form_request();
    let client = StubClient::new(CANNED_REPLY);
    let table = runtime.block_on(run_pipeline(&client, &request))?;

    let path = write_csv_file(&table, ".", request.output_file_name())?;
    pretty_assert_eq!(path.file_name().unwrap().to_string_lossy(), "qa_edge_cases_login_form.csv");

    let content = std::fs::read_to_string(&path)?;
    let expect = "Category,Test Case Description,Test Data / Input,Expected Result\n\
                  Boundary,Max length check,21 character string,Rejected with validation error\n";
    pretty_assert_eq!(content, expect);

    Ok(())
}

#[sealed_test]
fn write_csv_file_creates_missing_target_directory() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let request = login_form_request();
    let client = StubClient::new(CANNED_REPLY);
    let table = runtime.block_on(run_pipeline(&client, &request))?;

    let path = write_csv_file(&table, "reports/qa", request.output_file_name())?;
    assert!(path.exists());

    Ok(())
}
