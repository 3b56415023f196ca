mod common;

use mockito::Matcher;
use ninja_agent_rs::{AgentError, Question};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_tool_round_trip_produces_answer() {
    let mut server = mockito::Server::new_async().await;

    let first_turn = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-openai-key")
        .match_body(Matcher::PartialJson(json!({
            "tool_choice": "auto",
            "messages": [{
                "role": "user",
                "content": "What is Apple trading at?\nReturn a sentence describing the response data\n"
            }]
        })))
        .with_status(200)
        .with_body(common::tool_call_completion(
            "call_1",
            "stock_price",
            json!({"symbol": "AAPL"}),
        ))
        .expect(1)
        .create_async()
        .await;

    let quote = server
        .mock("GET", "/stockprice")
        .match_query(Matcher::UrlEncoded("ticker".into(), "AAPL".into()))
        .match_header("x-api-key", common::NINJAS_KEY)
        .with_status(200)
        .with_body(r#"{"ticker":"AAPL","name":"Apple Inc.","price":192.5,"exchange":"NASDAQ"}"#)
        .expect(1)
        .create_async()
        .await;

    let second_turn = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""role":"tool""#.to_string()),
            Matcher::Regex(r#""tool_call_id":"call_1""#.to_string()),
            Matcher::Regex(r"192\.5".to_string()),
        ]))
        .with_status(200)
        .with_body(common::text_completion(Some(
            "Apple Inc. (AAPL) is trading at $192.50 on the NASDAQ.",
        )))
        .expect(1)
        .create_async()
        .await;

    let agent = common::agent(&server);
    let answer = assert_ok!(
        agent
            .answer(&Question::new("What is Apple trading at?"))
            .await
    );

    assert_eq!(
        answer.answer,
        "Apple Inc. (AAPL) is trading at $192.50 on the NASDAQ."
    );
    first_turn.assert_async().await;
    quote.assert_async().await;
    second_turn.assert_async().await;
}

#[tokio::test]
async fn test_tools_are_advertised_to_the_model() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""name":"get_inflation_data""#.to_string()),
            Matcher::Regex(r#""name":"convert_currency""#.to_string()),
            Matcher::Regex(r#""name":"stock_price""#.to_string()),
        ]))
        .with_status(200)
        .with_body(common::text_completion(Some("Hello there.")))
        .create_async()
        .await;

    let agent = common::agent(&server);
    let answer = assert_ok!(agent.run("hi").await);
    assert_eq!(answer, "Hello there.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_content_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(common::text_completion(None))
        .create_async()
        .await;

    let agent = common::agent(&server);
    let err = assert_err!(agent.run("What is the CPI in Canada?").await);
    assert!(matches!(err, AgentError::EmptyResponse));
    assert_eq!(err.to_string(), "No response received from AI");
}

#[tokio::test]
async fn test_whitespace_content_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(common::text_completion(Some("  \n ")))
        .create_async()
        .await;

    let agent = common::agent(&server);
    let err = assert_err!(agent.run("anything").await);
    assert!(matches!(err, AgentError::EmptyResponse));
}

#[tokio::test]
async fn test_answer_text_is_returned_verbatim() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(common::text_completion(Some(" Apple is up.\n")))
        .create_async()
        .await;

    let agent = common::agent(&server);
    let answer = assert_ok!(agent.run("How is Apple doing?").await);
    assert_eq!(answer, " Apple is up.\n");
}

#[tokio::test]
async fn test_tool_failure_is_reported_to_the_model() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(common::tool_call_completion(
            "call_fx",
            "convert_currency",
            json!({"from": "USD", "to": "EUR"}),
        ))
        .expect(1)
        .create_async()
        .await;

    let upstream = server
        .mock("GET", "/exchangerate")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;

    let recovery = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#""tool_call_id":"call_fx""#.to_string()),
            Matcher::Regex("TOOL_EXECUTION_ERROR".to_string()),
            Matcher::Regex("Error while converting currency".to_string()),
        ]))
        .with_status(200)
        .with_body(common::text_completion(Some(
            "The exchange rate for USD to EUR is currently unavailable.",
        )))
        .expect(1)
        .create_async()
        .await;

    let agent = common::agent(&server);
    let answer = assert_ok!(agent.run("Convert USD to EUR").await);
    assert!(answer.contains("unavailable"));
    upstream.assert_async().await;
    recovery.assert_async().await;
}

#[tokio::test]
async fn test_unknown_tool_is_reported_to_the_model() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(common::tool_call_completion(
            "call_w",
            "weather",
            json!({"location": "Paris"}),
        ))
        .expect(1)
        .create_async()
        .await;

    let recovery = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("TOOL_NOT_FOUND".to_string()))
        .with_status(200)
        .with_body(common::text_completion(Some("I cannot check the weather.")))
        .expect(1)
        .create_async()
        .await;

    let agent = common::agent(&server);
    assert_ok!(agent.run("Weather in Paris?").await);
    recovery.assert_async().await;
}

#[tokio::test]
async fn test_max_iterations_bounds_the_loop() {
    let mut server = mockito::Server::new_async().await;
    let chat = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(common::tool_call_completion(
            "call_loop",
            "stock_price",
            json!({"symbol": "AAPL"}),
        ))
        .expect(2)
        .create_async()
        .await;

    server
        .mock("GET", "/stockprice")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"ticker":"AAPL","price":192.5}"#)
        .create_async()
        .await;

    let agent = common::agent(&server).with_max_iterations(2);
    let err = assert_err!(agent.run("loop forever").await);
    assert!(matches!(err, AgentError::MaxIterations(2)));
    chat.assert_async().await;
}

#[tokio::test]
async fn test_model_api_error_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let agent = common::agent(&server);
    let err = assert_err!(agent.run("hi").await);
    assert!(err.to_string().contains("Incorrect API key provided"));
}

#[tokio::test]
async fn test_model_server_error_is_retried() {
    let mut server = mockito::Server::new_async().await;
    let failing = server
        .mock("POST", "/chat/completions")
        .with_status(503)
        .with_body(r#"{"error":{"message":"overloaded"}}"#)
        .expect(2)
        .create_async()
        .await;

    let agent = common::agent(&server).with_max_retries(1);
    let err = assert_err!(agent.run("hi").await);
    assert!(err.to_string().contains("overloaded"));
    failing.assert_async().await;
}
