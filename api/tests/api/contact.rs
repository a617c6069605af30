use crate::helpers::{spawn_app, spawn_app_with_timeout};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const VALID_BODY: &str =
    "email=a%40b.com&name=Jane%20Doe%201&subject=Hello%20there%21&message=Hi%2C%20I%20would%20like%20to%20connect.";

#[tokio::test]
async fn contact_returns_a_200_for_valid_form_data() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/api/v1.0/email/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_contact(VALID_BODY.into()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"status": "submitted"}));
}

#[tokio::test]
async fn contact_accepts_json_bodies() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/api/v1.0/email/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app
        .post_contact_json(&serde_json::json!({
            "email": "a@b.com",
            "name": "Jane Doe 1",
            "subject": "Hello there!",
            "message": "Hi, I would like to connect."
        }))
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn contact_forwards_sanitized_params_and_the_configured_tokens() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/api/v1.0/email/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.email_server)
        .await;

    // Act
    let response = app
        .post_contact_json(&serde_json::json!({
            "email": "a@b.com",
            "name": "Jane Doe 1",
            "subject": "Hello there!",
            "message": "Hi <script>alert(document.cookie)</script><b>friend</b>, 1 < 2"
        }))
        .await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let requests = app.provider_requests().await;
    assert_eq!(requests.len(), 1);
    let body = &requests[0];
    assert_eq!(body["service_id"], "service_contact");
    assert_eq!(body["template_id"], "template_contact");
    assert_eq!(body["user_id"], "replace-with-emailjs-public-key");
    assert_eq!(body["template_params"]["name"], "Jane Doe 1");
    assert_eq!(body["template_params"]["message"], "Hi friend, 1 &lt; 2");
    assert!(!body.to_string().contains("<script"));
}

#[tokio::test]
async fn contact_returns_a_400_with_field_errors_when_fields_are_invalid() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = vec![
        (
            "email=not-an-email&name=Jane%20Doe%201&subject=Hello%20there%21&message=Hi%20there.",
            "email",
            "Please enter a valid email address",
        ),
        (
            "email=a%40b.com&name=Jane&subject=Hello%20there%21&message=Hi%20there.",
            "name",
            "Name should be 5-50 characters (letters, numbers, spaces)",
        ),
        (
            "email=a%40b.com&name=Jane%20Doe%201&subject=Hello%20%3Cthere%3E&message=Hi%20there.",
            "subject",
            "Subject should be 5-200 characters",
        ),
        (
            "email=a%40b.com&name=Jane%20Doe%201&subject=Hello%20there%21&message=Hi",
            "message",
            "Message should be 5-1000 characters",
        ),
    ];

    for (invalid_body, field, expected_message) in test_cases {
        // Act
        let response = app.post_contact(invalid_body.into()).await;

        // Assert
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 when the {} was invalid",
            field
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(
            body,
            serde_json::json!({ field: expected_message }),
            "Unexpected errors when the {} was invalid",
            field
        );
    }
}

#[tokio::test]
async fn contact_reports_every_missing_field() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_contact("".into()).await;

    // Assert
    assert_eq!(400, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    for field in ["email", "name", "subject", "message"] {
        assert!(body.get(field).is_some(), "No error reported for {}", field);
    }
    assert!(body.get("submission").is_none());
}

#[tokio::test]
async fn contact_returns_a_502_with_a_generic_message_when_the_provider_rejects() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/api/v1.0/email/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("The user ID is invalid"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_contact(VALID_BODY.into()).await;

    // Assert
    assert_eq!(502, response.status().as_u16());
    let body = response.text().await.unwrap();
    assert!(!body.contains("The user ID is invalid"));
    let body: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"submission": "Failed to send email. Please try again later."})
    );
}

#[tokio::test]
async fn contact_returns_a_502_when_the_provider_is_too_slow() {
    // Arrange
    let app = spawn_app_with_timeout(Duration::from_millis(200)).await;

    Mock::given(path("/api/v1.0/email/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&app.email_server)
        .await;

    // Act
    let response = app.post_contact(VALID_BODY.into()).await;

    // Assert
    assert_eq!(502, response.status().as_u16());
}

#[tokio::test]
async fn every_attempt_reaches_the_provider_exactly_once() {
    // Arrange
    let app = spawn_app().await;

    Mock::given(path("/api/v1.0/email/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(path("/api/v1.0/email/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    // Act - no retry happens on the server side, the visitor resubmits
    let first = app.post_contact(VALID_BODY.into()).await;
    let second = app.post_contact(VALID_BODY.into()).await;

    // Assert
    assert_eq!(502, first.status().as_u16());
    assert_eq!(200, second.status().as_u16());
}
