use super::*;

#[test]
fn login_response_parses_backend_body() {
    let resp: LoginResponse =
        serde_json::from_str(r#"{"token":"jwt.abc","role":"LEADER","department":"Produksi"}"#).expect("parse");
    assert_eq!(
        resp,
        LoginResponse { token: "jwt.abc".to_owned(), role: "LEADER".to_owned(), department: Some("Produksi".to_owned()) }
    );
}

#[test]
fn login_response_department_is_optional() {
    let resp: LoginResponse = serde_json::from_str(r#"{"token":"t","role":"MANAGER"}"#).expect("parse");
    assert_eq!(resp.department, None);
}

#[test]
fn into_session_builds_user_for_username() {
    let resp = LoginResponse { token: "t".to_owned(), role: "OPERATOR".to_owned(), department: Some("QC".to_owned()) };
    let (token, user) = resp.into_session("budi");
    assert_eq!(token, "t");
    assert_eq!(user, User::new("budi", "OPERATOR").with_department("QC"));
}

#[test]
fn into_session_drops_blank_department() {
    let resp = LoginResponse { token: "t".to_owned(), role: "MANAGER".to_owned(), department: Some(String::new()) };
    let (_, user) = resp.into_session("sari");
    assert_eq!(user.department, None);
    assert_eq!(user.name, None);
}

#[test]
fn login_request_serializes_credentials() {
    let req = LoginRequest { username: "sari".to_owned(), password: "pw".to_owned() };
    assert_eq!(serde_json::to_value(&req).expect("serialize"), serde_json::json!({"username": "sari", "password": "pw"}));
}

#[test]
fn error_response_parses_message() {
    let err: ErrorResponse = serde_json::from_str(r#"{"error":"Password salah"}"#).expect("parse");
    assert_eq!(err.error, "Password salah");
}
