//! End-to-end behaviour of the user roster endpoint through a fully wired app:
//! routing, validation, port dispatch, serialisation, and the error envelope.

use std::sync::{Arc, Mutex};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use roster::Trace;
use roster::domain::ports::UserProjectsQuery;
use roster::domain::{Error, ProjectAssociation, ProjectId, UserId, UserRecord, UserWithProjects};
use roster::inbound::http::health::{HealthState, live, ready};
use roster::inbound::http::state::HttpState;
use roster::inbound::http::users::get_user_with_projects;
use roster::middleware::trace::TRACE_ID_HEADER;
use rstest::rstest;
use serde_json::{Value, json};
use uuid::Uuid;

/// Port stub that records every requested id and replays one canned response.
struct RecordingUserProjectsQuery {
    requested: Mutex<Vec<i64>>,
    response: Result<Option<UserWithProjects>, Error>,
}

impl RecordingUserProjectsQuery {
    fn with_response(response: Result<Option<UserWithProjects>, Error>) -> Arc<Self> {
        Arc::new(Self {
            requested: Mutex::new(Vec::new()),
            response,
        })
    }

    fn requested_ids(&self) -> Vec<i64> {
        self.requested.lock().expect("requested ids lock").clone()
    }
}

#[async_trait]
impl UserProjectsQuery for RecordingUserProjectsQuery {
    async fn fetch_user_with_projects(
        &self,
        user_id: UserId,
    ) -> Result<Option<UserWithProjects>, Error> {
        self.requested
            .lock()
            .expect("requested ids lock")
            .push(user_id.get());
        self.response.clone()
    }
}

fn moment(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("unambiguous timestamp")
}

fn ann() -> UserRecord {
    UserRecord {
        id: UserId::new(7).expect("valid user id"),
        username: "ann".to_owned(),
        email: "ann@example.com".to_owned(),
        created_at: moment(2024, 1, 10, 9, 0, 0),
        updated_at: moment(2024, 2, 11, 10, 30, 0),
    }
}

fn ann_with_two_projects() -> UserWithProjects {
    UserWithProjects {
        user: ann(),
        projects: vec![
            ProjectAssociation {
                project_id: ProjectId::new(3).expect("valid project id"),
                project_name: "Atlas".to_owned(),
                description: "Mapping pipeline".to_owned(),
                created_at: moment(2024, 3, 1, 10, 0, 0),
                updated_at: moment(2024, 3, 2, 11, 0, 0),
                role: "owner".to_owned(),
                assigned_at: moment(2024, 3, 3, 12, 15, 0),
            },
            ProjectAssociation {
                project_id: ProjectId::new(9).expect("valid project id"),
                project_name: "Zen".to_owned(),
                description: String::new(),
                created_at: moment(2024, 5, 6, 7, 0, 0),
                updated_at: moment(2024, 5, 6, 7, 0, 0),
                role: "viewer".to_owned(),
                assigned_at: moment(2024, 5, 7, 8, 45, 0),
            },
        ],
    }
}

fn test_app(
    query: Arc<RecordingUserProjectsQuery>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(query)))
        .wrap(Trace)
        .service(web::scope("/api").service(get_user_with_projects))
}

#[actix_web::test]
async fn found_user_returns_the_full_roster() {
    let query = RecordingUserProjectsQuery::with_response(Ok(Some(ann_with_two_projects())));
    let app = test::init_service(test_app(query.clone())).await;

    let response =
        test::call_service(&app, TestRequest::get().uri("/api/user/7").to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({
            "id": 7,
            "username": "ann",
            "email": "ann@example.com",
            "created_at": "2024-01-10T09:00:00+00:00",
            "updated_at": "2024-02-11T10:30:00+00:00",
            "projects": [
                {
                    "project_id": 3,
                    "project_name": "Atlas",
                    "description": "Mapping pipeline",
                    "created_at": "2024-03-01T10:00:00+00:00",
                    "updated_at": "2024-03-02T11:00:00+00:00",
                    "role": "owner",
                    "assigned_at": "2024-03-03T12:15:00+00:00"
                },
                {
                    "project_id": 9,
                    "project_name": "Zen",
                    "description": "",
                    "created_at": "2024-05-06T07:00:00+00:00",
                    "updated_at": "2024-05-06T07:00:00+00:00",
                    "role": "viewer",
                    "assigned_at": "2024-05-07T08:45:00+00:00"
                }
            ]
        })
    );
    assert_eq!(query.requested_ids(), vec![7]);
}

#[actix_web::test]
async fn user_without_memberships_serialises_an_empty_array() {
    let query = RecordingUserProjectsQuery::with_response(Ok(Some(UserWithProjects {
        user: ann(),
        projects: Vec::new(),
    })));
    let app = test::init_service(test_app(query)).await;

    let response =
        test::call_service(&app, TestRequest::get().uri("/api/user/7").to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body.get("projects"), Some(&json!([])));
}

#[actix_web::test]
async fn unknown_user_returns_the_not_found_envelope() {
    let query = RecordingUserProjectsQuery::with_response(Ok(None));
    let app = test::init_service(test_app(query.clone())).await;

    let response =
        test::call_service(&app, TestRequest::get().uri("/api/user/8").to_request()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "error": "User not found" }));
    assert_eq!(query.requested_ids(), vec![8]);
}

#[rstest]
#[case("abc")]
#[case("0")]
#[case("-3")]
#[case("1.5")]
#[actix_web::test]
async fn malformed_ids_fail_before_the_port_is_consulted(#[case] raw: &str) {
    let query = RecordingUserProjectsQuery::with_response(Ok(None));
    let app = test::init_service(test_app(query.clone())).await;

    let response = test::call_service(
        &app,
        TestRequest::get()
            .uri(&format!("/api/user/{raw}"))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST, "id {raw:?}");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({ "error": format!("user_id must be a positive integer, got '{raw}'") })
    );
    assert!(
        query.requested_ids().is_empty(),
        "storage should not be consulted for malformed ids"
    );
}

#[actix_web::test]
async fn storage_failures_redact_to_the_internal_envelope() {
    let query =
        RecordingUserProjectsQuery::with_response(Err(Error::internal("pool exhausted")));
    let app = test::init_service(test_app(query)).await;

    let response =
        test::call_service(&app, TestRequest::get().uri("/api/user/7").to_request()).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[rstest]
#[case("/api/user/7", StatusCode::OK)]
#[case("/api/user/8", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn responses_carry_a_parseable_trace_id(#[case] path: &str, #[case] expected: StatusCode) {
    let response = match expected {
        StatusCode::OK => Ok(Some(ann_with_two_projects())),
        _ => Ok(None),
    };
    let app = test::init_service(test_app(RecordingUserProjectsQuery::with_response(response))).await;

    let response = test::call_service(&app, TestRequest::get().uri(path).to_request()).await;

    assert_eq!(response.status(), expected);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header")
        .to_str()
        .expect("header is ascii");
    Uuid::parse_str(header).expect("header should be a valid UUID");
}

#[actix_web::test]
async fn readiness_follows_the_health_state() {
    let health_state = web::Data::new(HealthState::new());
    let app = test::init_service(
        App::new()
            .app_data(health_state.clone())
            .service(ready)
            .service(live),
    )
    .await;

    let before = test::call_service(
        &app,
        TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

    health_state.mark_ready();
    let after = test::call_service(
        &app,
        TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(after.status(), StatusCode::OK);

    let liveness =
        test::call_service(&app, TestRequest::get().uri("/health/live").to_request()).await;
    assert_eq!(liveness.status(), StatusCode::OK);
}
