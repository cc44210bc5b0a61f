//! Integration tests for REST API endpoints
//!
//! The router is driven end-to-end with a stubbed calculator that records
//! every call, so both the HTTP outcome and the exact argument shape that
//! reached the calculator can be asserted.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use tuscan_core::{ArgName, CalculationError, CalibrationArgs, Calculator, Dispatcher, Standard};
use tuscan_its90::Its90Calculator;
use tuscan_server::api::create_router;

#[derive(Debug, Clone, PartialEq)]
struct Call {
    function: &'static str,
    standard: Standard,
    primary: f64,
    args: Option<CalibrationArgs>,
}

/// Calculator stub returning a fixed value and recording its calls
struct StubCalculator {
    result: f64,
    calls: Mutex<Vec<Call>>,
}

impl StubCalculator {
    fn returning(result: f64) -> Arc<Self> {
        Arc::new(Self {
            result,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn record(
        &self,
        function: &'static str,
        standard: Standard,
        primary: f64,
        args: Option<&CalibrationArgs>,
    ) -> Result<f64, CalculationError> {
        self.calls.lock().unwrap().push(Call {
            function,
            standard,
            primary,
            args: args.cloned(),
        });
        Ok(self.result)
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl Calculator for StubCalculator {
    fn wr(&self, standard: Standard, t90: f64) -> Result<f64, CalculationError> {
        self.record("wr", standard, t90, None)
    }

    fn t90r(&self, standard: Standard, wr: f64) -> Result<f64, CalculationError> {
        self.record("t90r", standard, wr, None)
    }

    fn t90(&self, standard: Standard, res: f64, args: &CalibrationArgs) -> Result<f64, CalculationError> {
        self.record("t90", standard, res, Some(args))
    }

    fn res(&self, standard: Standard, t90: f64, args: &CalibrationArgs) -> Result<f64, CalculationError> {
        self.record("res", standard, t90, Some(args))
    }
}

fn create_test_router(calculator: Arc<dyn Calculator>) -> Router {
    create_router(Dispatcher::new(Standard::Its90, calculator))
}

/// POST form-encoded parameters, as an HTML form or `curl -d` would
async fn post_form(app: Router, uri: &str, params: &[(&str, &str)]) -> (StatusCode, Option<String>, Value) {
    let body = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, content_type, json)
}

fn bundle(pairs: &[(ArgName, f64)]) -> CalibrationArgs {
    pairs.iter().copied().collect()
}

// wr

#[tokio::test]
async fn test_wr_good_request() {
    let calc = StubCalculator::returning(1.0);
    let (status, content_type, json) =
        post_form(create_test_router(calc.clone()), "/its90/wr", &[("t90", "0.01")]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(json, json!({"wr": 1.0}));
    assert_eq!(
        calc.calls(),
        vec![Call {
            function: "wr",
            standard: Standard::Its90,
            primary: 0.01,
            args: None,
        }]
    );
}

#[tokio::test]
async fn test_wr_absent_t90() {
    let calc = StubCalculator::returning(1.0);
    let (status, _, _) = post_form(create_test_router(calc.clone()), "/its90/wr", &[]).await;

    assert!(status.is_client_error());
    assert!(calc.calls().is_empty());
}

#[tokio::test]
async fn test_wr_non_numeric_t90() {
    let calc = StubCalculator::returning(1.0);
    let (status, _, _) =
        post_form(create_test_router(calc.clone()), "/its90/wr", &[("t90", "non_numeric")]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(calc.calls().is_empty());
}

#[tokio::test]
async fn test_wr_ignores_extra_arguments() {
    let calc = StubCalculator::returning(1.0);
    let (status, _, _) = post_form(
        create_test_router(calc.clone()),
        "/its90/wr",
        &[("t90", "0.0"), ("extra", "argument")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(calc.calls()[0].primary, 0.0);
}

// t90r

#[tokio::test]
async fn test_t90r_good_request() {
    let calc = StubCalculator::returning(0.01);
    let (status, content_type, json) =
        post_form(create_test_router(calc.clone()), "/its90/t90r", &[("wr", "1.0")]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(json, json!({"t90r": 0.01}));
    assert_eq!(calc.calls()[0].function, "t90r");
    assert_eq!(calc.calls()[0].primary, 1.0);
}

#[tokio::test]
async fn test_t90r_bad_requests() {
    for params in [vec![], vec![("wr", "non_numeric")]] {
        let calc = StubCalculator::returning(0.01);
        let (status, _, _) = post_form(create_test_router(calc.clone()), "/its90/t90r", &params).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "params {:?}", params);
        assert!(calc.calls().is_empty());
    }
}

#[tokio::test]
async fn test_t90r_ignores_extra_arguments() {
    let calc = StubCalculator::returning(0.01);
    let (status, _, _) = post_form(
        create_test_router(calc),
        "/its90/t90r",
        &[("wr", "1.0"), ("extra", "argument")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

// t90

#[tokio::test]
async fn test_t90_good_request_required_arguments() {
    let calc = StubCalculator::returning(10.05);
    let (status, content_type, json) = post_form(
        create_test_router(calc.clone()),
        "/its90/t90",
        &[("res", "26.0"), ("rtpw", "25.0"), ("subrange", "11")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(json, json!({"t90": 10.05}));
    assert_eq!(
        calc.calls(),
        vec![Call {
            function: "t90",
            standard: Standard::Its90,
            primary: 26.0,
            args: Some(bundle(&[(ArgName::Rtpw, 25.0), (ArgName::Subrange, 11.0)])),
        }]
    );
}

#[tokio::test]
async fn test_t90_good_request_optional_arguments() {
    let calc = StubCalculator::returning(10.05);
    let (status, _, _) = post_form(
        create_test_router(calc.clone()),
        "/its90/t90",
        &[
            ("res", "26.0"),
            ("rtpw", "25.0"),
            ("subrange", "7"),
            ("a", "1.0e-03"),
            ("b", "2.0e-04"),
        ],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        calc.calls()[0].args,
        Some(bundle(&[
            (ArgName::Rtpw, 25.0),
            (ArgName::Subrange, 7.0),
            (ArgName::A, 1.0e-3),
            (ArgName::B, 2.0e-4),
        ]))
    );
}

#[tokio::test]
async fn test_t90_absent_required_arguments() {
    let partial: [&[(&str, &str)]; 7] = [
        &[],
        &[("res", "26.0")],
        &[("rtpw", "25.0")],
        &[("subrange", "11")],
        &[("res", "26.0"), ("rtpw", "25.0")],
        &[("res", "26.0"), ("subrange", "11")],
        &[("rtpw", "25.0"), ("subrange", "11")],
    ];

    for params in partial {
        let calc = StubCalculator::returning(10.05);
        let (status, _, _) = post_form(create_test_router(calc.clone()), "/its90/t90", params).await;
        assert!(status.is_client_error(), "params {:?} gave {}", params, status);
        assert!(calc.calls().is_empty());
    }
}

#[tokio::test]
async fn test_t90_non_numeric_arguments() {
    let cases: [&[(&str, &str)]; 4] = [
        &[("res", "non-numeric"), ("rtpw", "25.0"), ("subrange", "11")],
        &[("res", "26.0"), ("rtpw", "non-numeric"), ("subrange", "11")],
        &[("res", "26.0"), ("rtpw", "25.0"), ("subrange", "non-numeric")],
        &[("res", "26.0"), ("rtpw", "25.0"), ("subrange", "11"), ("c2", "non-numeric")],
    ];

    for params in cases {
        let calc = StubCalculator::returning(10.05);
        let (status, _, _) = post_form(create_test_router(calc.clone()), "/its90/t90", params).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "params {:?}", params);
        assert!(calc.calls().is_empty());
    }
}

#[tokio::test]
async fn test_t90_ignores_extra_arguments() {
    let calc = StubCalculator::returning(10.05);
    let (status, _, _) = post_form(
        create_test_router(calc.clone()),
        "/its90/t90",
        &[("res", "26.0"), ("rtpw", "25.0"), ("subrange", "11"), ("extra", "argument")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let args = calc.calls()[0].args.clone().unwrap();
    assert_eq!(args.len(), 2);
}

// res

#[tokio::test]
async fn test_res_good_request_required_arguments() {
    let calc = StubCalculator::returning(26.0);
    let (status, content_type, json) = post_form(
        create_test_router(calc.clone()),
        "/its90/res",
        &[("t90", "10.05"), ("rtpw", "25.0"), ("subrange", "11")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(json, json!({"res": 26.0}));
    assert_eq!(
        calc.calls(),
        vec![Call {
            function: "res",
            standard: Standard::Its90,
            primary: 10.05,
            args: Some(bundle(&[(ArgName::Rtpw, 25.0), (ArgName::Subrange, 11.0)])),
        }]
    );
}

#[tokio::test]
async fn test_res_good_request_optional_arguments() {
    let calc = StubCalculator::returning(26.0);
    post_form(
        create_test_router(calc.clone()),
        "/its90/res",
        &[
            ("t90", "10.05"),
            ("rtpw", "25.0"),
            ("subrange", "7"),
            ("a", "1.0e-03"),
            ("b", "2.0e-04"),
        ],
    )
    .await;

    let args = calc.calls()[0].args.clone().unwrap();
    assert_eq!(args.get(ArgName::A), Some(1.0e-3));
    assert_eq!(args.get(ArgName::B), Some(2.0e-4));
    assert_eq!(args.get(ArgName::Subrange), Some(7.0));
}

#[tokio::test]
async fn test_res_absent_required_arguments() {
    let partial: [&[(&str, &str)]; 7] = [
        &[],
        &[("t90", "10.05")],
        &[("rtpw", "25.0")],
        &[("subrange", "11")],
        &[("t90", "10.05"), ("rtpw", "25.0")],
        &[("t90", "10.05"), ("subrange", "11")],
        &[("rtpw", "25.0"), ("subrange", "11")],
    ];

    for params in partial {
        let calc = StubCalculator::returning(26.0);
        let (status, _, _) = post_form(create_test_router(calc.clone()), "/its90/res", params).await;
        assert!(status.is_client_error(), "params {:?} gave {}", params, status);
        assert!(calc.calls().is_empty());
    }
}

#[tokio::test]
async fn test_res_non_numeric_arguments() {
    let cases: [&[(&str, &str)]; 3] = [
        &[("t90", "non-numeric"), ("rtpw", "25.0"), ("subrange", "11")],
        &[("t90", "10.05"), ("rtpw", "non-numeric"), ("subrange", "11")],
        &[("t90", "10.05"), ("rtpw", "25.0"), ("subrange", "non-numeric")],
    ];

    for params in cases {
        let calc = StubCalculator::returning(26.0);
        let (status, _, _) = post_form(create_test_router(calc.clone()), "/its90/res", params).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "params {:?}", params);
        assert!(calc.calls().is_empty());
    }
}

#[tokio::test]
async fn test_res_ignores_extra_arguments() {
    let calc = StubCalculator::returning(26.0);
    let (status, _, _) = post_form(
        create_test_router(calc),
        "/its90/res",
        &[("t90", "10.05"), ("rtpw", "25.0"), ("subrange", "11"), ("extra", "argument")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_identical_requests_give_identical_responses() {
    let calc = StubCalculator::returning(26.0);
    let params = [("t90", "10.05"), ("rtpw", "25.0"), ("subrange", "11")];

    let first = post_form(create_test_router(calc.clone()), "/its90/res", &params).await;
    let second = post_form(create_test_router(calc.clone()), "/its90/res", &params).await;

    assert_eq!(first, second);
    let calls = calc.calls();
    assert_eq!(calls[0], calls[1]);
}

// ITS-90 backend

#[tokio::test]
async fn test_its90_backend_end_to_end() {
    let app = create_test_router(Arc::new(Its90Calculator::new()));

    let (status, _, json) = post_form(
        app.clone(),
        "/its90/t90",
        &[("res", "26.0"), ("rtpw", "25.0"), ("subrange", "11")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let t90 = json["t90"].as_f64().unwrap();
    assert!((t90 - 10.0542).abs() < 1e-3, "t90 = {}", t90);

    let (status, _, json) = post_form(app, "/its90/wr", &[("t90", "0.01")]).await;
    assert_eq!(status, StatusCode::OK);
    assert!((json["wr"].as_f64().unwrap() - 1.0).abs() < 1e-7);
}

#[tokio::test]
async fn test_its90_backend_failure_is_client_error() {
    let app = create_test_router(Arc::new(Its90Calculator::new()));

    let (status, _, json) = post_form(
        app.clone(),
        "/its90/t90",
        &[("res", "26.0"), ("rtpw", "25.0"), ("subrange", "12")],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("subrange"));

    let (status, _, _) = post_form(app, "/its90/wr", &[("t90", "5000")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
