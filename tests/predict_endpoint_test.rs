use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use house_price_web::core::artifact::ModelSpec;
use house_price_web::core::linear::LinearRegressor;
use house_price_web::{build_router, ModelArtifact, PredictionEngine};
use std::sync::Arc;
use tower::ServiceExt;

const EXAMPLE_FORM: &str =
    "CRIM=0.1&ZN=0&INDUS=7&CHAS=0&NOX=0.5&AGE=65&DIS=4&PTRATIO=18&B=390&LSTAT=5";

fn shipped_model_router() -> Result<Router> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/models/house_price_prediction.json");
    let model = ModelArtifact::from_file(path)?;
    Ok(build_router(Arc::new(PredictionEngine::new(model)?)))
}

fn unit_model_router() -> Result<Router> {
    let model = ModelArtifact::try_new(ModelSpec::Linear(LinearRegressor::new(0.5, vec![1.0; 10])))?;
    Ok(build_router(Arc::new(PredictionEngine::new(model)?)))
}

fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> Result<(StatusCode, String)> {
    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok((status, String::from_utf8(bytes.to_vec())?))
}

/// 從頁面中取出 "Predicted Price: X" 的數值字串
fn extract_prediction(html: &str) -> Option<&str> {
    let start = html.find("Predicted Price: ")? + "Predicted Price: ".len();
    let rest = &html[start..];
    let end = rest.find('<')?;
    Some(&rest[..end])
}

#[tokio::test]
async fn test_index_renders_form() -> Result<()> {
    let request = Request::builder().uri("/").body(Body::empty())?;
    let (status, html) = send(shipped_model_router()?, request).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"<form action="/predict" method="post">"#));
    for name in house_price_web::FEATURE_NAMES {
        assert!(html.contains(&format!(r#"name="{}""#, name)), "missing input {}", name);
    }
    Ok(())
}

#[tokio::test]
async fn test_predict_with_shipped_model() -> Result<()> {
    let (status, html) = send(shipped_model_router()?, form_request(EXAMPLE_FORM)).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(extract_prediction(&html), Some("22.94"));
    // 送出的值會回填到表單
    assert!(html.contains(r#"value="390""#));
    Ok(())
}

#[tokio::test]
async fn test_prediction_has_exactly_two_decimals() -> Result<()> {
    // 0.5 + sum of ones = 10.5 -> "10.50"
    let body = "CRIM=1&ZN=1&INDUS=1&CHAS=1&NOX=1&AGE=1&DIS=1&PTRATIO=1&B=1&LSTAT=1";
    let (status, html) = send(unit_model_router()?, form_request(body)).await?;

    assert_eq!(status, StatusCode::OK);
    let value = extract_prediction(&html).expect("prediction text present");
    assert_eq!(value, "10.50");
    let decimals = value.split('.').nth(1).map(str::len);
    assert_eq!(decimals, Some(2));
    Ok(())
}

#[tokio::test]
async fn test_repeated_requests_are_deterministic() -> Result<()> {
    let router = shipped_model_router()?;

    let (_, first) = send(router.clone(), form_request(EXAMPLE_FORM)).await?;
    let (_, second) = send(router, form_request(EXAMPLE_FORM)).await?;

    let first = extract_prediction(&first).map(str::to_string);
    let second = extract_prediction(&second).map(str::to_string);
    assert!(first.is_some());
    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_requests_share_one_model() -> Result<()> {
    let router = shipped_model_router()?;

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let router = router.clone();
            tokio::spawn(async move { send(router, form_request(EXAMPLE_FORM)).await })
        })
        .collect();

    for handle in handles {
        let (status, html) = handle.await??;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(extract_prediction(&html), Some("22.94"));
    }
    Ok(())
}

#[tokio::test]
async fn test_missing_field_is_client_error() -> Result<()> {
    let body = "CRIM=0.1&ZN=0&INDUS=7&CHAS=0&NOX=0.5&AGE=65&DIS=4&PTRATIO=18&B=390";
    let (status, html) = send(unit_model_router()?, form_request(body)).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("LSTAT is required"));
    assert!(!html.contains("Predicted Price"));
    Ok(())
}

#[tokio::test]
async fn test_non_numeric_field_is_client_error() -> Result<()> {
    let body = "CRIM=abc&ZN=0&INDUS=7&CHAS=0&NOX=0.5&AGE=65&DIS=4&PTRATIO=18&B=390&LSTAT=";
    let (status, html) = send(unit_model_router()?, form_request(body)).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("CRIM must be a number (got &#39;abc&#39;)"));
    assert!(html.contains("LSTAT must be a number"));
    Ok(())
}

#[tokio::test]
async fn test_non_finite_field_is_client_error() -> Result<()> {
    let body = "CRIM=NaN&ZN=0&INDUS=7&CHAS=0&NOX=0.5&AGE=65&DIS=4&PTRATIO=18&B=390&LSTAT=5";
    let (status, html) = send(unit_model_router()?, form_request(body)).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("CRIM must be a finite number"));
    Ok(())
}

#[tokio::test]
async fn test_overflowing_prediction_is_client_error() -> Result<()> {
    // 每個值都是有限數，但模型輸出溢位 (CHAS -> +inf, NOX -> -inf, 相加為 NaN)
    let body = "CRIM=0.1&ZN=0&INDUS=7&CHAS=1e308&NOX=1e308&AGE=65&DIS=4&PTRATIO=18&B=390&LSTAT=5";
    let (status, html) = send(shipped_model_router()?, form_request(body)).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!html.contains("Predicted Price"));
    assert!(html.contains("too large for the model"));
    assert!(html.contains(r#"value="1e308""#));

    let body = "CRIM=0.1&ZN=0&INDUS=7&CHAS=1e308&NOX=0.5&AGE=65&DIS=4&PTRATIO=18&B=390&LSTAT=5";
    let (status, html) = send(shipped_model_router()?, form_request(body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!html.contains("inf"));
    Ok(())
}

#[tokio::test]
async fn test_huge_finite_prediction_keeps_two_decimals() -> Result<()> {
    // -0.1 * -1e308 = 1e307, finite but too large for value * 100
    let body = "CRIM=-1e308&ZN=0&INDUS=7&CHAS=0&NOX=0.5&AGE=65&DIS=4&PTRATIO=18&B=390&LSTAT=5";
    let (status, html) = send(shipped_model_router()?, form_request(body)).await?;

    assert_eq!(status, StatusCode::OK);
    let value = extract_prediction(&html).expect("prediction text present");
    assert!(value.ends_with(".00"), "got {}", value);
    assert!(!value.contains("inf"));
    Ok(())
}

#[tokio::test]
async fn test_non_form_body_is_client_error() -> Result<()> {
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"CRIM": 0.1}"#))?;
    let (status, html) = send(unit_model_router()?, request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(html.contains("could not be read as a form submission"));
    Ok(())
}

#[tokio::test]
async fn test_get_predict_is_not_allowed() -> Result<()> {
    let request = Request::builder().uri("/predict").body(Body::empty())?;
    let (status, _) = send(unit_model_router()?, request).await?;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}
