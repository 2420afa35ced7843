use agencydesk::api::{self, AppState};
use agencydesk::db::init_db;
use agencydesk::domain::{
    CompensationType, Creator, CreatorId, Money, Period, Role, Sale, SaleStatus, SaleType, TimeMs,
    User, UserId,
};
use agencydesk::{Config, Repository};
use axum::http::StatusCode;
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

struct TestApp {
    app: axum::Router,
    state: AppState,
    _temp: TempDir,
}

async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");

    let repo = Arc::new(Repository::new(pool));
    let state = AppState::new(
        repo,
        Config {
            port: 0,
            database_path: ":memory:".to_string(),
            edit_window_hours: 24,
            backdate_tolerance_secs: 300,
        },
    );
    let app = api::create_router(state.clone());

    TestApp {
        app,
        state,
        _temp: temp_dir,
    }
}

async fn request(
    app: axum::Router,
    method: &str,
    uri: &str,
    actor: &UserId,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("x-actor-id", actor.as_str());

    let req = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            builder
                .body(axum::body::Body::from(json.to_string()))
                .unwrap()
        }
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };

    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn seed_user(
    state: &AppState,
    role: Role,
    commission_percent: Option<&str>,
    fixed_salary: Option<&str>,
) -> UserId {
    let user = User {
        id: UserId::generate(),
        name: format!("user-{}", uuid::Uuid::new_v4()),
        role,
        commission_percent: commission_percent.map(|s| Money::from_str(s).unwrap()),
        fixed_salary: fixed_salary.map(|s| Money::from_str(s).unwrap()),
    };
    state.repo.insert_user(&user).await.unwrap();
    user.id
}

async fn seed_creator(state: &AppState) -> CreatorId {
    let creator = Creator {
        id: CreatorId::generate(),
        name: "vera".to_string(),
        compensation_type: CompensationType::Percentage,
        revenue_share_percent: Some(Money::from_str("50").unwrap()),
        fixed_salary_cost: None,
        onlyfans_commission_percent: Creator::default_platform_percent(),
    };
    state.repo.insert_creator(&creator).await.unwrap();
    creator.id
}

async fn seed_sale(state: &AppState, user_id: &UserId, creator_id: &CreatorId, amount: &str, at: i64) {
    let at = TimeMs::new(at);
    let sale = Sale::new(
        user_id.clone(),
        creator_id.clone(),
        Money::from_str(amount).unwrap(),
        SaleType::Ppv,
        SaleStatus::Online,
        at,
        at,
    );
    state.repo.insert_sale(&sale).await.unwrap();
}

fn in_month(year: i32, month: u32) -> i64 {
    Period::new(year, month).unwrap().start_ms().as_i64() + 1000
}

#[tokio::test]
async fn test_admin_records_payment() {
    let t = setup_test_app().await;
    let admin = seed_user(&t.state, Role::Admin, None, None).await;
    let chatter = seed_user(&t.state, Role::Chatter, Some("10"), None).await;

    let (status, body) = request(
        t.app.clone(),
        "POST",
        "/v1/payments",
        &admin,
        Some(serde_json::json!({
            "userId": chatter.as_str(),
            "amount": 150.25,
            "paymentMethod": "PAYPAL",
            "note": "March payout",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], "150.25");
    assert_eq!(body["paymentMethod"], "PAYPAL");
    assert_eq!(body["note"], "March payout");
}

#[tokio::test]
async fn test_only_admin_records_payments() {
    let t = setup_test_app().await;
    let manager = seed_user(&t.state, Role::ChatterManager, None, None).await;
    let chatter = seed_user(&t.state, Role::Chatter, Some("10"), None).await;

    let (status, _) = request(
        t.app.clone(),
        "POST",
        "/v1/payments",
        &manager,
        Some(serde_json::json!({
            "userId": chatter.as_str(),
            "amount": 100,
            "paymentMethod": "CRYPTO",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_non_positive_payment_rejected() {
    let t = setup_test_app().await;
    let admin = seed_user(&t.state, Role::Admin, None, None).await;
    let chatter = seed_user(&t.state, Role::Chatter, Some("10"), None).await;

    let (status, _) = request(
        t.app.clone(),
        "POST",
        "/v1/payments",
        &admin,
        Some(serde_json::json!({
            "userId": chatter.as_str(),
            "amount": 0,
            "paymentMethod": "OTHER",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unknown_payment_method_rejected() {
    let t = setup_test_app().await;
    let admin = seed_user(&t.state, Role::Admin, None, None).await;
    let chatter = seed_user(&t.state, Role::Chatter, Some("10"), None).await;

    let (status, _) = request(
        t.app.clone(),
        "POST",
        "/v1/payments",
        &admin,
        Some(serde_json::json!({
            "userId": chatter.as_str(),
            "amount": 50,
            "paymentMethod": "CASH",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_chatter_sees_own_payments_only() {
    let t = setup_test_app().await;
    let admin = seed_user(&t.state, Role::Admin, None, None).await;
    let alice = seed_user(&t.state, Role::Chatter, Some("10"), None).await;
    let bob = seed_user(&t.state, Role::Chatter, Some("10"), None).await;

    request(
        t.app.clone(),
        "POST",
        "/v1/payments",
        &admin,
        Some(serde_json::json!({
            "userId": alice.as_str(),
            "amount": 75,
            "paymentMethod": "WIRE_TRANSFER",
        })),
    )
    .await;

    let (status, body) = request(
        t.app.clone(),
        "GET",
        &format!("/v1/payments?userId={}", alice.as_str()),
        &alice,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = request(
        t.app.clone(),
        "GET",
        &format!("/v1/payments?userId={}", alice.as_str()),
        &bob,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_amount_owed_commission_minus_payments() {
    let t = setup_test_app().await;
    let admin = seed_user(&t.state, Role::Admin, None, None).await;
    let chatter = seed_user(&t.state, Role::Chatter, Some("15"), None).await;
    let creator = seed_creator(&t.state).await;

    // 15% of 2000 = 300 earned.
    seed_sale(&t.state, &chatter, &creator, "2000", in_month(2026, 3)).await;

    request(
        t.app.clone(),
        "POST",
        "/v1/payments",
        &admin,
        Some(serde_json::json!({
            "userId": chatter.as_str(),
            "amount": 120,
            "paymentMethod": "PAYPAL",
        })),
    )
    .await;

    let (status, body) = request(
        t.app.clone(),
        "GET",
        &format!("/v1/users/{}/owed", chatter.as_str()),
        &admin,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalRetribution"], "300.00");
    assert_eq!(body["totalPaid"], "120.00");
    assert_eq!(body["amountOwed"], "180.00");
}

#[tokio::test]
async fn test_amount_owed_salary_counts_active_months() {
    let t = setup_test_app().await;
    let admin = seed_user(&t.state, Role::Admin, None, None).await;
    let chatter = seed_user(&t.state, Role::Chatter, None, Some("1000")).await;
    let creator = seed_creator(&t.state).await;

    // Sales in two distinct months; the salary accrues once per month worked.
    seed_sale(&t.state, &chatter, &creator, "10", in_month(2026, 3)).await;
    seed_sale(&t.state, &chatter, &creator, "10", in_month(2026, 3) + 60_000).await;
    seed_sale(&t.state, &chatter, &creator, "10", in_month(2026, 5)).await;

    let (_, body) = request(
        t.app.clone(),
        "GET",
        &format!("/v1/users/{}/owed", chatter.as_str()),
        &admin,
        None,
    )
    .await;

    assert_eq!(body["totalRetribution"], "2000.00");
    assert_eq!(body["amountOwed"], "2000.00");
}

#[tokio::test]
async fn test_owed_can_go_negative_on_overpayment() {
    let t = setup_test_app().await;
    let admin = seed_user(&t.state, Role::Admin, None, None).await;
    let chatter = seed_user(&t.state, Role::Chatter, Some("10"), None).await;
    let creator = seed_creator(&t.state).await;

    seed_sale(&t.state, &chatter, &creator, "100", in_month(2026, 3)).await;

    request(
        t.app.clone(),
        "POST",
        "/v1/payments",
        &admin,
        Some(serde_json::json!({
            "userId": chatter.as_str(),
            "amount": 50,
            "paymentMethod": "PAYPAL",
        })),
    )
    .await;

    let (_, body) = request(
        t.app.clone(),
        "GET",
        &format!("/v1/users/{}/owed", chatter.as_str()),
        &admin,
        None,
    )
    .await;

    // 10 earned, 50 paid.
    assert_eq!(body["amountOwed"], "-40.00");
}

#[tokio::test]
async fn test_chatter_views_own_balance_not_others() {
    let t = setup_test_app().await;
    let alice = seed_user(&t.state, Role::Chatter, Some("10"), None).await;
    let bob = seed_user(&t.state, Role::Chatter, Some("10"), None).await;

    let (status, _) = request(
        t.app.clone(),
        "GET",
        &format!("/v1/users/{}/owed", alice.as_str()),
        &alice,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        t.app.clone(),
        "GET",
        &format!("/v1/users/{}/owed", alice.as_str()),
        &bob,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
