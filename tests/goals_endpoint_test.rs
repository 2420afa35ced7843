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

async fn seed_admin(state: &AppState) -> UserId {
    let admin = User {
        id: UserId::generate(),
        name: "root".to_string(),
        role: Role::Admin,
        commission_percent: None,
        fixed_salary: None,
    };
    state.repo.insert_user(&admin).await.unwrap();
    admin.id
}

async fn seed_chatter(state: &AppState, commission_percent: &str) -> UserId {
    let user = User {
        id: UserId::generate(),
        name: "dana".to_string(),
        role: Role::Chatter,
        commission_percent: Some(Money::from_str(commission_percent).unwrap()),
        fixed_salary: None,
    };
    state.repo.insert_user(&user).await.unwrap();
    user.id
}

async fn seed_creator(state: &AppState, share: &str) -> CreatorId {
    let creator = Creator {
        id: CreatorId::generate(),
        name: "luna".to_string(),
        compensation_type: CompensationType::Percentage,
        revenue_share_percent: Some(Money::from_str(share).unwrap()),
        fixed_salary_cost: None,
        onlyfans_commission_percent: Creator::default_platform_percent(),
    };
    state.repo.insert_creator(&creator).await.unwrap();
    creator.id
}

async fn seed_sale(state: &AppState, user_id: &UserId, creator_id: &CreatorId, amount: &str, at: TimeMs) {
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

fn in_month(year: i32, month: u32) -> TimeMs {
    TimeMs::new(Period::new(year, month).unwrap().start_ms().as_i64() + 1000)
}

#[tokio::test]
async fn test_sales_goal_hit_exactly() {
    let t = setup_test_app().await;
    let admin = seed_admin(&t.state).await;
    let chatter = seed_chatter(&t.state, "10").await;
    let creator = seed_creator(&t.state, "50").await;

    seed_sale(&t.state, &chatter, &creator, "5000", in_month(2026, 3)).await;

    let (status, body) = request(
        t.app.clone(),
        "POST",
        "/v1/goals",
        &admin,
        Some(serde_json::json!({
            "goalType": "SALES",
            "target": 5000,
            "year": 2026,
            "month": 3,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["achieved"], true);
    assert_eq!(body["remaining"], "0.00");
    assert_eq!(body["progressPercent"], "100.00");
    assert_eq!(body["current"], "5000.00");
}

#[tokio::test]
async fn test_progress_clamps_at_100_but_achieves() {
    let t = setup_test_app().await;
    let admin = seed_admin(&t.state).await;
    let chatter = seed_chatter(&t.state, "10").await;
    let creator = seed_creator(&t.state, "50").await;

    seed_sale(&t.state, &chatter, &creator, "3000", in_month(2026, 3)).await;

    let (_, body) = request(
        t.app.clone(),
        "POST",
        "/v1/goals",
        &admin,
        Some(serde_json::json!({
            "goalType": "SALES",
            "target": 1000,
            "year": 2026,
            "month": 3,
        })),
    )
    .await;

    assert_eq!(body["progressPercent"], "100.00");
    assert_eq!(body["achieved"], true);
}

#[tokio::test]
async fn test_commission_goal_user_scoped() {
    let t = setup_test_app().await;
    let admin = seed_admin(&t.state).await;
    let chatter = seed_chatter(&t.state, "15").await;
    let creator = seed_creator(&t.state, "50").await;

    seed_sale(&t.state, &chatter, &creator, "2000", in_month(2026, 3)).await;

    let (_, body) = request(
        t.app.clone(),
        "POST",
        "/v1/goals",
        &admin,
        Some(serde_json::json!({
            "userId": chatter.as_str(),
            "goalType": "COMMISSION",
            "target": 600,
            "year": 2026,
            "month": 3,
        })),
    )
    .await;

    // 15% of 2000 = 300 of the 600 target.
    assert_eq!(body["current"], "300.00");
    assert_eq!(body["progressPercent"], "50.00");
    assert_eq!(body["achieved"], false);
    assert_eq!(body["remaining"], "300.00");
}

#[tokio::test]
async fn test_creator_scoped_bonus_names_creator() {
    let t = setup_test_app().await;
    let admin = seed_admin(&t.state).await;
    let chatter = seed_chatter(&t.state, "10").await;
    let creator = seed_creator(&t.state, "50").await;

    seed_sale(&t.state, &chatter, &creator, "6000", in_month(2026, 3)).await;

    let (_, body) = request(
        t.app.clone(),
        "POST",
        "/v1/goals",
        &admin,
        Some(serde_json::json!({
            "creatorId": creator.as_str(),
            "goalType": "SALES",
            "target": 5000,
            "year": 2026,
            "month": 3,
            "bonusAmount": 200,
        })),
    )
    .await;

    assert_eq!(body["achieved"], true);
    let text = body["bonusDescription"].as_str().unwrap();
    assert!(text.contains("luna"));
}

#[tokio::test]
async fn test_yearly_goal_aggregates_across_months() {
    let t = setup_test_app().await;
    let admin = seed_admin(&t.state).await;
    let chatter = seed_chatter(&t.state, "10").await;
    let creator = seed_creator(&t.state, "50").await;

    seed_sale(&t.state, &chatter, &creator, "400", in_month(2026, 2)).await;
    seed_sale(&t.state, &chatter, &creator, "600", in_month(2026, 9)).await;

    let (_, body) = request(
        t.app.clone(),
        "POST",
        "/v1/goals",
        &admin,
        Some(serde_json::json!({
            "goalType": "SALES",
            "target": 1000,
            "year": 2026,
            "month": 0,
        })),
    )
    .await;

    assert_eq!(body["current"], "1000.00");
    assert_eq!(body["achieved"], true);

    // A yearly goal shows up when listing any month of its year.
    let (_, listed) = request(t.app.clone(), "GET", "/v1/goals?month=6&year=2026", &admin, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_revenue_goal_uses_net_revenue() {
    let t = setup_test_app().await;
    let admin = seed_admin(&t.state).await;
    let chatter = seed_chatter(&t.state, "10").await;
    let creator = seed_creator(&t.state, "40").await;

    seed_sale(&t.state, &chatter, &creator, "1000", in_month(2026, 3)).await;

    let (_, body) = request(
        t.app.clone(),
        "POST",
        "/v1/goals",
        &admin,
        Some(serde_json::json!({
            "creatorId": creator.as_str(),
            "goalType": "REVENUE",
            "target": 600,
            "year": 2026,
            "month": 3,
        })),
    )
    .await;

    // 1000 sales minus 40% share = 600 net.
    assert_eq!(body["current"], "600.00");
    assert_eq!(body["achieved"], true);
}

#[tokio::test]
async fn test_zero_target_rejected() {
    let t = setup_test_app().await;
    let admin = seed_admin(&t.state).await;

    let (status, _) = request(
        t.app.clone(),
        "POST",
        "/v1/goals",
        &admin,
        Some(serde_json::json!({
            "goalType": "SALES",
            "target": 0,
            "year": 2026,
            "month": 3,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_out_of_range_year_rejected_at_creation() {
    let t = setup_test_app().await;
    let admin = seed_admin(&t.state).await;

    // Both monthly and yearly forms; a stored bad year would break every
    // later listing of that year.
    for month in [3, 0] {
        let (status, _) = request(
            t.app.clone(),
            "POST",
            "/v1/goals",
            &admin,
            Some(serde_json::json!({
                "goalType": "SALES",
                "target": 100,
                "year": 999999999,
                "month": month,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[tokio::test]
async fn test_goal_cannot_have_two_scopes() {
    let t = setup_test_app().await;
    let admin = seed_admin(&t.state).await;
    let chatter = seed_chatter(&t.state, "10").await;
    let creator = seed_creator(&t.state, "50").await;

    let (status, _) = request(
        t.app.clone(),
        "POST",
        "/v1/goals",
        &admin,
        Some(serde_json::json!({
            "userId": chatter.as_str(),
            "creatorId": creator.as_str(),
            "goalType": "SALES",
            "target": 100,
            "year": 2026,
            "month": 3,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_only_admin_creates_goals() {
    let t = setup_test_app().await;
    let chatter = seed_chatter(&t.state, "10").await;

    let (status, _) = request(
        t.app.clone(),
        "POST",
        "/v1/goals",
        &chatter,
        Some(serde_json::json!({
            "goalType": "SALES",
            "target": 100,
            "year": 2026,
            "month": 3,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
