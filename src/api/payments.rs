use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::users::parse_money_field;
use crate::api::AppState;
use crate::db::repo::SaleFilter;
use crate::domain::{Money, Payment, PaymentMethod, TimeMs, UserId};
use crate::engine;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub user_id: String,
    pub amount: f64,
    /// Defaults to now.
    pub payment_date: Option<i64>,
    pub payment_method: String,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: String,
    pub user_id: String,
    pub amount: String,
    pub payment_date: i64,
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl PaymentDto {
    fn from_payment(payment: &Payment) -> Self {
        PaymentDto {
            id: payment.id.clone(),
            user_id: payment.user_id.to_string(),
            amount: payment.amount.to_display_string(),
            payment_date: payment.payment_date.as_i64(),
            payment_method: payment.payment_method.as_str().to_string(),
            note: payment.note.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountOwedDto {
    pub user_id: String,
    pub total_retribution: String,
    pub total_paid: String,
    pub amount_owed: String,
}

pub async fn create_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreatePaymentRequest>,
) -> Result<Json<PaymentDto>, AppError> {
    let actor = state.resolve_actor(&headers).await?;
    actor.require_admin()?;

    let user_id = UserId::new(body.user_id);
    state
        .repo
        .get_user(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", user_id)))?;

    let amount = parse_money_field("amount", body.amount)?;
    if !amount.is_positive() {
        return Err(AppError::Validation("amount must be positive".to_string()));
    }
    let payment_method = PaymentMethod::parse(&body.payment_method).ok_or_else(|| {
        AppError::Validation(format!("unknown payment method {}", body.payment_method))
    })?;

    let payment = Payment::new(
        user_id,
        amount,
        body.payment_date.map(TimeMs::new).unwrap_or_else(TimeMs::now),
        payment_method,
        body.note,
    );
    state.repo.insert_payment(&payment).await?;

    tracing::info!(payment_id = %payment.id, user_id = %payment.user_id, "payment recorded");
    Ok(Json(PaymentDto::from_payment(&payment)))
}

pub async fn list_payments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<PaymentsQuery>,
) -> Result<Json<Vec<PaymentDto>>, AppError> {
    let actor = state.resolve_actor(&headers).await?;
    let user_id = UserId::new(params.user_id);

    if !actor.capabilities.can_view_team() && actor.id() != &user_id {
        return Err(AppError::Forbidden(
            "cannot view another user's payments".to_string(),
        ));
    }

    let payments = state.repo.list_payments(&user_id).await?;
    Ok(Json(payments.iter().map(PaymentDto::from_payment).collect()))
}

/// Amount owed = everything earned to date minus everything paid out.
///
/// Earnings-to-date are commission and base over every recorded sale plus
/// the fixed salary once per month in which the user recorded any sale.
pub async fn get_amount_owed(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<AmountOwedDto>, AppError> {
    let actor = state.resolve_actor(&headers).await?;
    let user_id = UserId::new(id);

    if !actor.capabilities.can_view_team() && actor.id() != &user_id {
        return Err(AppError::Forbidden(
            "cannot view another user's balance".to_string(),
        ));
    }

    let user = state
        .repo
        .get_user(&user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", user_id)))?;

    let all_sales = state
        .repo
        .query_sales(&SaleFilter {
            user_id: Some(user_id.clone()),
            ..Default::default()
        })
        .await?;

    let earnings = engine::compute_user_earnings(&user, &all_sales);

    // The salary line in compute_user_earnings is per-period; scale it by
    // the number of months the user actually worked.
    let salary_months = state.repo.count_active_sale_months(&user_id).await?;
    let salary_total = user.fixed_salary.unwrap_or_else(Money::zero)
        * Money::from_u32(salary_months.max(0) as u32);
    let total_retribution = earnings.commission + earnings.base_earnings + salary_total;

    let total_paid = state.repo.sum_payments(&user_id).await?;
    let amount_owed = total_retribution - total_paid;

    Ok(Json(AmountOwedDto {
        user_id: user_id.to_string(),
        total_retribution: total_retribution.to_display_string(),
        total_paid: total_paid.to_display_string(),
        amount_owed: amount_owed.to_display_string(),
    }))
}
