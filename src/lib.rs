pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;

pub use auth::{Actor, Capabilities};
pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{
    CompensationType, Creator, CreatorId, CustomCost, Goal, GoalScope, GoalType, Money,
    MonthlyFinancial, Payment, PaymentMethod, Period, Role, Sale, SaleStatus, SaleType, TimeMs,
    User, UserId,
};
pub use error::AppError;
