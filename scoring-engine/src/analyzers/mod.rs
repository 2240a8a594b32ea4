//! One analyzer per scoring dimension.
//!
//! Analyzers are total over any input: they never fail and never read state
//! beyond the normalized text, the keyword tables and, where a dimension
//! depends on another, the earlier analyzer's output.

mod business;
mod competition;
mod cost;
mod deployment;
mod market;
mod mvp;
mod tech;
mod users;

pub use business::{analyze_business, business_value};
pub use competition::{analyze_competition, competition_from_score};
pub use cost::analyze_cost;
pub use deployment::analyze_deployment;
pub use market::{analyze_market, market_from_score};
pub use mvp::analyze_mvp;
pub use tech::{analyze_tech, level_for, stack_for};
pub use users::{analyze_users, UserAnalysis};
