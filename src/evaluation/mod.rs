//! The viability evaluation pipeline
//!
//! Stages run strictly in order: trailing-window selection, sales
//! aggregation, comodato cost totalization, volume-proportional allocation,
//! commission feedback, per-line margin cascade, viability decision. Each
//! stage produces new values from the previous one; nothing is mutated
//! across stages and nothing is retained between evaluations.

mod aggregate;
mod comodato;
mod engine;
mod result;
mod window;

pub use aggregate::{aggregate_sales, ProductAggregate, SalesAggregation};
pub use comodato::{contract_charges, total_monthly_cost, ContractCharge};
pub use engine::{effective_commission_rate, EvaluationEngine, EvaluationInput};
pub use result::{round_currency, ClientEvaluation, ProductLineResult};
pub use window::TrailingWindow;
