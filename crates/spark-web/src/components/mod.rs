//! Reusable markup components.

pub mod card;
pub mod kpi;

pub use card::{Card, CardAction, CardPart, CardSize, CardVariant, ACTIVATION_KEYS};
pub use kpi::{KpiCard, Trend};
