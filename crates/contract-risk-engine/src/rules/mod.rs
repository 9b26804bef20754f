pub mod fair_practice;
pub mod statutory;
