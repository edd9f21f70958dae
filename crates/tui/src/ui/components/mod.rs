pub mod card;
pub mod chart;
pub mod money;
pub mod pie;
pub mod status;
