//! HTTP adapter for decision endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    DecideRequest, DecideResponse, DecisionRecordResponse, ErrorResponse, HistoryResponse,
    MenuResponse, RestaurantResponse, TodayResponse,
};
pub use handlers::DecisionHandlers;
pub use routes::decision_routes;
