pub mod calculation;
pub mod responses;

pub use calculation::{
    CalculationError, CalculationInput, CalculationRequest, CalculationResponse, Operation,
};
pub use responses::{GreetingResponse, HealthResponse, ProcessResponse};
