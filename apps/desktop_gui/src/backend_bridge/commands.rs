//! Backend commands queued from UI to the backend worker.

use shared::protocol::PredictionRequest;

pub enum BackendCommand {
    LoadOptions,
    Predict { request: PredictionRequest },
}
