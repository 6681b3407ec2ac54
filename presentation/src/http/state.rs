use remedy_application::{
    GatewayRegistry, GenerateRemedyUseCase, ManageAccountsUseCase, ManageHouseholdUseCase,
};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<ManageAccountsUseCase>,
    pub household: Arc<ManageHouseholdUseCase>,
    pub remedies: Arc<GenerateRemedyUseCase>,
    pub providers: Arc<dyn GatewayRegistry>,
}
