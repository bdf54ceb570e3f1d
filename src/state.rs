use std::sync::Arc;

use crate::config::Config;
use crate::entity::Entity;
use crate::gateway::RecordGateway;
use crate::service::EntityService;
use crate::view::{ListView, Listing};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,
    /// Record gateway over the configured backend
    pub gateway: RecordGateway,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config, gateway: RecordGateway) -> Self {
        Self {
            config: Arc::new(config),
            gateway,
        }
    }

    pub fn service<E: Entity>(&self) -> EntityService<E> {
        EntityService::new(self.gateway.clone())
    }

    /// A freshly loaded list view
    pub async fn view<E: Listing>(&self) -> ListView<E> {
        let mut view = ListView::new(self.gateway.clone());
        view.load().await;
        view
    }

    /// Identity recorded on approve/reject
    pub fn approver(&self) -> &str {
        &self.config.approver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Employee;
    use crate::gateway::memory::MemoryTransport;
    use crate::view::LoadState;

    #[tokio::test]
    async fn test_state_builds_loaded_views() {
        let state = AppState::new(
            Config::default(),
            RecordGateway::new(Arc::new(MemoryTransport::new())),
        );
        assert_eq!(state.approver(), "HR Admin");
        let view = state.view::<Employee>().await;
        assert_eq!(view.state(), &LoadState::Ready);
        let staff = tokio_test::assert_ok!(state.service::<Employee>().try_get_all().await);
        assert!(staff.is_empty());
    }
}
