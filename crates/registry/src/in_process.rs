use std::sync::Arc;

use async_trait::async_trait;
use genrerows_core::section::{GenreSection, HomeSection};
use genrerows_core::section_table::SectionRegistry;

use crate::registrar::{RegistrationError, SectionRegistrar};

/// Registers sections by calling the registry directly.
///
/// The registry is optional: when it is not installed every registration
/// reports [`RegistrationError::Unavailable`].
pub struct InProcessRegistrar {
    registry: Option<Arc<dyn SectionRegistry>>,
}

impl InProcessRegistrar {
    pub fn new(registry: Option<Arc<dyn SectionRegistry>>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl SectionRegistrar for InProcessRegistrar {
    fn strategy(&self) -> &'static str {
        "in-process"
    }

    async fn register_section(&self, section: &GenreSection) -> Result<(), RegistrationError> {
        let registry = self.registry.as_ref().ok_or_else(|| {
            RegistrationError::Unavailable("no in-process section registry is installed".into())
        })?;
        let section: Arc<dyn HomeSection> = Arc::new(section.clone());
        registry.register(section).await;
        Ok(())
    }
}
