use std::sync::Arc;

use testimonials_infra::{InMemoryTestimonialService, TestimonialService};

use crate::config::StoreConfig;

/// Collaborators shared by every request.
#[derive(Clone)]
pub struct AppServices {
    pub testimonials: Arc<dyn TestimonialService>,
}

impl AppServices {
    pub fn new(testimonials: Arc<dyn TestimonialService>) -> Self {
        Self { testimonials }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTestimonialService::new()))
    }
}

pub async fn build_services(store: &StoreConfig) -> anyhow::Result<AppServices> {
    if let StoreConfig::Postgres { database_url } = store {
        #[cfg(feature = "postgres")]
        {
            let service = testimonials_infra::PostgresTestimonialService::connect(database_url).await?;
            service.ensure_schema().await?;
            tracing::info!("using postgres testimonial store");
            return Ok(AppServices::new(Arc::new(service)));
        }
        #[cfg(not(feature = "postgres"))]
        {
            let _ = database_url;
            tracing::warn!(
                "USE_PERSISTENT_STORES=true but postgres feature not enabled, falling back to in-memory"
            );
        }
    }

    tracing::info!("using in-memory testimonial store");
    Ok(AppServices::in_memory())
}
