use ferrous_ptr_application::ports::ResolverHandle;
use ferrous_ptr_application::use_cases::BulkLookupUseCase;
use ferrous_ptr_domain::Config;
use tracing::info;

pub struct LookupServices {
    pub resolver: ResolverHandle,
    pub bulk_lookup: BulkLookupUseCase,
}

impl LookupServices {
    pub fn new(config: &Config) -> Self {
        let resolver = ferrous_ptr_infrastructure::bind(&config.resolver);

        info!(
            wait_ms = config.dispatch.wait_ms,
            max_in_flight = ?config.dispatch.max_in_flight,
            "Initializing bulk lookup"
        );

        let bulk_lookup = BulkLookupUseCase::new(resolver.clone(), config.dispatch.clone());

        Self {
            resolver,
            bulk_lookup,
        }
    }
}
