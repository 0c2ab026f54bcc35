//! Application state shared across handlers

use crate::config::Settings;
use crate::network::HttpClient;
use crate::providers::{ArXiv, Google, Provider, YouTube};
use crate::search::Aggregator;
use crate::votes::VoteStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Vote tally store
    pub votes: Arc<VoteStore>,
    /// arXiv listing client
    pub papers: Arc<ArXiv>,
    /// YouTube + Google aggregation
    pub search: Arc<Aggregator>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create application state, building every provider from `settings`
    pub fn new(
        settings: Settings,
        votes: Arc<VoteStore>,
        client: HttpClient,
    ) -> anyhow::Result<Self> {
        let youtube: Arc<dyn Provider> =
            Arc::new(YouTube::new(client.clone(), &settings.providers));
        let google: Arc<dyn Provider> = Arc::new(Google::new(client.clone(), &settings.providers));
        let papers = ArXiv::new(client, &settings.papers);

        Self::with_components(settings, votes, papers, Aggregator::new(youtube, google))
    }

    /// Create application state from prebuilt components
    pub fn with_components(
        settings: Settings,
        votes: Arc<VoteStore>,
        papers: ArXiv,
        search: Aggregator,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            settings: Arc::new(settings),
            votes,
            papers: Arc::new(papers),
            search: Arc::new(search),
            templates: Arc::new(super::Templates::new()?),
        })
    }

    /// Get instance name
    pub fn instance_name(&self) -> &str {
        &self.settings.general.instance_name
    }
}
