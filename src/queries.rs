use anyhow::Context as _;
use reqwest::Url;
use serde_json::json;

use crate::client::Variables;

const APTOS_TESTNET_STAGING: &str = "https://indexer-testnet.staging.gcp.aptosdev.com/v1/graphql";
const APTOS_MAINNET: &str = "https://indexer.mainnet.aptoslabs.com/v1/graphql";

/// One query to run against one indexer, and the title its report is printed under.
#[derive(Debug, Clone)]
pub struct QueryJob {
    pub name: String,
    pub endpoint: Url,
    pub query: &'static str,
    pub variables: Option<Variables>,
}

impl QueryJob {
    pub fn new(name: impl Into<String>, endpoint: &str, query: &'static str) -> anyhow::Result<Self> {
        let name = name.into();
        let endpoint = endpoint
            .parse()
            .with_context(|| format!("invalid endpoint for `{name}` query: {endpoint}"))?;

        Ok(Self {
            name,
            endpoint,
            query,
            variables: None,
        })
    }

    pub fn with_variables(mut self, variables: Variables) -> Self {
        self.variables = Some(variables);
        self
    }
}

/// The queries this tool reports on, in the order they run.
pub fn catalogue() -> anyhow::Result<Vec<QueryJob>> {
    let mut beta_test_variables = Variables::new();
    beta_test_variables.insert("_lt".into(), json!("2024-01-16T00:00:00.000000"));

    Ok(vec![
        QueryJob::new(
            "Beta Test",
            APTOS_TESTNET_STAGING,
            include_str!("../queries/beta_test.graphql"),
        )?
        .with_variables(beta_test_variables),
        QueryJob::new(
            "Erebrus NFT",
            APTOS_MAINNET,
            include_str!("../queries/erebrus_nft.graphql"),
        )?,
    ])
}

/// Keeps the jobs named in `names`, in catalogue order. An empty filter keeps everything.
pub fn select(jobs: Vec<QueryJob>, names: &[String]) -> anyhow::Result<Vec<QueryJob>> {
    if names.is_empty() {
        return Ok(jobs);
    }

    if let Some(unknown) = names.iter().find(|n| !jobs.iter().any(|j| &j.name == *n)) {
        let known: Vec<_> = jobs.iter().map(|j| j.name.as_str()).collect();
        anyhow::bail!("unknown query `{unknown}`, expected one of: {}", known.join(", "));
    }

    Ok(jobs.into_iter().filter(|j| names.contains(&j.name)).collect())
}
