use std::io::{self, Write};

use anyhow::Context as _;

use crate::client::{Client, Error};
use crate::datamodel::{TokenData, TokenDatas};
use crate::queries::QueryJob;

/// What to do with the remaining queries once one of them fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failure. Later queries are never sent.
    #[default]
    Abort,
    /// Run every query, then fail if any of them did.
    Continue,
}

pub fn write_report(out: &mut impl Write, title: &str, tokens: &[TokenData]) -> io::Result<()> {
    writeln!(out, "{title} Query Results:")?;
    for token in tokens {
        writeln!(
            out,
            "Token Name: {}, Description: {}",
            token.token_name, token.description
        )?;
        for ownership in &token.current_token_ownerships {
            writeln!(
                out,
                "  Owner Address: {}, Last Transaction: {}",
                ownership.owner_address, ownership.last_transaction_timestamp
            )?;
        }
    }
    Ok(())
}

/// Runs `jobs` one after another, printing each result to `out` as it arrives.
pub async fn run(
    http: &reqwest::Client,
    jobs: &[QueryJob],
    policy: FailurePolicy,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut printed = false;
    let mut failed = 0;

    for job in jobs {
        let tokens = match run_job(http, job).await {
            Ok(tokens) => tokens,
            Err(err) if policy == FailurePolicy::Continue => {
                let transport = err.downcast_ref::<Error>().is_some_and(Error::is_transport);
                tracing::error!(query = %job.name, transport, "{err:#}");
                failed += 1;
                continue;
            }
            Err(err) => return Err(err),
        };

        if printed {
            writeln!(out)?;
        }
        write_report(out, &job.name, &tokens)?;
        out.flush()?;
        printed = true;
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} queries failed", jobs.len());
    }
    Ok(())
}

async fn run_job(http: &reqwest::Client, job: &QueryJob) -> anyhow::Result<Vec<TokenData>> {
    tracing::info!(query = %job.name, endpoint = %job.endpoint, "running query");

    let client = Client::with_http(http.clone(), job.endpoint.clone());
    let response = client
        .execute::<TokenDatas, _>(job.query, job.variables.as_ref())
        .await
        .with_context(|| format!("error performing {} query", job.name))?;

    for error in response.errors.iter().flatten() {
        tracing::warn!(query = %job.name, "indexer reported an error: {}", error.message);
    }

    let tokens = response.data.unwrap_or_default().current_token_datas_v2;
    tracing::info!(query = %job.name, tokens = tokens.len(), "query finished");
    Ok(tokens)
}
