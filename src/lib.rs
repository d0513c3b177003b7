pub mod api;
pub mod config;
pub mod errors;
pub mod metrics_defs;
pub mod translate;
pub mod upstream;
pub mod validate;

#[cfg(test)]
mod testutils;

#[derive(thiserror::Error, Debug)]
pub enum GatewayError {
    #[error("could not build upstream client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Serve(#[from] api::ApiServeError),
}

pub async fn run(config: config::Config) -> Result<(), GatewayError> {
    let client = upstream::UpstreamClient::new(&config.upstream)?;
    let state = api::AppState {
        client,
        category_validation: config.category_validation,
    };

    api::serve(&config.listener, state).await?;
    Ok(())
}
