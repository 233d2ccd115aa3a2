use crate::cli::render::{render, RenderOptions};
use crate::cli::Cli;
use crate::core::errors::BgwError;
use crate::core::kernel::RestClient;
use crate::exchanges::bgw::rest::BgwRestClient;
use std::io::Write;
use tracing::{debug, instrument};

/// Run one CLI invocation: validate, send a single request, render.
///
/// Input errors return before any request is made. `BgwError::NotFound`
/// means a single-entity lookup came back empty and the process should exit
/// non-zero.
#[instrument(skip_all, fields(json = cli.json))]
pub async fn run<R: RestClient, W: Write>(
    cli: &Cli,
    client: &BgwRestClient<R>,
    out: &mut W,
) -> Result<(), BgwError> {
    let request = cli.command.to_request()?;
    debug!(operation = %request.operation(), "dispatching");

    let result = client.execute(&request).await?;

    let options = RenderOptions {
        raw_json: cli.json,
        limit: cli.command.row_limit(),
    };
    render(&request, &result, &options, out)?;
    out.flush()?;
    Ok(())
}
