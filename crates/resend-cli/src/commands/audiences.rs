//! Audience handlers.

use resend_api::models::CreateAudienceRequest;
use serde_json::Value;

use crate::cli::{AudienceCreateArgs, ResourceIdArgs};
use crate::client::{AppContext, CliResult};

pub(crate) async fn handle_audience_create(
    ctx: &AppContext,
    args: AudienceCreateArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    let request = CreateAudienceRequest { name: args.name };
    Ok(client.audiences().create(&request).await?)
}

pub(crate) async fn handle_audience_list(ctx: &AppContext) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.audiences().list().await?)
}

pub(crate) async fn handle_audience_get(
    ctx: &AppContext,
    args: ResourceIdArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.audiences().get(&args.id).await?)
}

pub(crate) async fn handle_audience_delete(
    ctx: &AppContext,
    args: ResourceIdArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.audiences().remove(&args.id).await?)
}
