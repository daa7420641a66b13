//! API key handlers.

use resend_api::models::CreateApiKeyRequest;
use serde_json::Value;

use crate::cli::{ApiKeyCreateArgs, ResourceIdArgs};
use crate::client::{AppContext, CliResult};
use crate::commands::non_empty;

pub(crate) async fn handle_api_key_create(
    ctx: &AppContext,
    args: ApiKeyCreateArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    let request = CreateApiKeyRequest {
        name: args.name,
        permission: non_empty(args.permission),
        domain_id: non_empty(args.domain_id),
    };
    Ok(client.api_keys().create(&request).await?)
}

pub(crate) async fn handle_api_key_list(ctx: &AppContext) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.api_keys().list().await?)
}

pub(crate) async fn handle_api_key_delete(
    ctx: &AppContext,
    args: ResourceIdArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.api_keys().remove(&args.id).await?)
}
