//! Domain handlers, including verification and tracking settings.

use resend_api::models::{CreateDomainRequest, UpdateDomainRequest};
use serde_json::Value;

use crate::cli::{DomainCreateArgs, DomainUpdateArgs, ResourceIdArgs, flag_pair};
use crate::client::{AppContext, CliResult};
use crate::commands::non_empty;

pub(crate) async fn handle_domain_create(
    ctx: &AppContext,
    args: DomainCreateArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    let request = CreateDomainRequest {
        name: args.name,
        region: non_empty(args.region),
        open_tracking: args.open_tracking.then_some(true),
        click_tracking: args.click_tracking.then_some(true),
        tls: non_empty(args.tls),
    };
    Ok(client.domains().create(&request).await?)
}

pub(crate) async fn handle_domain_list(ctx: &AppContext) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.domains().list().await?)
}

pub(crate) async fn handle_domain_get(ctx: &AppContext, args: ResourceIdArgs) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.domains().get(&args.id).await?)
}

pub(crate) async fn handle_domain_update(
    ctx: &AppContext,
    args: DomainUpdateArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    let request = UpdateDomainRequest {
        open_tracking: flag_pair(args.open_tracking, args.no_open_tracking),
        click_tracking: flag_pair(args.click_tracking, args.no_click_tracking),
        tls: non_empty(args.tls),
    };
    Ok(client.domains().update(&args.id, &request).await?)
}

pub(crate) async fn handle_domain_delete(
    ctx: &AppContext,
    args: ResourceIdArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.domains().remove(&args.id).await?)
}

pub(crate) async fn handle_domain_verify(
    ctx: &AppContext,
    args: ResourceIdArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.domains().verify(&args.id).await?)
}
