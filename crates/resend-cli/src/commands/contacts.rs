//! Contacts always live inside an audience, so every handler needs
//! `--audience-id` alongside the contact identifier.

use resend_api::models::{CreateContactRequest, UpdateContactRequest};
use serde_json::Value;

use crate::cli::{
    ContactCreateArgs, ContactIdArgs, ContactListArgs, ContactUpdateArgs, flag_pair,
};
use crate::client::{AppContext, CliResult};
use crate::commands::non_empty;

pub(crate) async fn handle_contact_create(
    ctx: &AppContext,
    args: ContactCreateArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    let request = CreateContactRequest {
        email: args.email,
        first_name: non_empty(args.first_name),
        last_name: non_empty(args.last_name),
        unsubscribed: args.unsubscribed.then_some(true),
    };
    Ok(client
        .contacts()
        .create(&args.audience_id, &request)
        .await?)
}

pub(crate) async fn handle_contact_list(
    ctx: &AppContext,
    args: ContactListArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.contacts().list(&args.audience_id).await?)
}

pub(crate) async fn handle_contact_get(ctx: &AppContext, args: ContactIdArgs) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.contacts().get(&args.audience_id, &args.id).await?)
}

pub(crate) async fn handle_contact_update(
    ctx: &AppContext,
    args: ContactUpdateArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    let request = UpdateContactRequest {
        first_name: non_empty(args.first_name),
        last_name: non_empty(args.last_name),
        unsubscribed: flag_pair(args.unsubscribed, args.no_unsubscribed),
    };
    Ok(client
        .contacts()
        .update(&args.audience_id, &args.id, &request)
        .await?)
}

pub(crate) async fn handle_contact_delete(
    ctx: &AppContext,
    args: ContactIdArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client
        .contacts()
        .remove(&args.audience_id, &args.id)
        .await?)
}
