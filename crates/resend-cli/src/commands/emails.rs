//! Email handlers: single send, batch send, lookup, reschedule and cancel.

use anyhow::{Context, anyhow};
use resend_api::models::{SendEmailRequest, Tag, UpdateEmailRequest};
use serde_json::Value;

use crate::cli::{EmailSendArgs, EmailSendBatchArgs, EmailUpdateArgs, ResourceIdArgs};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::{non_empty, non_empty_list};

pub(crate) async fn handle_email_send(ctx: &AppContext, args: EmailSendArgs) -> CliResult<Value> {
    let client = ctx.client()?;
    let idempotency_key = non_empty(args.idempotency_key.clone());
    let request = build_send_request(args)?;

    Ok(client
        .emails()
        .send(&request, idempotency_key.as_deref())
        .await?)
}

pub(crate) async fn handle_email_send_batch(
    ctx: &AppContext,
    args: EmailSendBatchArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;

    let payload = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))
        .map_err(CliError::failure)?;

    let parsed: Value = serde_json::from_str(&payload)
        .map_err(|err| CliError::failure(anyhow!("batch file is not valid JSON: {err}")))?;

    let Value::Array(emails) = parsed else {
        return Err(CliError::validation(
            "Batch file must contain a JSON array of emails",
        ));
    };

    tracing::debug!(count = emails.len(), "sending email batch");
    Ok(client.emails().send_batch(&emails).await?)
}

pub(crate) async fn handle_email_get(ctx: &AppContext, args: ResourceIdArgs) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.emails().get(&args.id).await?)
}

pub(crate) async fn handle_email_update(
    ctx: &AppContext,
    args: EmailUpdateArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    let request = UpdateEmailRequest {
        scheduled_at: args.scheduled_at,
    };
    Ok(client.emails().update(&args.id, &request).await?)
}

pub(crate) async fn handle_email_cancel(
    ctx: &AppContext,
    args: ResourceIdArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.emails().cancel(&args.id).await?)
}

fn build_send_request(args: EmailSendArgs) -> CliResult<SendEmailRequest> {
    let tags = args
        .tags
        .iter()
        .map(|raw| parse_tag(raw))
        .collect::<CliResult<Vec<_>>>()?;

    Ok(SendEmailRequest {
        from: args.from,
        to: args.to,
        subject: args.subject,
        html: non_empty(args.html),
        text: non_empty(args.text),
        cc: non_empty_list(args.cc),
        bcc: non_empty_list(args.bcc),
        reply_to: non_empty_list(args.reply_to),
        scheduled_at: non_empty(args.scheduled_at),
        tags: (!tags.is_empty()).then_some(tags),
    })
}

/// Split `key=value` on the first `=`.
fn parse_tag(raw: &str) -> CliResult<Tag> {
    let (name, value) = raw.split_once('=').ok_or_else(|| {
        CliError::validation(format!(
            "Invalid tag format: \"{raw}\". Expected key=value"
        ))
    })?;
    Ok(Tag {
        name: name.to_string(),
        value: value.to_string(),
    })
}
