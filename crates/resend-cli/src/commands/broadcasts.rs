//! Broadcast handlers: drafting, editing, sending and removal.

use resend_api::models::{CreateBroadcastRequest, SendBroadcastRequest, UpdateBroadcastRequest};
use serde_json::Value;

use crate::cli::{BroadcastCreateArgs, BroadcastSendArgs, BroadcastUpdateArgs, ResourceIdArgs};
use crate::client::{AppContext, CliResult};
use crate::commands::non_empty;

pub(crate) async fn handle_broadcast_create(
    ctx: &AppContext,
    args: BroadcastCreateArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    let request = CreateBroadcastRequest {
        audience_id: args.audience_id,
        from: args.from,
        subject: args.subject,
        html: non_empty(args.html),
        text: non_empty(args.text),
        name: non_empty(args.name),
    };
    Ok(client.broadcasts().create(&request).await?)
}

pub(crate) async fn handle_broadcast_list(ctx: &AppContext) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.broadcasts().list().await?)
}

pub(crate) async fn handle_broadcast_get(
    ctx: &AppContext,
    args: ResourceIdArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.broadcasts().get(&args.id).await?)
}

pub(crate) async fn handle_broadcast_update(
    ctx: &AppContext,
    args: BroadcastUpdateArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    let request = UpdateBroadcastRequest {
        from: non_empty(args.from),
        subject: non_empty(args.subject),
        html: non_empty(args.html),
        text: non_empty(args.text),
        name: non_empty(args.name),
    };
    Ok(client.broadcasts().update(&args.id, &request).await?)
}

pub(crate) async fn handle_broadcast_send(
    ctx: &AppContext,
    args: BroadcastSendArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    let request = SendBroadcastRequest {
        scheduled_at: non_empty(args.scheduled_at),
    };
    Ok(client.broadcasts().send(&args.id, &request).await?)
}

pub(crate) async fn handle_broadcast_delete(
    ctx: &AppContext,
    args: ResourceIdArgs,
) -> CliResult<Value> {
    let client = ctx.client()?;
    Ok(client.broadcasts().remove(&args.id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context_with_key;
    use anyhow::{Result, anyhow};
    use httpmock::prelude::*;
    use serde_json::json;

    fn broadcast_id() -> ResourceIdArgs {
        ResourceIdArgs { id: "bc_1".into() }
    }

    #[tokio::test]
    async fn create_posts_audience_and_content() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/broadcasts").json_body(json!({
                "audience_id": "aud_1",
                "from": "news@example.com",
                "subject": "March update",
                "html": "<h1>News</h1>",
                "name": "march"
            }));
            then.status(200).json_body(json!({"id": "bc_1"}));
        });

        let ctx = context_with_key(&server)?;
        let data = handle_broadcast_create(
            &ctx,
            BroadcastCreateArgs {
                audience_id: "aud_1".into(),
                from: "news@example.com".into(),
                subject: "March update".into(),
                html: Some("<h1>News</h1>".into()),
                text: None,
                name: Some("march".into()),
            },
        )
        .await
        .map_err(|err| anyhow!(err.to_string()))?;
        mock.assert();
        assert_eq!(data["id"], "bc_1");
        Ok(())
    }

    #[tokio::test]
    async fn update_patches_only_given_fields() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/broadcasts/bc_1")
                .json_body(json!({"subject": "April update"}));
            then.status(200).json_body(json!({"id": "bc_1"}));
        });

        let ctx = context_with_key(&server)?;
        handle_broadcast_update(
            &ctx,
            BroadcastUpdateArgs {
                id: "bc_1".into(),
                subject: Some("April update".into()),
                ..BroadcastUpdateArgs::default()
            },
        )
        .await
        .map_err(|err| anyhow!(err.to_string()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn update_ignores_empty_strings() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/broadcasts/bc_1")
                .json_body(json!({"name": "april"}));
            then.status(200).json_body(json!({"id": "bc_1"}));
        });

        let ctx = context_with_key(&server)?;
        handle_broadcast_update(
            &ctx,
            BroadcastUpdateArgs {
                id: "bc_1".into(),
                html: Some(String::new()),
                subject: Some(String::new()),
                name: Some("april".into()),
                ..BroadcastUpdateArgs::default()
            },
        )
        .await
        .map_err(|err| anyhow!(err.to_string()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn send_without_schedule_posts_empty_object() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/broadcasts/bc_1/send")
                .json_body(json!({}));
            then.status(200).json_body(json!({"id": "bc_1"}));
        });

        let ctx = context_with_key(&server)?;
        handle_broadcast_send(
            &ctx,
            BroadcastSendArgs {
                id: "bc_1".into(),
                scheduled_at: None,
            },
        )
        .await
        .map_err(|err| anyhow!(err.to_string()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn send_forwards_schedule() -> Result<()> {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/broadcasts/bc_1/send")
                .json_body(json!({"scheduled_at": "in 1 hour"}));
            then.status(200).json_body(json!({"id": "bc_1"}));
        });

        let ctx = context_with_key(&server)?;
        handle_broadcast_send(
            &ctx,
            BroadcastSendArgs {
                id: "bc_1".into(),
                scheduled_at: Some("in 1 hour".into()),
            },
        )
        .await
        .map_err(|err| anyhow!(err.to_string()))?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn list_get_and_delete_hit_their_endpoints() -> Result<()> {
        let server = MockServer::start_async().await;
        let list = server.mock(|when, then| {
            when.method(GET).path("/broadcasts");
            then.status(200).json_body(json!({"data": []}));
        });
        let get = server.mock(|when, then| {
            when.method(GET).path("/broadcasts/bc_1");
            then.status(200).json_body(json!({"id": "bc_1", "status": "draft"}));
        });
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/broadcasts/bc_1");
            then.status(200).json_body(json!({"id": "bc_1", "deleted": true}));
        });

        let ctx = context_with_key(&server)?;
        handle_broadcast_list(&ctx)
            .await
            .map_err(|err| anyhow!(err.to_string()))?;
        let fetched = handle_broadcast_get(&ctx, broadcast_id())
            .await
            .map_err(|err| anyhow!(err.to_string()))?;
        assert_eq!(fetched["status"], "draft");
        handle_broadcast_delete(&ctx, broadcast_id())
            .await
            .map_err(|err| anyhow!(err.to_string()))?;

        list.assert();
        get.assert();
        delete.assert();
        Ok(())
    }
}
