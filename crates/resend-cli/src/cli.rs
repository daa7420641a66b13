//! Argument parsing, command dispatch, and the top-level runner.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use resend_api::DEFAULT_BASE_URL;
use serde_json::Value;
use url::Url;

use crate::auth::KeySources;
use crate::client::{AppContext, CliResult, parse_url};
use crate::commands::api_keys::{handle_api_key_create, handle_api_key_delete, handle_api_key_list};
use crate::commands::audiences::{
    handle_audience_create, handle_audience_delete, handle_audience_get, handle_audience_list,
};
use crate::commands::broadcasts::{
    handle_broadcast_create, handle_broadcast_delete, handle_broadcast_get, handle_broadcast_list,
    handle_broadcast_send, handle_broadcast_update,
};
use crate::commands::contacts::{
    handle_contact_create, handle_contact_delete, handle_contact_get, handle_contact_list,
    handle_contact_update,
};
use crate::commands::domains::{
    handle_domain_create, handle_domain_delete, handle_domain_get, handle_domain_list,
    handle_domain_update, handle_domain_verify,
};
use crate::commands::emails::{
    handle_email_cancel, handle_email_get, handle_email_send, handle_email_send_batch,
    handle_email_update,
};
use crate::logging::init_logging;
use crate::output::Envelope;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MISSING_SUBCOMMAND: &str = "a subcommand is required";

/// Parses CLI arguments, executes the requested command, and prints exactly
/// one result envelope. Returns the process exit code.
pub async fn run() -> ExitCode {
    init_logging();

    let envelope = match Cli::try_parse() {
        Ok(cli) => execute(cli, KeySources::from_process()).await,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            if let Err(io_err) = err.print() {
                tracing::warn!(error = %io_err, "failed to print help");
            }
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            if err.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                && let Err(io_err) = err.print()
            {
                tracing::warn!(error = %io_err, "failed to print help");
            }
            usage_envelope(&err)
        }
    };

    println!("{}", envelope.render());
    ExitCode::from(envelope.exit_code())
}

/// Run a parsed invocation against the given credential sources.
pub(crate) async fn execute(cli: Cli, key_sources: KeySources) -> Envelope {
    let command_name = command_label(&cli.command);
    let ctx = AppContext {
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout),
        api_key: cli.api_key,
        key_sources,
    };

    match dispatch(&ctx, cli.command).await {
        Ok(data) => {
            tracing::debug!(command = command_name, "command succeeded");
            Envelope::success(data)
        }
        Err(err) => {
            tracing::debug!(command = command_name, error = %err, "command failed");
            err.into_envelope()
        }
    }
}

async fn dispatch(ctx: &AppContext, command: Command) -> CliResult<Value> {
    match command {
        Command::Emails(emails) => match emails {
            EmailsCommand::Send(args) => handle_email_send(ctx, args).await,
            EmailsCommand::SendBatch(args) => handle_email_send_batch(ctx, args).await,
            EmailsCommand::Get(args) => handle_email_get(ctx, args).await,
            EmailsCommand::Update(args) => handle_email_update(ctx, args).await,
            EmailsCommand::Cancel(args) => handle_email_cancel(ctx, args).await,
        },
        Command::Domains(domains) => match domains {
            DomainsCommand::Create(args) => handle_domain_create(ctx, args).await,
            DomainsCommand::List => handle_domain_list(ctx).await,
            DomainsCommand::Get(args) => handle_domain_get(ctx, args).await,
            DomainsCommand::Update(args) => handle_domain_update(ctx, args).await,
            DomainsCommand::Delete(args) => handle_domain_delete(ctx, args).await,
            DomainsCommand::Verify(args) => handle_domain_verify(ctx, args).await,
        },
        Command::ApiKeys(api_keys) => match api_keys {
            ApiKeysCommand::Create(args) => handle_api_key_create(ctx, args).await,
            ApiKeysCommand::List => handle_api_key_list(ctx).await,
            ApiKeysCommand::Delete(args) => handle_api_key_delete(ctx, args).await,
        },
        Command::Audiences(audiences) => match audiences {
            AudiencesCommand::Create(args) => handle_audience_create(ctx, args).await,
            AudiencesCommand::List => handle_audience_list(ctx).await,
            AudiencesCommand::Get(args) => handle_audience_get(ctx, args).await,
            AudiencesCommand::Delete(args) => handle_audience_delete(ctx, args).await,
        },
        Command::Contacts(contacts) => match contacts {
            ContactsCommand::Create(args) => handle_contact_create(ctx, args).await,
            ContactsCommand::List(args) => handle_contact_list(ctx, args).await,
            ContactsCommand::Get(args) => handle_contact_get(ctx, args).await,
            ContactsCommand::Update(args) => handle_contact_update(ctx, args).await,
            ContactsCommand::Delete(args) => handle_contact_delete(ctx, args).await,
        },
        Command::Broadcasts(broadcasts) => match broadcasts {
            BroadcastsCommand::Create(args) => handle_broadcast_create(ctx, args).await,
            BroadcastsCommand::List => handle_broadcast_list(ctx).await,
            BroadcastsCommand::Get(args) => handle_broadcast_get(ctx, args).await,
            BroadcastsCommand::Update(args) => handle_broadcast_update(ctx, args).await,
            BroadcastsCommand::Send(args) => handle_broadcast_send(ctx, args).await,
            BroadcastsCommand::Delete(args) => handle_broadcast_delete(ctx, args).await,
        },
    }
}

#[derive(Parser, Debug)]
#[command(name = "resend", about = "CLI for the Resend email API", version)]
pub(crate) struct Cli {
    #[arg(long, global = true, value_name = "KEY", help = "Resend API key")]
    pub(crate) api_key: Option<String>,
    #[arg(
        long,
        global = true,
        env = "RESEND_BASE_URL",
        value_parser = parse_url,
        default_value = DEFAULT_BASE_URL,
        help = "Base URL of the Resend API"
    )]
    pub(crate) base_url: Url,
    #[arg(
        long,
        global = true,
        env = "RESEND_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Per-request timeout in seconds"
    )]
    pub(crate) timeout: u64,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    #[command(subcommand, about = "Manage emails")]
    Emails(EmailsCommand),
    #[command(subcommand, about = "Manage domains")]
    Domains(DomainsCommand),
    #[command(subcommand, about = "Manage API keys")]
    ApiKeys(ApiKeysCommand),
    #[command(subcommand, about = "Manage audiences")]
    Audiences(AudiencesCommand),
    #[command(subcommand, about = "Manage contacts")]
    Contacts(ContactsCommand),
    #[command(subcommand, about = "Manage broadcasts")]
    Broadcasts(BroadcastsCommand),
}

#[derive(Subcommand, Debug)]
pub(crate) enum EmailsCommand {
    #[command(about = "Send an email")]
    Send(EmailSendArgs),
    #[command(about = "Send a batch of emails")]
    SendBatch(EmailSendBatchArgs),
    #[command(about = "Get email details")]
    Get(ResourceIdArgs),
    #[command(about = "Update a scheduled email")]
    Update(EmailUpdateArgs),
    #[command(about = "Cancel a scheduled email")]
    Cancel(ResourceIdArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum DomainsCommand {
    #[command(about = "Add a new domain")]
    Create(DomainCreateArgs),
    #[command(about = "List all domains")]
    List,
    #[command(about = "Get domain details")]
    Get(ResourceIdArgs),
    #[command(about = "Update domain settings")]
    Update(DomainUpdateArgs),
    #[command(about = "Delete a domain")]
    Delete(ResourceIdArgs),
    #[command(about = "Verify a domain")]
    Verify(ResourceIdArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum ApiKeysCommand {
    #[command(about = "Create a new API key")]
    Create(ApiKeyCreateArgs),
    #[command(about = "List all API keys")]
    List,
    #[command(about = "Delete an API key")]
    Delete(ResourceIdArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum AudiencesCommand {
    #[command(about = "Create a new audience")]
    Create(AudienceCreateArgs),
    #[command(about = "List all audiences")]
    List,
    #[command(about = "Get audience details")]
    Get(ResourceIdArgs),
    #[command(about = "Delete an audience")]
    Delete(ResourceIdArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum ContactsCommand {
    #[command(about = "Create a new contact")]
    Create(ContactCreateArgs),
    #[command(about = "List contacts in an audience")]
    List(ContactListArgs),
    #[command(about = "Get contact details")]
    Get(ContactIdArgs),
    #[command(about = "Update a contact")]
    Update(ContactUpdateArgs),
    #[command(about = "Delete a contact")]
    Delete(ContactIdArgs),
}

#[derive(Subcommand, Debug)]
pub(crate) enum BroadcastsCommand {
    #[command(about = "Create a new broadcast")]
    Create(BroadcastCreateArgs),
    #[command(about = "List all broadcasts")]
    List,
    #[command(about = "Get broadcast details")]
    Get(ResourceIdArgs),
    #[command(about = "Update a broadcast")]
    Update(BroadcastUpdateArgs),
    #[command(about = "Send a broadcast")]
    Send(BroadcastSendArgs),
    #[command(about = "Delete a broadcast")]
    Delete(ResourceIdArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ResourceIdArgs {
    #[arg(help = "Resource identifier")]
    pub(crate) id: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct EmailSendArgs {
    #[arg(long, help = "Sender email address")]
    pub(crate) from: String,
    #[arg(long, required = true, num_args = 1.., help = "Recipient email address(es)")]
    pub(crate) to: Vec<String>,
    #[arg(long, help = "Email subject")]
    pub(crate) subject: String,
    #[arg(long, help = "HTML body")]
    pub(crate) html: Option<String>,
    #[arg(long, help = "Plain text body")]
    pub(crate) text: Option<String>,
    #[arg(long, num_args = 1.., help = "CC recipients")]
    pub(crate) cc: Vec<String>,
    #[arg(long, num_args = 1.., help = "BCC recipients")]
    pub(crate) bcc: Vec<String>,
    #[arg(long, num_args = 1.., help = "Reply-to addresses")]
    pub(crate) reply_to: Vec<String>,
    #[arg(long, help = "Schedule send time (ISO 8601)")]
    pub(crate) scheduled_at: Option<String>,
    #[arg(
        long = "tag",
        value_name = "KEY=VALUE",
        num_args = 1..,
        help = "Tags as key=value pairs"
    )]
    pub(crate) tags: Vec<String>,
    #[arg(long, help = "Idempotency key for deduplication")]
    pub(crate) idempotency_key: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct EmailSendBatchArgs {
    #[arg(long, help = "Path to JSON file with email array")]
    pub(crate) file: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct EmailUpdateArgs {
    #[arg(help = "Email ID")]
    pub(crate) id: String,
    #[arg(long, help = "New scheduled time (ISO 8601)")]
    pub(crate) scheduled_at: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DomainCreateArgs {
    #[arg(long, help = "Domain name")]
    pub(crate) name: String,
    #[arg(long, help = "Region (us-east-1, eu-west-1, sa-east-1)")]
    pub(crate) region: Option<String>,
    #[arg(long, help = "Enable open tracking")]
    pub(crate) open_tracking: bool,
    #[arg(long, help = "Enable click tracking")]
    pub(crate) click_tracking: bool,
    #[arg(long, help = "TLS setting (enforced or opportunistic)")]
    pub(crate) tls: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DomainUpdateArgs {
    #[arg(help = "Domain ID")]
    pub(crate) id: String,
    #[arg(long, overrides_with = "no_open_tracking", help = "Enable open tracking")]
    pub(crate) open_tracking: bool,
    #[arg(long, overrides_with = "open_tracking", help = "Disable open tracking")]
    pub(crate) no_open_tracking: bool,
    #[arg(long, overrides_with = "no_click_tracking", help = "Enable click tracking")]
    pub(crate) click_tracking: bool,
    #[arg(long, overrides_with = "click_tracking", help = "Disable click tracking")]
    pub(crate) no_click_tracking: bool,
    #[arg(long, help = "TLS setting (enforced or opportunistic)")]
    pub(crate) tls: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ApiKeyCreateArgs {
    #[arg(long, help = "Name for the API key")]
    pub(crate) name: String,
    #[arg(long, help = "Permission level (full_access or sending_access)")]
    pub(crate) permission: Option<String>,
    #[arg(long, help = "Restrict to a specific domain")]
    pub(crate) domain_id: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct AudienceCreateArgs {
    #[arg(long, help = "Audience name")]
    pub(crate) name: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ContactCreateArgs {
    #[arg(long, help = "Audience ID")]
    pub(crate) audience_id: String,
    #[arg(long, help = "Contact email address")]
    pub(crate) email: String,
    #[arg(long, help = "First name")]
    pub(crate) first_name: Option<String>,
    #[arg(long, help = "Last name")]
    pub(crate) last_name: Option<String>,
    #[arg(long, help = "Mark as unsubscribed")]
    pub(crate) unsubscribed: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ContactListArgs {
    #[arg(long, help = "Audience ID")]
    pub(crate) audience_id: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ContactIdArgs {
    #[arg(help = "Contact ID")]
    pub(crate) id: String,
    #[arg(long, help = "Audience ID")]
    pub(crate) audience_id: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ContactUpdateArgs {
    #[arg(help = "Contact ID")]
    pub(crate) id: String,
    #[arg(long, help = "Audience ID")]
    pub(crate) audience_id: String,
    #[arg(long, help = "First name")]
    pub(crate) first_name: Option<String>,
    #[arg(long, help = "Last name")]
    pub(crate) last_name: Option<String>,
    #[arg(long, overrides_with = "no_unsubscribed", help = "Mark as unsubscribed")]
    pub(crate) unsubscribed: bool,
    #[arg(long, overrides_with = "unsubscribed", help = "Mark as subscribed")]
    pub(crate) no_unsubscribed: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct BroadcastCreateArgs {
    #[arg(long, help = "Audience ID")]
    pub(crate) audience_id: String,
    #[arg(long, help = "Sender email address")]
    pub(crate) from: String,
    #[arg(long, help = "Email subject")]
    pub(crate) subject: String,
    #[arg(long, help = "HTML body")]
    pub(crate) html: Option<String>,
    #[arg(long, help = "Plain text body")]
    pub(crate) text: Option<String>,
    #[arg(long, help = "Broadcast name")]
    pub(crate) name: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct BroadcastUpdateArgs {
    #[arg(help = "Broadcast ID")]
    pub(crate) id: String,
    #[arg(long, help = "Sender email address")]
    pub(crate) from: Option<String>,
    #[arg(long, help = "Email subject")]
    pub(crate) subject: Option<String>,
    #[arg(long, help = "HTML body")]
    pub(crate) html: Option<String>,
    #[arg(long, help = "Plain text body")]
    pub(crate) text: Option<String>,
    #[arg(long, help = "Broadcast name")]
    pub(crate) name: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct BroadcastSendArgs {
    #[arg(help = "Broadcast ID")]
    pub(crate) id: String,
    #[arg(long, help = "Schedule send time (ISO 8601)")]
    pub(crate) scheduled_at: Option<String>,
}

/// Collapse an `--x` / `--no-x` pair into "unset", `true`, or `false`.
pub(crate) const fn flag_pair(enable: bool, disable: bool) -> Option<bool> {
    match (enable, disable) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Failure envelope for a command line clap rejected.
fn usage_envelope(err: &clap::Error) -> Envelope {
    if err.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand {
        return Envelope::failure(MISSING_SUBCOMMAND);
    }
    Envelope::failure(usage_message(err))
}

/// First paragraph of a clap error without the `error: ` prefix.
fn usage_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let text = rendered.trim();
    let text = text.strip_prefix("error: ").unwrap_or(text);
    text.split("\n\n").next().unwrap_or(text).trim().to_string()
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Emails(EmailsCommand::Send(_)) => "emails_send",
        Command::Emails(EmailsCommand::SendBatch(_)) => "emails_send_batch",
        Command::Emails(EmailsCommand::Get(_)) => "emails_get",
        Command::Emails(EmailsCommand::Update(_)) => "emails_update",
        Command::Emails(EmailsCommand::Cancel(_)) => "emails_cancel",
        Command::Domains(DomainsCommand::Create(_)) => "domains_create",
        Command::Domains(DomainsCommand::List) => "domains_list",
        Command::Domains(DomainsCommand::Get(_)) => "domains_get",
        Command::Domains(DomainsCommand::Update(_)) => "domains_update",
        Command::Domains(DomainsCommand::Delete(_)) => "domains_delete",
        Command::Domains(DomainsCommand::Verify(_)) => "domains_verify",
        Command::ApiKeys(ApiKeysCommand::Create(_)) => "api_keys_create",
        Command::ApiKeys(ApiKeysCommand::List) => "api_keys_list",
        Command::ApiKeys(ApiKeysCommand::Delete(_)) => "api_keys_delete",
        Command::Audiences(AudiencesCommand::Create(_)) => "audiences_create",
        Command::Audiences(AudiencesCommand::List) => "audiences_list",
        Command::Audiences(AudiencesCommand::Get(_)) => "audiences_get",
        Command::Audiences(AudiencesCommand::Delete(_)) => "audiences_delete",
        Command::Contacts(ContactsCommand::Create(_)) => "contacts_create",
        Command::Contacts(ContactsCommand::List(_)) => "contacts_list",
        Command::Contacts(ContactsCommand::Get(_)) => "contacts_get",
        Command::Contacts(ContactsCommand::Update(_)) => "contacts_update",
        Command::Contacts(ContactsCommand::Delete(_)) => "contacts_delete",
        Command::Broadcasts(BroadcastsCommand::Create(_)) => "broadcasts_create",
        Command::Broadcasts(BroadcastsCommand::List) => "broadcasts_list",
        Command::Broadcasts(BroadcastsCommand::Get(_)) => "broadcasts_get",
        Command::Broadcasts(BroadcastsCommand::Update(_)) => "broadcasts_update",
        Command::Broadcasts(BroadcastsCommand::Send(_)) => "broadcasts_send",
        Command::Broadcasts(BroadcastsCommand::Delete(_)) => "broadcasts_delete",
    }
}
