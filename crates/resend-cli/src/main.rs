//! Binary entrypoint for the `resend` command.

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    resend_cli::run().await
}
