//! `sign-message`: sign arbitrary text with the configured account.

use clap::Args;

use crate::commands::emit;
use crate::config::AppConfig;
use crate::error::Result;
use crate::invoker::{OutputSink, ResultEnvelope};
use crate::wallet::{derive_credential, sign_message};

pub const EXAMPLE: &str = "Example:\n  stx-agent sign-message \"Hello, agent\" --account-index 0";

#[derive(Debug, Args)]
pub struct SignMessageArgs {
    /// Text to sign
    pub message: String,
}

pub fn run<S: OutputSink>(args: SignMessageArgs, config: &AppConfig, sink: &mut S) -> Result<bool> {
    let credential = derive_credential(&config.wallet, config.network)?;
    let signed = sign_message(&credential, &args.message)?;
    emit(sink, ResultEnvelope::ok("message signed", signed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{config_with_wallet, output};
    use crate::invoker::JsonSink;

    #[test]
    fn test_signature_shape() {
        let mut sink = JsonSink::new(Vec::new());
        let ok = run(
            SignMessageArgs {
                message: "Hello World".to_string(),
            },
            &config_with_wallet(0),
            &mut sink,
        )
        .unwrap();
        assert!(ok);

        let value = output(sink);
        let signature = value["data"]["signature"].as_str().unwrap();
        assert_eq!(signature.len(), 130);
        assert!(signature.ends_with("00") || signature.ends_with("01"));
        assert_eq!(
            value["data"]["address"],
            "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM"
        );
    }
}
