use std::io::Read;

use clap::Args;
use smsgate_core::Channel;
use smsgate_handler::HandlerRegistry;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ReceiveArgs {
    /// URL-encoded form body as posted by the provider (`-` reads stdin).
    #[arg(long, default_value = "-")]
    pub body: String,
}

pub fn run(
    registry: &HandlerRegistry,
    channel: &Channel,
    args: &ReceiveArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let body = if args.body == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        args.body.clone()
    };

    let msgs = registry.receive(channel, body.trim())?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&msgs)?),
        OutputFormat::Text => {
            for msg in &msgs {
                println!(
                    "{} from {} at {}: {}",
                    msg.uuid,
                    msg.urn,
                    msg.received_on.to_rfc3339(),
                    msg.text
                );
            }
        }
    }

    Ok(())
}
