use clap::Args;
use smsgate_core::{Channel, DeliveryStatus, MsgId, MsgState, OutboundMessage, Urn};
use smsgate_handler::{DeliveryError, HandlerRegistry};

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Destination phone number.
    #[arg(long)]
    pub to: String,
    /// Message text.
    #[arg(long)]
    pub text: String,
    /// Attachment as `content-type:url`; may be repeated.
    #[arg(long)]
    pub attachment: Vec<String>,
    /// Gateway message ID recorded on the status.
    #[arg(long, default_value_t = 1)]
    pub msg_id: i64,
}

pub async fn run(
    registry: &HandlerRegistry,
    channel: &Channel,
    args: &SendArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let urn = Urn::tel(&args.to)?;
    let msg = args.attachment.iter().fold(
        OutboundMessage::new(MsgId::new(args.msg_id), channel.uuid, urn, args.text.as_str()),
        |msg, attachment| msg.with_attachment(attachment.as_str()),
    );

    let (status, failure) = match registry.send_msg(channel, &msg).await {
        Ok(status) => (status, None),
        Err(DeliveryError { status, source }) => (status, Some(source)),
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Text => print_status(&status),
    }

    if let Some(source) = failure {
        return Err(source.into());
    }
    if status.state == MsgState::Errored {
        std::process::exit(1);
    }
    Ok(())
}

fn print_status(status: &DeliveryStatus) {
    println!("Message {}: {}", status.msg_id, status.state);
    if let Some(id) = &status.external_id {
        println!("  external id: {id}");
    }
    for log in &status.logs {
        let code = log
            .status_code
            .map_or_else(|| "-".to_owned(), |c| c.to_string());
        println!(
            "  {} {} {} -> {code} ({:?})",
            log.description, log.method, log.url, log.elapsed
        );
        if let Some(err) = &log.error {
            println!("    {err}");
        }
    }
}
