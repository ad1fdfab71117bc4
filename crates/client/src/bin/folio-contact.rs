//! Submit the contact form from a terminal.
//!
//! ```text
//! folio-contact <name> <email> <phone> <message...>
//! ```
//!
//! `FOLIO_URL` selects the site (default `http://localhost:5000`).

use std::process::ExitCode;

use anyhow::{bail, Context};
use folio_client::{ContactFormController, HttpTransport, SubmitOutcome, Tone};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 4 {
        bail!("usage: folio-contact <name> <email> <phone> <message...>");
    }

    let base_url = std::env::var("FOLIO_URL").unwrap_or_else(|_| "http://localhost:5000".into());
    let transport = HttpTransport::new(&base_url).context("failed to build HTTP client")?;
    tracing::debug!(endpoint = transport.endpoint(), "Submitting contact form");

    let mut controller = ContactFormController::new(transport);
    controller.form.on_name_input(&args[0]);
    controller.form.set_email(args[1].as_str());
    controller.form.set_phone(args[2].as_str());
    controller.form.set_message(args[3..].join(" "));

    let outcome = controller.submit().await;

    if let Some(feedback) = controller.feedback.last() {
        match feedback.tone {
            Tone::Success => println!("{}", feedback.text),
            Tone::Error => eprintln!("{}", feedback.text),
        }
    }

    Ok(match outcome {
        SubmitOutcome::Accepted => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
