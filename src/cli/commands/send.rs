//! Send command handler
//!
//! Emails the plaintext report to a parent. A failed delivery is reported
//! and the command still exits successfully.

use super::report::load_student;
use grade_report::config::Config;
use grade_report::core::mail::{DeliveryStatus, SmtpSender};
use grade_report::core::models::SortOrder;
use grade_report::{error, verbose};
use std::path::Path;

/// Run the send command.
///
/// # Arguments
/// * `input_file` - Path to the student record
/// * `parent_email` - Recipient address
/// * `order` - Transcript ordering
/// * `config` - Configuration with SMTP settings (sender already overridden)
pub fn run(input_file: &Path, parent_email: &str, order: SortOrder, config: &Config) {
    match send(input_file, parent_email, order, config) {
        Ok(DeliveryStatus::Sent) => println!("✓ Report sent to {parent_email}"),
        Ok(DeliveryStatus::Failed(reason)) => eprintln!("✗ Failed to send email: {reason}"),
        Err(err) => {
            error!("Send aborted for {}: {err}", input_file.display());
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

/// Resolve the sender account and credential, then deliver
///
/// Returns `Err` only for problems found before contacting the relay.
fn send(
    input_file: &Path,
    parent_email: &str,
    order: SortOrder,
    config: &Config,
) -> Result<DeliveryStatus, String> {
    let student = load_student(input_file)?;

    let sender_email = config.smtp.sender.as_str();
    if sender_email.is_empty() {
        return Err(
            "✗ No sender address configured. Use --sender or `gradereport config set sender EMAIL`."
                .to_string(),
        );
    }

    let transport =
        SmtpSender::from_config(&config.smtp, sender_email).map_err(|e| format!("✗ {e}"))?;

    verbose!(
        "Sending report for {} via {}:{}",
        student.name,
        transport.host(),
        transport.port()
    );

    Ok(student.send_report(&transport, parent_email, sender_email, order))
}
