//! # Settle Command
//!
//! Lists what everyone owes the payee, with a UPI link per debt when the
//! payee has a payment handle.
//!
//! ## Payee Selection
//! - `--payee <id>`: that participant, or `PayeeNotFound`
//! - otherwise: the first participant with a handle, else the first one

use billsplit_core::settlement::{self, resolve_payee};
use billsplit_core::{calculate_splits, Bill};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Builds the settlement and renders it as text.
pub fn settle(bill: &Bill, payee: Option<&str>, config: &AppConfig) -> AppResult<String> {
    let payee_id = match payee {
        Some(id) => id.to_string(),
        None => resolve_payee(&bill.participants, None)
            .map(|p| p.id.clone())
            .ok_or(AppError::EmptyBill)?,
    };
    debug!(%payee_id, "Settling bill");

    let result = calculate_splits(&bill.items, &bill.participants);
    let settlement = settlement::settle(
        &result,
        &bill.participants,
        &payee_id,
        &config.settlement_options(),
    )?;

    let format = config.currency_format();
    let mut lines = vec![format!(
        "{} collects {}",
        settlement.payee_name,
        format.format(settlement.collects)
    )];

    if settlement.debts.is_empty() {
        lines.push("Nobody owes anything.".to_string());
    } else {
        if !settlement.has_payment_requests() {
            lines.push(format!(
                "{} has no UPI ID; collect these directly.",
                settlement.payee_name
            ));
        }
        lines.push(String::new());

        for debt in &settlement.debts {
            lines.push(format!(
                "{} owes {}",
                debt.participant_name,
                format.format(debt.amount)
            ));
            if let Some(request) = &debt.payment_request {
                lines.push(format!("  {}", request.to_uri()));
            }
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out)
}
