//! Batch adult assignment.

use chaperone_core::CalendarGateway;

/// Assign an adult to each of the given events, sequentially. Events already
/// updated stay updated if a later one fails.
pub fn run(event_ids: &[String], adult_email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::configured()?;
    if !config
        .adult_emails
        .iter()
        .any(|e| e.eq_ignore_ascii_case(adult_email))
    {
        return Err(format!("{adult_email} is not on the adult roster").into());
    }

    let gateway = CalendarGateway::new(&config.calendar_id);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let token = super::bearer(&config).await?;
        gateway
            .assign_adult(&token, event_ids, adult_email, &config.adult_emails)
            .await
            .map_err(Box::<dyn std::error::Error>::from)
    })?;

    println!("Assigned {adult_email} to {} event(s)", event_ids.len());
    Ok(())
}
