//! Invite acceptance for the current adult.

use chaperone_core::CalendarGateway;

pub fn run(event_id: &str, email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::configured()?;

    let gateway = CalendarGateway::new(&config.calendar_id);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let token = super::bearer(&config).await?;
        gateway
            .accept_invite(&token, event_id, email)
            .await
            .map_err(Box::<dyn std::error::Error>::from)
    })?;

    println!("Accepted {event_id} as {email}");
    Ok(())
}
