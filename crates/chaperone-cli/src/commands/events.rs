//! Event views over the shared calendar.

use chrono::{Local, NaiveDateTime};
use clap::{Args, Subcommand};

use chaperone_core::{
    date_counts, filter_events, group_by_day_and_kid, status_counts, AssigneeFilter,
    CalendarEvent, CalendarGateway, FilterCriteria,
};

#[derive(Subcommand)]
pub enum EventsAction {
    /// Flat filtered event list
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Day-by-day agenda grouped by kid
    Agenda {
        #[command(flatten)]
        filters: FilterArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Status and date-window tallies
    Counts,
}

#[derive(Args)]
pub struct FilterArgs {
    /// Status: all, needs-assignment, awaiting-response, confirmed
    #[arg(long, default_value = "all")]
    status: String,
    /// Case-insensitive title search
    #[arg(long, default_value = "")]
    search: String,
    /// Assignee: all, unassigned, or an adult email
    #[arg(long, default_value = "all")]
    assignee: String,
    /// Date window: this-week, next-week, this-month, 7-days, 14-days, 21-days
    #[arg(long)]
    window: Option<String>,
}

impl FilterArgs {
    fn criteria(&self) -> Result<FilterCriteria, Box<dyn std::error::Error>> {
        Ok(FilterCriteria {
            status: self.status.parse()?,
            search: self.search.clone(),
            assignee: AssigneeFilter::from_selection(&self.assignee),
            window: self.window.as_deref().map(str::parse).transpose()?,
        })
    }
}

pub fn run(action: EventsAction) -> Result<(), Box<dyn std::error::Error>> {
    let now = Local::now().naive_local();
    match action {
        EventsAction::List { filters, json } => {
            let criteria = filters.criteria()?;
            let events = fetch_events()?;
            let filtered = filter_events(&events, &criteria, now);
            if json {
                println!("{}", serde_json::to_string_pretty(&filtered)?);
            } else if filtered.is_empty() {
                println!("No events match.");
            } else {
                for event in &filtered {
                    print_event(event);
                }
            }
        }
        EventsAction::Agenda { filters, json } => {
            let criteria = filters.criteria()?;
            let events = fetch_events()?;
            let filtered = filter_events(&events, &criteria, now);
            let days = group_by_day_and_kid(&filtered);
            if json {
                println!("{}", serde_json::to_string_pretty(&days)?);
            } else if days.is_empty() {
                println!("No events match.");
            } else {
                for day in &days {
                    println!("{}", day.label);
                    for group in &day.kid_groups {
                        println!("  {}", group.kid);
                        for event in &group.events {
                            print_agenda_line(event);
                        }
                    }
                }
            }
        }
        EventsAction::Counts => {
            let events = fetch_events()?;
            print_counts(&events, now);
        }
    }
    Ok(())
}

fn fetch_events() -> Result<Vec<CalendarEvent>, Box<dyn std::error::Error>> {
    let config = super::configured()?;
    let gateway = CalendarGateway::new(&config.calendar_id);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let token = super::bearer(&config).await?;
        gateway
            .list_events(&token, &config.adult_emails, &config.kid_names)
            .await
            .map_err(Into::into)
    })
}

fn print_event(event: &CalendarEvent) {
    let kid = event.kid.as_deref().unwrap_or("-");
    let adult = event
        .assigned_adult
        .as_ref()
        .map_or("unassigned", |a| a.name.as_str());
    println!(
        "{}  [{}] {} ({kid}) -> {adult}",
        event.start, event.status, event.title
    );
}

fn print_agenda_line(event: &CalendarEvent) {
    let time = if event.all_day {
        "all-day".to_string()
    } else {
        event.start.format("%H:%M").to_string()
    };
    println!("    {time}  [{}] {}", event.status, event.title);
}

fn print_counts(events: &[CalendarEvent], now: NaiveDateTime) {
    let counts = status_counts(events);
    println!("All: {}", counts.all);
    println!("Needs assignment: {}", counts.needs_assignment);
    println!("Awaiting response: {}", counts.awaiting_response);
    println!("Confirmed: {}", counts.confirmed);
    println!();
    for (option, count) in date_counts(events, now) {
        println!("{}: {count}", option.label());
    }
}
