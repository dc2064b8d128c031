//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_shutdown, print_session_starting},
};
use crate::cli_messages::print_failure;
use crate::events::{Event, Source};
use crate::view::{DashboardView, render_text};
use std::error::Error;

/// Prints the dashboard as text after every refresh until Ctrl+C.
///
/// A failed refresh is printed and the loop keeps going. With polling off,
/// a single refresh is printed and the function returns.
pub async fn run_headless_mode(session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session);

    let Some(period) = session.refresh_interval else {
        refresh_once(&session).await;
        print_session_exit_success();
        return Ok(());
    };

    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => refresh_once(&session).await,
            _ = &mut shutdown => break,
        }
    }

    print_session_shutdown();
    print_session_exit_success();
    Ok(())
}

async fn refresh_once(session: &SessionData) {
    match session.controller.refresh().await {
        Ok(snapshot) => {
            let view = DashboardView::from_snapshot(&snapshot);
            println!(
                "{}",
                Event::success(
                    Source::Refresh,
                    format!("loop {}", snapshot.status.loop_count)
                )
            );
            println!("{}", render_text(&view));
        }
        Err(failure) => {
            log::warn!("{}", failure);
            print_failure(&failure);
        }
    }
}
