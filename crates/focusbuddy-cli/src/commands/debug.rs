use clap::Subcommand;
use focusbuddy_core::FocusApp;

use super::today;

#[derive(Subcommand)]
pub enum DebugAction {
    /// Finish a focus session right now and print the resulting events
    Complete,
}

pub fn run(action: DebugAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = FocusApp::open_configured(today())?;

    match action {
        DebugAction::Complete => {
            let events = app.debug_skip(today());
            println!("{}", serde_json::to_string_pretty(&events)?);
        }
    }
    Ok(())
}
