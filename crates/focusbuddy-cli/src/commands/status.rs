use focusbuddy_core::FocusApp;

use super::today;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let app = FocusApp::open_configured(today())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
        return Ok(());
    }

    let ledger = app.ledger();
    let rec = ledger.record();
    println!("Level:  {}", rec.level);
    println!("XP:     {}/{}", ledger.xp_into_level(), ledger.xp_per_level());
    println!("Streak: {} days", rec.streak);
    println!("Last session: {}", rec.last_session);
    Ok(())
}
