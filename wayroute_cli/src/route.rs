use std::sync::Arc;

use clap::Args;
use comfy_table::Table;
use tracing::info;

use wayroute_app::{AddressInputModel, NavigationFlow, RouteModel, Screen, ViewState};
use wayroute_directions::OsrmDirectionsClient;
use wayroute_geocoding::NominatimClient;

#[derive(Args)]
pub struct RouteArgs {
    /// Start address
    #[arg(long)]
    pub from: String,

    /// End address
    #[arg(long)]
    pub to: String,
}

pub async fn run(args: RouteArgs) -> anyhow::Result<()> {
    let nominatim = Arc::new(NominatimClient::default());
    let flow = Arc::new(NavigationFlow::new());

    let address_model = AddressInputModel::new(flow.clone(), nominatim.clone(), nominatim);
    address_model.set_start_address(&args.from);
    address_model.set_end_address(&args.to);
    address_model.submit().await;

    if let ViewState::Failed(message) = address_model.state() {
        anyhow::bail!(message);
    }

    let path = flow.subscribe_path().borrow().clone();
    let Some(Screen::RouteView(pair)) = path.last().cloned() else {
        anyhow::bail!("route screen was not activated");
    };

    info!(
        "resolved ({}, {}) -> ({}, {})",
        pair.start.lat, pair.start.lng, pair.end.lat, pair.end.lng
    );

    let route_model = RouteModel::new(Arc::new(OsrmDirectionsClient::default()), pair);
    route_model.load().await;

    let snapshot = route_model.snapshot();
    match snapshot.state {
        ViewState::Loaded => {}
        ViewState::Failed(message) => anyhow::bail!(message),
        other => anyhow::bail!("unexpected route state: {:?}", other),
    }

    if let Some(route) = &snapshot.route {
        println!(
            "{:.1} km, about {} min",
            route.distance / 1000.0,
            (route.duration / 60.0).round() as i64
        );
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Instruction", "Distance (m)", "Lat", "Lng"]);
    for (i, step) in snapshot.steps.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            step.instruction.clone(),
            format!("{:.0}", step.distance),
            format!("{:.5}", step.location.lat),
            format!("{:.5}", step.location.lng),
        ]);
    }
    println!("{table}");

    Ok(())
}
