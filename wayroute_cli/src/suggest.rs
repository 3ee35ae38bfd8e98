use clap::Args;

use wayroute_geocoding::{AddressCompleter, NominatimClient};

#[derive(Args)]
pub struct SuggestArgs {
    /// Partial address text
    pub query: String,
}

pub async fn run(args: SuggestArgs) -> anyhow::Result<()> {
    let client = NominatimClient::default();
    let suggestions = client.complete(&args.query).await?;

    if suggestions.is_empty() {
        println!("no suggestions");
        return Ok(());
    }

    for (i, suggestion) in suggestions.iter().enumerate() {
        println!("{:>2}. {}", i + 1, suggestion);
    }

    Ok(())
}
