pub mod address_input;
pub mod coordinator;
pub mod route_view;
pub mod suggestions;
pub mod view_state;

#[cfg(test)]
mod test_support;

pub use address_input::{AddressInputModel, AddressInputSnapshot};
pub use coordinator::{Coordinator, NavigationFlow, Screen};
pub use route_view::{RouteModel, RouteSnapshot};
pub use suggestions::{SuggestionBatch, SuggestionFeed};
pub use view_state::ViewState;
