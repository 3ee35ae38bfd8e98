pub mod geocoder;
pub mod nominatim;

pub use geocoder::{AddressCompleter, Geocoder, GeocodingError, MIN_QUERY_LEN};
pub use nominatim::{NominatimClient, NominatimClientParams};
