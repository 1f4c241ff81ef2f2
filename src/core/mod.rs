// Core algorithm exports
pub mod dedupe;
pub mod distance;
pub mod filters;
pub mod rating;
pub mod selector;
pub mod session;
pub mod slug;
pub mod store;

pub use dedupe::dedupe;
pub use distance::{haversine_distance_m, search_radius_m};
pub use filters::{in_bounds, in_range};
pub use rating::average_rating;
pub use selector::{select, select_visible, SelectionResult};
pub use session::{MapEvent, MapSession, Selection};
pub use slug::slugify;
pub use store::{RestaurantStore, StoreError};
