pub mod pet_friends;

pub use pet_friends::{PetFriends, DEFAULT_BASE_URL};
