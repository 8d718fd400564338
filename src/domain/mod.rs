// Domain layer: typed views of the PetFriends payloads and the ports the suite talks to.

pub mod model;
pub mod ports;
