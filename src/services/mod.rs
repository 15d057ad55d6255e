//! Service layer bridging pure domain logic with the collaborator stores.

pub mod game_flow;
