mod shared_actor;

pub use shared_actor::SharedActor;
