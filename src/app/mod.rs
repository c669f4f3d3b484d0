pub mod usecases;

pub use usecases::PwmOutputActor;
