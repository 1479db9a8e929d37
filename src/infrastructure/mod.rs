pub mod factory;
pub mod fixture;
pub mod mock;
pub mod sink;

pub use factory::ServiceFactory;
