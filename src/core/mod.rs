pub mod abi;
pub mod app;
pub mod connect;
pub mod contract;
pub mod rpc;

pub use crate::domain::model::{Address, Project, ProjectHash, ProjectStatus, University, U256};
pub use crate::domain::ports::{ConfigProvider, Transport};
pub use crate::utils::error::Result;
