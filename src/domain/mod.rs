// Domain layer: contract return types and ports (interfaces) to the node.

pub mod model;
pub mod ports;
