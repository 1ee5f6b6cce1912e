// Domain layer: record models and ports (interfaces). The parsing engine in
// `crate::parser` depends only on `model`.

pub mod model;
pub mod ports;
